use super::ContentType;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// A lookup of one item on TMDB
pub struct MediaRequest {
    pub id: u64,
    pub content_type: ContentType,
}

impl MediaRequest {
    /// Returns [None] if `id` is not positive.
    pub fn new(id: i64, content_type: ContentType) -> Option<Self> {
        if id <= 0 {
            return None;
        }
        Some(Self {
            id: id as u64,
            content_type,
        })
    }

    /// The path relative to the API base, e.g. `tv/95557`
    pub fn path(&self) -> String {
        format!("{}/{}", self.content_type, self.id)
    }
}

#[test]
fn test_media_request() {
    let req = MediaRequest::new(95557, ContentType::TvShow).unwrap();
    assert_eq!(req.id, 95557);
    assert_eq!(req.path(), "tv/95557");
    assert!(MediaRequest::new(0, ContentType::Movie).is_none());
    assert!(MediaRequest::new(-3, ContentType::Person).is_none());
}

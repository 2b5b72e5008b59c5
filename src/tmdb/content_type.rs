use std::fmt::Display;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// The kind of media served by TMDB
pub enum ContentType {
    Movie,
    TvShow,
    Person,
}

impl ContentType {
    /// The path segment used by TMDB and by our routes
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::TvShow => "tv",
            Self::Person => "person",
        }
    }
}

impl Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = &'static str;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(Self::Movie),
            "tv" => Ok(Self::TvShow),
            "person" => Ok(Self::Person),
            _ => Err("invalid content type"),
        }
    }
}

#[test]
fn test_content_type() {
    assert_eq!(ContentType::from_str("movie"), Ok(ContentType::Movie));
    assert_eq!(ContentType::from_str("tv"), Ok(ContentType::TvShow));
    assert_eq!(ContentType::from_str("person"), Ok(ContentType::Person));
    assert!(ContentType::from_str("Movie").is_err());
    assert!(ContentType::from_str("album").is_err());
    assert!(ContentType::from_str("").is_err());
    assert_eq!(ContentType::TvShow.to_string(), "tv");
}

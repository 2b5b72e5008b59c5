use super::preclude::*;
use crate::ext::try_err::TryErr3;
use crate::tmdb::{ContentType, MediaRequest};
use std::str::FromStr;

/// Whether the `summary` flag is set in query
fn want_summary(req: &Request<Body>) -> bool {
    match req.uri().query() {
        Some(query) => url::form_urlencoded::parse(query.as_bytes())
            .any(|(k, v)| k == "summary" && v != "0" && v != "false"),
        None => false,
    }
}

pub struct MediaContext {
    ctx: Arc<ServerContext>,
    content_type: String,
    id: String,
}

impl MediaContext {
    pub fn new(ctx: Arc<ServerContext>, content_type: String, id: String) -> Self {
        Self {
            ctx,
            content_type,
            id,
        }
    }

    async fn handle(&self, summary: bool) -> JSONResult {
        let content_type = ContentType::from_str(&self.content_type)
            .map_err(|e| JSONError::from((-400, e)))?;
        let id = self.id.parse::<i64>().try_err3(-400, "Invalid id:")?;
        let media = MediaRequest::new(id, content_type).try_err3(-400, "Invalid id.")?;
        match self.ctx.tmdb.get_details(&media).await {
            Ok(details) => {
                log::info!(
                    target: "tmdb",
                    "Fetched {}: {}",
                    media.path(),
                    details.display_name().unwrap_or("<unnamed>")
                );
                Ok(if summary {
                    details.summary()
                } else {
                    details.into_json()
                })
            }
            Err(e) => {
                log::warn!(target: "tmdb", "Failed to fetch {}: {}", media.path(), e);
                Err(JSONError::from(e))
            }
        }
    }
}

#[async_trait]
impl ResponseJsonFor<Body> for MediaContext {
    async fn response_json(&self, req: Request<Body>) -> Result<Response<JsonValue>, MovigoError> {
        let builder = match self.ctx.cors.filter_http_methods(
            &req,
            &[Method::GET, Method::OPTIONS],
            &[CONTENT_TYPE],
        )? {
            CorsFilter::Next(builder) => builder,
            CorsFilter::Done(res) => return Ok(res),
        };
        let re = self.handle(want_summary(&req)).await;
        self.ctx.response_json_result(builder, re)
    }
}

/// `/<content type>/<id>`
pub struct MediaRoute {
    regex: Regex,
}

impl MediaRoute {
    pub fn new() -> Self {
        Self {
            regex: Regex::new(r"^(/+api)?/+([^/]+)/+([^/]+)/*$").unwrap(),
        }
    }
}

impl MatchRoute<Body, Body> for MediaRoute {
    fn match_route(
        &self,
        ctx: &Arc<ServerContext>,
        req: &Request<Body>,
    ) -> Option<Box<ResponseForType>> {
        let cap = self.regex.captures(req.uri().path())?;
        let content_type = cap.get(2)?.as_str().to_owned();
        let id = cap.get(3)?.as_str().to_owned();
        Some(Box::new(MediaContext::new(Arc::clone(ctx), content_type, id)))
    }
}

#[test]
fn test_want_summary() {
    let req = |uri: &str| Request::builder().uri(uri).body(Body::empty()).unwrap();
    assert!(!want_summary(&req("/tv/1")));
    assert!(want_summary(&req("/tv/1?summary")));
    assert!(want_summary(&req("/tv/1?summary=1")));
    assert!(!want_summary(&req("/tv/1?summary=0")));
    assert!(!want_summary(&req("/tv/1?summary=false")));
}

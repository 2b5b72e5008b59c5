use super::preclude::*;

pub const VERSION: [u8; 4] = [0, 1, 0, 0];

pub struct VersionContext {
    ctx: Arc<ServerContext>,
}

impl VersionContext {
    pub fn new(ctx: Arc<ServerContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl ResponseJsonFor<Body> for VersionContext {
    async fn response_json(&self, req: Request<Body>) -> Result<Response<JsonValue>, MovigoError> {
        let builder = match self.ctx.cors.filter_http_methods(
            &req,
            &[Method::GET, Method::OPTIONS],
            &[CONTENT_TYPE],
        )? {
            CorsFilter::Next(builder) => builder,
            CorsFilter::Done(res) => return Ok(res),
        };
        Ok(builder.body(json::object! {"version": VERSION.to_vec()})?)
    }
}

pub struct VersionRoute {
    regex: Regex,
}

impl VersionRoute {
    pub fn new() -> Self {
        Self {
            regex: Regex::new(r"^(/+api)?/+version(/.*)?$").unwrap(),
        }
    }
}

impl MatchRoute<Body, Body> for VersionRoute {
    fn match_route(
        &self,
        ctx: &Arc<ServerContext>,
        req: &Request<Body>,
    ) -> Option<Box<ResponseForType>> {
        if self.regex.is_match(req.uri().path()) {
            Some(Box::new(VersionContext::new(Arc::clone(ctx))))
        } else {
            None
        }
    }
}

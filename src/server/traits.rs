use super::context::ServerContext;
use crate::error::MovigoError;
use hyper::Body;
use hyper::Request;
use hyper::Response;
use json::JsonValue;
use std::sync::Arc;

pub trait MatchRoute<T, R> {
    fn match_route(
        &self,
        ctx: &Arc<ServerContext>,
        req: &Request<T>,
    ) -> Option<Box<dyn ResponseFor<T, R> + Send + Sync>>;
}

#[async_trait]
pub trait ResponseFor<T, R> {
    async fn response(&self, req: Request<T>) -> Result<Response<R>, MovigoError>;
}

#[async_trait]
pub trait ResponseJsonFor<T> {
    async fn response_json(&self, req: Request<T>) -> Result<Response<JsonValue>, MovigoError>;
}

#[async_trait]
impl<T, U> ResponseFor<T, Body> for U
where
    U: ResponseJsonFor<T> + Sync + Send,
    T: Send + 'static,
{
    async fn response(&self, req: Request<T>) -> Result<Response<Body>, MovigoError> {
        let re = self.response_json(req).await?;
        let (mut parts, body) = re.into_parts();
        parts.headers.insert(
            hyper::header::CONTENT_TYPE,
            "application/json; charset=utf-8".parse()?,
        );
        Ok(Response::from_parts(parts, Body::from(body.to_string())))
    }
}

use super::cors::CorsContext;
use super::result::JSONResult;
use crate::error::MovigoError;
use crate::ext::json::ToJson2;
use crate::tmdb::TmdbClient;
use hyper::{http::response::Builder, Response};
use json::JsonValue;

pub struct ServerContext {
    pub cors: CorsContext,
    pub tmdb: TmdbClient,
}

impl ServerContext {
    pub fn new(cors: CorsContext, tmdb: TmdbClient) -> Self {
        Self { cors, tmdb }
    }

    pub fn response_json_result(
        &self,
        builder: Builder,
        re: JSONResult,
    ) -> Result<Response<JsonValue>, MovigoError> {
        let builder = match &re {
            Ok(_) => builder,
            Err(err) => builder.status(err.status()),
        };
        Ok(builder.body(re.to_json2())?)
    }
}

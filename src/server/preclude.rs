pub use super::context::ServerContext;
pub use super::cors::CorsFilter;
pub use super::result::{JSONError, JSONResult};
pub use super::route::ResponseForType;
pub use super::traits::{MatchRoute, ResponseJsonFor};
pub use crate::error::MovigoError;
pub use hyper::header::CONTENT_TYPE;
pub use hyper::Body;
pub use hyper::Method;
pub use hyper::Request;
pub use hyper::Response;
pub use json::JsonValue;
pub use regex::Regex;
pub use std::sync::Arc;

use crate::error::MovigoError;
use http::header::{
    HeaderName, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN, VARY,
};
use http::response::Builder;
use http::uri::InvalidUri;
use http::uri::Scheme;
use http::{Method, Request, Response, Uri};
use json::JsonValue;
use std::cmp::PartialEq;
use std::convert::TryFrom;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq)]
/// An origin allowed to access the server
pub struct CorsHost {
    host: String,
    port: u16,
    scheme: Scheme,
}

fn default_port(scheme: &Scheme) -> Option<u16> {
    match scheme.as_str() {
        "http" => Some(80),
        "https" => Some(443),
        _ => None,
    }
}

impl CorsHost {
    pub fn new(url: Uri) -> Result<Self, &'static str> {
        match url.host() {
            Some(host) => {
                let scheme = match url.scheme() {
                    Some(scheme) => scheme.to_owned(),
                    None => Scheme::HTTP,
                };
                let port = match url.port() {
                    Some(port) => port.as_u16(),
                    None => default_port(&scheme).ok_or("port not found.")?,
                };
                Ok(Self {
                    host: host.to_owned(),
                    port,
                    scheme,
                })
            }
            None => Err("hostname not found."),
        }
    }
}

impl Display for CorsHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}://{}:{}", self.scheme, self.host, self.port)
    }
}

impl FromStr for CorsHost {
    type Err = CorsHostError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl PartialEq<Uri> for CorsHost {
    fn eq(&self, other: &Uri) -> bool {
        match other.host() {
            Some(host) => {
                let scheme = match other.scheme() {
                    Some(scheme) => scheme.to_owned(),
                    None => Scheme::HTTP,
                };
                let port = match other.port() {
                    Some(port) => port.as_u16(),
                    None => match default_port(&scheme) {
                        Some(port) => port,
                        None => return false,
                    },
                };
                host == self.host && scheme == self.scheme && port == self.port
            }
            None => false,
        }
    }
}

impl PartialEq<CorsHost> for Uri {
    fn eq(&self, other: &CorsHost) -> bool {
        other == self
    }
}

impl PartialEq<str> for CorsHost {
    fn eq(&self, other: &str) -> bool {
        match Uri::from_str(other) {
            Ok(uri) => *self == uri,
            Err(_) => false,
        }
    }
}

impl PartialEq<&str> for CorsHost {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<CorsHost> for &str {
    fn eq(&self, other: &CorsHost) -> bool {
        other == self
    }
}

impl TryFrom<Uri> for CorsHost {
    type Error = &'static str;
    fn try_from(value: Uri) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for CorsHost {
    type Error = CorsHostError;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Ok(Self::try_from(Uri::from_str(value)?)?)
    }
}

#[derive(Debug, derive_more::Display, derive_more::From)]
pub enum CorsHostError {
    String(String),
    InvaildUri(InvalidUri),
}

impl From<&str> for CorsHostError {
    fn from(v: &str) -> Self {
        Self::String(String::from(v))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CorsResult {
    /// The origin is in the allow list
    Allowed,
    /// Every origin is allowed
    AllowedAll,
    NotAllowed,
}

#[derive(Clone, Debug)]
pub struct CorsContext {
    allow_all: bool,
    entries: Vec<CorsHost>,
}

impl CorsContext {
    pub fn new(allow_all: bool, entries: Vec<CorsHost>) -> Self {
        Self { allow_all, entries }
    }

    pub fn matches<S: AsRef<str> + ?Sized>(&self, origin: &S) -> CorsResult {
        if self.allow_all {
            return CorsResult::AllowedAll;
        }
        let origin = origin.as_ref();
        for entry in self.entries.iter() {
            if entry == origin {
                return CorsResult::Allowed;
            }
        }
        CorsResult::NotAllowed
    }

    /// Filter request methods and apply CORS headers.
    ///
    /// * `methods` - Allowed methods. `OPTIONS` in the list enables preflight handling.
    /// * `allow_headers` - Sent as `Access-Control-Allow-Headers` in preflight responses.
    ///
    /// Returns [CorsFilter::Done] if the response is already decided.
    pub fn filter_http_methods<T>(
        &self,
        req: &Request<T>,
        methods: &[Method],
        allow_headers: &[HeaderName],
    ) -> Result<CorsFilter, MovigoError> {
        let allow = methods
            .iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        if !methods.contains(req.method()) {
            return Ok(CorsFilter::Done(
                Response::builder()
                    .status(405)
                    .header("Allow", allow.as_str())
                    .body(json::object! {})?,
            ));
        }
        let origin = req
            .headers()
            .get(ORIGIN)
            .and_then(|o| o.to_str().ok())
            .map(|o| o.to_owned());
        if req.method() == Method::OPTIONS {
            let builder = Response::builder().header("Allow", allow.as_str());
            let builder = match origin {
                Some(origin) => {
                    let allow_origin = match self.matches(&origin) {
                        CorsResult::Allowed => origin,
                        CorsResult::AllowedAll => String::from("*"),
                        CorsResult::NotAllowed => {
                            return Ok(CorsFilter::Done(builder.status(400).body(json::object! {})?));
                        }
                    };
                    let headers = allow_headers
                        .iter()
                        .map(|h| h.as_str())
                        .collect::<Vec<_>>()
                        .join(", ");
                    let mut builder = builder
                        .header(ACCESS_CONTROL_ALLOW_ORIGIN, allow_origin)
                        .header(ACCESS_CONTROL_ALLOW_METHODS, allow.as_str())
                        .header(VARY, "Origin");
                    if !headers.is_empty() {
                        builder = builder.header(ACCESS_CONTROL_ALLOW_HEADERS, headers);
                    }
                    builder
                }
                None => builder,
            };
            return Ok(CorsFilter::Done(builder.status(200).body(json::object! {})?));
        }
        let builder = Response::builder();
        let builder = match origin {
            Some(origin) => match self.matches(&origin) {
                CorsResult::Allowed => builder
                    .header(ACCESS_CONTROL_ALLOW_ORIGIN, origin)
                    .header(VARY, "Origin"),
                CorsResult::AllowedAll => builder.header(ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
                CorsResult::NotAllowed => {
                    return Ok(CorsFilter::Done(builder.status(403).body(json::object! {})?));
                }
            },
            None => builder,
        };
        Ok(CorsFilter::Next(builder))
    }
}

impl Default for CorsContext {
    fn default() -> Self {
        Self::new(false, vec![])
    }
}

/// Result of [CorsContext::filter_http_methods]
pub enum CorsFilter {
    /// Continue handling the request with this builder
    Next(Builder),
    /// Send this response
    Done(Response<JsonValue>),
}

use super::{MediaDetails, MediaRequest, TmdbError};
use crate::error::MovigoError;
use json::JsonValue;
use reqwest::{Client, Response};
use std::time::Duration;
use url::Url;

/// Default TMDB API v3 endpoint
pub const TMDB_BASE: &str = "https://api.themoviedb.org/3/";

/// A client for TMDB API v3
pub struct TmdbClient {
    client: Client,
    /// API base, always ends with `/`
    base: Url,
    /// API v3 auth key
    api_key: String,
    language: String,
}

impl TmdbClient {
    /// * `api_key` - API v3 auth key
    /// * `base` - API base url, e.g. [TMDB_BASE]
    /// * `language` - Passed to TMDB as `language`, e.g. `en-US`
    /// * `timeout` - Timeout of the whole request
    pub fn new<K: AsRef<str> + ?Sized, B: AsRef<str> + ?Sized, L: AsRef<str> + ?Sized>(
        api_key: &K,
        base: &B,
        language: &L,
        timeout: Option<Duration>,
    ) -> Result<Self, MovigoError> {
        let mut base = base.as_ref().to_owned();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base = Url::parse(&base)?;
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base,
            api_key: api_key.as_ref().to_owned(),
            language: language.as_ref().to_owned(),
        })
    }

    /// The url to fetch details of `req`. Contains the API key.
    pub fn details_url(&self, req: &MediaRequest) -> Result<Url, url::ParseError> {
        let mut url = self.base.join(&req.path())?;
        url.query_pairs_mut()
            .append_pair("api_key", &self.api_key)
            .append_pair("language", &self.language);
        Ok(url)
    }

    /// Fetch details of a movie, tv show or person.
    ///
    /// Errors never carry the request url, as it contains the API key.
    pub async fn get_details(&self, req: &MediaRequest) -> Result<MediaDetails, MovigoError> {
        let url = self.details_url(req)?;
        log::debug!(target: "tmdb", "Fetching {}{}", self.base, req.path());
        let res = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| e.without_url())?;
        let data = handle_error(res).await?;
        Ok(MediaDetails::new(req.content_type, data))
    }
}

pub async fn handle_error(res: Response) -> Result<JsonValue, MovigoError> {
    let status = res.status();
    let text = res.text().await.map_err(|e| e.without_url())?;
    match json::parse(&text) {
        Ok(obj) => {
            if status.is_success() {
                Ok(obj)
            } else {
                Err(MovigoError::from(TmdbError::from_response(
                    status.as_u16(),
                    &obj,
                )))
            }
        }
        Err(e) => {
            if status.is_success() {
                Err(MovigoError::from(e))
            } else {
                Err(MovigoError::from(TmdbError::HTTP {
                    status: status.as_u16(),
                }))
            }
        }
    }
}

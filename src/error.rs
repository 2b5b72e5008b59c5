use crate::tmdb::TmdbError;

#[derive(Debug, derive_more::Display, derive_more::From)]
pub enum MovigoError {
    String(String),
    Hyper(hyper::Error),
    HTTP(http::Error),
    IOError(std::io::Error),
    DbError(crate::db::MovigoDbError),
    Tmdb(TmdbError),
    JSONError(json::Error),
    ParseIntError(std::num::ParseIntError),
    ReqwestError(reqwest::Error),
    UrlError(url::ParseError),
    RandError(rand::Error),
}

impl std::error::Error for MovigoError {}

impl From<&str> for MovigoError {
    fn from(p: &str) -> Self {
        Self::String(String::from(p))
    }
}

impl From<http::header::InvalidHeaderValue> for MovigoError {
    fn from(v: http::header::InvalidHeaderValue) -> Self {
        Self::HTTP(http::Error::from(v))
    }
}

impl From<crate::db::SqliteError> for MovigoError {
    fn from(e: crate::db::SqliteError) -> Self {
        Self::DbError(Box::new(e))
    }
}

pub mod client;
pub mod content_type;
pub mod details;
pub mod error;
pub mod media;

pub use client::{TmdbClient, TMDB_BASE};
pub use content_type::ContentType;
pub use details::MediaDetails;
pub use error::TmdbError;
pub use media::MediaRequest;

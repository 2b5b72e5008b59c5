pub mod db;
pub mod error;

pub use db::MovigoSqlite;
pub use error::SqliteError;

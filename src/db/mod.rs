pub mod config;
pub mod sqlite;
pub mod token;
pub mod traits;

pub use config::check_db_config;
pub use config::MovigoDbConfig;
pub use config::MovigoSqliteConfig;
pub use sqlite::{MovigoSqlite, SqliteError};
pub use token::Token;
pub use traits::MovigoDb;
pub type MovigoDbError = Box<dyn std::error::Error + Send + Sync>;

/// Open the database
pub fn open_database<R: AsRef<MovigoDbConfig> + ?Sized>(
    cfg: &R,
) -> Result<Box<dyn MovigoDb + Send + Sync>, MovigoDbError> {
    match cfg.as_ref() {
        MovigoDbConfig::Sqlite(_) => Ok(Box::new(MovigoSqlite::new(cfg)?)),
    }
}

/// Open the database and initialize it (apply schema, check connection)
pub async fn open_and_init_database<R: AsRef<MovigoDbConfig> + ?Sized>(
    cfg: &R,
) -> Result<Box<dyn MovigoDb + Send + Sync>, MovigoDbError> {
    let db = open_database(cfg)?;
    db.init().await?;
    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_and_init_database() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = MovigoDbConfig::default();
        cfg.set_path(&dir.path().join("client-access.db").to_string_lossy());
        cfg.set_schema(concat!(env!("CARGO_MANIFEST_DIR"), "/init-tables.sql"));
        let db = open_and_init_database(&cfg).await.unwrap();
        let token = Token::generate().unwrap();
        db.add_token(&token).await.unwrap();
        assert!(db.add_token(&token).await.is_err());
        db.add_token(&Token::generate().unwrap()).await.unwrap();
        cfg.set_schema(&dir.path().join("missing.sql").to_string_lossy());
        assert!(open_and_init_database(&cfg).await.is_err());
    }
}

#[derive(Debug, derive_more::Display, derive_more::From)]
pub enum SqliteError {
    DbError(rusqlite::Error),
    #[display(fmt = "Failed to read schema file: {}", _0)]
    SchemaIo(std::io::Error),
    #[display(fmt = "Invalid schema: {}", _0)]
    #[from(ignore)]
    InvalidSchema(String),
    #[display(fmt = "Database is not initialized.")]
    NotInitialized,
    #[display(fmt = "Database lock is poisoned.")]
    LockPoisoned,
    #[display(fmt = "Token already exists.")]
    TokenAlreadyExists,
}

impl std::error::Error for SqliteError {}

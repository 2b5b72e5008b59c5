use super::MovigoDbConfig;
use super::MovigoDbError;
use super::Token;

#[async_trait]
pub trait MovigoDb {
    /// Create a new instance of database
    /// * `cfg` - The database configuration
    fn new<R: AsRef<MovigoDbConfig> + ?Sized>(cfg: &R) -> Result<Self, MovigoDbError>
    where
        Self: Sized + Send + Sync;
    /// Add a token to database.
    /// * `token` - The token
    ///
    /// Fails if the token is already present.
    async fn add_token(&self, token: &Token) -> Result<(), MovigoDbError>;
    /// Initialize the database (create tables, check connection)
    async fn init(&self) -> Result<(), MovigoDbError>;
}

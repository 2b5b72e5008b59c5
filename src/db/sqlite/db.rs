use super::super::{MovigoDb, MovigoDbConfig, MovigoDbError, MovigoSqliteConfig, Token};
use super::SqliteError;
use rusqlite::{ffi, params, Connection, ErrorCode, OpenFlags};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

const TOKENS_COLUMNS: [&str; 2] = ["token", "created_at"];

pub struct MovigoSqlite {
    db: Mutex<Connection>,
    /// The path of the schema file
    schema: String,
    /// true if schema is applied and connection is checked
    inited: AtomicBool,
}

impl MovigoSqlite {
    fn _new(cfg: &MovigoSqliteConfig) -> Result<Self, SqliteError> {
        let con = Connection::open_with_flags(
            &cfg.path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_FULL_MUTEX
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_URI,
        )?;
        log::debug!(target: "db", "Opened database {}", cfg.path);
        Ok(Self {
            db: Mutex::new(con),
            schema: cfg.schema.clone(),
            inited: AtomicBool::new(false),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, SqliteError> {
        self.db.lock().map_err(|_| SqliteError::LockPoisoned)
    }

    fn _add_token(&self, token: &Token) -> Result<(), SqliteError> {
        if !self.inited.load(Ordering::Acquire) {
            return Err(SqliteError::NotInitialized);
        }
        let mut con = self.lock()?;
        let tx = con.transaction()?;
        {
            let mut stmt = tx.prepare("INSERT INTO tokens (token, created_at) VALUES (?, ?);")?;
            match stmt.execute(params![token.token, token.created_at]) {
                Ok(_) => {}
                Err(rusqlite::Error::SqliteFailure(e, _))
                    if e.code == ErrorCode::ConstraintViolation
                        && (e.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                            || e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE) =>
                {
                    return Err(SqliteError::TokenAlreadyExists);
                }
                Err(e) => return Err(SqliteError::from(e)),
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn _check_tokens_table(con: &Connection) -> Result<(), SqliteError> {
        let mut stmt = con.prepare("SELECT name FROM pragma_table_info('tokens');")?;
        let columns = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        if columns.is_empty() {
            return Err(SqliteError::InvalidSchema(String::from(
                "table tokens is missing",
            )));
        }
        for col in TOKENS_COLUMNS {
            if !columns.iter().any(|c| c == col) {
                return Err(SqliteError::InvalidSchema(format!(
                    "column tokens.{} is missing",
                    col
                )));
            }
        }
        Ok(())
    }

    fn _init(&self) -> Result<(), SqliteError> {
        let schema = std::fs::read_to_string(&self.schema)?;
        let con = self.lock()?;
        con.execute_batch(&schema)?;
        Self::_check_tokens_table(&con)?;
        con.query_row("SELECT 1;", [], |row| row.get::<_, i64>(0))?;
        self.inited.store(true, Ordering::Release);
        log::debug!(target: "db", "Applied schema {}", self.schema);
        Ok(())
    }
}

#[async_trait]
impl MovigoDb for MovigoSqlite {
    fn new<R: AsRef<MovigoDbConfig> + ?Sized>(cfg: &R) -> Result<Self, MovigoDbError> {
        match cfg.as_ref() {
            MovigoDbConfig::Sqlite(cfg) => Ok(Self::_new(cfg)?),
        }
    }

    async fn add_token(&self, token: &Token) -> Result<(), MovigoDbError> {
        Ok(self._add_token(token)?)
    }

    async fn init(&self) -> Result<(), MovigoDbError> {
        Ok(self._init()?)
    }
}

#[cfg(test)]
impl MovigoSqlite {
    fn count_tokens(&self) -> i64 {
        self.lock()
            .unwrap()
            .query_row("SELECT COUNT(*) FROM tokens;", [], |row| row.get(0))
            .unwrap()
    }

    fn get_token(&self, token: &str) -> Vec<Token> {
        let con = self.lock().unwrap();
        let mut stmt = con
            .prepare("SELECT token, created_at FROM tokens WHERE token = ?;")
            .unwrap();
        let rows = stmt
            .query_map([token], |row| Ok(Token::new(&row.get::<_, String>(0)?, row.get(1)?)))
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        rows
    }

    fn columns(&self) -> Vec<String> {
        let con = self.lock().unwrap();
        let mut stmt = con
            .prepare("SELECT name FROM pragma_table_info('tokens');")
            .unwrap();
        let rows = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::Arc;
    use tempfile::TempDir;

    const SCHEMA: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/init-tables.sql");

    fn config(dir: &TempDir) -> MovigoSqliteConfig {
        MovigoSqliteConfig {
            path: dir.path().join("client-access.db").to_string_lossy().into_owned(),
            schema: SCHEMA.to_owned(),
        }
    }

    fn open(cfg: &MovigoSqliteConfig) -> MovigoSqlite {
        let db = MovigoSqlite::_new(cfg).unwrap();
        db._init().unwrap();
        db
    }

    #[test]
    fn test_init_creates_table() {
        let dir = TempDir::new().unwrap();
        let cfg = config(&dir);
        assert!(!Path::new(&cfg.path).exists());
        let db = open(&cfg);
        assert!(Path::new(&cfg.path).exists());
        assert_eq!(db.columns(), vec!["token", "created_at"]);
        assert_eq!(db.count_tokens(), 0);
    }

    #[test]
    fn test_init_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let cfg = config(&dir);
        let token = Token::generate().unwrap();
        {
            let db = open(&cfg);
            db._add_token(&token).unwrap();
        }
        let db = open(&cfg);
        db._init().unwrap();
        assert_eq!(db.count_tokens(), 1);
        assert_eq!(db.get_token(&token.token), vec![token]);
    }

    #[test]
    fn test_recreating_schema_resets_tokens() {
        let dir = TempDir::new().unwrap();
        let mut cfg = config(&dir);
        let db = open(&cfg);
        db._add_token(&Token::generate().unwrap()).unwrap();
        drop(db);
        let schema = dir.path().join("reset.sql");
        std::fs::write(
            &schema,
            "DROP TABLE IF EXISTS tokens;\n\
             CREATE TABLE tokens (token TEXT PRIMARY KEY NOT NULL, created_at INTEGER NOT NULL);",
        )
        .unwrap();
        cfg.schema = schema.to_string_lossy().into_owned();
        let db = open(&cfg);
        assert_eq!(db.count_tokens(), 0);
    }

    #[test]
    fn test_init_missing_schema() {
        let dir = TempDir::new().unwrap();
        let mut cfg = config(&dir);
        cfg.schema = dir.path().join("missing.sql").to_string_lossy().into_owned();
        let db = MovigoSqlite::_new(&cfg).unwrap();
        assert!(matches!(db._init(), Err(SqliteError::SchemaIo(_))));
        assert!(matches!(
            db._add_token(&Token::generate().unwrap()),
            Err(SqliteError::NotInitialized)
        ));
    }

    #[test]
    fn test_init_malformed_schema() {
        let dir = TempDir::new().unwrap();
        let mut cfg = config(&dir);
        let schema = dir.path().join("bad.sql");
        std::fs::write(&schema, "CREATE TABL tokens (token TEXT);").unwrap();
        cfg.schema = schema.to_string_lossy().into_owned();
        let db = MovigoSqlite::_new(&cfg).unwrap();
        assert!(matches!(db._init(), Err(SqliteError::DbError(_))));
        std::fs::write(&schema, "CREATE TABLE IF NOT EXISTS other (id INTEGER);").unwrap();
        assert!(matches!(db._init(), Err(SqliteError::InvalidSchema(_))));
        std::fs::write(&schema, "CREATE TABLE IF NOT EXISTS tokens (token TEXT PRIMARY KEY);")
            .unwrap();
        assert!(matches!(db._init(), Err(SqliteError::InvalidSchema(_))));
    }

    #[test]
    fn test_init_unopenable_path() {
        let dir = TempDir::new().unwrap();
        let mut cfg = config(&dir);
        cfg.path = dir
            .path()
            .join("no/such/dir/client-access.db")
            .to_string_lossy()
            .into_owned();
        assert!(matches!(
            MovigoSqlite::_new(&cfg),
            Err(SqliteError::DbError(_))
        ));
    }

    #[test]
    fn test_write_token() {
        let dir = TempDir::new().unwrap();
        let db = open(&config(&dir));
        let token = Token::generate().unwrap();
        db._add_token(&token).unwrap();
        assert_eq!(db.get_token(&token.token), vec![token]);
        assert_eq!(db.count_tokens(), 1);
    }

    #[test]
    fn test_write_duplicate_token() {
        let dir = TempDir::new().unwrap();
        let db = open(&config(&dir));
        let token = Token::new("00ff", 1000);
        db._add_token(&token).unwrap();
        let dup = Token::new("00ff", 2000);
        assert!(matches!(
            db._add_token(&dup),
            Err(SqliteError::TokenAlreadyExists)
        ));
        assert_eq!(db.get_token("00ff"), vec![token]);
        assert_eq!(db.count_tokens(), 1);
    }

    #[test]
    fn test_write_check_violation() {
        let dir = TempDir::new().unwrap();
        let mut cfg = config(&dir);
        let schema = dir.path().join("check.sql");
        std::fs::write(
            &schema,
            "CREATE TABLE IF NOT EXISTS tokens (token TEXT PRIMARY KEY NOT NULL, \
             created_at INTEGER NOT NULL CHECK (created_at > 0));",
        )
        .unwrap();
        cfg.schema = schema.to_string_lossy().into_owned();
        let db = open(&cfg);
        assert!(matches!(
            db._add_token(&Token::new("00ff", -1)),
            Err(SqliteError::DbError(_))
        ));
        assert_eq!(db.count_tokens(), 0);
        db._add_token(&Token::new("00ff", 1)).unwrap();
        assert!(matches!(
            db._add_token(&Token::new("00ff", 2)),
            Err(SqliteError::TokenAlreadyExists)
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writes() {
        let dir = TempDir::new().unwrap();
        let cfg = config(&dir);
        let db = Arc::new(open(&cfg));
        let mut tasks = Vec::new();
        for _ in 0..64 {
            let db = Arc::clone(&db);
            tasks.push(tokio::spawn(async move {
                let token = Token::generate().unwrap();
                db.add_token(&token).await.unwrap();
                token
            }));
        }
        let mut written = Vec::new();
        for task in tasks {
            written.push(task.await.unwrap());
        }
        assert_eq!(db.count_tokens(), 64);
        for token in written {
            assert_eq!(db.get_token(&token.token).len(), 1);
        }
    }
}

use crate::ext::try_err::TryErr;
use json::JsonValue;

#[derive(Clone, Debug)]
pub struct MovigoSqliteConfig {
    /// The path of database file
    pub path: String,
    /// The path of the SQL script which creates the tables
    pub schema: String,
}

impl Default for MovigoSqliteConfig {
    fn default() -> Self {
        Self {
            path: "client-access.db".to_string(),
            schema: "init-tables.sql".to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub enum MovigoDbConfig {
    Sqlite(MovigoSqliteConfig),
}

#[derive(Debug)]
pub enum MovigoDbConfigError {
    UnkonwnDbType,
    MissingField(String),
}

impl std::fmt::Display for MovigoDbConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnkonwnDbType => write!(f, "Unknown database type."),
            Self::MissingField(s) => write!(f, "Missing field: {}", s),
        }
    }
}

impl MovigoDbConfig {
    /// Parse database configuration from config file.
    ///
    /// `schema` is optional and falls back to `init-tables.sql`.
    pub fn new(value: &JsonValue) -> Result<Self, MovigoDbConfigError> {
        let db_type = value["type"]
            .as_str()
            .try_err(MovigoDbConfigError::UnkonwnDbType)?;
        match db_type {
            "sqlite" => {
                let path = value["path"]
                    .as_str()
                    .try_err(MovigoDbConfigError::MissingField("path".to_string()))?;
                let mut cfg = MovigoSqliteConfig {
                    path: path.to_string(),
                    ..Default::default()
                };
                if let Some(schema) = value["schema"].as_str() {
                    cfg.schema = schema.to_string();
                }
                Ok(Self::Sqlite(cfg))
            }
            _ => Err(MovigoDbConfigError::UnkonwnDbType),
        }
    }

    pub fn set_path<S: AsRef<str> + ?Sized>(&mut self, path: &S) {
        match self {
            Self::Sqlite(cfg) => cfg.path = path.as_ref().to_owned(),
        }
    }

    pub fn set_schema<S: AsRef<str> + ?Sized>(&mut self, schema: &S) {
        match self {
            Self::Sqlite(cfg) => cfg.schema = schema.as_ref().to_owned(),
        }
    }
}

impl AsRef<MovigoDbConfig> for MovigoDbConfig {
    fn as_ref(&self) -> &MovigoDbConfig {
        self
    }
}

impl Default for MovigoDbConfig {
    fn default() -> Self {
        Self::Sqlite(MovigoSqliteConfig::default())
    }
}

pub fn check_db_config(value: &JsonValue) -> bool {
    MovigoDbConfig::new(value).is_ok()
}

#[test]
fn test_db_config() {
    let cfg = MovigoDbConfig::new(&json::object! {"type": "sqlite", "path": "a.db"}).unwrap();
    let MovigoDbConfig::Sqlite(cfg) = cfg;
    assert_eq!(cfg.path, "a.db");
    assert_eq!(cfg.schema, "init-tables.sql");
    let cfg = MovigoDbConfig::new(&json::object! {
        "type": "sqlite",
        "path": "b.db",
        "schema": "sql/schema.sql",
    })
    .unwrap();
    let MovigoDbConfig::Sqlite(cfg) = cfg;
    assert_eq!(cfg.schema, "sql/schema.sql");
    assert!(!check_db_config(&json::object! {"type": "sqlite"}));
    assert!(!check_db_config(&json::object! {"type": "mysql", "path": "a"}));
    assert!(!check_db_config(&json::JsonValue::Null));
}

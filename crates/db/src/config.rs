use std::path::PathBuf;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://meal_max.db";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_SCHEMA_SCRIPT_PATH: &str = "/app/sql/create_meal_table.sql";

/// Catalog configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// SQLite connection URL used by [`create_pool_from`](crate::create_pool_from).
    pub database_url: String,
    /// Upper bound for the pool built by [`create_pool_from`](crate::create_pool_from).
    pub max_connections: u32,
    /// DDL script executed by `reset_all` to drop and recreate the table.
    pub schema_script_path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be a positive integer, got '{value}'")]
    InvalidNumber { key: &'static str, value: String },
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            schema_script_path: PathBuf::from(DEFAULT_SCHEMA_SCRIPT_PATH),
        }
    }
}

impl CatalogConfig {
    /// Load a `.env` file if present, then read the environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                          |
    /// |-------------------------|----------------------------------|
    /// | `DATABASE_URL`          | `sqlite://meal_max.db`           |
    /// | `DB_MAX_CONNECTIONS`    | `5`                              |
    /// | `SQL_CREATE_TABLE_PATH` | `/app/sql/create_meal_table.sql` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(value) => match value.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        key: "DB_MAX_CONNECTIONS",
                        value,
                    })
                }
            },
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let schema_script_path = lookup("SQL_CREATE_TABLE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SCHEMA_SCRIPT_PATH));

        Ok(Self {
            database_url,
            max_connections,
            schema_script_path,
        })
    }

    pub fn with_schema_script_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.schema_script_path = path.into();
        self
    }
}

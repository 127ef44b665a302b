use serde::{Deserialize, Serialize};

use crate::error::{OrmError, Result};
use crate::table::Schema;

/// How execution failures reach the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorMode {
    /// Every failure is returned as an [`OrmError`].
    #[default]
    Strict,
    /// Failures while preparing or running a statement are logged and
    /// discarded: statements report zero affected rows and queries return no
    /// records. Configuration errors still fail.
    Lenient,
}

/// SQLite database configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SqliteConfig {
    /// Path to the SQLite database file. Created on open if absent.
    pub db_path: String,
    /// Tables created on open. Registered in code, never deserialized.
    #[serde(skip)]
    pub schema: Schema,
    #[serde(default)]
    pub error_mode: ErrorMode,
}

impl SqliteConfig {
    /// Create a new SQLite config with path and schema
    pub fn new(db_path: impl Into<String>, schema: Schema) -> Self {
        Self {
            db_path: db_path.into(),
            schema,
            error_mode: ErrorMode::default(),
        }
    }

    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_error_mode(mut self, error_mode: ErrorMode) -> Self {
        self.error_mode = error_mode;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.db_path.trim().is_empty() {
            return Err(OrmError::InvalidConfig(
                "database path must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

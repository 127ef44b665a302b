//! Error types for the mapper.

use thiserror::Error;

/// Errors surfaced by the mapper and the repository operations.
#[derive(Debug, Error)]
pub enum OrmError {
    /// Empty or otherwise unusable configuration. Always fatal, regardless of
    /// the configured [`ErrorMode`](crate::config::ErrorMode).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A stored value could not be converted into the record's field type.
    #[error("Cannot map column '{column}': {source}")]
    Mapping {
        column: String,
        #[source]
        source: ConversionError,
    },

    /// The match filter of an upsert has no predicate, so an `UPDATE` would
    /// rewrite every row of the table.
    #[error("Match filter for table '{0}' has no predicate")]
    UnrestrictedUpdate(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure converting a [`Value`](crate::value::Value) into a Rust type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("integer {0} does not fit in 32 bits")]
    OutOfRange(i64),

    #[error("invalid datetime '{0}'")]
    InvalidDateTime(String),
}

pub type Result<T> = std::result::Result<T, OrmError>;

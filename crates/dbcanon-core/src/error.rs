//! Error types for dbcanon

use thiserror::Error;

/// Core error type for introspection and canonicalization
#[derive(Error, Debug)]
pub enum DbCanonError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// A declared column type matched no known category.
    #[error("invalid data type table: {table} column: {column} type: {data_type}")]
    Classification {
        table: String,
        column: String,
        data_type: String,
    },

    #[error("Unknown object kind: {0}")]
    UnknownObjectKind(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DbCanonError {
    pub fn classification(
        table: impl Into<String>,
        column: impl Into<String>,
        data_type: impl Into<String>,
    ) -> Self {
        DbCanonError::Classification {
            table: table.into(),
            column: column.into(),
            data_type: data_type.into(),
        }
    }
}

/// Result type alias for dbcanon operations
pub type Result<T> = std::result::Result<T, DbCanonError>;

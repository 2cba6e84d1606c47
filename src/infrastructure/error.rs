//! Infrastructure-level errors (storage failures)

use std::path::PathBuf;

use thiserror::Error;

/// Storage errors raised by the client store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("cannot open database {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("cannot create database directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("tax id already registered: {tax_id}")]
    UniqueConstraintViolation { tax_id: String },

    #[error("corrupt row in client table: {message}")]
    CorruptRow { message: String },

    #[error("database error: {context}")]
    Sqlite {
        context: String,
        #[source]
        source: rusqlite::Error,
    },
}

impl StoreError {
    /// Create a SQLite error with context.
    pub fn sqlite(context: impl Into<String>, source: rusqlite::Error) -> Self {
        Self::Sqlite {
            context: context.into(),
            source,
        }
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

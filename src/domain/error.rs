//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent business rule violations on operator input.
/// These are independent of storage concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid tax id format: '{0}' (use 123.456.789-09 or 12345678909)")]
    InvalidTaxIdFormat(String),

    #[error("client name must not be empty")]
    EmptyName,
}

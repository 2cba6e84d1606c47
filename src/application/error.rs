//! Application-level errors (wraps domain and storage errors)

use thiserror::Error;

use crate::domain::{Client, DomainError};
use crate::infrastructure::StoreError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("tax id already registered: {}", existing.tax_id.formatted())]
    DuplicateTaxId { existing: Client },

    #[error("storage failure")]
    Storage(#[from] StoreError),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

/// Render an error with all of its sources, `outer: inner: root`.
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::StoreError;

    #[test]
    fn given_nested_error_when_rendering_chain_then_joins_sources() {
        let err = ApplicationError::OperationFailed {
            context: "read client name".into(),
            source: Box::new(std::io::Error::new(std::io::ErrorKind::Other, "tty closed")),
        };
        assert_eq!(
            error_chain(&err),
            "operation failed: read client name: tty closed"
        );
    }

    #[test]
    fn given_unique_violation_when_wrapped_then_reports_as_storage_failure() {
        let err = ApplicationError::from(StoreError::UniqueConstraintViolation {
            tax_id: "12345678909".into(),
        });
        assert!(matches!(err, ApplicationError::Storage(_)));
        assert_eq!(
            error_chain(&err),
            "storage failure: tax id already registered: 12345678909"
        );
    }
}

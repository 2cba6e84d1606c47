//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Application(#[from] ApplicationError),

    #[error("no client registered with tax id {0}")]
    NotFound(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound(_) => crate::exitcode::NOINPUT,
            CliError::Application(e) => match e {
                ApplicationError::Domain(_) | ApplicationError::DuplicateTaxId { .. } => {
                    crate::exitcode::DATAERR
                }
                ApplicationError::Storage(_) | ApplicationError::OperationFailed { .. } => {
                    crate::exitcode::IOERR
                }
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use crate::infrastructure::StoreError;

    #[test]
    fn given_errors_when_mapping_exit_codes_then_uses_sysexits() {
        let format = CliError::from(ApplicationError::from(DomainError::InvalidTaxIdFormat(
            "123".into(),
        )));
        assert_eq!(format.exit_code(), crate::exitcode::DATAERR);

        let storage = CliError::from(ApplicationError::from(
            StoreError::UniqueConstraintViolation {
                tax_id: "12345678909".into(),
            },
        ));
        assert_eq!(storage.exit_code(), crate::exitcode::IOERR);

        let config = CliError::from(ApplicationError::Config {
            message: "bad".into(),
        });
        assert_eq!(config.exit_code(), crate::exitcode::CONFIG);

        assert_eq!(
            CliError::NotFound("00000000000".into()).exit_code(),
            crate::exitcode::NOINPUT
        );
    }
}

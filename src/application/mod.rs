//! Application layer: services and the interactive controller
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod controller;
pub mod error;
pub mod error_ext;
pub mod services;

pub use controller::{MenuChoice, RegistrationController, SessionSummary, EXIT_KEYWORD};
pub use error::{error_chain, ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;

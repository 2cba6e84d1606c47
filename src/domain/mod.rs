//! Domain layer: entities and business rules
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod tax_id;

pub use entities::{normalize_name, Client};
pub use error::DomainError;
pub use tax_id::{TaxId, TAX_ID_DIGITS};

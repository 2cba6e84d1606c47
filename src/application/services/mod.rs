//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (ClientStore, Console)
//! but are themselves concrete structs, not traits.

mod registration;

pub use registration::RegistrationService;

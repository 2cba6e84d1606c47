//! Infrastructure layer: store implementation, I/O boundary traits and DI container
//!
//! This layer implements the I/O boundary traits and wires up services.

pub mod di;
pub mod error;
pub mod sqlite;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use sqlite::{SqliteClientStore, SqliteConnector};

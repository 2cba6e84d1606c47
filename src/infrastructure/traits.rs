//! I/O boundary traits for testability
//!
//! These traits abstract the store and the terminal, allowing the
//! controller and services to be tested with scripted implementations.

use std::io;

use crate::domain::{Client, TaxId};
use crate::infrastructure::StoreResult;

/// Persistent client table.
pub trait ClientStore {
    /// Create the client table if absent. Idempotent.
    fn ensure_schema(&self) -> StoreResult<()>;

    /// Check whether a client with this tax id exists.
    fn exists(&self, tax_id: &TaxId) -> StoreResult<bool>;

    /// Look up a client by tax id.
    fn find(&self, tax_id: &TaxId) -> StoreResult<Option<Client>>;

    /// Insert a new client and return it with its assigned id.
    ///
    /// Fails with `UniqueConstraintViolation` when the tax id is taken.
    fn insert(&self, name: &str, tax_id: &TaxId) -> StoreResult<Client>;

    /// All clients, ordered by id.
    fn list(&self) -> StoreResult<Vec<Client>>;
}

/// Opens one store connection per registration cycle.
pub trait StoreConnector: Send + Sync {
    /// Open a connection with the schema in place.
    fn connect(&self) -> StoreResult<Box<dyn ClientStore>>;
}

/// Line-oriented operator console.
pub trait Console {
    /// Show a prompt and read one line, without the trailing newline.
    /// Returns `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Print plain text.
    fn info(&mut self, msg: &str);

    /// Print a success message.
    fn success(&mut self, msg: &str);

    /// Print a warning.
    fn warning(&mut self, msg: &str);

    /// Print an error.
    fn error(&mut self, msg: &str);
}

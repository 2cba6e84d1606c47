//! Client registration service
//!
//! Turns raw operator input into typed values and store outcomes into
//! explicit error variants.

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{normalize_name, Client, DomainError, TaxId};
use crate::infrastructure::traits::ClientStore;

/// Registration use cases over one store connection.
///
/// The service owns the connection; dropping it releases the connection.
pub struct RegistrationService {
    store: Box<dyn ClientStore>,
}

impl RegistrationService {
    /// Create a new registration service.
    pub fn new(store: Box<dyn ClientStore>) -> Self {
        Self { store }
    }

    /// Fail with [`ApplicationError::DuplicateTaxId`] if the tax id is taken.
    #[instrument(level = "debug", skip(self))]
    pub fn ensure_unique(&self, tax_id: &TaxId) -> ApplicationResult<()> {
        if !self.store.exists(tax_id)? {
            return Ok(());
        }
        match self.store.find(tax_id)? {
            Some(existing) => Err(ApplicationError::DuplicateTaxId { existing }),
            None => Ok(()),
        }
    }

    /// Insert a client whose tax id already passed [`Self::ensure_unique`].
    ///
    /// A concurrent insert of the same tax id still surfaces as a storage
    /// error through the table's unique constraint.
    pub fn insert(&self, name: &str, tax_id: &TaxId) -> ApplicationResult<Client> {
        let client = self.store.insert(name, tax_id)?;
        debug!("registered {}", client);
        Ok(client)
    }

    /// Full registration of raw input: validate, check duplicates, insert.
    pub fn register(&self, name: &str, raw_tax_id: &str) -> ApplicationResult<Client> {
        let name = normalize_name(name).ok_or(DomainError::EmptyName)?;
        let tax_id = TaxId::parse(raw_tax_id)?;
        self.ensure_unique(&tax_id)?;
        self.insert(name, &tax_id)
    }

    /// Look up a client by raw tax id, punctuation ignored.
    pub fn lookup(&self, raw_tax_id: &str) -> ApplicationResult<Option<Client>> {
        let tax_id = TaxId::parse(raw_tax_id)?;
        Ok(self.store.find(&tax_id)?)
    }

    /// All registered clients, ordered by id.
    pub fn list(&self) -> ApplicationResult<Vec<Client>> {
        Ok(self.store.list()?)
    }
}

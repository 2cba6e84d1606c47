//! Domain entities: core data structures

use std::fmt;

use crate::domain::TaxId;

/// A registered client.
///
/// `id` is assigned by the store on insert. Neither `id` nor `tax_id`
/// change after that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub tax_id: TaxId,
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} ({})", self.id, self.name, self.tax_id.formatted())
    }
}

/// Trim a client name and reject it if nothing is left.
pub fn normalize_name(raw: &str) -> Option<&str> {
    let name = raw.trim();
    (!name.is_empty()).then_some(name)
}

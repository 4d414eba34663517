//! Name-keyed store of containers.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use cardvault_core::{DomainError, DomainResult, NameKey};

use crate::card::Card;
use crate::container::Container;

/// Owns every container of one kind, keyed case-insensitively by name.
#[derive(Debug, Clone)]
pub struct Registry<C> {
    entries: BTreeMap<NameKey, C>,
}

impl<C> Default for Registry<C> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<C: Container> Registry<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, container: C) -> DomainResult<()> {
        if let Some(existing) = self.entries.get(container.id()) {
            return Err(DomainError::already_exists(format!(
                "{} '{}' already exists",
                C::LABEL,
                existing.name()
            )));
        }
        self.entries.insert(container.id().clone(), container);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&NameKey::new(name))
    }

    pub fn get(&self, name: &str) -> DomainResult<&C> {
        self.entries
            .get(&NameKey::new(name))
            .ok_or_else(|| Self::missing(name))
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> DomainResult<&mut C> {
        self.entries
            .get_mut(&NameKey::new(name))
            .ok_or_else(|| Self::missing(name))
    }

    /// Drop the entry, handing back every unit it held.
    pub fn delete(&mut self, name: &str) -> DomainResult<Vec<Card>> {
        let mut container = self
            .entries
            .remove(&NameKey::new(name))
            .ok_or_else(|| Self::missing(name))?;
        Ok(container.remove_all())
    }

    /// Sell the container and drop it from the registry.
    ///
    /// A container that cannot be sold stays registered, untouched.
    pub fn sell(&mut self, name: &str) -> DomainResult<Decimal> {
        let proceeds = self.get_mut(name)?.sell()?;
        self.entries.remove(&NameKey::new(name));
        Ok(proceeds)
    }

    /// Display names, ordered by key.
    pub fn names(&self) -> Vec<String> {
        self.entries.values().map(|c| c.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn missing(name: &str) -> DomainError {
        DomainError::not_found(format!("{} '{}' not found", C::LABEL, name.trim()))
    }
}

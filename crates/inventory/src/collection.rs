use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use cardvault_core::{DomainError, DomainResult, NameKey};

use crate::card::Card;

/// The pool of loose cards owned by the collector.
///
/// Holds at most one ledger entry per card name. Entries are created on first
/// add and never removed; an entry at `count == 0` still remembers the card's
/// attributes.
#[derive(Debug, Clone, Default)]
pub struct CardCollection {
    entries: BTreeMap<NameKey, Card>,
}

impl CardCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a card to the ledger.
    ///
    /// An unknown name becomes a new entry. A known name with the same rarity
    /// and variation has its count raised by the incoming card's count. A known
    /// name with different attributes is rejected: names are unique once a
    /// card's attributes are fixed.
    pub fn add(&mut self, card: Card) -> DomainResult<()> {
        match self.entries.entry(card.key().clone()) {
            Entry::Vacant(slot) => {
                slot.insert(card);
                Ok(())
            }
            Entry::Occupied(mut slot) => {
                let existing = slot.get_mut();
                if !existing.same_card(&card) {
                    return Err(DomainError::validation(format!(
                        "card '{}' already exists as {} {} and cannot be merged with {} {}",
                        existing.name(),
                        existing.rarity(),
                        existing.variation(),
                        card.rarity(),
                        card.variation()
                    )));
                }
                existing.add_copies(card.count());
                Ok(())
            }
        }
    }

    /// Case-insensitive, trimmed lookup. Absence is not an error here.
    pub fn find_by_name(&self, name: &str) -> Option<&Card> {
        self.entries.get(&NameKey::new(name))
    }

    /// Take one physical copy out of the ledger.
    ///
    /// Returns a fresh `count == 1` copy of the entry; the entry itself keeps
    /// its attributes and loses one from its count.
    pub fn remove_one(&mut self, name: &str) -> DomainResult<Card> {
        let entry = self.entry_mut(name)?;
        if entry.count() == 0 {
            return Err(DomainError::empty_state(format!(
                "no copies left of card '{}'",
                entry.name()
            )));
        }
        let unit = entry.single_unit();
        entry.decrement();
        Ok(unit)
    }

    pub fn increment(&mut self, name: &str) -> DomainResult<()> {
        self.entry_mut(name)?.increment();
        Ok(())
    }

    pub fn decrement(&mut self, name: &str) -> DomainResult<()> {
        let entry = self.entry_mut(name)?;
        if !entry.decrement() {
            return Err(DomainError::empty_state(format!(
                "card '{}' count is already zero",
                entry.name()
            )));
        }
        Ok(())
    }

    /// Snapshot of every ledger entry, ordered by display name.
    pub fn sorted_view(&self) -> Vec<Card> {
        let mut cards: Vec<Card> = self.entries.values().cloned().collect();
        cards.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.key().cmp(b.key())));
        cards
    }

    /// Number of ledger entries, including entries at zero copies.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Physical copies across all entries.
    pub fn total_copies(&self) -> u64 {
        self.entries.values().map(|c| u64::from(c.count())).sum()
    }

    fn entry_mut(&mut self, name: &str) -> DomainResult<&mut Card> {
        self.entries
            .get_mut(&NameKey::new(name))
            .ok_or_else(|| DomainError::not_found(format!("card '{}' not in collection", name.trim())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rarity, Variation};
    use rust_decimal::Decimal;

    fn card(name: &str, rarity: Rarity, variation: Variation) -> Card {
        Card::new(name, rarity, variation, Decimal::new(250, 2)).unwrap()
    }

    #[test]
    fn adding_same_identity_merges_into_one_entry() {
        let mut collection = CardCollection::new();
        collection.add(card("Shock", Rarity::Common, Variation::Normal)).unwrap();
        collection.add(card("SHOCK", Rarity::Common, Variation::Normal)).unwrap();

        assert_eq!(collection.len(), 1);
        assert_eq!(collection.find_by_name("shock").unwrap().count(), 2);
    }

    #[test]
    fn same_name_with_different_attributes_is_rejected() {
        let mut collection = CardCollection::new();
        collection.add(card("Shock", Rarity::Common, Variation::Normal)).unwrap();

        let err = collection
            .add(card("Shock", Rarity::Rare, Variation::Normal))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(collection.find_by_name("Shock").unwrap().count(), 1);
        assert_eq!(collection.find_by_name("Shock").unwrap().rarity(), Rarity::Common);
    }

    #[test]
    fn merge_ignores_base_value() {
        let mut collection = CardCollection::new();
        collection.add(card("Shock", Rarity::Common, Variation::Normal)).unwrap();
        let pricier =
            Card::new("Shock", Rarity::Common, Variation::Normal, Decimal::new(900, 2)).unwrap();
        collection.add(pricier).unwrap();

        let entry = collection.find_by_name("Shock").unwrap();
        assert_eq!(entry.count(), 2);
        assert_eq!(entry.base_value(), Decimal::new(250, 2));
    }

    #[test]
    fn remove_one_returns_single_unit_and_keeps_ledger_entry() {
        let mut collection = CardCollection::new();
        collection.add(card("Shock", Rarity::Common, Variation::Normal)).unwrap();

        let unit = collection.remove_one(" shock ").unwrap();
        assert_eq!(unit.count(), 1);
        assert_eq!(unit.name(), "Shock");

        let entry = collection.find_by_name("Shock").unwrap();
        assert_eq!(entry.count(), 0);
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn remove_one_distinguishes_missing_from_empty() {
        let mut collection = CardCollection::new();
        let err = collection.remove_one("Shock").unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));

        collection.add(card("Shock", Rarity::Common, Variation::Normal)).unwrap();
        collection.remove_one("Shock").unwrap();
        let err = collection.remove_one("Shock").unwrap_err();
        assert!(matches!(err, DomainError::EmptyState(_)));
    }

    #[test]
    fn decrement_stops_at_zero() {
        let mut collection = CardCollection::new();
        collection.add(card("Shock", Rarity::Common, Variation::Normal)).unwrap();
        collection.decrement("Shock").unwrap();

        let err = collection.decrement("Shock").unwrap_err();
        assert!(matches!(err, DomainError::EmptyState(_)));
        assert_eq!(collection.find_by_name("Shock").unwrap().count(), 0);

        collection.increment("Shock").unwrap();
        assert_eq!(collection.find_by_name("Shock").unwrap().count(), 1);
    }

    #[test]
    fn increment_and_decrement_require_existing_entry() {
        let mut collection = CardCollection::new();
        assert!(matches!(
            collection.increment("Ghost").unwrap_err(),
            DomainError::NotFound(_)
        ));
        assert!(matches!(
            collection.decrement("Ghost").unwrap_err(),
            DomainError::NotFound(_)
        ));
    }

    #[test]
    fn sorted_view_orders_by_name_and_does_not_alias() {
        let mut collection = CardCollection::new();
        collection.add(card("Zap", Rarity::Common, Variation::Normal)).unwrap();
        collection.add(card("Bolt", Rarity::Common, Variation::Normal)).unwrap();
        collection.add(card("Mox", Rarity::Rare, Variation::FullArt)).unwrap();

        let names: Vec<_> = collection
            .sorted_view()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names, ["Bolt", "Mox", "Zap"]);

        let mut snapshot = collection.sorted_view();
        snapshot[0].increment();
        assert_eq!(collection.find_by_name("Bolt").unwrap().count(), 1);
    }

    #[test]
    fn total_copies_counts_physical_units() {
        let mut collection = CardCollection::new();
        collection.add(card("Zap", Rarity::Common, Variation::Normal)).unwrap();
        collection.add(card("Zap", Rarity::Common, Variation::Normal)).unwrap();
        collection.add(card("Bolt", Rarity::Common, Variation::Normal)).unwrap();
        assert_eq!(collection.total_copies(), 3);
    }
}

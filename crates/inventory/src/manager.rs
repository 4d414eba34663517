//! Binder and deck registries: construct the right variant, route operations to it.

use rust_decimal::Decimal;

use cardvault_core::DomainResult;

use crate::binder::{Binder, BinderKind};
use crate::card::Card;
use crate::container::Container;
use crate::deck::{Deck, DeckKind};
use crate::registry::Registry;

/// All binders of one inventory.
#[derive(Debug, Clone)]
pub struct BinderManager {
    binders: Registry<Binder>,
    capacity: usize,
}

impl Default for BinderManager {
    fn default() -> Self {
        Self::with_capacity(Binder::DEFAULT_CAPACITY)
    }
}

impl BinderManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            binders: Registry::new(),
            capacity,
        }
    }

    pub fn create(&mut self, name: &str, kind: BinderKind) -> DomainResult<()> {
        let binder = Binder::with_capacity(name, kind, self.capacity)?;
        self.binders.insert(binder)
    }

    pub fn get(&self, name: &str) -> DomainResult<&Binder> {
        self.binders.get(name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> DomainResult<&mut Binder> {
        self.binders.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.binders.contains(name)
    }

    /// Remove the binder; its cards are returned for re-insertion elsewhere.
    pub fn delete(&mut self, name: &str) -> DomainResult<Vec<Card>> {
        self.binders.delete(name)
    }

    pub fn sell(&mut self, name: &str) -> DomainResult<Decimal> {
        self.binders.sell(name)
    }

    pub fn move_card_in(&mut self, name: &str, card: Card) -> DomainResult<bool> {
        let binder = self.binders.get_mut(name)?;
        let card_name = card.name().to_string();
        let added = binder.try_add(card)?;
        if !added {
            tracing::debug!(binder = %binder.name(), card = %card_name, "binder is full");
        }
        Ok(added)
    }

    pub fn move_card_out(&mut self, name: &str, card_name: &str) -> DomainResult<Card> {
        self.binders.get_mut(name)?.remove_by_name(card_name)
    }

    pub fn set_custom_price(&mut self, name: &str, price: Decimal) -> DomainResult<()> {
        self.binders.get_mut(name)?.set_custom_price(price)
    }

    pub fn names(&self) -> Vec<String> {
        self.binders.names()
    }

    pub fn len(&self) -> usize {
        self.binders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.binders.is_empty()
    }
}

/// All decks of one inventory.
#[derive(Debug, Clone)]
pub struct DeckManager {
    decks: Registry<Deck>,
    capacity: usize,
}

impl Default for DeckManager {
    fn default() -> Self {
        Self::with_capacity(Deck::DEFAULT_CAPACITY)
    }
}

impl DeckManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            decks: Registry::new(),
            capacity,
        }
    }

    pub fn create(&mut self, name: &str, sellable: bool) -> DomainResult<()> {
        let deck = Deck::with_capacity(name, DeckKind::from_sellable(sellable), self.capacity)?;
        self.decks.insert(deck)
    }

    pub fn get(&self, name: &str) -> DomainResult<&Deck> {
        self.decks.get(name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> DomainResult<&mut Deck> {
        self.decks.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.decks.contains(name)
    }

    pub fn delete(&mut self, name: &str) -> DomainResult<Vec<Card>> {
        self.decks.delete(name)
    }

    pub fn sell(&mut self, name: &str) -> DomainResult<Decimal> {
        self.decks.sell(name)
    }

    pub fn move_card_in(&mut self, name: &str, card: Card) -> DomainResult<bool> {
        let deck = self.decks.get_mut(name)?;
        let card_name = card.name().to_string();
        let added = deck.try_add(card)?;
        if !added {
            tracing::debug!(deck = %deck.name(), card = %card_name, "deck is full or already holds card");
        }
        Ok(added)
    }

    pub fn move_card_out(&mut self, name: &str, card_name: &str) -> DomainResult<Card> {
        self.decks.get_mut(name)?.remove_by_name(card_name)
    }

    pub fn names(&self) -> Vec<String> {
        self.decks.names()
    }

    pub fn len(&self) -> usize {
        self.decks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rarity, Variation};
    use cardvault_core::DomainError;

    fn card(name: &str, rarity: Rarity, variation: Variation) -> Card {
        Card::new(name, rarity, variation, Decimal::new(300, 2)).unwrap()
    }

    #[test]
    fn create_builds_requested_variant() {
        let mut binders = BinderManager::new();
        for (i, kind) in BinderKind::ALL.into_iter().enumerate() {
            binders.create(&format!("B{i}"), kind).unwrap();
            assert_eq!(binders.get(&format!("b{i}")).unwrap().kind(), kind);
        }
        assert_eq!(binders.len(), 5);

        let mut decks = DeckManager::new();
        decks.create("Play", false).unwrap();
        decks.create("Market", true).unwrap();
        assert!(!decks.get("play").unwrap().is_sellable());
        assert!(decks.get("market").unwrap().is_sellable());
    }

    #[test]
    fn duplicate_create_is_already_exists() {
        let mut decks = DeckManager::new();
        decks.create("Play", false).unwrap();
        assert!(matches!(
            decks.create("PLAY", true).unwrap_err(),
            DomainError::AlreadyExists(_)
        ));
    }

    #[test]
    fn move_card_in_and_out_round_trips() {
        let mut binders = BinderManager::new();
        binders.create("Trade", BinderKind::NonCurated).unwrap();

        assert!(binders
            .move_card_in("trade", card("Shock", Rarity::Common, Variation::Normal))
            .unwrap());
        let out = binders.move_card_out("Trade", "shock").unwrap();
        assert_eq!(out.name(), "Shock");
        assert!(binders.get("Trade").unwrap().is_empty());
    }

    #[test]
    fn configured_capacity_applies_to_new_containers() {
        let mut decks = DeckManager::with_capacity(1);
        decks.create("Tiny", false).unwrap();
        assert!(decks
            .move_card_in("Tiny", card("Shock", Rarity::Common, Variation::Normal))
            .unwrap());
        assert!(!decks
            .move_card_in("Tiny", card("Bolt", Rarity::Common, Variation::Normal))
            .unwrap());
    }

    #[test]
    fn sell_removes_only_sellable_binders() {
        let mut binders = BinderManager::new();
        binders.create("Cheap", BinderKind::Pauper).unwrap();
        binders.create("Trade", BinderKind::NonCurated).unwrap();
        binders
            .move_card_in("Cheap", card("Shock", Rarity::Common, Variation::Normal))
            .unwrap();

        assert_eq!(binders.sell("Cheap").unwrap(), Decimal::new(300, 2));
        assert!(!binders.contains("Cheap"));

        assert!(matches!(
            binders.sell("Trade").unwrap_err(),
            DomainError::NotSellable(_)
        ));
        assert!(binders.contains("Trade"));
    }
}

//! The inventory facade: owns every container and moves cards between them.
//!
//! Every move is all-or-nothing. When a step fails after a card has left its
//! source, the card is put back before the error is returned.

use rust_decimal::Decimal;

use cardvault_core::{DomainError, DomainResult};

use crate::binder::{Binder, BinderKind};
use crate::card::Card;
use crate::collection::CardCollection;
use crate::config::InventoryConfig;
use crate::container::Container;
use crate::container::sealed::Slots;
use crate::deck::Deck;
use crate::earnings::Earnings;
use crate::manager::{BinderManager, DeckManager};

#[derive(Debug, Clone)]
pub struct InventorySystem {
    collection: CardCollection,
    binders: BinderManager,
    decks: DeckManager,
    earnings: Earnings,
    config: InventoryConfig,
}

impl Default for InventorySystem {
    fn default() -> Self {
        Self::with_config(InventoryConfig::default())
    }
}

impl InventorySystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: InventoryConfig) -> Self {
        Self {
            collection: CardCollection::new(),
            binders: BinderManager::with_capacity(config.binder_capacity),
            decks: DeckManager::with_capacity(config.deck_capacity),
            earnings: Earnings::new(),
            config,
        }
    }

    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    // ----- collection -------------------------------------------------------

    pub fn collection(&self) -> &CardCollection {
        &self.collection
    }

    pub fn add_card(&mut self, card: Card) -> DomainResult<()> {
        let name = card.name().to_string();
        self.collection.add(card)?;
        tracing::info!(card = %name, "card added to collection");
        Ok(())
    }

    pub fn find_card(&self, name: &str) -> Option<&Card> {
        self.collection.find_by_name(name)
    }

    pub fn card_value(&self, name: &str) -> DomainResult<Decimal> {
        self.collection
            .find_by_name(name)
            .map(Card::value)
            .ok_or_else(|| DomainError::not_found(format!("card '{}' not in collection", name.trim())))
    }

    pub fn increment_card(&mut self, name: &str) -> DomainResult<()> {
        self.collection.increment(name)
    }

    pub fn decrement_card(&mut self, name: &str) -> DomainResult<()> {
        self.collection.decrement(name)
    }

    /// Sell one loose copy at its current value.
    pub fn sell_card(&mut self, name: &str) -> DomainResult<Decimal> {
        let unit = self.collection.remove_one(name)?;
        let proceeds = unit.value();
        self.earnings.record(proceeds);
        tracing::info!(card = %unit.name(), %proceeds, "card sold");
        Ok(proceeds)
    }

    pub fn collection_view(&self) -> Vec<Card> {
        self.collection.sorted_view()
    }

    // ----- binders ----------------------------------------------------------

    pub fn create_binder(&mut self, name: &str, kind: BinderKind) -> DomainResult<()> {
        self.binders.create(name, kind)?;
        tracing::info!(binder = %name.trim(), %kind, "binder created");
        Ok(())
    }

    /// Delete a binder, returning every card in it to the collection.
    ///
    /// Returns how many units went back.
    pub fn delete_binder(&mut self, name: &str) -> DomainResult<usize> {
        let cards = self.binders.delete(name)?;
        let returned = self.return_all(cards)?;
        tracing::info!(binder = %name.trim(), returned, "binder deleted");
        Ok(returned)
    }

    /// Move one copy of `card_name` from the collection into a binder.
    ///
    /// A full binder is reported as `CapacityExceeded`, a disallowed card as
    /// `Validation`. Either way the copy is back in the collection.
    pub fn add_to_binder(&mut self, binder_name: &str, card_name: &str) -> DomainResult<()> {
        self.binders.get(binder_name)?;
        let unit = self.collection.remove_one(card_name)?;
        match self.binders.move_card_in(binder_name, unit.clone()) {
            Ok(true) => {
                tracing::info!(binder = %binder_name.trim(), card = %unit.name(), "card moved into binder");
                Ok(())
            }
            Ok(false) => {
                let err = DomainError::capacity_exceeded(format!(
                    "binder '{}' is full",
                    binder_name.trim()
                ));
                self.rollback_to_collection(unit, err)
            }
            Err(err) => self.rollback_to_collection(unit, err),
        }
    }

    pub fn remove_from_binder(&mut self, binder_name: &str, card_name: &str) -> DomainResult<()> {
        let unit = self.binders.move_card_out(binder_name, card_name)?;
        if let Err(err) = self.collection.add(unit.clone()) {
            tracing::warn!(binder = %binder_name.trim(), card = %unit.name(), "removal rolled back: {err}");
            self.binders.get_mut(binder_name)?.restore(unit);
            return Err(err);
        }
        tracing::info!(binder = %binder_name.trim(), card = %unit.name(), "card returned from binder");
        Ok(())
    }

    /// Swap `outgoing_name` in a binder for `incoming`.
    ///
    /// Returns `Ok(false)` without changing anything when the two cards differ
    /// in value by at least the confirmation threshold and `force` is not set;
    /// call again with `force = true` once the user agrees. Only non-sellable
    /// binders take part in trades.
    pub fn trade_card(
        &mut self,
        binder_name: &str,
        outgoing_name: &str,
        incoming: Card,
        force: bool,
    ) -> DomainResult<bool> {
        let binder = self.binders.get(binder_name)?;
        if !binder.kind().is_tradable() {
            return Err(DomainError::not_tradable(format!(
                "{} binder '{}' cannot be used for trading",
                binder.kind(),
                binder.name()
            )));
        }

        let incoming = incoming.single_unit();
        let outgoing = self.binders.move_card_out(binder_name, outgoing_name)?;

        if let Err(err) = self.collection.add(incoming.clone()) {
            self.binders.get_mut(binder_name)?.restore(outgoing);
            tracing::warn!(binder = %binder_name.trim(), "trade rolled back: {err}");
            return Err(err);
        }

        let diff = (incoming.value() - outgoing.value()).abs();
        if diff >= self.config.trade_confirm_threshold && !force {
            self.collection.remove_one(incoming.name())?;
            self.binders.get_mut(binder_name)?.restore(outgoing);
            tracing::info!(
                binder = %binder_name.trim(),
                outgoing = %outgoing_name.trim(),
                incoming = %incoming.name(),
                %diff,
                "trade needs confirmation"
            );
            return Ok(false);
        }

        let unit = self.collection.remove_one(incoming.name())?;
        let rejection = match self.binders.move_card_in(binder_name, unit.clone()) {
            Ok(true) => None,
            Ok(false) => Some(DomainError::capacity_exceeded(format!(
                "binder '{}' is full",
                binder_name.trim()
            ))),
            Err(err) => Some(err),
        };
        if let Some(err) = rejection {
            self.collection.add(unit)?;
            self.binders.get_mut(binder_name)?.restore(outgoing);
            tracing::warn!(binder = %binder_name.trim(), "trade rolled back: {err}");
            return Err(err);
        }

        tracing::info!(
            binder = %binder_name.trim(),
            outgoing = %outgoing.name(),
            incoming = %incoming.name(),
            %diff,
            "trade completed"
        );
        Ok(true)
    }

    pub fn sell_binder(&mut self, name: &str) -> DomainResult<Decimal> {
        let proceeds = self.binders.sell(name)?;
        self.earnings.record(proceeds);
        tracing::info!(binder = %name.trim(), %proceeds, "binder sold");
        Ok(proceeds)
    }

    pub fn set_binder_price(&mut self, name: &str, price: Decimal) -> DomainResult<()> {
        self.binders.set_custom_price(name, price)?;
        tracing::info!(binder = %name.trim(), %price, "custom price set");
        Ok(())
    }

    pub fn binder(&self, name: &str) -> DomainResult<&Binder> {
        self.binders.get(name)
    }

    pub fn binder_names(&self) -> Vec<String> {
        self.binders.names()
    }

    pub fn is_binder_empty(&self, name: &str) -> DomainResult<bool> {
        Ok(self.binders.get(name)?.is_empty())
    }

    pub fn is_binder_sellable(&self, name: &str) -> DomainResult<bool> {
        Ok(self.binders.get(name)?.is_sellable())
    }

    pub fn is_luxury_binder(&self, name: &str) -> DomainResult<bool> {
        Ok(self.binders.get(name)?.is_luxury())
    }

    /// Real value of a sellable binder (before fee or custom price).
    pub fn binder_value(&self, name: &str) -> DomainResult<Decimal> {
        self.binders.get(name)?.current_value()
    }

    /// What selling the binder right now would pay.
    pub fn binder_sale_price(&self, name: &str) -> DomainResult<Decimal> {
        self.binders.get(name)?.sale_price()
    }

    /// Custom price of a luxury binder; `None` until one is set.
    pub fn luxury_custom_price(&self, name: &str) -> DomainResult<Option<Decimal>> {
        let binder = self.binders.get(name)?;
        if !binder.is_luxury() {
            return Err(DomainError::validation(format!(
                "binder '{}' is not a luxury binder",
                binder.name()
            )));
        }
        Ok(binder.custom_price())
    }

    pub fn binder_view(&self, name: &str) -> DomainResult<Vec<Card>> {
        Ok(self.binders.get(name)?.sorted_view())
    }

    // ----- decks ------------------------------------------------------------

    pub fn create_deck(&mut self, name: &str, sellable: bool) -> DomainResult<()> {
        self.decks.create(name, sellable)?;
        tracing::info!(deck = %name.trim(), sellable, "deck created");
        Ok(())
    }

    pub fn delete_deck(&mut self, name: &str) -> DomainResult<usize> {
        let cards = self.decks.delete(name)?;
        let returned = self.return_all(cards)?;
        tracing::info!(deck = %name.trim(), returned, "deck deleted");
        Ok(returned)
    }

    /// Move one copy of `card_name` from the collection into a deck.
    ///
    /// A full deck is `CapacityExceeded`; a deck already holding this card is
    /// `Duplicate`. The copy is back in the collection in both cases.
    pub fn add_to_deck(&mut self, deck_name: &str, card_name: &str) -> DomainResult<()> {
        let deck = self.decks.get(deck_name)?;
        let was_full = deck.is_full();
        let unit = self.collection.remove_one(card_name)?;
        match self.decks.move_card_in(deck_name, unit.clone()) {
            Ok(true) => {
                tracing::info!(deck = %deck_name.trim(), card = %unit.name(), "card moved into deck");
                Ok(())
            }
            Ok(false) => {
                let err = if was_full {
                    DomainError::capacity_exceeded(format!("deck '{}' is full", deck_name.trim()))
                } else {
                    DomainError::duplicate(format!(
                        "deck '{}' already holds '{}'",
                        deck_name.trim(),
                        unit.name()
                    ))
                };
                self.rollback_to_collection(unit, err)
            }
            Err(err) => self.rollback_to_collection(unit, err),
        }
    }

    pub fn remove_from_deck(&mut self, deck_name: &str, card_name: &str) -> DomainResult<()> {
        let unit = self.decks.move_card_out(deck_name, card_name)?;
        if let Err(err) = self.collection.add(unit.clone()) {
            tracing::warn!(deck = %deck_name.trim(), card = %unit.name(), "removal rolled back: {err}");
            self.decks.get_mut(deck_name)?.restore(unit);
            return Err(err);
        }
        tracing::info!(deck = %deck_name.trim(), card = %unit.name(), "card returned from deck");
        Ok(())
    }

    pub fn sell_deck(&mut self, name: &str) -> DomainResult<Decimal> {
        let proceeds = self.decks.sell(name)?;
        self.earnings.record(proceeds);
        tracing::info!(deck = %name.trim(), %proceeds, "deck sold");
        Ok(proceeds)
    }

    pub fn deck(&self, name: &str) -> DomainResult<&Deck> {
        self.decks.get(name)
    }

    pub fn deck_names(&self) -> Vec<String> {
        self.decks.names()
    }

    pub fn is_deck_empty(&self, name: &str) -> DomainResult<bool> {
        Ok(self.decks.get(name)?.is_empty())
    }

    pub fn is_deck_sellable(&self, name: &str) -> DomainResult<bool> {
        Ok(self.decks.get(name)?.is_sellable())
    }

    pub fn deck_value(&self, name: &str) -> DomainResult<Decimal> {
        self.decks.get(name)?.current_value()
    }

    pub fn deck_view(&self, name: &str) -> DomainResult<Vec<Card>> {
        Ok(self.decks.get(name)?.sorted_view())
    }

    /// Card at a zero-based position in the deck, in the order it was added.
    pub fn deck_card_at(&self, name: &str, index: usize) -> DomainResult<Card> {
        self.decks.get(name)?.card_at(index).cloned()
    }

    // ----- earnings ---------------------------------------------------------

    pub fn earnings(&self) -> Decimal {
        self.earnings.total()
    }

    pub fn earnings_ledger(&self) -> &Earnings {
        &self.earnings
    }

    // ----- helpers ----------------------------------------------------------

    /// Put an extracted unit back into the collection, then fail with `err`.
    fn rollback_to_collection(&mut self, unit: Card, err: DomainError) -> DomainResult<()> {
        tracing::warn!(card = %unit.name(), "move rolled back: {err}");
        self.collection.add(unit)?;
        Err(err)
    }

    /// Return drained units to the collection. Every unit is attempted even if
    /// one fails; the first failure is reported.
    fn return_all(&mut self, cards: Vec<Card>) -> DomainResult<usize> {
        let mut returned = 0;
        let mut first_err = None;
        for card in cards {
            match self.collection.add(card) {
                Ok(()) => returned += 1,
                Err(err) => {
                    tracing::error!("card could not be returned to collection: {err}");
                    first_err.get_or_insert(err);
                }
            }
        }
        match first_err {
            Some(err) => Err(err),
            None => Ok(returned),
        }
    }
}

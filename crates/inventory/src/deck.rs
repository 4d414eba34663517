use serde::{Deserialize, Serialize};

use cardvault_core::{DomainError, DomainResult, Entity, NameKey};

use crate::card::Card;
use crate::container::sealed::Slots;
use crate::container::{Container, SaleTerms};

/// Whether a deck can be sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeckKind {
    Standard,
    Sellable,
}

impl DeckKind {
    pub fn from_sellable(sellable: bool) -> Self {
        if sellable {
            DeckKind::Sellable
        } else {
            DeckKind::Standard
        }
    }
}

/// A named play deck: at most `capacity` units, at most one unit per card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    name: String,
    key: NameKey,
    capacity: usize,
    cards: Vec<Card>,
    kind: DeckKind,
}

impl Deck {
    pub const DEFAULT_CAPACITY: usize = 10;

    pub fn new(name: &str, kind: DeckKind) -> DomainResult<Self> {
        Self::with_capacity(name, kind, Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(name: &str, kind: DeckKind, capacity: usize) -> DomainResult<Self> {
        let key = NameKey::for_new(name, "deck")?;
        Ok(Self {
            name: name.trim().to_string(),
            key,
            capacity,
            cards: Vec::new(),
            kind,
        })
    }

    pub fn kind(&self) -> DeckKind {
        self.kind
    }

    /// Card at a zero-based position, in insertion order.
    pub fn card_at(&self, index: usize) -> DomainResult<&Card> {
        self.cards.get(index).ok_or_else(|| {
            DomainError::validation(format!(
                "invalid card index {index} for deck '{}' holding {} card(s)",
                self.name,
                self.cards.len()
            ))
        })
    }
}

impl Entity for Deck {
    type Id = NameKey;

    fn id(&self) -> &Self::Id {
        &self.key
    }
}

impl Slots for Deck {
    fn cards_mut(&mut self) -> &mut Vec<Card> {
        &mut self.cards
    }
}

impl Container for Deck {
    const LABEL: &'static str = "deck";

    fn name(&self) -> &str {
        &self.name
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// `Ok(false)` when full or when this exact card is already in the deck.
    /// A different card under the same name is an error.
    fn try_add(&mut self, card: Card) -> DomainResult<bool> {
        if self.is_full() {
            return Ok(false);
        }
        if let Some(existing) = self.find_by_name(card.name()) {
            if existing.same_card(&card) {
                return Ok(false);
            }
            return Err(DomainError::validation(format!(
                "deck '{}' already holds a different card named '{}'",
                self.name,
                existing.name()
            )));
        }
        self.cards.push(card);
        Ok(true)
    }

    fn sale_terms(&self) -> Option<SaleTerms> {
        match self.kind {
            DeckKind::Sellable => Some(SaleTerms::no_fee()),
            DeckKind::Standard => None,
        }
    }
}

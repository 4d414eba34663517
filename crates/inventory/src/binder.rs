use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use cardvault_core::{DomainError, DomainResult, Entity, NameKey};

use crate::card::{Card, Variation, max_amount, normalize_label, real_value};
use crate::container::sealed::Slots;
use crate::container::{Container, SaleTerms};

/// Binder variant selector, used when creating a binder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinderKind {
    /// Anything goes; used for trading, never sold.
    NonCurated,
    /// Commons and uncommons; sold without fee.
    Pauper,
    /// Rares and legendaries; sold with a 10% handling fee.
    Rares,
    /// Special variations only; sold at max(custom price, real value) plus 10%.
    Luxury,
    /// Rare-or-better in a special variation; kept, never sold.
    Collector,
}

impl BinderKind {
    pub const ALL: [BinderKind; 5] = [
        BinderKind::NonCurated,
        BinderKind::Pauper,
        BinderKind::Rares,
        BinderKind::Luxury,
        BinderKind::Collector,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BinderKind::NonCurated => "non_curated",
            BinderKind::Pauper => "pauper",
            BinderKind::Rares => "rares",
            BinderKind::Luxury => "luxury",
            BinderKind::Collector => "collector",
        }
    }

    /// Acceptance policy. Capacity is checked separately.
    pub fn accepts(self, card: &Card) -> bool {
        let special = card.variation() != Variation::Normal;
        match self {
            BinderKind::NonCurated => true,
            BinderKind::Pauper => !card.rarity().is_rare_or_better(),
            BinderKind::Rares => card.rarity().is_rare_or_better(),
            BinderKind::Luxury => special,
            BinderKind::Collector => card.rarity().is_rare_or_better() && special,
        }
    }

    pub fn sale_terms(self) -> Option<SaleTerms> {
        match self {
            BinderKind::Pauper => Some(SaleTerms::no_fee()),
            BinderKind::Rares | BinderKind::Luxury => Some(SaleTerms::handling_fee()),
            BinderKind::NonCurated | BinderKind::Collector => None,
        }
    }

    /// Sellable binders are liquidated; only the others take part in trades.
    pub fn is_tradable(self) -> bool {
        self.sale_terms().is_none()
    }
}

impl fmt::Display for BinderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BinderKind::NonCurated => "non-curated",
            BinderKind::Pauper => "pauper",
            BinderKind::Rares => "rares",
            BinderKind::Luxury => "luxury",
            BinderKind::Collector => "collector",
        };
        f.write_str(label)
    }
}

impl FromStr for BinderKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        BinderKind::ALL
            .into_iter()
            .find(|k| k.as_str() == wanted)
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "invalid binder kind '{}': expected one of non_curated, pauper, rares, luxury, collector",
                    s.trim()
                ))
            })
    }
}

/// Variant tag plus whatever state only that variant carries.
#[derive(Debug, Clone, PartialEq, Eq)]
enum BinderVariant {
    NonCurated,
    Pauper,
    Rares,
    Luxury { custom_price: Option<Decimal> },
    Collector,
}

impl From<BinderKind> for BinderVariant {
    fn from(kind: BinderKind) -> Self {
        match kind {
            BinderKind::NonCurated => BinderVariant::NonCurated,
            BinderKind::Pauper => BinderVariant::Pauper,
            BinderKind::Rares => BinderVariant::Rares,
            BinderKind::Luxury => BinderVariant::Luxury { custom_price: None },
            BinderKind::Collector => BinderVariant::Collector,
        }
    }
}

/// A named binder holding up to `capacity` physical card units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binder {
    name: String,
    key: NameKey,
    capacity: usize,
    cards: Vec<Card>,
    variant: BinderVariant,
}

impl Binder {
    pub const DEFAULT_CAPACITY: usize = 20;

    pub fn new(name: &str, kind: BinderKind) -> DomainResult<Self> {
        Self::with_capacity(name, kind, Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(name: &str, kind: BinderKind, capacity: usize) -> DomainResult<Self> {
        let key = NameKey::for_new(name, "binder")?;
        Ok(Self {
            name: name.trim().to_string(),
            key,
            capacity,
            cards: Vec::new(),
            variant: kind.into(),
        })
    }

    pub fn kind(&self) -> BinderKind {
        match self.variant {
            BinderVariant::NonCurated => BinderKind::NonCurated,
            BinderVariant::Pauper => BinderKind::Pauper,
            BinderVariant::Rares => BinderKind::Rares,
            BinderVariant::Luxury { .. } => BinderKind::Luxury,
            BinderVariant::Collector => BinderKind::Collector,
        }
    }

    pub fn is_luxury(&self) -> bool {
        matches!(self.variant, BinderVariant::Luxury { .. })
    }

    /// Set the asking price of a luxury binder.
    ///
    /// The price is a floor override: it may never be below the binder's
    /// current real value.
    pub fn set_custom_price(&mut self, price: Decimal) -> DomainResult<()> {
        if !self.is_luxury() {
            return Err(DomainError::validation(format!(
                "binder '{}' is a {} binder and does not take a custom price",
                self.name,
                self.kind()
            )));
        }
        if price > max_amount() {
            return Err(DomainError::validation(format!(
                "custom price {price:.2} exceeds the ceiling {}",
                max_amount()
            )));
        }
        let floor = real_value(&self.cards);
        if price < floor {
            return Err(DomainError::validation(format!(
                "custom price {price:.2} is below the real value {floor:.2} of binder '{}'",
                self.name
            )));
        }
        if let BinderVariant::Luxury { custom_price } = &mut self.variant {
            *custom_price = Some(price);
        }
        Ok(())
    }
}

impl Entity for Binder {
    type Id = NameKey;

    fn id(&self) -> &Self::Id {
        &self.key
    }
}

impl Slots for Binder {
    fn cards_mut(&mut self) -> &mut Vec<Card> {
        &mut self.cards
    }
}

impl Container for Binder {
    const LABEL: &'static str = "binder";

    fn name(&self) -> &str {
        &self.name
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn cards(&self) -> &[Card] {
        &self.cards
    }

    fn try_add(&mut self, card: Card) -> DomainResult<bool> {
        // Full wins over policy: a full binder is "try elsewhere" for every card.
        if self.is_full() {
            return Ok(false);
        }
        let kind = self.kind();
        if !kind.accepts(&card) {
            return Err(DomainError::validation(format!(
                "card '{}' [{}, {}] is not allowed in {} binder '{}'",
                card.name(),
                card.rarity(),
                card.variation(),
                kind,
                self.name
            )));
        }
        self.cards.push(card);
        Ok(true)
    }

    fn sale_terms(&self) -> Option<SaleTerms> {
        self.kind().sale_terms()
    }

    fn custom_price(&self) -> Option<Decimal> {
        match self.variant {
            BinderVariant::Luxury { custom_price } => custom_price,
            _ => None,
        }
    }
}

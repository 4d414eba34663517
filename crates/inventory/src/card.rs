use core::fmt;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use cardvault_core::{DomainError, DomainResult, Entity, NameKey};

/// Card rarity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl Rarity {
    pub const ALL: [Rarity; 4] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Legendary,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Legendary => "legendary",
        }
    }

    /// Rare or legendary.
    pub fn is_rare_or_better(self) -> bool {
        matches!(self, Rarity::Rare | Rarity::Legendary)
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Legendary => "Legendary",
        };
        f.write_str(label)
    }
}

impl FromStr for Rarity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        Rarity::ALL
            .into_iter()
            .find(|r| r.as_str() == wanted)
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "invalid rarity '{}': expected one of common, uncommon, rare, legendary",
                    s.trim()
                ))
            })
    }
}

/// Print variation of a card. Drives the value multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variation {
    Normal,
    ExtendedArt,
    FullArt,
    AltArt,
}

impl Variation {
    pub const ALL: [Variation; 4] = [
        Variation::Normal,
        Variation::ExtendedArt,
        Variation::FullArt,
        Variation::AltArt,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Variation::Normal => "normal",
            Variation::ExtendedArt => "extended_art",
            Variation::FullArt => "full_art",
            Variation::AltArt => "alt_art",
        }
    }

    /// Multiplier applied to a card's base value: 1.0, 1.5, 2.0 or 3.0.
    pub fn multiplier(self) -> Decimal {
        match self {
            Variation::Normal => Decimal::ONE,
            Variation::ExtendedArt => Decimal::new(15, 1),
            Variation::FullArt => Decimal::TWO,
            Variation::AltArt => Decimal::new(3, 0),
        }
    }
}

impl fmt::Display for Variation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Variation::Normal => "Normal",
            Variation::ExtendedArt => "Extended Art",
            Variation::FullArt => "Full Art",
            Variation::AltArt => "Alt Art",
        };
        f.write_str(label)
    }
}

impl FromStr for Variation {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        Variation::ALL
            .into_iter()
            .find(|v| v.as_str() == wanted)
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "invalid variation '{}': expected one of normal, extended_art, full_art, alt_art",
                    s.trim()
                ))
            })
    }
}

/// `"Extended-Art"`, `"extended art"` and `"EXTENDED_ART"` all become `"extended_art"`.
pub(crate) fn normalize_label(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

/// Round a money amount to cents, half-up.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Upper bound for a card's base value and a binder's asking price.
///
/// Multipliers, fees and container totals stay well inside `Decimal`'s range
/// below it.
pub fn max_amount() -> Decimal {
    Decimal::new(1_000_000_000_000, 0)
}

/// A trading card: fixed attributes plus a mutable copy count.
///
/// Inside the collection a `Card` is a ledger entry whose `count` is the number
/// of loose copies owned. Inside a binder or deck every element is one physical
/// unit with `count == 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    name: String,
    #[serde(skip)]
    key: NameKey,
    rarity: Rarity,
    variation: Variation,
    base_value: Decimal,
    count: u32,
}

impl Card {
    /// Create a card with a count of 1.
    pub fn new(
        name: &str,
        rarity: Rarity,
        variation: Variation,
        base_value: Decimal,
    ) -> DomainResult<Self> {
        let key = NameKey::for_new(name, "card")?;
        if base_value.is_sign_negative() && !base_value.is_zero() {
            return Err(DomainError::validation(format!(
                "base value of '{}' cannot be negative",
                name.trim()
            )));
        }
        if base_value > max_amount() {
            return Err(DomainError::validation(format!(
                "base value of '{}' cannot exceed {}",
                name.trim(),
                max_amount()
            )));
        }
        Ok(Self {
            name: name.trim().to_string(),
            key,
            rarity,
            variation,
            base_value,
            count: 1,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key(&self) -> &NameKey {
        &self.key
    }

    pub fn rarity(&self) -> Rarity {
        self.rarity
    }

    pub fn variation(&self) -> Variation {
        self.variation
    }

    pub fn base_value(&self) -> Decimal {
        self.base_value
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Same name, rarity and variation. Base value and count are ignored.
    pub fn same_card(&self, other: &Card) -> bool {
        self.key == other.key && self.rarity == other.rarity && self.variation == other.variation
    }

    /// Market value of one copy: base value times the variation multiplier,
    /// rounded to cents half-up.
    pub fn value(&self) -> Decimal {
        round_money(self.base_value * self.variation.multiplier())
    }

    /// A copy of this card representing exactly one physical unit.
    pub fn single_unit(&self) -> Card {
        Card {
            count: 1,
            ..self.clone()
        }
    }

    pub fn increment(&mut self) {
        self.add_copies(1);
    }

    pub(crate) fn add_copies(&mut self, copies: u32) {
        self.count = self.count.saturating_add(copies);
    }

    /// Drop one copy. Returns `false` (and leaves the count at zero) when there
    /// was nothing to drop.
    pub fn decrement(&mut self) -> bool {
        if self.count == 0 {
            return false;
        }
        self.count -= 1;
        true
    }
}

impl Entity for Card {
    type Id = NameKey;

    fn id(&self) -> &Self::Id {
        &self.key
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {} | Rarity: {} | Variation: {} | Count: {} | Value: ${:.2}",
            self.name,
            self.rarity,
            self.variation,
            self.count,
            self.value()
        )
    }
}

/// Sum of `value()` over a set of cards. One entry is one physical unit.
pub fn real_value<'a>(cards: impl IntoIterator<Item = &'a Card>) -> Decimal {
    cards
        .into_iter()
        .map(Card::value)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

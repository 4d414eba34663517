//! Inventory tunables, optionally overridden from the environment.

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::binder::Binder;
use crate::deck::Deck;

pub const BINDER_CAPACITY_ENV: &str = "CARDVAULT_BINDER_CAPACITY";
pub const DECK_CAPACITY_ENV: &str = "CARDVAULT_DECK_CAPACITY";
pub const TRADE_THRESHOLD_ENV: &str = "CARDVAULT_TRADE_THRESHOLD";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Slots per binder.
    pub binder_capacity: usize,
    /// Slots per deck.
    pub deck_capacity: usize,
    /// Value gap at or above which a trade needs explicit confirmation.
    pub trade_confirm_threshold: Decimal,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            binder_capacity: Binder::DEFAULT_CAPACITY,
            deck_capacity: Deck::DEFAULT_CAPACITY,
            trade_confirm_threshold: Decimal::ONE,
        }
    }
}

impl InventoryConfig {
    /// Defaults, overridden by any `CARDVAULT_*` variable that is set and valid.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`InventoryConfig::from_env`], reading values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            binder_capacity: read_positive(&lookup, BINDER_CAPACITY_ENV, defaults.binder_capacity),
            deck_capacity: read_positive(&lookup, DECK_CAPACITY_ENV, defaults.deck_capacity),
            trade_confirm_threshold: read_threshold(&lookup, defaults.trade_confirm_threshold),
        }
    }
}

fn read_positive(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: usize) -> usize {
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<usize>() {
        Ok(value) if value > 0 => value,
        _ => {
            tracing::warn!("{key}={raw:?} is not a positive integer; using default {default}");
            default
        }
    }
}

fn read_threshold(lookup: &impl Fn(&str) -> Option<String>, default: Decimal) -> Decimal {
    let Some(raw) = lookup(TRADE_THRESHOLD_ENV) else {
        return default;
    };
    match Decimal::from_str(raw.trim()) {
        Ok(value) if !value.is_sign_negative() => value,
        _ => {
            tracing::warn!(
                "{TRADE_THRESHOLD_ENV}={raw:?} is not a non-negative amount; using default {default}"
            );
            default
        }
    }
}

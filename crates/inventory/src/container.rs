//! Shared contract for capacity-limited card containers (binders and decks).

use rust_decimal::Decimal;

use cardvault_core::{DomainError, DomainResult, Entity, NameKey, ValueObject};

use crate::card::{Card, real_value, round_money};

/// How a sellable container is priced.
///
/// A container without `SaleTerms` cannot be sold at all; there is no
/// "sellable with zero terms" state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleTerms {
    /// Surcharge added on top of the base price (0.10 = 10%).
    pub fee_rate: Decimal,
}

impl SaleTerms {
    pub fn no_fee() -> Self {
        Self {
            fee_rate: Decimal::ZERO,
        }
    }

    /// The 10% handling fee charged by the curated sellable binders.
    pub fn handling_fee() -> Self {
        Self {
            fee_rate: Decimal::new(10, 2),
        }
    }

    /// Final proceeds for a base price: base plus fee, rounded to cents.
    pub fn proceeds(&self, base: Decimal) -> Decimal {
        round_money(base.saturating_add(base.saturating_mul(self.fee_rate)))
    }
}

impl ValueObject for SaleTerms {}

/// A named, capacity-limited list of physical card units.
///
/// Every element in `cards()` has `count == 1`. Implementors decide which
/// cards they accept and whether they can be sold; everything else (removal,
/// draining, valuation, sale) is shared.
pub trait Container: Entity<Id = NameKey> + sealed::Slots {
    /// Human label for messages ("binder", "deck").
    const LABEL: &'static str;

    fn name(&self) -> &str;

    fn capacity(&self) -> usize;

    fn cards(&self) -> &[Card];

    /// Place one unit.
    ///
    /// `Ok(false)` is a soft rejection: nothing changed and the card may fit
    /// elsewhere. `Err` means this card can never go here.
    fn try_add(&mut self, card: Card) -> DomainResult<bool>;

    /// `None` when this container variant cannot be sold.
    fn sale_terms(&self) -> Option<SaleTerms>;

    /// Price override that replaces the real value when it is higher.
    fn custom_price(&self) -> Option<Decimal> {
        None
    }

    fn len(&self) -> usize {
        self.cards().len()
    }

    fn is_empty(&self) -> bool {
        self.cards().is_empty()
    }

    fn is_full(&self) -> bool {
        self.len() >= self.capacity()
    }

    fn is_sellable(&self) -> bool {
        self.sale_terms().is_some()
    }

    fn find_by_name(&self, name: &str) -> Option<&Card> {
        let key = NameKey::new(name);
        self.cards().iter().find(|c| c.is_identified_by(&key))
    }

    /// Remove and return the unit with this name.
    fn remove_by_name(&mut self, name: &str) -> DomainResult<Card> {
        if self.is_empty() {
            return Err(DomainError::empty_state(format!(
                "{} '{}' is empty",
                Self::LABEL,
                self.name()
            )));
        }
        let key = NameKey::new(name);
        let Some(pos) = self.cards().iter().position(|c| c.is_identified_by(&key)) else {
            return Err(DomainError::not_found(format!(
                "card '{}' not in {} '{}'",
                name.trim(),
                Self::LABEL,
                self.name()
            )));
        };
        Ok(self.cards_mut().remove(pos))
    }

    /// Empty the container, handing back every unit.
    fn remove_all(&mut self) -> Vec<Card> {
        std::mem::take(self.cards_mut())
    }

    /// Display-only snapshot ordered by card name.
    fn sorted_view(&self) -> Vec<Card> {
        let mut cards = self.cards().to_vec();
        cards.sort_by(|a, b| a.name().cmp(b.name()));
        cards
    }

    /// Sum of card values, before fee or custom price.
    fn current_value(&self) -> DomainResult<Decimal> {
        self.require_terms()?;
        Ok(real_value(self.cards()))
    }

    /// What a sale would pay right now, without selling.
    fn sale_price(&self) -> DomainResult<Decimal> {
        let terms = self.require_terms()?;
        let real = real_value(self.cards());
        let base = match self.custom_price() {
            Some(custom) if custom > real => custom,
            _ => real,
        };
        Ok(terms.proceeds(base))
    }

    /// Compute proceeds, then clear the container.
    fn sell(&mut self) -> DomainResult<Decimal> {
        let proceeds = self.sale_price()?;
        self.cards_mut().clear();
        Ok(proceeds)
    }

    #[doc(hidden)]
    fn require_terms(&self) -> DomainResult<SaleTerms> {
        self.sale_terms().ok_or_else(|| {
            DomainError::not_sellable(format!("{} '{}' cannot be sold", Self::LABEL, self.name()))
        })
    }
}

/// Unchecked access to a container's unit list, for this crate only.
///
/// `sealed` is not reachable from outside the crate, so neither are these
/// methods; callers elsewhere go through `try_add` and its checks.
pub(crate) mod sealed {
    use crate::card::Card;

    pub trait Slots {
        fn cards_mut(&mut self) -> &mut Vec<Card>;

        /// Put back a unit that was taken out of this container moments ago.
        ///
        /// Skips policy and capacity checks: the unit was already accepted once
        /// and its slot is still free. Only compensating rollbacks use this.
        fn restore(&mut self, card: Card) {
            self.cards_mut().push(card);
        }
    }
}

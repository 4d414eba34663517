use rust_decimal::Decimal;
use serde::Serialize;

use crate::card::round_money;

/// Running total of realised sale proceeds. Only ever grows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Earnings {
    total: Decimal,
    sales: u32,
}

impl Earnings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one sale. Negative proceeds are ignored; refunds are not modelled.
    pub fn record(&mut self, proceeds: Decimal) {
        if proceeds.is_sign_negative() {
            return;
        }
        self.total = round_money(self.total.saturating_add(proceeds));
        self.sales = self.sales.saturating_add(1);
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Number of sales recorded.
    pub fn sales(&self) -> u32 {
        self.sales
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_proceeds() {
        let mut earnings = Earnings::new();
        earnings.record(Decimal::new(1100, 2));
        earnings.record(Decimal::new(450, 2));
        assert_eq!(earnings.total(), Decimal::new(1550, 2));
        assert_eq!(earnings.sales(), 2);
    }

    #[test]
    fn never_decreases() {
        let mut earnings = Earnings::new();
        earnings.record(Decimal::new(500, 2));
        earnings.record(Decimal::new(-200, 2));
        assert_eq!(earnings.total(), Decimal::new(500, 2));
        assert_eq!(earnings.sales(), 1);
    }

    #[test]
    fn total_saturates_instead_of_overflowing() {
        let mut earnings = Earnings::new();
        earnings.record(Decimal::MAX);
        earnings.record(Decimal::MAX);
        assert_eq!(earnings.total(), round_money(Decimal::MAX));
        assert_eq!(earnings.sales(), 2);
    }
}

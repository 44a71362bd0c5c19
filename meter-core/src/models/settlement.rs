use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::tip::{tip_amount, total_amount};

/// The pending payment between stopping a ride and committing it.
///
/// `tip_amount` and `total_amount` are always consistent with
/// `final_fare` and `tip_percentage`; the only way to change the
/// percentage is [`Settlement::select_tip`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    final_fare: Decimal,
    tip_percentage: u8,
    tip_amount: Decimal,
    total_amount: Decimal,
}

impl Settlement {
    /// Opens a settlement for `final_fare` with no tip selected.
    pub fn open(final_fare: Decimal) -> Self {
        Self {
            final_fare,
            tip_percentage: 0,
            tip_amount: Decimal::ZERO,
            total_amount: final_fare,
        }
    }

    /// Changes the tip and recomputes the derived amounts.
    /// Percentages above 100 are capped.
    pub fn select_tip(
        &mut self,
        percentage: u8,
    ) {
        self.tip_percentage = percentage.min(100);
        self.tip_amount = tip_amount(self.final_fare, self.tip_percentage);
        self.total_amount = total_amount(self.final_fare, self.tip_amount);
    }

    pub fn final_fare(&self) -> Decimal {
        self.final_fare
    }

    pub fn tip_percentage(&self) -> u8 {
        self.tip_percentage
    }

    pub fn tip_amount(&self) -> Decimal {
        self.tip_amount
    }

    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn open_starts_without_tip() {
        let settlement = Settlement::open(dec!(8.26));

        assert_eq!(settlement.tip_percentage(), 0);
        assert_eq!(settlement.tip_amount(), dec!(0));
        assert_eq!(settlement.total_amount(), dec!(8.26));
    }

    #[test]
    fn select_tip_recomputes_amounts() {
        let mut settlement = Settlement::open(dec!(8.26));

        settlement.select_tip(15);

        assert_eq!(settlement.tip_amount(), dec!(1.239));
        assert_eq!(settlement.total_amount(), dec!(9.499));
    }

    #[test]
    fn select_tip_again_replaces_previous_tip() {
        let mut settlement = Settlement::open(dec!(10.00));

        settlement.select_tip(20);
        settlement.select_tip(10);

        assert_eq!(settlement.tip_percentage(), 10);
        assert_eq!(settlement.tip_amount(), dec!(1.00));
        assert_eq!(settlement.total_amount(), dec!(11.00));
    }

    #[test]
    fn select_tip_caps_at_one_hundred() {
        let mut settlement = Settlement::open(dec!(5));

        settlement.select_tip(180);

        assert_eq!(settlement.tip_percentage(), 100);
        assert_eq!(settlement.total_amount(), dec!(10));
    }
}

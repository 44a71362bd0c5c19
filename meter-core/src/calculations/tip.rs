//! Tip and total for a settled ride.

use rust_decimal::Decimal;

/// `final_fare × percentage / 100`, unrounded.
///
/// ```
/// use rust_decimal_macros::dec;
/// use meter_core::calculations::tip::tip_amount;
///
/// assert_eq!(tip_amount(dec!(8.26), 15), dec!(1.239));
/// ```
pub fn tip_amount(
    final_fare: Decimal,
    percentage: u8,
) -> Decimal {
    final_fare * Decimal::from(percentage) / Decimal::ONE_HUNDRED
}

/// `final_fare + tip`.
pub fn total_amount(
    final_fare: Decimal,
    tip: Decimal,
) -> Decimal {
    final_fare + tip
}

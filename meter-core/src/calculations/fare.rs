//! Fare accrual.
//!
//! The running fare is a straight line in time and distance:
//!
//! ```text
//! fare = initial_fare + distance_km × per_km_rate + elapsed_minutes × per_minute_rate
//! ```
//!
//! The tariff's night surcharge is *not* applied here. It is stored with the
//! tariff and shown to the user only.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use meter_core::TariffConfig;
//! use meter_core::calculations::fare::{compute_fare, elapsed_minutes};
//!
//! let tariff = TariffConfig::default(); // 4.50 + 2.30/km + 0.50/min
//! let fare = compute_fare(elapsed_minutes(120), dec!(1.20), &tariff);
//!
//! assert_eq!(fare, dec!(8.26));
//! ```

use rust_decimal::Decimal;

use crate::TariffConfig;

const SECONDS_PER_MINUTE: i64 = 60;

/// Converts whole elapsed seconds to (fractional) minutes.
pub fn elapsed_minutes(elapsed_seconds: u64) -> Decimal {
    Decimal::from(elapsed_seconds) / Decimal::from(SECONDS_PER_MINUTE)
}

/// Computes the fare for a ride of `elapsed_minutes` and `distance_km`.
///
/// Defined for every non-negative input. The result is not rounded; use
/// [`super::common::round_half_up`] for display.
pub fn compute_fare(
    elapsed_minutes: Decimal,
    distance_km: Decimal,
    tariff: &TariffConfig,
) -> Decimal {
    tariff.initial_fare + distance_km * tariff.per_km_rate + elapsed_minutes * tariff.per_minute_rate
}

//! Common helpers for money and meter values.
//!
//! Rounding, lenient parsing of user-typed numbers, and the display formats
//! shared by the meter, payment and history screens.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use meter_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(1.239)), dec!(1.24));
/// assert_eq!(round_half_up(dec!(9.499)), dec!(9.50));
/// assert_eq!(round_half_up(dec!(0.125)), dec!(0.13));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Parses a user-typed number, falling back to `default`.
///
/// Accepts surrounding whitespace and a comma as decimal separator
/// (`"2,30"`). Blank, unparsable and negative input all yield `default`.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use meter_core::calculations::common::parse_decimal_or;
///
/// assert_eq!(parse_decimal_or(" 2.30 ", Decimal::ZERO), dec!(2.30));
/// assert_eq!(parse_decimal_or("2,30", Decimal::ZERO), dec!(2.30));
/// assert_eq!(parse_decimal_or("abc", Decimal::ONE), Decimal::ONE);
/// ```
pub fn parse_decimal_or(
    raw: &str,
    default: Decimal,
) -> Decimal {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return default;
    }

    let parsed = trimmed
        .parse::<Decimal>()
        .or_else(|_| trimmed.replace(',', ".").parse::<Decimal>());

    match parsed {
        Ok(value) if value >= Decimal::ZERO => value,
        Ok(value) => {
            tracing::warn!(input = %raw, %value, "negative value replaced by default");
            default
        }
        Err(e) => {
            tracing::warn!(input = %raw, "invalid decimal: {}", e);
            default
        }
    }
}

/// Formats a number of seconds as `HH:MM:SS`.
///
/// Hours are not wrapped, so a 25-hour ride shows `25:00:00`.
pub fn format_duration(seconds: u64) -> String {
    let hrs = seconds / 3600;
    let mins = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hrs:02}:{mins:02}:{secs:02}")
}

/// Formats an amount for display: `€ 9.50`.
pub fn format_money(amount: Decimal) -> String {
    format!("€ {:.2}", round_half_up(amount))
}

/// Formats a distance for display: `1.20 km`.
pub fn format_km(distance_km: Decimal) -> String {
    format!("{:.2} km", round_half_up(distance_km))
}

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Time-based identifier (milliseconds since the Unix epoch, bumped when two
/// rides settle within the same millisecond).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(pub i64);

impl RecordId {
    /// The last three digits, as shown on the history card ("Ride #123").
    pub fn short(&self) -> String {
        let digits = self.0.to_string();
        let start = digits.len().saturating_sub(3);
        digits[start..].to_string()
    }
}

impl fmt::Display for RecordId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An immutable history entry produced by a confirmed settlement.
///
/// Amounts are stored already rounded to cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RideRecord {
    pub id: RecordId,
    /// `dd/mm/yyyy`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    /// `HH:MM:SS`
    pub duration: String,
    pub distance_km: Decimal,
    pub fare: Decimal,
    pub tip: Decimal,
    pub total: Decimal,
    pub destination_address: Option<String>,
}

impl RideRecord {
    pub fn has_tip(&self) -> bool {
        self.tip > Decimal::ZERO
    }
}

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::parse_decimal_or;

/// The four rates that govern fare accrual.
///
/// `night_surcharge` is a multiplier that is stored and displayed but is not
/// folded into the running fare.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TariffConfig {
    pub initial_fare: Decimal,
    pub per_km_rate: Decimal,
    pub per_minute_rate: Decimal,
    pub night_surcharge: Decimal,
}

impl Default for TariffConfig {
    fn default() -> Self {
        Self {
            initial_fare: Decimal::new(450, 2),
            per_km_rate: Decimal::new(230, 2),
            per_minute_rate: Decimal::new(50, 2),
            night_surcharge: Decimal::new(120, 2),
        }
    }
}

impl TariffConfig {
    /// Replaces a single field from raw user text, storing 0 when the text
    /// does not parse.
    pub fn set_field_from_text(
        &mut self,
        field: TariffField,
        raw: &str,
    ) {
        let value = parse_decimal_or(raw, Decimal::ZERO);
        match field {
            TariffField::InitialFare => self.initial_fare = value,
            TariffField::PerKmRate => self.per_km_rate = value,
            TariffField::PerMinuteRate => self.per_minute_rate = value,
            TariffField::NightSurcharge => self.night_surcharge = value,
        }
    }
}

/// Names one editable field of a [`TariffConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TariffField {
    InitialFare,
    PerKmRate,
    PerMinuteRate,
    NightSurcharge,
}

impl TariffField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::InitialFare => "Initial fare",
            Self::PerKmRate => "Per km",
            Self::PerMinuteRate => "Per minute",
            Self::NightSurcharge => "Night surcharge",
        }
    }
}

/// Opaque identifier of a [`TariffPreset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PresetId(pub(crate) u64);

impl fmt::Display for PresetId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// A named tariff created by the user. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TariffPreset {
    pub id: PresetId,
    pub name: String,
    pub description: Option<String>,
    pub tariff: TariffConfig,
}

/// Raw form input for a new preset (no id yet).
///
/// Every field is kept as the text the user typed; conversion happens in
/// [`TariffPresetDraft::into_preset`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TariffPresetDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub initial_fare: String,
    #[serde(default)]
    pub per_km_rate: String,
    #[serde(default)]
    pub per_minute_rate: String,
    #[serde(default)]
    pub night_surcharge: String,
}

impl TariffPresetDraft {
    /// Returns `true` when the draft carries a usable (non-blank) name.
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Converts the draft into a preset.
    ///
    /// Returns `None` when the name is blank. Unparsable numbers become 0,
    /// except the night surcharge which becomes 1.
    pub fn into_preset(
        self,
        id: PresetId,
    ) -> Option<TariffPreset> {
        if !self.has_name() {
            return None;
        }

        let description = self.description.trim();
        Some(TariffPreset {
            id,
            name: self.name.trim().to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            tariff: TariffConfig {
                initial_fare: parse_decimal_or(&self.initial_fare, Decimal::ZERO),
                per_km_rate: parse_decimal_or(&self.per_km_rate, Decimal::ZERO),
                per_minute_rate: parse_decimal_or(&self.per_minute_rate, Decimal::ZERO),
                night_surcharge: parse_decimal_or(&self.night_surcharge, Decimal::ONE),
            },
        })
    }
}

//! Active tariff, user presets and tip options.

use tracing::{info, warn};

use crate::{PresetId, TariffConfig, TariffField, TariffPreset, TariffPresetDraft, TipOptionSet};

/// Holds the working tariff the meter accrues against, the user's named
/// presets (in creation order) and the tips offered at payment time.
#[derive(Debug, Clone, Default)]
pub struct TariffRegistry {
    active: TariffConfig,
    presets: Vec<TariffPreset>,
    tip_options: TipOptionSet,
    next_preset_id: u64,
}

impl TariffRegistry {
    pub fn new(
        active: TariffConfig,
        tip_options: TipOptionSet,
    ) -> Self {
        Self {
            active,
            presets: Vec::new(),
            tip_options,
            next_preset_id: 1,
        }
    }

    pub fn active(&self) -> &TariffConfig {
        &self.active
    }

    /// Replaces the working tariff.
    ///
    /// Allowed mid-ride; a running fare picks it up on the next tick.
    pub fn set_active_tariff(
        &mut self,
        config: TariffConfig,
    ) {
        info!(?config, "active tariff replaced");
        self.active = config;
    }

    /// Edits one field of the working tariff from raw text (0 if unparsable).
    pub fn edit_active_field(
        &mut self,
        field: TariffField,
        raw: &str,
    ) {
        self.active.set_field_from_text(field, raw);
    }

    pub fn presets(&self) -> &[TariffPreset] {
        &self.presets
    }

    pub fn preset(
        &self,
        id: PresetId,
    ) -> Option<&TariffPreset> {
        self.presets.iter().find(|p| p.id == id)
    }

    /// Creates a preset from form input.
    ///
    /// A blank name leaves the registry untouched and returns `None`. Bad
    /// numbers never reject the draft; see [`TariffPresetDraft::into_preset`].
    pub fn add_preset(
        &mut self,
        draft: TariffPresetDraft,
    ) -> Option<PresetId> {
        let id = PresetId(self.next_preset_id.max(1));
        let Some(preset) = draft.into_preset(id) else {
            warn!("preset ignored: name is blank");
            return None;
        };

        info!(%id, name = %preset.name, "preset added");
        self.next_preset_id = id.0 + 1;
        self.presets.push(preset);
        Some(id)
    }

    /// Deletes a preset. Returns whether anything was removed.
    pub fn remove_preset(
        &mut self,
        id: PresetId,
    ) -> bool {
        let before = self.presets.len();
        self.presets.retain(|p| p.id != id);
        before != self.presets.len()
    }

    /// Copies a preset's rates into the working tariff.
    pub fn apply_preset(
        &mut self,
        id: PresetId,
    ) -> bool {
        match self.preset(id).map(|p| p.tariff.clone()) {
            Some(tariff) => {
                self.set_active_tariff(tariff);
                true
            }
            None => false,
        }
    }

    pub fn tip_options(&self) -> &TipOptionSet {
        &self.tip_options
    }

    /// Replaces the tip menu, keeping at most four values clamped to 0..=100.
    pub fn set_tip_options(
        &mut self,
        values: impl IntoIterator<Item = i64>,
    ) {
        self.tip_options = TipOptionSet::new(values);
        info!(options = ?self.tip_options.as_slice(), "tip options replaced");
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;

    fn draft(name: &str) -> TariffPresetDraft {
        TariffPresetDraft {
            name: name.to_string(),
            initial_fare: "3.00".to_string(),
            per_km_rate: "1.50".to_string(),
            per_minute_rate: "0.25".to_string(),
            night_surcharge: "1.25".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn add_preset_keeps_creation_order() {
        let mut registry = TariffRegistry::default();

        let a = registry.add_preset(draft("Airport")).unwrap();
        let b = registry.add_preset(draft("Night")).unwrap();

        let names: Vec<_> = registry.presets().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Airport", "Night"]);
        assert_ne!(a, b);
    }

    #[test]
    fn add_preset_with_blank_name_changes_nothing() {
        let mut registry = TariffRegistry::default();
        registry.add_preset(draft("Airport"));

        assert_eq!(registry.add_preset(draft("  \t ")), None);

        assert_eq!(registry.presets().len(), 1);
    }

    #[test]
    fn add_preset_defaults_non_numeric_fields() {
        let mut registry = TariffRegistry::default();
        let mut d = draft("Broken");
        d.per_km_rate = "lots".to_string();
        d.night_surcharge = "?".to_string();

        let id = registry.add_preset(d).unwrap();

        let preset = registry.preset(id).unwrap();
        assert_eq!(preset.tariff.per_km_rate, Decimal::ZERO);
        assert_eq!(preset.tariff.night_surcharge, Decimal::ONE);
        assert_eq!(preset.tariff.initial_fare, dec!(3.00));
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let mut registry = TariffRegistry::default();
        let first = registry.add_preset(draft("One")).unwrap();
        registry.remove_preset(first);

        let second = registry.add_preset(draft("Two")).unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn remove_preset_is_idempotent() {
        let mut registry = TariffRegistry::default();
        let keep = registry.add_preset(draft("Keep")).unwrap();
        let gone = registry.add_preset(draft("Gone")).unwrap();

        assert!(registry.remove_preset(gone));
        assert!(!registry.remove_preset(gone));

        assert_eq!(registry.presets().len(), 1);
        assert!(registry.preset(keep).is_some());
    }

    #[test]
    fn apply_preset_copies_rates_into_active() {
        let mut registry = TariffRegistry::default();
        let id = registry.add_preset(draft("Airport")).unwrap();

        assert!(registry.apply_preset(id));

        assert_eq!(registry.active().initial_fare, dec!(3.00));
        assert_eq!(registry.active().per_minute_rate, dec!(0.25));
    }

    #[test]
    fn apply_unknown_preset_keeps_active() {
        let mut registry = TariffRegistry::default();

        assert!(!registry.apply_preset(PresetId(99)));

        assert_eq!(registry.active(), &TariffConfig::default());
    }

    #[test]
    fn edit_active_field_parses_or_zeroes() {
        let mut registry = TariffRegistry::default();

        registry.edit_active_field(TariffField::InitialFare, "5.10");
        registry.edit_active_field(TariffField::PerMinuteRate, "");

        assert_eq!(registry.active().initial_fare, dec!(5.10));
        assert_eq!(registry.active().per_minute_rate, Decimal::ZERO);
    }

    #[test]
    fn set_tip_options_replaces_and_clamps() {
        let mut registry = TariffRegistry::default();

        registry.set_tip_options([5, 12, 150, -3, 40]);

        assert_eq!(registry.tip_options().as_slice(), &[5, 12, 100, 0]);
    }
}

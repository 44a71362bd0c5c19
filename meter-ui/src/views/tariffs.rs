use std::fmt::Write;

use meter_core::calculations::common::format_money;
use meter_core::{TariffConfig, TariffField, TariffRegistry};

const FIELDS: [TariffField; 4] = [
    TariffField::InitialFare,
    TariffField::PerKmRate,
    TariffField::PerMinuteRate,
    TariffField::NightSurcharge,
];

fn field_value(
    tariff: &TariffConfig,
    field: TariffField,
) -> String {
    match field {
        TariffField::InitialFare => format_money(tariff.initial_fare),
        TariffField::PerKmRate => format_money(tariff.per_km_rate),
        TariffField::PerMinuteRate => format_money(tariff.per_minute_rate),
        TariffField::NightSurcharge => format!("x{}", tariff.night_surcharge),
    }
}

/// Active rates, the tip menu, then every preset in creation order.
pub fn render_tariffs(registry: &TariffRegistry) -> String {
    let mut out = String::from("Active tariff\n");
    for field in FIELDS {
        let _ = writeln!(out, "  {:<16}{:>10}", field.label(), field_value(registry.active(), field));
    }

    let tips = registry
        .tip_options()
        .as_slice()
        .iter()
        .map(|t| format!("{t}%"))
        .collect::<Vec<_>>()
        .join(", ");
    let _ = writeln!(out, "Tip options: {tips}");

    if registry.presets().is_empty() {
        out.push_str("No saved tariffs.");
        return out;
    }

    out.push_str("Saved tariffs");
    for preset in registry.presets() {
        let _ = write!(
            out,
            "\n  {} {}: {} + {}/km + {}/min",
            preset.id,
            preset.name,
            format_money(preset.tariff.initial_fare),
            format_money(preset.tariff.per_km_rate),
            format_money(preset.tariff.per_minute_rate),
        );
        if let Some(description) = &preset.description {
            let _ = write!(out, " ({description})");
        }
    }
    out
}

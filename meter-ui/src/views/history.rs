use std::fmt::Write;

use meter_core::RideLedger;
use meter_core::calculations::common::{format_km, format_money};

/// Totals followed by one card per ride, newest first.
pub fn render_history(ledger: &RideLedger) -> String {
    if ledger.is_empty() {
        return "No rides yet.".to_string();
    }

    let summary = ledger.summary();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ride(s) | fares {} | tips {} | total {} | {}",
        summary.rides,
        format_money(summary.fares),
        format_money(summary.tips),
        format_money(summary.total),
        format_km(summary.distance_km),
    );

    for record in ledger.records() {
        let _ = writeln!(out, "Ride #{}  {} {}", record.id.short(), record.date, record.time);
        if let Some(address) = &record.destination_address {
            let _ = writeln!(out, "  to {address}");
        }
        let _ = write!(
            out,
            "  {} | {} | fare {}",
            record.duration,
            format_km(record.distance_km),
            format_money(record.fare)
        );
        if record.has_tip() {
            let _ = write!(out, " + tip {}", format_money(record.tip));
        }
        let _ = writeln!(out, " = {}", format_money(record.total));
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use meter_core::{RecordId, RideRecord};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn record(
        id: i64,
        tip: Decimal,
    ) -> RideRecord {
        RideRecord {
            id: RecordId(id),
            date: "14/03/2025".to_string(),
            time: "09:07".to_string(),
            duration: "00:02:00".to_string(),
            distance_km: dec!(1.20),
            fare: dec!(8.26),
            tip,
            total: dec!(8.26) + tip,
            destination_address: None,
        }
    }

    #[test]
    fn empty_ledger_has_placeholder() {
        assert_eq!(render_history(&RideLedger::new()), "No rides yet.");
    }

    #[test]
    fn card_shows_short_id_and_amounts() {
        let text = render_history_of(vec![record(1_741_943_220_457, dec!(1.24))]);

        assert!(text.contains("Ride #457  14/03/2025 09:07"));
        assert!(text.contains("00:02:00 | 1.20 km | fare € 8.26 + tip € 1.24 = € 9.50"));
    }

    #[test]
    fn untipped_card_omits_tip() {
        let text = render_history_of(vec![record(1_741_943_220_001, Decimal::ZERO)]);

        assert!(!text.contains("tip €"));
        assert!(text.contains("fare € 8.26 = € 8.26"));
    }

    /// Builds a ledger through the public settle path so the test does not
    /// depend on ledger internals.
    fn render_history_of(records: Vec<RideRecord>) -> String {
        use chrono::{FixedOffset, TimeZone};
        use meter_core::{RideState, Settlement};

        let mut ledger = RideLedger::new();
        for r in records {
            let mut settlement = Settlement::open(r.fare);
            if r.tip > Decimal::ZERO {
                settlement.select_tip(15);
            }
            let ride = RideState {
                elapsed_seconds: 120,
                distance_km: r.distance_km,
                current_fare: r.fare,
                ..RideState::default()
            };
            let at = FixedOffset::east_opt(0)
                .unwrap()
                .timestamp_millis_opt(r.id.0)
                .unwrap();
            ledger.settle(&settlement, &ride, &at);
        }
        render_history(&ledger)
    }
}

use std::fmt::Write;

use meter_core::calculations::common::format_money;
use meter_core::{Settlement, TipOptionSet};

use super::status_bar::{build_status_bar, hints};

/// The payment dialog: fare, the tip menu with the current choice marked,
/// and the total.
pub fn render_payment(
    settlement: &Settlement,
    tips: &TipOptionSet,
) -> String {
    let menu = tips
        .as_slice()
        .iter()
        .map(|&pct| {
            if pct == settlement.tip_percentage() {
                format!("[{pct}%]")
            } else {
                format!(" {pct}% ")
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    let mut out = String::new();
    let _ = writeln!(out, "Fare   {:>12}", format_money(settlement.final_fare()));
    let _ = writeln!(out, "Tip    {menu}");
    let _ = writeln!(
        out,
        "       {:>12} ({}%)",
        format_money(settlement.tip_amount()),
        settlement.tip_percentage()
    );
    let _ = writeln!(out, "Total  {:>12}", format_money(settlement.total_amount()));
    let _ = write!(out, "{}", build_status_bar(&[hints::CONFIRM, hints::ESC]));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn selected_tip_is_marked_and_amounts_rounded() {
        let mut settlement = Settlement::open(dec!(8.26));
        settlement.select_tip(15);

        let text = render_payment(&settlement, &TipOptionSet::default());

        assert!(text.contains("[15%]"));
        assert!(text.contains(" 10% "));
        assert!(text.contains("€ 1.24"));
        assert!(text.contains("€ 9.50"));
    }

    #[test]
    fn no_tip_marks_zero() {
        let text = render_payment(&Settlement::open(dec!(5)), &TipOptionSet::default());

        assert!(text.contains("[0%]"));
        assert!(text.contains("Total        € 5.00"));
    }
}

//! CSV import of tariff presets.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter.
//!
//! | Column            | Required | Notes                                       |
//! |-------------------|----------|---------------------------------------------|
//! | `name`            | yes      | Rows with a blank name are skipped          |
//! | `description`     | no       |                                             |
//! | `initial_fare`    | no       | Unparsable or missing becomes `0`           |
//! | `per_km_rate`     | no       | Unparsable or missing becomes `0`           |
//! | `per_minute_rate` | no       | Unparsable or missing becomes `0`           |
//! | `night_surcharge` | no       | Unparsable or missing becomes `1`           |
//!
//! Numbers are read exactly like the add-tariff form reads them, so a comma
//! decimal separator (`2,30`) works when the cell is quoted.
//!
//! ```csv
//! name,description,initial_fare,per_km_rate,per_minute_rate,night_surcharge
//! Airport,Flat pickup,3.25,0.95,0.30,1.20
//! Night,,4.00,1.10,0.35,1.50
//! ```

use std::path::{Path, PathBuf};

use meter_core::{PresetId, TariffPresetDraft, TariffRegistry};
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum TariffCsvError {
    /// Bad structure or a missing `name` column.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What an import did to the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub added: Vec<PresetId>,
    /// 1-based data row numbers that were skipped for a blank name.
    pub skipped_rows: Vec<usize>,
}

/// Parses CSV text into drafts, in file order.
pub fn load_from_str(input: &str) -> Result<Vec<TariffPresetDraft>, TariffCsvError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<TariffPresetDraft>()
        .map(|row| row.map_err(TariffCsvError::from))
        .collect()
}

pub fn load_from_file(path: &Path) -> Result<Vec<TariffPresetDraft>, TariffCsvError> {
    let contents = std::fs::read_to_string(path).map_err(|source| TariffCsvError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents)
}

/// Adds every draft to `registry` through the normal validation.
pub fn import_into(
    registry: &mut TariffRegistry,
    drafts: Vec<TariffPresetDraft>,
) -> ImportReport {
    let mut report = ImportReport::default();
    for (idx, draft) in drafts.into_iter().enumerate() {
        match registry.add_preset(draft) {
            Some(id) => report.added.push(id),
            None => {
                warn!(row = idx + 1, "skipping tariff row with blank name");
                report.skipped_rows.push(idx + 1);
            }
        }
    }
    info!(added = report.added.len(), skipped = report.skipped_rows.len(), "tariff presets imported");
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    // -----------------------------------------------------------------------
    // Helper: every column populated
    // -----------------------------------------------------------------------
    const FULL_CSV: &str = "\
name,description,initial_fare,per_km_rate,per_minute_rate,night_surcharge
Airport,Flat pickup,3.25,0.95,0.30,1.20
Night,,4.00,1.10,0.35,1.50
";

    #[test]
    fn test_full_csv_parses_in_file_order() {
        let drafts = load_from_str(FULL_CSV).expect("should parse full CSV");

        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].name, "Airport");
        assert_eq!(drafts[0].description, "Flat pickup");
        assert_eq!(drafts[1].name, "Night");
        assert_eq!(drafts[1].description, "");
    }

    #[test]
    fn test_only_name_column_is_required() {
        let drafts = load_from_str("name\nCity\n").expect("name-only CSV is valid");

        assert_eq!(drafts[0].initial_fare, "");
    }

    #[test]
    fn test_missing_name_column_returns_parse_error() {
        let result = load_from_str("initial_fare,per_km_rate\n3.00,1.00\n");

        assert!(matches!(result, Err(TariffCsvError::Parse(_))));
    }

    #[test]
    fn test_ragged_row_returns_parse_error() {
        let result = load_from_str("name,initial_fare\nCity,3.00,extra\n");

        assert!(matches!(result, Err(TariffCsvError::Parse(_))));
    }

    #[test]
    fn test_column_order_does_not_matter() {
        let csv = "\
per_minute_rate,name,initial_fare
0.40,Shuffled,2.75
";
        let mut registry = TariffRegistry::default();
        let report = import_into(&mut registry, load_from_str(csv).unwrap());

        let preset = registry.preset(report.added[0]).unwrap();
        assert_eq!(preset.tariff.initial_fare, dec!(2.75));
        assert_eq!(preset.tariff.per_minute_rate, dec!(0.40));
        assert_eq!(preset.tariff.per_km_rate, Decimal::ZERO);
        assert_eq!(preset.tariff.night_surcharge, Decimal::ONE);
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let csv = "name , initial_fare\n  Porto  ,  3.10 \n";
        let mut registry = TariffRegistry::default();
        let report = import_into(&mut registry, load_from_str(csv).unwrap());

        let preset = registry.preset(report.added[0]).unwrap();
        assert_eq!(preset.name, "Porto");
        assert_eq!(preset.tariff.initial_fare, dec!(3.10));
    }

    #[test]
    fn test_blank_names_are_skipped_and_reported() {
        let csv = "\
name,initial_fare
First,1.00
,2.00
Third,3.00
";
        let mut registry = TariffRegistry::default();
        let report = import_into(&mut registry, load_from_str(csv).unwrap());

        assert_eq!(report.added.len(), 2);
        assert_eq!(report.skipped_rows, vec![2]);
        assert_eq!(registry.presets().len(), 2);
    }

    #[test]
    fn test_bad_numbers_fall_back_like_the_form() {
        let csv = "name,per_km_rate,night_surcharge\nOdd,lots,?\n";
        let mut registry = TariffRegistry::default();
        let report = import_into(&mut registry, load_from_str(csv).unwrap());

        let preset = registry.preset(report.added[0]).unwrap();
        assert_eq!(preset.tariff.per_km_rate, Decimal::ZERO);
        assert_eq!(preset.tariff.night_surcharge, Decimal::ONE);
    }

    #[test]
    fn test_quoted_comma_decimal() {
        let csv = "name,per_km_rate\nLisboa,\"2,30\"\n";
        let mut registry = TariffRegistry::default();
        let report = import_into(&mut registry, load_from_str(csv).unwrap());

        assert_eq!(registry.preset(report.added[0]).unwrap().tariff.per_km_rate, dec!(2.30));
    }

    #[test]
    fn test_header_only_returns_empty_vec() {
        let drafts = load_from_str("name,description\n").expect("header-only CSV is valid");

        assert!(drafts.is_empty());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_from_file(Path::new("/nonexistent/tariffs.csv")).unwrap_err();

        assert!(err.to_string().contains("/nonexistent/tariffs.csv"));
    }
}

use meter_core::TipOptionSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseTipListError {
    #[error("'{0}' is not a whole percentage")]
    NotANumber(String),

    #[error("at least one tip option is required")]
    Empty,
}

/// Parses a tip menu such as `"0, 10, 15, 20"`.
///
/// Values are clamped to 0..=100 and only the first four are kept.
pub fn parse_tip_list(s: &str) -> Result<TipOptionSet, ParseTipListError> {
    let values = s
        .split([',', ' ', ';'])
        .filter(|part| !part.trim().is_empty())
        .map(|part| {
            let part = part.trim().trim_end_matches('%');
            part.parse::<i64>()
                .map_err(|_| ParseTipListError::NotANumber(part.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if values.is_empty() {
        return Err(ParseTipListError::Empty);
    }
    Ok(TipOptionSet::new(values))
}

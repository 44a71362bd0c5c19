use serde::{Deserialize, Serialize};

/// Percentages offered when settling a ride.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<i64>", into = "Vec<u8>")]
pub struct TipOptionSet(Vec<u8>);

impl TipOptionSet {
    /// At most this many options are shown at once.
    pub const MAX_OPTIONS: usize = 4;

    /// Builds an option set from user values, keeping the first
    /// [`Self::MAX_OPTIONS`] entries and clamping each to 0..=100.
    pub fn new(values: impl IntoIterator<Item = i64>) -> Self {
        Self(
            values
                .into_iter()
                .take(Self::MAX_OPTIONS)
                .map(|v| v.clamp(0, 100) as u8)
                .collect(),
        )
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn contains(
        &self,
        percentage: u8,
    ) -> bool {
        self.0.contains(&percentage)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for TipOptionSet {
    fn default() -> Self {
        Self(vec![0, 10, 15, 20])
    }
}

impl From<Vec<i64>> for TipOptionSet {
    fn from(values: Vec<i64>) -> Self {
        Self::new(values)
    }
}

impl From<TipOptionSet> for Vec<u8> {
    fn from(options: TipOptionSet) -> Self {
        options.0
    }
}

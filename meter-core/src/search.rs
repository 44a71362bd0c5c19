//! Destination search state.
//!
//! Every keystroke bumps a generation counter. A lookup is tagged with the
//! generation that asked for it, and its answer is applied only if no newer
//! query has been typed since; late answers for older text are discarded.
//! Debouncing is left to whoever drives the lookups.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::ports::{AddressSearch, SearchError};
use crate::{AddressCandidate, Destination};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Quiet period after the last keystroke before a lookup is issued.
    pub debounce_ms: u64,
    pub min_query_len: usize,
    pub max_results: usize,
    /// ISO country code the lookup is restricted to.
    pub country: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            min_query_len: 3,
            max_results: 5,
            country: "pt".to_string(),
        }
    }
}

/// A lookup the driver should perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub generation: u64,
    pub query: String,
    pub country: String,
    pub limit: usize,
}

#[derive(Debug, Clone, Default)]
pub struct DestinationSearch {
    settings: SearchSettings,
    query: String,
    generation: u64,
    results: Vec<AddressCandidate>,
}

impl DestinationSearch {
    pub fn new(settings: SearchSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn latest_generation(&self) -> u64 {
        self.generation
    }

    pub fn results(&self) -> &[AddressCandidate] {
        &self.results
    }

    /// Records new query text.
    ///
    /// Returns the lookup to issue, or `None` when the trimmed text is too
    /// short to search, in which case the result list is emptied at once.
    pub fn update_query(
        &mut self,
        text: &str,
    ) -> Option<SearchRequest> {
        self.generation += 1;
        self.query = text.to_string();

        let trimmed = text.trim();
        if trimmed.chars().count() < self.settings.min_query_len {
            self.results.clear();
            return None;
        }

        Some(SearchRequest {
            generation: self.generation,
            query: trimmed.to_string(),
            country: self.settings.country.clone(),
            limit: self.settings.max_results,
        })
    }

    /// Applies the answer to a lookup.
    ///
    /// Answers from an older generation are dropped and `false` is returned.
    /// A failed lookup shows as an empty list.
    pub fn apply_results(
        &mut self,
        generation: u64,
        outcome: Result<Vec<AddressCandidate>, SearchError>,
    ) -> bool {
        if generation != self.generation {
            debug!(generation, latest = self.generation, "discarding stale search results");
            return false;
        }

        self.results = match outcome {
            Ok(mut candidates) => {
                candidates.truncate(self.settings.max_results);
                candidates
            }
            Err(error) => {
                warn!(%error, query = %self.query, "address search failed");
                Vec::new()
            }
        };
        true
    }

    /// Picks a result, clearing the query and the list.
    pub fn select(
        &mut self,
        index: usize,
    ) -> Option<Destination> {
        let destination = self.results.get(index)?.to_destination();
        self.clear();
        Some(destination)
    }

    /// Empties the query and results. Any lookup still in flight goes stale.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.query.clear();
        self.results.clear();
    }
}

/// Runs `request` against `search`.
pub async fn fetch(
    search: &dyn AddressSearch,
    request: &SearchRequest,
) -> Result<Vec<AddressCandidate>, SearchError> {
    search
        .search(&request.query, &request.country, request.limit)
        .await
}

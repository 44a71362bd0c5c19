use async_trait::async_trait;
use thiserror::Error;

use crate::AddressCandidate;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Free-text lookup of places.
///
/// `country` is a lowercase ISO 3166-1 code used to narrow results; `limit`
/// caps how many candidates come back.
#[async_trait]
pub trait AddressSearch: Send + Sync {
    async fn search(
        &self,
        query: &str,
        country: &str,
        limit: usize,
    ) -> Result<Vec<AddressCandidate>, SearchError>;
}

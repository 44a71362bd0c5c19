use std::time::Duration;

use async_trait::async_trait;
use meter_core::AddressCandidate;
use meter_core::ports::{AddressSearch, SearchError};
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
const USER_AGENT: &str = concat!("taxi-meter/", env!("CARGO_PKG_VERSION"));

/// One entry of a Nominatim `/search?format=json` answer. Coordinates come
/// back as strings.
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
    display_name: String,
}

impl Place {
    fn into_candidate(self) -> Result<AddressCandidate, SearchError> {
        let parse = |raw: &str| {
            raw.parse::<f64>()
                .map_err(|_| SearchError::InvalidResponse(format!("bad coordinate '{raw}'")))
        };
        Ok(AddressCandidate {
            latitude: parse(&self.lat)?,
            longitude: parse(&self.lon)?,
            display_name: self.display_name,
        })
    }
}

/// Thin HTTP client for Nominatim free-text search.
#[derive(Debug, Clone)]
pub struct NominatimSearch {
    client: Client,
    endpoint: String,
}

impl NominatimSearch {
    pub fn new(endpoint: &str) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| SearchError::Network(format!("failed to build HTTP client: {err}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn search_url(
        &self,
        query: &str,
        country: &str,
        limit: usize,
    ) -> Result<Url, SearchError> {
        let mut url = Url::parse(&format!("{}/search", self.endpoint))
            .map_err(|err| SearchError::Network(format!("failed to build search URL: {err}")))?;
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("q", query)
            .append_pair("countrycodes", country)
            .append_pair("limit", &limit.to_string());
        Ok(url)
    }
}

#[async_trait]
impl AddressSearch for NominatimSearch {
    async fn search(
        &self,
        query: &str,
        country: &str,
        limit: usize,
    ) -> Result<Vec<AddressCandidate>, SearchError> {
        let url = self.search_url(query, country, limit)?;
        debug!(%url, "nominatim lookup");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|err| SearchError::Network(err.to_string()))?;

        let places: Vec<Place> = response
            .json()
            .await
            .map_err(|err| SearchError::InvalidResponse(err.to_string()))?;

        places.into_iter().take(limit).map(Place::into_candidate).collect()
    }
}

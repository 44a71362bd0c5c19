//! [`meter_core::ports::AddressSearch`] backends.

mod gazetteer;
#[cfg(feature = "nominatim")]
pub mod nominatim;

use std::sync::Arc;

use meter_core::ports::AddressSearch;

pub use gazetteer::Gazetteer;

/// The address search compiled into this build: Nominatim at `endpoint`
/// when the `nominatim` feature is on, otherwise the offline gazetteer.
#[cfg(feature = "nominatim")]
pub fn address_search(endpoint: Option<&str>) -> anyhow::Result<Arc<dyn AddressSearch>> {
    let endpoint = endpoint.unwrap_or(nominatim::DEFAULT_ENDPOINT);
    Ok(Arc::new(nominatim::NominatimSearch::new(endpoint)?))
}

#[cfg(not(feature = "nominatim"))]
pub fn address_search(endpoint: Option<&str>) -> anyhow::Result<Arc<dyn AddressSearch>> {
    if let Some(endpoint) = endpoint {
        tracing::warn!(endpoint, "built without the nominatim feature; using offline gazetteer");
    }
    Ok(Arc::new(Gazetteer))
}

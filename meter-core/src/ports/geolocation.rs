use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use crate::GeoPoint;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeolocationError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("position unavailable: {0}")]
    Unavailable(String),

    #[error("timed out waiting for a position")]
    Timeout,
}

/// One-shot access to the device position.
#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn current_position(&self) -> Result<GeoPoint, GeolocationError>;
}

/// Asks `geolocator` for a fix and substitutes `fallback` on any failure.
pub async fn locate_or_fallback(
    geolocator: &dyn Geolocator,
    fallback: GeoPoint,
) -> GeoPoint {
    match geolocator.current_position().await {
        Ok(point) => point,
        Err(error) => {
            warn!(%error, lat = fallback.lat, lng = fallback.lng, "using fallback location");
            fallback
        }
    }
}

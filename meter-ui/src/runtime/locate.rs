use std::time::Duration;

use async_trait::async_trait;
use meter_core::GeoPoint;
use meter_core::ports::{GeolocationError, Geolocator};

/// A [`Geolocator`] that answers with a configured position after an
/// optional delay, or reports the position as unavailable.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredGeolocator {
    fix: Option<GeoPoint>,
    delay: Duration,
    timeout: Option<Duration>,
}

impl ConfiguredGeolocator {
    pub fn new(fix: Option<GeoPoint>) -> Self {
        Self {
            fix,
            ..Self::default()
        }
    }

    /// Simulates the time a device takes to acquire a fix.
    pub fn with_delay(
        mut self,
        delay: Duration,
    ) -> Self {
        self.delay = delay;
        self
    }

    /// Gives up with [`GeolocationError::Timeout`] when the delay exceeds this.
    pub fn with_timeout(
        mut self,
        timeout: Duration,
    ) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[async_trait]
impl Geolocator for ConfiguredGeolocator {
    async fn current_position(&self) -> Result<GeoPoint, GeolocationError> {
        let acquire = async {
            tokio::time::sleep(self.delay).await;
            self.fix
                .ok_or_else(|| GeolocationError::Unavailable("no device position configured".to_string()))
        };

        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, acquire)
                .await
                .unwrap_or(Err(GeolocationError::Timeout)),
            None => acquire.await,
        }
    }
}

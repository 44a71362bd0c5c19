use serde::{Deserialize, Serialize};

/// A WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Used whenever the device cannot report a position (central Lisbon).
    pub const FALLBACK: GeoPoint = GeoPoint {
        lat: 38.7223,
        lng: -9.1393,
    };

    pub const fn new(
        lat: f64,
        lng: f64,
    ) -> Self {
        Self { lat, lng }
    }
}

impl Default for GeoPoint {
    fn default() -> Self {
        Self::FALLBACK
    }
}

/// The place the passenger asked to be taken to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub point: GeoPoint,
    pub address: String,
}

/// One candidate returned by an address lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressCandidate {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
}

impl AddressCandidate {
    pub fn to_destination(&self) -> Destination {
        Destination {
            point: GeoPoint::new(self.latitude, self.longitude),
            address: self.display_name.clone(),
        }
    }
}

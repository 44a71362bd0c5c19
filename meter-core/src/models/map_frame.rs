use serde::{Deserialize, Serialize};

use super::{Destination, GeoPoint};

/// Default zoom level handed to the map widget.
pub const DEFAULT_ZOOM: u8 = 15;

/// Everything the map widget needs to draw one frame.
///
/// The widget only renders; nothing flows back into the meter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapFrame {
    pub center: GeoPoint,
    pub route: Vec<GeoPoint>,
    pub destination: Option<Destination>,
    pub zoom: u8,
    pub waze_style: bool,
}

impl MapFrame {
    /// Returns `true` when there are enough points to draw a polyline.
    pub fn has_route_line(&self) -> bool {
        self.route.len() >= 2
    }

    /// The most recent position, where the "moving" marker goes.
    pub fn current_position(&self) -> Option<GeoPoint> {
        self.route.last().copied()
    }
}

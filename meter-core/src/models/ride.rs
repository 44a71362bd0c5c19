use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Destination, GeoPoint};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RideStatus {
    #[default]
    Idle,
    Running,
    Paused,
}

impl RideStatus {
    /// Label shown under the fare display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Stopped",
            Self::Running => "Running",
            Self::Paused => "Paused",
        }
    }

    /// Idle is the only state without a ride in progress.
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

impl fmt::Display for RideStatus {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
        };
        f.write_str(name)
    }
}

/// The ride in progress. Exactly one exists per session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RideState {
    pub status: RideStatus,
    pub elapsed_seconds: u64,
    pub distance_km: Decimal,
    pub current_fare: Decimal,
    pub route_points: Vec<GeoPoint>,
    pub destination: Option<Destination>,
}

impl RideState {
    /// Zeroes the accrual counters and the route, leaving status and
    /// destination alone.
    pub fn clear_accrual(&mut self) {
        self.elapsed_seconds = 0;
        self.distance_km = Decimal::ZERO;
        self.current_fare = Decimal::ZERO;
        self.route_points.clear();
    }

    /// Returns `true` if the ride accrued anything worth recording.
    pub fn has_moved(&self) -> bool {
        self.elapsed_seconds > 0 || self.distance_km > Decimal::ZERO
    }
}

//! The ride clock: lifecycle state machine plus per-second accrual.
//!
//! ```text
//!            start            pause
//!   Idle ───────────▶ Running ─────▶ Paused
//!    ▲                  │  ◀─────────  │
//!    │      stop        │    resume    │ stop
//!    └──────────────────┴──────────────┘
//! ```
//!
//! The tick schedule and the position feed are subscribed exactly while the
//! status is `Running`. Every transition away from `Running` cancels both
//! before the status changes, so a firing that was already queued is seen
//! as stray and dropped.

use std::time::Duration;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::calculations::fare::{compute_fare, elapsed_minutes};
use crate::error::{MeterError, RideAction};
use crate::ports::{PositionFeed, TickSchedule, WatchOptions};
use crate::{Destination, GeoPoint, RideState, RideStatus, Settlement, TariffConfig};

/// Knobs for the accrual loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockSettings {
    /// How often the tick schedule fires.
    pub tick_period: Duration,
    /// Synthetic distance added on every tick.
    pub distance_per_tick_km: Decimal,
    /// Options forwarded to the position feed.
    pub watch: WatchOptions,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            tick_period: Duration::from_secs(1),
            distance_per_tick_km: Decimal::new(1, 2),
            watch: WatchOptions::default(),
        }
    }
}

/// Owns the [`RideState`] and the two timed inputs that feed it.
pub struct RideClock {
    ride: RideState,
    settings: ClockSettings,
    ticks: Box<dyn TickSchedule>,
    positions: Box<dyn PositionFeed>,
    subscribed: bool,
}

impl RideClock {
    pub fn new(
        ticks: Box<dyn TickSchedule>,
        positions: Box<dyn PositionFeed>,
    ) -> Self {
        Self::with_settings(ticks, positions, ClockSettings::default())
    }

    pub fn with_settings(
        ticks: Box<dyn TickSchedule>,
        positions: Box<dyn PositionFeed>,
        settings: ClockSettings,
    ) -> Self {
        Self {
            ride: RideState::default(),
            settings,
            ticks,
            positions,
            subscribed: false,
        }
    }

    pub fn ride(&self) -> &RideState {
        &self.ride
    }

    pub fn status(&self) -> RideStatus {
        self.ride.status
    }

    pub fn settings(&self) -> &ClockSettings {
        &self.settings
    }

    /// `true` while the tick schedule and position feed are switched on.
    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    /// Idle → Running. Zeroes time, distance, fare and route first.
    pub fn start(&mut self) -> Result<(), MeterError> {
        self.require(RideAction::Start, RideStatus::Idle)?;

        self.ride.clear_accrual();
        self.ride.status = RideStatus::Running;
        self.subscribe();

        info!(destination = ?self.ride.destination.as_ref().map(|d| &d.address), "ride started");
        Ok(())
    }

    /// Running → Paused. Accrued values are kept.
    pub fn pause(&mut self) -> Result<(), MeterError> {
        self.require(RideAction::Pause, RideStatus::Running)?;

        self.unsubscribe();
        self.ride.status = RideStatus::Paused;

        info!(elapsed = self.ride.elapsed_seconds, "ride paused");
        Ok(())
    }

    /// Paused → Running. Accrual continues from the paused values.
    pub fn resume(&mut self) -> Result<(), MeterError> {
        self.require(RideAction::Resume, RideStatus::Paused)?;

        self.ride.status = RideStatus::Running;
        self.subscribe();

        info!(elapsed = self.ride.elapsed_seconds, "ride resumed");
        Ok(())
    }

    /// The single pause/continue button.
    pub fn toggle_pause(&mut self) -> Result<(), MeterError> {
        match self.ride.status {
            RideStatus::Running => self.pause(),
            RideStatus::Paused => self.resume(),
            RideStatus::Idle => Err(MeterError::InvalidTransition {
                action: RideAction::Pause,
                status: RideStatus::Idle,
            }),
        }
    }

    /// Running|Paused → Idle, opening a settlement for the current fare.
    ///
    /// Time, distance and fare stay on the ride so the payment screen can
    /// show them; they are cleared by [`RideClock::reset`].
    pub fn stop(&mut self) -> Result<Settlement, MeterError> {
        if !self.ride.status.is_active() {
            return Err(MeterError::InvalidTransition {
                action: RideAction::Stop,
                status: self.ride.status,
            });
        }

        self.unsubscribe();
        self.ride.status = RideStatus::Idle;

        info!(
            elapsed = self.ride.elapsed_seconds,
            distance_km = %self.ride.distance_km,
            fare = %self.ride.current_fare,
            "ride stopped"
        );
        Ok(Settlement::open(self.ride.current_fare))
    }

    /// Applies one accrual step against `tariff`.
    ///
    /// Time and distance are incremented first and the fare is computed from
    /// the incremented values. Returns `false` (and changes nothing) unless
    /// the ride is running.
    pub fn tick(
        &mut self,
        tariff: &TariffConfig,
    ) -> bool {
        if self.ride.status != RideStatus::Running {
            debug!(status = %self.ride.status, "dropping stray tick");
            return false;
        }

        self.ride.elapsed_seconds += 1;
        self.ride.distance_km += self.settings.distance_per_tick_km;
        self.ride.current_fare = compute_fare(
            elapsed_minutes(self.ride.elapsed_seconds),
            self.ride.distance_km,
            tariff,
        );

        debug!(
            elapsed = self.ride.elapsed_seconds,
            distance_km = %self.ride.distance_km,
            fare = %self.ride.current_fare,
            "tick"
        );
        true
    }

    /// Appends a position sample to the route while running.
    pub fn record_position(
        &mut self,
        point: GeoPoint,
    ) -> bool {
        if self.ride.status != RideStatus::Running {
            debug!(status = %self.ride.status, "dropping stray position sample");
            return false;
        }

        self.ride.route_points.push(point);
        debug!(lat = point.lat, lng = point.lng, points = self.ride.route_points.len(), "route sample");
        true
    }

    /// Places the start-of-ride fix at the head of the route.
    ///
    /// The fix usually resolves after `start`, possibly after the feed has
    /// already delivered samples, so it is inserted rather than appended.
    pub fn set_origin(
        &mut self,
        point: GeoPoint,
    ) -> bool {
        if self.ride.status != RideStatus::Running {
            return false;
        }

        self.ride.route_points.insert(0, point);
        true
    }

    pub fn set_destination(
        &mut self,
        destination: Option<Destination>,
    ) {
        self.ride.destination = destination;
    }

    /// Back to a fresh idle ride, dropping any subscription still held.
    pub fn reset(&mut self) {
        self.unsubscribe();
        self.ride = RideState::default();
    }

    fn require(
        &self,
        action: RideAction,
        expected: RideStatus,
    ) -> Result<(), MeterError> {
        if self.ride.status == expected {
            Ok(())
        } else {
            Err(MeterError::InvalidTransition {
                action,
                status: self.ride.status,
            })
        }
    }

    fn subscribe(&mut self) {
        if self.subscribed {
            return;
        }
        self.ticks.start(self.settings.tick_period);
        self.positions.watch(&self.settings.watch);
        self.subscribed = true;
    }

    fn unsubscribe(&mut self) {
        if !self.subscribed {
            return;
        }
        self.ticks.cancel();
        self.positions.clear_watch();
        self.subscribed = false;
    }
}

impl Drop for RideClock {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A periodic timer that the ride clock switches on and off.
///
/// Implementations deliver each firing by calling
/// [`crate::MeterSession::tick`] (or [`crate::RideClock::tick`]); the clock
/// ignores firings that arrive while it is not running.
pub trait TickSchedule: Send {
    /// Begin firing every `period`. Called only when not already started.
    fn start(
        &mut self,
        period: Duration,
    );

    /// Stop firing. After this returns no further firing may be delivered.
    fn cancel(&mut self);
}

/// A push-based stream of position samples.
///
/// Samples are delivered through [`crate::MeterSession::record_position`] at
/// whatever cadence the provider chooses.
pub trait PositionFeed: Send {
    fn watch(
        &mut self,
        options: &WatchOptions,
    );

    fn clear_watch(&mut self);
}

/// Settings passed to [`PositionFeed::watch`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchOptions {
    pub high_accuracy: bool,
    /// Oldest cached sample the provider may return, in milliseconds.
    pub maximum_age_ms: u64,
    /// How long the provider may take to produce a sample, in milliseconds.
    pub timeout_ms: u64,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            maximum_age_ms: 1_000,
            timeout_ms: 5_000,
        }
    }
}

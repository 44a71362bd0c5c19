//! Tokio implementations of the meter's timed inputs.
//!
//! The tick schedule and the position feed run as spawned tasks that push
//! [`MeterEvent`]s into one channel. Each event is stamped with the epoch of
//! the subscription that produced it; cancelling a subscription advances the
//! epoch, so anything it queued before being aborted is recognised as stale
//! by the [`driver::MeterDriver`] and dropped.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use meter_core::GeoPoint;
use tokio::sync::mpsc;

pub mod driver;
pub mod feed;
pub mod locate;
pub mod schedule;
pub mod search;

pub use driver::{DriverError, MeterDriver};
pub use feed::DriftingPositionFeed;
pub use locate::ConfiguredGeolocator;
pub use schedule::TokioTickSchedule;
pub use search::SearchDriver;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeterEvent {
    Tick { epoch: u64 },
    Position { epoch: u64, point: GeoPoint },
}

pub type EventTx = mpsc::UnboundedSender<MeterEvent>;
pub type EventRx = mpsc::UnboundedReceiver<MeterEvent>;

pub fn event_channel() -> (EventTx, EventRx) {
    mpsc::unbounded_channel()
}

/// Subscription generation shared between a producer and the driver.
#[derive(Debug, Clone, Default)]
pub struct Epoch(Arc<AtomicU64>);

impl Epoch {
    pub fn current(&self) -> u64 {
        self.0.load(Ordering::Acquire)
    }

    /// Invalidates everything stamped with the current epoch.
    pub fn advance(&self) -> u64 {
        self.0.fetch_add(1, Ordering::AcqRel) + 1
    }

    pub fn is_current(
        &self,
        epoch: u64,
    ) -> bool {
        self.current() == epoch
    }
}

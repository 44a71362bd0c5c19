use meter_core::{MeterSession, RideStatus};
use thiserror::Error;
use tracing::{debug, trace};

use super::{Epoch, EventRx, MeterEvent};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DriverError {
    #[error("the meter stopped running before {wanted}s elapsed (at {reached}s)")]
    NotRunning { wanted: u64, reached: u64 },

    #[error("event channel closed")]
    ChannelClosed,
}

/// Pumps timed events into a [`MeterSession`].
pub struct MeterDriver {
    session: MeterSession,
    events: EventRx,
    tick_epoch: Epoch,
    feed_epoch: Epoch,
}

impl MeterDriver {
    pub fn new(
        session: MeterSession,
        events: EventRx,
        tick_epoch: Epoch,
        feed_epoch: Epoch,
    ) -> Self {
        Self {
            session,
            events,
            tick_epoch,
            feed_epoch,
        }
    }

    pub fn session(&self) -> &MeterSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut MeterSession {
        &mut self.session
    }

    pub fn into_session(self) -> MeterSession {
        self.session
    }

    /// Applies one event. Events from a cancelled subscription are dropped.
    /// Returns whether the session changed.
    pub fn handle(
        &mut self,
        event: MeterEvent,
    ) -> bool {
        match event {
            MeterEvent::Tick { epoch } if self.tick_epoch.is_current(epoch) => self.session.tick(),
            MeterEvent::Position { epoch, point } if self.feed_epoch.is_current(epoch) => {
                self.session.record_position(point)
            }
            stale => {
                trace!(?stale, "dropping event from cancelled subscription");
                false
            }
        }
    }

    /// Applies every event already queued, without waiting.
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events.try_recv() {
            if self.handle(event) {
                applied += 1;
            }
        }
        applied
    }

    /// Runs the event loop until the ride shows `seconds` of elapsed time.
    ///
    /// Fails if the ride is not running (and would therefore never get
    /// there).
    pub async fn run_until_elapsed(
        &mut self,
        seconds: u64,
    ) -> Result<(), DriverError> {
        while self.session.ride().elapsed_seconds < seconds {
            if self.session.status() != RideStatus::Running {
                return Err(DriverError::NotRunning {
                    wanted: seconds,
                    reached: self.session.ride().elapsed_seconds,
                });
            }
            let event = self.events.recv().await.ok_or(DriverError::ChannelClosed)?;
            self.handle(event);
        }
        debug!(seconds, "meter reached target time");
        Ok(())
    }
}

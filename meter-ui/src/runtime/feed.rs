use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use meter_core::GeoPoint;
use meter_core::ports::{PositionFeed, WatchOptions};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

use super::{Epoch, EventTx, MeterEvent};

/// Roughly 11 m north-east per sample.
const DEFAULT_STEP: (f64, f64) = (0.0001, 0.0001);

/// A simulated device that moves in a straight line from a starting point,
/// reporting one sample per interval while watched.
///
/// Successive watches continue from where the previous one left off, so a
/// paused ride resumes at the last reported position.
pub struct DriftingPositionFeed {
    events: EventTx,
    epoch: Epoch,
    start: GeoPoint,
    step: (f64, f64),
    interval: Duration,
    samples_sent: Arc<AtomicU64>,
    task: Option<JoinHandle<()>>,
}

impl DriftingPositionFeed {
    pub fn drift_from(
        start: GeoPoint,
        events: EventTx,
        epoch: Epoch,
    ) -> Self {
        Self {
            events,
            epoch,
            start,
            step: DEFAULT_STEP,
            interval: Duration::from_secs(1),
            samples_sent: Arc::default(),
            task: None,
        }
    }

    pub fn with_step(
        mut self,
        lat: f64,
        lng: f64,
    ) -> Self {
        self.step = (lat, lng);
        self
    }

    pub fn with_interval(
        mut self,
        interval: Duration,
    ) -> Self {
        self.interval = interval;
        self
    }

    fn abort_task(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl PositionFeed for DriftingPositionFeed {
    fn watch(
        &mut self,
        options: &WatchOptions,
    ) {
        self.abort_task();
        let epoch = self.epoch.current();
        let events = self.events.clone();
        let (start, step, period) = (self.start, self.step, self.interval);
        let sent = self.samples_sent.clone();
        debug!(
            epoch,
            high_accuracy = options.high_accuracy,
            maximum_age_ms = options.maximum_age_ms,
            timeout_ms = options.timeout_ms,
            "position watch started"
        );

        self.task = Some(tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                let n = sent.fetch_add(1, Ordering::AcqRel) + 1;
                let point = GeoPoint::new(start.lat + step.0 * n as f64, start.lng + step.1 * n as f64);
                if events.send(MeterEvent::Position { epoch, point }).is_err() {
                    break;
                }
            }
        }));
    }

    fn clear_watch(&mut self) {
        self.abort_task();
        let epoch = self.epoch.advance();
        debug!(epoch, "position watch cleared");
    }
}

impl Drop for DriftingPositionFeed {
    fn drop(&mut self) {
        self.abort_task();
    }
}

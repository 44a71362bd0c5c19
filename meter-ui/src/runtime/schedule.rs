use std::time::Duration;

use meter_core::ports::TickSchedule;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, trace};

use super::{Epoch, EventTx, MeterEvent};

/// A [`TickSchedule`] backed by a tokio interval task.
///
/// `start` must be called from within a tokio runtime.
pub struct TokioTickSchedule {
    events: EventTx,
    epoch: Epoch,
    task: Option<JoinHandle<()>>,
}

impl TokioTickSchedule {
    pub fn new(
        events: EventTx,
        epoch: Epoch,
    ) -> Self {
        Self {
            events,
            epoch,
            task: None,
        }
    }

    fn abort_task(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl TickSchedule for TokioTickSchedule {
    fn start(
        &mut self,
        period: Duration,
    ) {
        self.abort_task();
        let epoch = self.epoch.current();
        let events = self.events.clone();
        debug!(?period, epoch, "tick schedule started");

        self.task = Some(tokio::spawn(async move {
            // First firing one period after start, never immediately.
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                trace!(epoch, "tick");
                if events.send(MeterEvent::Tick { epoch }).is_err() {
                    break;
                }
            }
        }));
    }

    fn cancel(&mut self) {
        self.abort_task();
        let epoch = self.epoch.advance();
        debug!(epoch, "tick schedule cancelled");
    }
}

impl Drop for TokioTickSchedule {
    fn drop(&mut self) {
        self.abort_task();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::event_channel;
    use pretty_assertions::assert_eq;

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period_after_start() {
        let (tx, mut rx) = event_channel();
        let epoch = Epoch::default();
        let mut schedule = TokioTickSchedule::new(tx, epoch.clone());

        schedule.start(Duration::from_secs(1));
        time::sleep(Duration::from_millis(3_500)).await;
        schedule.cancel();

        let mut ticks = 0;
        while let Ok(event) = rx.try_recv() {
            assert_eq!(event, MeterEvent::Tick { epoch: 0 });
            ticks += 1;
        }
        assert_eq!(ticks, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_ticks_and_advances_epoch() {
        let (tx, mut rx) = event_channel();
        let epoch = Epoch::default();
        let mut schedule = TokioTickSchedule::new(tx, epoch.clone());

        schedule.start(Duration::from_secs(1));
        schedule.cancel();
        time::sleep(Duration::from_secs(5)).await;

        assert!(rx.try_recv().is_err());
        assert_eq!(epoch.current(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_stamps_new_epoch() {
        let (tx, mut rx) = event_channel();
        let epoch = Epoch::default();
        let mut schedule = TokioTickSchedule::new(tx, epoch.clone());

        schedule.start(Duration::from_secs(1));
        schedule.cancel();
        schedule.start(Duration::from_secs(1));
        time::sleep(Duration::from_millis(1_500)).await;

        assert_eq!(rx.try_recv().unwrap(), MeterEvent::Tick { epoch: 1 });
    }
}

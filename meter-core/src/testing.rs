//! Scripted port implementations for driving the meter from tests.
//!
//! A [`PortRecorder`] hands out a tick schedule and a position feed that record
//! every subscribe/cancel call into one shared log, so a test can assert on
//! what the clock switched on and off.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;

use crate::ports::{AddressSearch, PositionFeed, SearchError, TickSchedule, WatchOptions};
use crate::{AddressCandidate, RideClock};

/// What the clock asked of its inputs so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortLog {
    pub ticking: bool,
    pub tick_starts: usize,
    pub tick_cancels: usize,
    pub last_period: Option<Duration>,
    pub watching: bool,
    pub watch_starts: usize,
    pub watch_clears: usize,
    pub last_watch: Option<WatchOptions>,
}

#[derive(Debug, Clone, Default)]
pub struct PortRecorder(Arc<Mutex<PortLog>>);

impl PortRecorder {
    pub fn snapshot(&self) -> PortLog {
        self.lock().clone()
    }

    pub fn schedule(&self) -> Box<dyn TickSchedule> {
        Box::new(RecordedSchedule(self.clone()))
    }

    pub fn feed(&self) -> Box<dyn PositionFeed> {
        Box::new(RecordedFeed(self.clone()))
    }

    /// A clock with default settings wired to this recorder.
    pub fn clock(&self) -> RideClock {
        RideClock::new(self.schedule(), self.feed())
    }

    fn lock(&self) -> MutexGuard<'_, PortLog> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

struct RecordedSchedule(PortRecorder);

impl TickSchedule for RecordedSchedule {
    fn start(
        &mut self,
        period: Duration,
    ) {
        let mut log = self.0.lock();
        log.ticking = true;
        log.tick_starts += 1;
        log.last_period = Some(period);
    }

    fn cancel(&mut self) {
        let mut log = self.0.lock();
        log.ticking = false;
        log.tick_cancels += 1;
    }
}

struct RecordedFeed(PortRecorder);

impl PositionFeed for RecordedFeed {
    fn watch(
        &mut self,
        options: &WatchOptions,
    ) {
        let mut log = self.0.lock();
        log.watching = true;
        log.watch_starts += 1;
        log.last_watch = Some(options.clone());
    }

    fn clear_watch(&mut self) {
        let mut log = self.0.lock();
        log.watching = false;
        log.watch_clears += 1;
    }
}

/// An [`AddressSearch`] that answers every query from a fixed list,
/// keeping entries whose display name contains the query (case-insensitive).
#[derive(Debug, Clone, Default)]
pub struct StaticAddressSearch {
    pub places: Vec<AddressCandidate>,
    pub fail_with: Option<SearchError>,
}

impl StaticAddressSearch {
    pub fn new(places: Vec<AddressCandidate>) -> Self {
        Self {
            places,
            fail_with: None,
        }
    }

    pub fn failing(error: SearchError) -> Self {
        Self {
            places: Vec::new(),
            fail_with: Some(error),
        }
    }
}

#[async_trait]
impl AddressSearch for StaticAddressSearch {
    async fn search(
        &self,
        query: &str,
        _country: &str,
        limit: usize,
    ) -> Result<Vec<AddressCandidate>, SearchError> {
        if let Some(error) = &self.fail_with {
            return Err(error.clone());
        }
        let needle = query.to_lowercase();
        Ok(self
            .places
            .iter()
            .filter(|p| p.display_name.to_lowercase().contains(&needle))
            .take(limit)
            .cloned()
            .collect())
    }
}

/// A handful of Lisbon landmarks for search tests.
pub fn lisbon_places() -> Vec<AddressCandidate> {
    [
        (38.7742, -9.1342, "Aeroporto Humberto Delgado, Lisboa"),
        (38.7139, -9.1334, "Rossio, Lisboa"),
        (38.6916, -9.2160, "Torre de Belém, Lisboa"),
        (38.7075, -9.1364, "Praça do Comércio, Lisboa"),
        (38.7369, -9.1427, "Saldanha, Lisboa"),
        (38.7681, -9.0940, "Parque das Nações, Lisboa"),
        (38.7223, -9.1393, "Avenida da Liberdade, Lisboa"),
    ]
    .into_iter()
    .map(|(latitude, longitude, name)| AddressCandidate {
        latitude,
        longitude,
        display_name: name.to_string(),
    })
    .collect()
}

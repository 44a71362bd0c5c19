use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use meter_core::ports::{AddressSearch, SearchError};
use meter_core::search::fetch;
use meter_core::{AddressCandidate, DestinationSearch};
use tokio::sync::mpsc;
use tracing::{debug, trace};

/// A finished lookup, tagged with the generation that asked for it.
#[derive(Debug)]
struct SearchAnswer {
    generation: u64,
    outcome: Result<Vec<AddressCandidate>, SearchError>,
}

/// Debounces keystrokes into address lookups.
///
/// Each keystroke schedules a lookup after the quiet period. When the timer
/// fires, the lookup only goes out if no newer keystroke has arrived since.
pub struct SearchDriver {
    backend: Arc<dyn AddressSearch>,
    debounce: Duration,
    latest: Arc<AtomicU64>,
    answers_tx: mpsc::UnboundedSender<SearchAnswer>,
    answers_rx: mpsc::UnboundedReceiver<SearchAnswer>,
}

impl SearchDriver {
    pub fn new(
        backend: Arc<dyn AddressSearch>,
        debounce: Duration,
    ) -> Self {
        let (answers_tx, answers_rx) = mpsc::unbounded_channel();
        Self {
            backend,
            debounce,
            latest: Arc::default(),
            answers_tx,
            answers_rx,
        }
    }

    /// Feeds new query text into `search`. Returns `true` when a lookup was
    /// scheduled.
    pub fn type_query(
        &self,
        search: &mut DestinationSearch,
        text: &str,
    ) -> bool {
        let request = search.update_query(text);
        self.latest.store(search.latest_generation(), Ordering::Release);

        let Some(request) = request else {
            trace!(text, "query too short, nothing scheduled");
            return false;
        };

        let backend = self.backend.clone();
        let latest = self.latest.clone();
        let answers = self.answers_tx.clone();
        let debounce = self.debounce;

        tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            if latest.load(Ordering::Acquire) != request.generation {
                debug!(generation = request.generation, "superseded before lookup");
                return;
            }
            let outcome = fetch(backend.as_ref(), &request).await;
            let _ = answers.send(SearchAnswer {
                generation: request.generation,
                outcome,
            });
        });
        true
    }

    /// Clears `search` so any lookup still pending is dropped.
    pub fn clear(
        &self,
        search: &mut DestinationSearch,
    ) {
        search.clear();
        self.latest.store(search.latest_generation(), Ordering::Release);
    }

    /// Applies answers to `search` until the one for its latest query
    /// arrives, or `within` runs out. Returns whether results were applied.
    pub async fn settle(
        &mut self,
        search: &mut DestinationSearch,
        within: Duration,
    ) -> bool {
        let wait = async {
            while let Some(answer) = self.answers_rx.recv().await {
                if search.apply_results(answer.generation, answer.outcome) {
                    return true;
                }
            }
            false
        };
        tokio::time::timeout(within, wait).await.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use meter_core::SearchSettings;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    /// Records every query that actually reached the backend.
    #[derive(Default)]
    struct CountingSearch(Mutex<Vec<String>>);

    #[async_trait]
    impl AddressSearch for CountingSearch {
        async fn search(
            &self,
            query: &str,
            _country: &str,
            _limit: usize,
        ) -> Result<Vec<AddressCandidate>, SearchError> {
            self.0.lock().unwrap().push(query.to_string());
            Ok(vec![AddressCandidate {
                latitude: 38.7,
                longitude: -9.1,
                display_name: format!("{query}, Lisboa"),
            }])
        }
    }

    #[tokio::test(start_paused = true)]
    async fn fast_typing_issues_one_lookup() {
        let backend = Arc::new(CountingSearch::default());
        let mut driver = SearchDriver::new(backend.clone(), Duration::from_millis(500));
        let mut search = DestinationSearch::new(SearchSettings::default());

        for text in ["R", "Ro", "Ros", "Ross", "Rossio"] {
            driver.type_query(&mut search, text);
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert!(driver.settle(&mut search, Duration::from_secs(2)).await);

        assert_eq!(*backend.0.lock().unwrap(), vec!["Rossio".to_string()]);
        assert_eq!(search.results()[0].display_name, "Rossio, Lisboa");
    }

    #[tokio::test(start_paused = true)]
    async fn pause_in_typing_lets_earlier_lookup_through() {
        let backend = Arc::new(CountingSearch::default());
        let mut driver = SearchDriver::new(backend.clone(), Duration::from_millis(500));
        let mut search = DestinationSearch::new(SearchSettings::default());

        driver.type_query(&mut search, "Sal");
        tokio::time::sleep(Duration::from_millis(700)).await;
        driver.type_query(&mut search, "Saldanha");
        assert!(driver.settle(&mut search, Duration::from_secs(2)).await);

        assert_eq!(backend.0.lock().unwrap().len(), 2);
        assert_eq!(search.results()[0].display_name, "Saldanha, Lisboa");
    }

    #[tokio::test(start_paused = true)]
    async fn short_query_schedules_nothing() {
        let backend = Arc::new(CountingSearch::default());
        let mut driver = SearchDriver::new(backend.clone(), Duration::from_millis(500));
        let mut search = DestinationSearch::new(SearchSettings::default());

        assert!(!driver.type_query(&mut search, "Ro"));
        assert!(!driver.settle(&mut search, Duration::from_secs(1)).await);

        assert!(backend.0.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn clear_drops_pending_lookup() {
        let backend = Arc::new(CountingSearch::default());
        let driver = SearchDriver::new(backend.clone(), Duration::from_millis(500));
        let mut search = DestinationSearch::new(SearchSettings::default());

        driver.type_query(&mut search, "Belém");
        driver.clear(&mut search);
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert!(backend.0.lock().unwrap().is_empty());
        assert!(search.results().is_empty());
    }
}

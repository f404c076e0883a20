use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use crate::fetcher::{HolidayFetcher, normalize_codes};
use crate::index::HolidayIndex;
use crate::source::HolidaySource;

/// Result of [`HolidayFeed::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The cycle's index is now the published snapshot.
    Applied,
    /// A later cycle started before this one finished; its index was dropped.
    Superseded,
    /// Same year and country set as the latest request; nothing was fetched.
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CycleKey {
    year: i32,
    codes: Vec<String>,
}

#[derive(Debug, Default)]
struct FeedState {
    generation: u64,
    requested: Option<CycleKey>,
    loading: bool,
    snapshot: Arc<HolidayIndex>,
}

/// Published holiday index for the current year and active country set.
///
/// Each [`update`](Self::update) starts a numbered cycle. Only the most
/// recently started cycle may publish, so a slow stale cycle cannot overwrite
/// a newer result. In-flight requests of a stale cycle are not cancelled and
/// still fill the cache.
pub struct HolidayFeed<S> {
    fetcher: HolidayFetcher<S>,
    state: Mutex<FeedState>,
}

impl<S: HolidaySource> HolidayFeed<S> {
    pub fn new(fetcher: HolidayFetcher<S>) -> Self {
        Self {
            fetcher,
            state: Mutex::new(FeedState::default()),
        }
    }

    pub fn fetcher(&self) -> &HolidayFetcher<S> {
        &self.fetcher
    }

    /// Re-runs the fetch and merge cycle for `year` over `country_codes`.
    pub async fn update<C: AsRef<str>>(&self, year: i32, country_codes: &[C]) -> CycleOutcome {
        let key = CycleKey {
            year,
            codes: normalize_codes(country_codes),
        };
        if self.lock().requested.as_ref() == Some(&key) {
            return CycleOutcome::Unchanged;
        }
        self.run_cycle(key).await
    }

    /// Repeats the latest requested cycle. Countries that failed last time are
    /// requested again; the rest are served from cache.
    pub async fn refresh(&self) -> CycleOutcome {
        let requested = self.lock().requested.clone();
        match requested {
            Some(key) => self.run_cycle(key).await,
            None => CycleOutcome::Unchanged,
        }
    }

    async fn run_cycle(&self, key: CycleKey) -> CycleOutcome {
        let generation = {
            let mut state = self.lock();
            state.generation += 1;
            state.requested = Some(key.clone());

            if key.codes.is_empty() {
                state.snapshot = Arc::new(HolidayIndex::new());
                state.loading = false;
                debug!(generation = state.generation, "no active countries, cleared index");
                return CycleOutcome::Applied;
            }

            state.loading = true;
            state.generation
        };
        let mut pending = PendingCycle {
            state: &self.state,
            generation,
            settled: false,
        };

        let index = self.fetcher.fetch_index(key.year, &key.codes).await;

        pending.settled = true;
        let mut state = self.lock();
        if state.generation != generation {
            debug!(generation, latest = state.generation, "dropping superseded cycle");
            return CycleOutcome::Superseded;
        }
        debug!(generation, dates = index.len(), "publishing holiday index");
        state.snapshot = Arc::new(index);
        state.loading = false;
        CycleOutcome::Applied
    }

    /// The most recently published index.
    pub fn snapshot(&self) -> Arc<HolidayIndex> {
        Arc::clone(&self.lock().snapshot)
    }

    /// True while the latest cycle is still fetching.
    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    /// Number of cycles started so far.
    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    fn lock(&self) -> MutexGuard<'_, FeedState> {
        lock_state(&self.state)
    }
}

fn lock_state(state: &Mutex<FeedState>) -> MutexGuard<'_, FeedState> {
    // Every critical section leaves the state consistent before it can panic.
    state.lock().unwrap_or_else(|e| e.into_inner())
}

/// Rolls back a cycle whose future is dropped before it settles, so the same
/// inputs start a fresh cycle instead of being reported as unchanged.
struct PendingCycle<'a> {
    state: &'a Mutex<FeedState>,
    generation: u64,
    settled: bool,
}

impl Drop for PendingCycle<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut state = lock_state(self.state);
        if state.generation == self.generation {
            debug!(generation = self.generation, "cycle cancelled before publishing");
            state.requested = None;
            state.loading = false;
        }
    }
}

//! Fetch, merge and calendar behaviour against an in-memory holiday source.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use futures::FutureExt;
use meridian_core::{
    CycleOutcome, HolidayFeed, HolidayFetcher, HolidaySource, MonthGrid, PublicHoliday, RegionId,
    Selection, country_codes,
};
use thiserror::Error;
use tokio::sync::Notify;

#[derive(Debug, Error)]
#[error("upstream unavailable for {0}")]
struct FakeError(String);

/// Serves canned holidays, counts requests, and can hold a year's requests
/// until its gate is notified.
#[derive(Default)]
struct FakeSource {
    data: HashMap<(i32, String), Vec<PublicHoliday>>,
    failing: HashSet<String>,
    gates: HashMap<i32, Arc<Notify>>,
    calls: Mutex<HashMap<(i32, String), usize>>,
}

impl FakeSource {
    fn with(mut self, year: i32, code: &str, holidays: Vec<PublicHoliday>) -> Self {
        self.data.insert((year, code.to_string()), holidays);
        self
    }

    fn failing(mut self, code: &str) -> Self {
        self.failing.insert(code.to_string());
        self
    }

    fn gated(mut self, year: i32, gate: Arc<Notify>) -> Self {
        self.gates.insert(year, gate);
        self
    }

    fn calls(&self, year: i32, code: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(&(year, code.to_string()))
            .copied()
            .unwrap_or(0)
    }

    fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }
}

impl HolidaySource for FakeSource {
    type Error = FakeError;

    async fn public_holidays(
        &self,
        year: i32,
        country_code: &str,
    ) -> Result<Vec<PublicHoliday>, FakeError> {
        let code = country_code.to_string();
        *self
            .calls
            .lock()
            .unwrap()
            .entry((year, code.clone()))
            .or_default() += 1;

        if let Some(gate) = self.gates.get(&year) {
            gate.notified().await;
        }
        if self.failing.contains(&code) {
            return Err(FakeError(code));
        }
        Ok(self.data.get(&(year, code)).cloned().unwrap_or_default())
    }
}

fn record(date: &str, name: &str, global: bool) -> PublicHoliday {
    PublicHoliday {
        date: date.parse().unwrap(),
        local_name: None,
        name: name.to_string(),
        country_code: None,
        fixed: false,
        global,
        counties: None,
        launch_year: None,
        types: vec!["Public".to_string()],
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn standard_source() -> FakeSource {
    FakeSource::default()
        .with(
            2025,
            "KR",
            vec![
                record("2025-01-01", "New Year's Day", true),
                record("2025-01-28", "Korean New Year", true),
                record("2025-03-03", "Regional Observance", false),
            ],
        )
        .with(
            2025,
            "DE",
            vec![
                record("2025-01-01", "New Year's Day", true),
                record("2025-01-06", "Epiphany", false),
            ],
        )
        .with(2025, "GB", vec![record("2025-01-01", "New Year's Day", true)])
        .with(2024, "KR", vec![record("2024-01-01", "New Year's Day", true)])
}

#[tokio::test]
async fn korean_new_year_is_indexed() {
    let fetcher = HolidayFetcher::new(standard_source());

    let index = fetcher.fetch_index(2025, &["KR"]).await;

    let new_year = index.get_str("2025-01-01");
    assert_eq!(new_year.len(), 1);
    assert_eq!(new_year[0].name, "New Year's Day");
    assert_eq!(new_year[0].country_code, "KR");
    assert_eq!(new_year[0].region_id, RegionId::EastAsia);
}

#[tokio::test]
async fn regional_holidays_are_filtered_out() {
    let fetcher = HolidayFetcher::new(standard_source());

    let index = fetcher.fetch_index(2025, &["KR", "DE"]).await;

    assert!(index.get_str("2025-03-03").is_empty());
    assert!(index.get_str("2025-01-06").is_empty());
    assert!(index.iter().flat_map(|(_, hs)| hs).all(|h| h.nationwide));
    assert_eq!(index.get_str("2025-01-01").len(), 2);
}

#[tokio::test]
async fn repeated_fetch_hits_cache() {
    let fetcher = HolidayFetcher::new(standard_source());

    fetcher.fetch_country(2025, "KR").await.unwrap();
    fetcher.fetch_country(2025, "kr").await.unwrap();
    fetcher.fetch_index(2025, &["KR", "DE"]).await;

    assert_eq!(fetcher.source().calls(2025, "KR"), 1);
    assert_eq!(fetcher.source().calls(2025, "DE"), 1);
    assert_eq!(fetcher.cache().len(), 2);
}

#[tokio::test]
async fn failing_country_does_not_affect_others() {
    let fetcher = HolidayFetcher::new(standard_source().failing("DE"));

    let index = fetcher.fetch_index(2025, &["KR", "DE", "GB"]).await;

    let new_year = index.get_str("2025-01-01");
    let codes: Vec<&str> = new_year.iter().map(|h| h.country_code.as_str()).collect();
    assert_eq!(codes, vec!["KR", "GB"]);
    assert_eq!(index.get_str("2025-01-28").len(), 1);

    // failures are not cached
    assert!(!fetcher.cache().contains(2025, "DE"));
    assert!(fetcher.fetch_country(2025, "DE").await.is_err());
    assert_eq!(fetcher.source().calls(2025, "DE"), 2);
}

#[tokio::test]
async fn unknown_country_is_skipped_without_request() {
    let fetcher = HolidayFetcher::new(standard_source());

    let index = fetcher.fetch_index(2025, &["BR", "KR"]).await;

    assert_eq!(fetcher.source().calls(2025, "BR"), 0);
    assert_eq!(index.country_codes(), vec!["KR"]);
}

#[tokio::test]
async fn index_tracks_active_country_set() {
    let feed = HolidayFeed::new(HolidayFetcher::new(standard_source()));

    assert_eq!(feed.update(2025, &["KR", "DE"]).await, CycleOutcome::Applied);
    assert_eq!(feed.snapshot().country_codes(), vec!["DE", "KR"]);

    assert_eq!(feed.update(2025, &["DE"]).await, CycleOutcome::Applied);
    assert_eq!(feed.snapshot().country_codes(), vec!["DE"]);
    assert!(feed.snapshot().get_str("2025-01-28").is_empty());

    // reactivation is served from the cache
    assert_eq!(feed.update(2025, &["DE", "KR"]).await, CycleOutcome::Applied);
    assert_eq!(feed.snapshot().country_codes(), vec!["DE", "KR"]);
    assert_eq!(feed.fetcher().source().calls(2025, "KR"), 1);
}

#[tokio::test]
async fn deactivating_everything_clears_without_fetching() {
    let feed = HolidayFeed::new(HolidayFetcher::new(standard_source()));
    feed.update(2025, &["KR"]).await;
    let calls = feed.fetcher().source().total_calls();

    let none: [&str; 0] = [];
    assert_eq!(feed.update(2025, &none).await, CycleOutcome::Applied);

    assert!(feed.snapshot().is_empty());
    assert!(!feed.is_loading());
    assert_eq!(feed.fetcher().source().total_calls(), calls);
}

#[tokio::test]
async fn same_inputs_do_not_start_a_cycle() {
    let feed = HolidayFeed::new(HolidayFetcher::new(standard_source()));

    feed.update(2025, &["KR", "DE"]).await;
    let generation = feed.generation();

    assert_eq!(feed.update(2025, &["kr", "DE", "KR"]).await, CycleOutcome::Unchanged);
    assert_eq!(feed.generation(), generation);
}

#[tokio::test]
async fn cancelled_cycle_does_not_block_same_inputs() {
    let gate = Arc::new(Notify::new());
    let feed = HolidayFeed::new(HolidayFetcher::new(
        standard_source().gated(2025, Arc::clone(&gate)),
    ));

    // Parks on the gate, then the future is dropped.
    assert!(feed.update(2025, &["KR"]).now_or_never().is_none());
    assert!(!feed.is_loading());
    assert!(feed.snapshot().is_empty());

    let retry = feed.update(2025, &["KR"]);
    let release = async { gate.notify_one() };
    let (outcome, ()) = tokio::join!(retry, release);

    assert_eq!(outcome, CycleOutcome::Applied);
    assert!(!feed.is_loading());
    assert_eq!(feed.snapshot().get_str("2025-01-01").len(), 1);
    assert_eq!(feed.fetcher().source().calls(2025, "KR"), 2);
}

#[tokio::test]
async fn year_change_refetches() {
    let feed = HolidayFeed::new(HolidayFetcher::new(standard_source()));

    feed.update(2025, &["KR"]).await;
    feed.update(2024, &["KR"]).await;

    let snapshot = feed.snapshot();
    assert_eq!(snapshot.get_str("2024-01-01").len(), 1);
    assert!(snapshot.get_str("2025-01-01").is_empty());
    assert_eq!(feed.fetcher().source().calls(2024, "KR"), 1);
}

#[tokio::test]
async fn stale_cycle_does_not_overwrite_newer_one() {
    let gate = Arc::new(Notify::new());
    let feed = HolidayFeed::new(HolidayFetcher::new(
        standard_source().gated(2024, Arc::clone(&gate)),
    ));

    let slow = feed.update(2024, &["KR"]);
    let fast = async {
        let outcome = feed.update(2025, &["KR"]).await;
        gate.notify_one();
        outcome
    };
    let (slow, fast) = tokio::join!(slow, fast);

    assert_eq!(fast, CycleOutcome::Applied);
    assert_eq!(slow, CycleOutcome::Superseded);

    let snapshot = feed.snapshot();
    assert_eq!(snapshot.get_str("2025-01-01").len(), 1);
    assert!(snapshot.get_str("2024-01-01").is_empty());
    // the stale response still landed in the cache
    assert!(feed.fetcher().cache().contains(2024, "KR"));
}

#[tokio::test]
async fn loading_flag_spans_the_cycle() {
    let gate = Arc::new(Notify::new());
    let feed = HolidayFeed::new(HolidayFetcher::new(
        standard_source().gated(2025, Arc::clone(&gate)),
    ));
    assert!(!feed.is_loading());

    let cycle = feed.update(2025, &["KR"]);
    let observe = async {
        let loading = feed.is_loading();
        gate.notify_one();
        loading
    };
    let (outcome, was_loading) = tokio::join!(cycle, observe);

    assert_eq!(outcome, CycleOutcome::Applied);
    assert!(was_loading);
    assert!(!feed.is_loading());
}

#[tokio::test]
async fn refresh_retries_failed_countries() {
    let feed = HolidayFeed::new(HolidayFetcher::new(standard_source().failing("DE")));

    feed.update(2025, &["KR", "DE"]).await;
    assert_eq!(feed.refresh().await, CycleOutcome::Applied);

    let source = feed.fetcher().source();
    assert_eq!(source.calls(2025, "DE"), 2);
    assert_eq!(source.calls(2025, "KR"), 1);
}

#[tokio::test]
async fn grid_shows_one_indicator_per_region() {
    let feed = HolidayFeed::new(HolidayFetcher::new(standard_source()));
    let active = country_codes(&[RegionId::EastAsia, RegionId::Europe]);
    feed.update(2025, &active).await;
    let index = feed.snapshot();

    let grid = MonthGrid::build(2025, 0, date(2025, 1, 1), &index).unwrap();

    let new_year = grid.day(1).unwrap();
    assert!(new_year.is_today);
    assert_eq!(new_year.holidays.len(), 3);
    assert_eq!(new_year.regions, vec![RegionId::EastAsia, RegionId::Europe]);
    assert_eq!(grid.day(28).unwrap().regions, vec![RegionId::EastAsia]);
    assert!(grid.day(2).unwrap().regions.is_empty());

    let mut selection = Selection::new();
    selection.select(new_year.date, &index);
    assert_eq!(selection.holidays().len(), 3);
}

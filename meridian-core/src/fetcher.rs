use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, instrument, warn};

use crate::cache::HolidayCache;
use crate::holiday::{self, Holiday, PublicHoliday};
use crate::index::HolidayIndex;
use crate::region;
use crate::source::HolidaySource;

/// Fans out per-country requests through a [`HolidaySource`] and merges them.
pub struct HolidayFetcher<S> {
    source: S,
    cache: HolidayCache,
}

impl<S: HolidaySource> HolidayFetcher<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: HolidayCache::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn cache(&self) -> &HolidayCache {
        &self.cache
    }

    /// Raw holidays for one country, from cache or a single upstream request.
    ///
    /// Only successful responses are cached.
    pub async fn fetch_country(
        &self,
        year: i32,
        country_code: &str,
    ) -> Result<Arc<[PublicHoliday]>, S::Error> {
        if let Some(hit) = self.cache.get(year, country_code) {
            debug!(year, country = country_code, "holiday cache hit");
            return Ok(hit);
        }

        debug!(year, country = country_code, "holiday cache miss");
        let fetched = self.source.public_holidays(year, country_code).await?;
        Ok(self.cache.insert(year, country_code, fetched))
    }

    /// Builds the index for `year` over the given country codes.
    ///
    /// Every request is awaited before merging. A failing or unknown country
    /// contributes nothing and never affects the others.
    #[instrument(skip(self, country_codes), fields(countries = country_codes.len()))]
    pub async fn fetch_index<C: AsRef<str>>(&self, year: i32, country_codes: &[C]) -> HolidayIndex {
        let codes = normalize_codes(country_codes);

        let results = join_all(codes.iter().map(|code| self.fetch_nationwide(year, code))).await;

        HolidayIndex::merge(results.into_iter().flatten())
    }

    async fn fetch_nationwide(&self, year: i32, code: &str) -> Option<Vec<Holiday>> {
        let Some((region, country)) = region::country(code) else {
            debug!(country = code, "skipping unknown country");
            return None;
        };

        match self.fetch_country(year, code).await {
            Ok(raw) => Some(holiday::nationwide(&raw, region, country)),
            Err(e) => {
                warn!(year, country = code, error = %e, "holiday fetch failed");
                None
            }
        }
    }
}

/// Upper-cases codes and drops repeats, keeping the first occurrence.
pub fn normalize_codes<C: AsRef<str>>(country_codes: &[C]) -> Vec<String> {
    let mut codes: Vec<String> = Vec::with_capacity(country_codes.len());
    for code in country_codes {
        let code = code.as_ref().trim().to_ascii_uppercase();
        if !code.is_empty() && !codes.contains(&code) {
            codes.push(code);
        }
    }
    codes
}

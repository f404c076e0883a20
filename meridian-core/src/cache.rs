use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::holiday::PublicHoliday;

/// Cache key: holiday year plus upper-case country code.
pub type CacheKey = (i32, String);

/// Append-only in-memory cache of raw upstream responses.
///
/// Entries live as long as the cache. Deactivating a country does not evict it.
#[derive(Debug, Default)]
pub struct HolidayCache {
    entries: RwLock<HashMap<CacheKey, Arc<[PublicHoliday]>>>,
}

fn key(year: i32, country_code: &str) -> CacheKey {
    (year, country_code.to_ascii_uppercase())
}

impl HolidayCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, year: i32, country_code: &str) -> Option<Arc<[PublicHoliday]>> {
        self.read().get(&key(year, country_code)).cloned()
    }

    /// Stores a response. A concurrent duplicate fetch may overwrite an equal entry.
    pub fn insert(
        &self,
        year: i32,
        country_code: &str,
        holidays: Vec<PublicHoliday>,
    ) -> Arc<[PublicHoliday]> {
        let value: Arc<[PublicHoliday]> = holidays.into();
        self.write()
            .insert(key(year, country_code), Arc::clone(&value));
        value
    }

    pub fn contains(&self, year: i32, country_code: &str) -> bool {
        self.read().contains_key(&key(year, country_code))
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // A poisoned lock still holds a consistent map: every write is a single insert.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<CacheKey, Arc<[PublicHoliday]>>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<CacheKey, Arc<[PublicHoliday]>>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }
}

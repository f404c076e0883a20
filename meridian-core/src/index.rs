use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::holiday::Holiday;
use crate::region::RegionId;

/// Nationwide holidays of the active countries, grouped by date.
///
/// An index is built whole from one fetch cycle and never patched afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayIndex {
    by_date: BTreeMap<NaiveDate, Vec<Holiday>>,
}

impl HolidayIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Groups per-country holiday lists by date, keeping input order within a date.
    pub fn merge<I>(groups: I) -> Self
    where
        I: IntoIterator<Item = Vec<Holiday>>,
    {
        let mut by_date: BTreeMap<NaiveDate, Vec<Holiday>> = BTreeMap::new();
        for holiday in groups.into_iter().flatten() {
            by_date.entry(holiday.date).or_default().push(holiday);
        }
        Self { by_date }
    }

    /// Holidays on `date`, empty when there are none.
    pub fn get(&self, date: NaiveDate) -> &[Holiday] {
        self.by_date.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Lookup by `YYYY-MM-DD` key. Unparseable keys have no holidays.
    pub fn get_str(&self, key: &str) -> &[Holiday] {
        match key.parse::<NaiveDate>() {
            Ok(date) => self.get(date),
            Err(_) => &[],
        }
    }

    /// Distinct regions with a holiday on `date`, in first-appearance order.
    pub fn regions_on(&self, date: NaiveDate) -> Vec<RegionId> {
        let mut regions = Vec::new();
        for holiday in self.get(date) {
            if !regions.contains(&holiday.region_id) {
                regions.push(holiday.region_id);
            }
        }
        regions
    }

    /// Number of dates with at least one holiday.
    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }

    pub fn holiday_count(&self) -> usize {
        self.by_date.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &Vec<Holiday>)> {
        self.by_date.iter()
    }

    /// Country codes present anywhere in the index, sorted and deduplicated.
    pub fn country_codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self
            .by_date
            .values()
            .flatten()
            .map(|h| h.country_code.as_str())
            .collect();
        codes.sort_unstable();
        codes.dedup();
        codes
    }
}

use chrono::NaiveDate;

use crate::holiday::Holiday;
use crate::index::HolidayIndex;

/// The selected day and the holidays shown for it.
///
/// Holidays are copied at selection time and do not follow later index updates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    date: Option<NaiveDate>,
    holidays: Vec<Holiday>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, date: NaiveDate, index: &HolidayIndex) {
        self.date = Some(date);
        self.holidays = index.get(date).to_vec();
    }

    pub fn clear(&mut self) {
        self.date = None;
        self.holidays.clear();
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn holidays(&self) -> &[Holiday] {
        &self.holidays
    }

    pub fn is_selected(&self, date: NaiveDate) -> bool {
        self.date == Some(date)
    }
}

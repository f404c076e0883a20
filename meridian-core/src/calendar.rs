use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::CalendarError;
use crate::holiday::Holiday;
use crate::index::HolidayIndex;
use crate::region::RegionId;

/// Month is zero-based throughout (0 = January).
fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, CalendarError> {
    if month > 11 {
        return Err(CalendarError::InvalidMonth(month));
    }
    NaiveDate::from_ymd_opt(year, month + 1, 1).ok_or(CalendarError::OutOfRange {
        year,
        month: month + 1,
        day: 1,
    })
}

pub fn days_in_month(year: i32, month: u32) -> Result<u32, CalendarError> {
    let first = first_of_month(year, month)?;
    Ok(first.iter_days().take_while(|d| d.month0() == month).count() as u32)
}

/// Weekday of the 1st, with 0 = Sunday.
pub fn first_weekday(year: i32, month: u32) -> Result<u32, CalendarError> {
    Ok(first_of_month(year, month)?.weekday().num_days_from_sunday())
}

/// `YYYY-MM-DD` key for a zero-based month.
pub fn date_key(year: i32, month: u32, day: u32) -> String {
    format!("{:04}-{:02}-{:02}", year, month + 1, day)
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// A year plus zero-based month, used for month-by-month navigation.
///
/// Always names a month chrono can represent; navigation past either end of
/// that range yields `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, CalendarError> {
        first_of_month(year, month)?;
        Ok(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month0(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Zero-based month.
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn prev_month(self) -> Option<Self> {
        match self.month {
            0 => Self::at(self.year.checked_sub(1)?, 11),
            m => Self::at(self.year, m - 1),
        }
    }

    pub fn next_month(self) -> Option<Self> {
        match self.month {
            11 => Self::at(self.year.checked_add(1)?, 0),
            m => Self::at(self.year, m + 1),
        }
    }

    pub fn prev_year(self) -> Option<Self> {
        Self::at(self.year.checked_sub(1)?, self.month)
    }

    pub fn next_year(self) -> Option<Self> {
        Self::at(self.year.checked_add(1)?, self.month)
    }

    fn at(year: i32, month: u32) -> Option<Self> {
        Self::new(year, month).ok()
    }
}

/// One day of the month with its display flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub day: u32,
    pub date: NaiveDate,
    pub is_today: bool,
    pub is_weekend: bool,
    pub holidays: Vec<Holiday>,
    /// One entry per distinct region among `holidays`.
    pub regions: Vec<RegionId>,
}

impl DayCell {
    pub fn key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridCell {
    /// Padding before the 1st.
    Blank,
    Day(DayCell),
}

/// Day layout of one month, Sunday-first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub days_in_month: u32,
    pub first_weekday: u32,
    pub cells: Vec<GridCell>,
}

impl MonthGrid {
    pub fn build(
        year: i32,
        month: u32,
        today: NaiveDate,
        index: &HolidayIndex,
    ) -> Result<Self, CalendarError> {
        let first = first_of_month(year, month)?;
        let days = days_in_month(year, month)?;
        let offset = first.weekday().num_days_from_sunday();

        let mut cells = Vec::with_capacity((offset + days) as usize);
        cells.extend((0..offset).map(|_| GridCell::Blank));

        for (i, date) in first.iter_days().take(days as usize).enumerate() {
            cells.push(GridCell::Day(DayCell {
                day: i as u32 + 1,
                date,
                is_today: date == today,
                is_weekend: is_weekend(date),
                holidays: index.get(date).to_vec(),
                regions: index.regions_on(date),
            }));
        }

        Ok(Self {
            year,
            month,
            days_in_month: days,
            first_weekday: offset,
            cells,
        })
    }

    pub fn year_month(&self) -> YearMonth {
        YearMonth {
            year: self.year,
            month: self.month,
        }
    }

    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter_map(|c| match c {
            GridCell::Day(d) => Some(d),
            GridCell::Blank => None,
        })
    }

    pub fn day(&self, day: u32) -> Option<&DayCell> {
        if day == 0 || day > self.days_in_month {
            return None;
        }
        match self.cells.get((self.first_weekday + day - 1) as usize) {
            Some(GridCell::Day(d)) => Some(d),
            _ => None,
        }
    }

    /// Rows of seven cells; the last row may be shorter.
    pub fn weeks(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(7)
    }
}

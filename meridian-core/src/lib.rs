//! Meridian core - public holidays across regions, laid out on a month calendar.
//!
//! Core concepts:
//! - **Region**: a legend group of countries (see [`REGIONS`])
//! - **HolidaySource**: async upstream returning one country's holidays for a year
//! - **HolidayFetcher**: cached, failure-tolerant fan-out that builds a [`HolidayIndex`]
//! - **HolidayFeed**: publishes the index of the latest fetch cycle only
//! - **MonthGrid**: day layout of a month with today/weekend flags and region indicators
//!
//! # Example
//!
//! ```ignore
//! use meridian_core::{HolidayFeed, HolidayFetcher, MonthGrid, RegionId, country_codes};
//!
//! let feed = HolidayFeed::new(HolidayFetcher::new(source));
//! feed.update(2025, &country_codes(&[RegionId::EastAsia])).await;
//!
//! let grid = MonthGrid::build(2025, 0, today, &feed.snapshot())?;
//! ```

pub mod cache;
pub mod calendar;
mod error;
pub mod feed;
pub mod fetcher;
pub mod holiday;
pub mod index;
pub mod region;
pub mod selection;
pub mod source;

pub use cache::HolidayCache;
pub use calendar::{
    DayCell, GridCell, MonthGrid, YearMonth, date_key, days_in_month, first_weekday, is_weekend,
};
pub use error::CalendarError;
pub use feed::{CycleOutcome, HolidayFeed};
pub use fetcher::HolidayFetcher;
pub use holiday::{Holiday, PublicHoliday};
pub use index::HolidayIndex;
pub use region::{Country, REGIONS, Region, RegionId, country, country_codes, region, regions};
pub use selection::Selection;
pub use source::HolidaySource;

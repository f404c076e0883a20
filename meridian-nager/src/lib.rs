//! Nager.Date API client for the meridian holiday calendar.
//!
//! [`NagerClient`] implements [`meridian_core::HolidaySource`], so it plugs
//! straight into a [`meridian_core::HolidayFetcher`].
//!
//! # Example
//!
//! ```ignore
//! use meridian_core::{HolidayFeed, HolidayFetcher, RegionId, country_codes};
//! use meridian_nager::NagerClient;
//!
//! #[tokio::main]
//! async fn main() {
//!     let feed = HolidayFeed::new(HolidayFetcher::new(NagerClient::new()));
//!     feed.update(2025, &country_codes(&[RegionId::Europe])).await;
//!
//!     for (date, holidays) in feed.snapshot().iter() {
//!         println!("{date}: {} holiday(s)", holidays.len());
//!     }
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::{DEFAULT_BASE_URL, NagerClient};
pub use error::NagerError;
pub use types::AvailableCountry;

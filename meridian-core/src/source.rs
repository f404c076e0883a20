use std::future::Future;
use std::sync::Arc;

use crate::holiday::PublicHoliday;

/// Upstream provider of per-country public holiday lists.
///
/// Implemented over HTTP by `meridian-nager`. The fetcher only ever asks for
/// one `(year, country)` pair per call and does its own caching, so
/// implementations should not cache.
pub trait HolidaySource: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn public_holidays(
        &self,
        year: i32,
        country_code: &str,
    ) -> impl Future<Output = Result<Vec<PublicHoliday>, Self::Error>> + Send;
}

impl<S: HolidaySource> HolidaySource for Arc<S> {
    type Error = S::Error;

    fn public_holidays(
        &self,
        year: i32,
        country_code: &str,
    ) -> impl Future<Output = Result<Vec<PublicHoliday>, Self::Error>> + Send {
        (**self).public_holidays(year, country_code)
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::region::{Country, Region, RegionId};

/// A holiday record as returned by the upstream public-holiday API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicHoliday {
    pub date: NaiveDate,
    #[serde(default)]
    pub local_name: Option<String>,
    pub name: String,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub fixed: bool,
    /// True when the holiday applies to the whole country.
    pub global: bool,
    /// Subdivisions the holiday is limited to, when not global.
    #[serde(default)]
    pub counties: Option<Vec<String>>,
    #[serde(default)]
    pub launch_year: Option<i32>,
    #[serde(default)]
    pub types: Vec<String>,
}

/// A nationwide holiday tagged with the country and region it was fetched for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: String,
    pub local_name: Option<String>,
    pub country_code: String,
    pub country_name: String,
    pub region_id: RegionId,
    pub nationwide: bool,
}

impl Holiday {
    pub fn tagged(raw: &PublicHoliday, region: &Region, country: &Country) -> Self {
        Self {
            date: raw.date,
            name: raw.name.clone(),
            local_name: raw.local_name.clone(),
            country_code: country.code.to_string(),
            country_name: country.name.to_string(),
            region_id: region.id,
            nationwide: raw.global,
        }
    }
}

/// Keeps only nationwide records and tags them for the given country.
pub fn nationwide(raw: &[PublicHoliday], region: &Region, country: &Country) -> Vec<Holiday> {
    raw.iter()
        .filter(|h| h.global)
        .map(|h| Holiday::tagged(h, region, country))
        .collect()
}

use std::future::Future;
use std::time::Duration;

use meridian_core::{HolidaySource, PublicHoliday};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::NagerError;
use crate::types::AvailableCountry;

pub const DEFAULT_BASE_URL: &str = "https://date.nager.at/api/v3";

/// Client for the Nager.Date public holiday API.
#[derive(Debug, Clone)]
pub struct NagerClient {
    http: reqwest::Client,
    base_url: String,
}

impl Default for NagerClient {
    fn default() -> Self {
        Self::new()
    }
}

impl NagerClient {
    /// Creates a client against the public API.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    /// Creates a client reusing an existing HTTP client.
    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Creates a client whose requests fail after `timeout`.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, NagerError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("meridian/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_http(http, base_url))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn holidays_url(&self, year: i32, country_code: &str) -> String {
        format!(
            "{}/PublicHolidays/{}/{}",
            self.base_url,
            year,
            country_code.to_ascii_uppercase()
        )
    }

    /// Fetches every public holiday of `country_code` in `year`.
    ///
    /// Regional holidays are included; callers filter on `global`.
    #[instrument(skip(self))]
    pub async fn public_holidays(
        &self,
        year: i32,
        country_code: &str,
    ) -> Result<Vec<PublicHoliday>, NagerError> {
        let holidays: Vec<PublicHoliday> = self.get_json(&self.holidays_url(year, country_code)).await?;
        debug!(count = holidays.len(), "Received public holidays");
        Ok(holidays)
    }

    /// Lists the countries the API has data for.
    #[instrument(skip(self))]
    pub async fn available_countries(&self) -> Result<Vec<AvailableCountry>, NagerError> {
        self.get_json(&format!("{}/AvailableCountries", self.base_url))
            .await
    }

    async fn get_json<T: DeserializeOwned + Default>(&self, url: &str) -> Result<T, NagerError> {
        debug!(%url, "Sending request to Nager.Date");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(NagerError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        // 204 No Content and empty 200s both mean "nothing"
        if body.trim().is_empty() {
            return Ok(T::default());
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Pulls a readable message out of an error body.
fn error_message(body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    parsed
        .as_ref()
        .and_then(|v| v.get("detail").or_else(|| v.get("title")))
        .and_then(|m| m.as_str())
        .map(String::from)
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| trimmed.chars().take(200).collect())
        })
        .unwrap_or_else(|| "Unknown error".to_string())
}

impl HolidaySource for NagerClient {
    type Error = NagerError;

    fn public_holidays(
        &self,
        year: i32,
        country_code: &str,
    ) -> impl Future<Output = Result<Vec<PublicHoliday>, Self::Error>> + Send {
        NagerClient::public_holidays(self, year, country_code)
    }
}

use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Duration;

use meridian_core::{RegionId, country, country_codes};
use meridian_nager::DEFAULT_BASE_URL;
use serde::Deserialize;

use crate::error::ToolError;

pub const BASE_URL_ENV: &str = "MERIDIAN_BASE_URL";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    /// Regions active when none are given on the command line.
    pub regions: Option<Vec<RegionId>>,
    /// Extra country codes added to the active set.
    #[serde(default)]
    pub countries: Vec<String>,
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("meridian").join("config.toml"))
}

/// Loads the config file. A missing file yields defaults; a malformed one is an error.
pub fn load_config() -> Result<Config, ToolError> {
    let Some(path) = config_path() else {
        return Ok(Config::default());
    };

    match std::fs::read_to_string(&path) {
        Ok(content) => parse_config(&content),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Config::default()),
        Err(e) => Err(e.into()),
    }
}

pub fn parse_config(content: &str) -> Result<Config, ToolError> {
    Ok(toml::from_str(content)?)
}

/// CLI flag, then environment, then config file, then the public API.
pub fn resolve_base_url(cli: Option<String>, env: Option<String>, config: &Config) -> String {
    cli.into_iter()
        .chain(env)
        .chain(config.base_url.clone())
        .find(|url| !url.is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

/// Active country codes: the countries of the chosen regions plus explicit codes.
///
/// Command-line selections replace the config file's; with neither, every
/// region is active. Codes outside the region registry are rejected.
pub fn resolve_active_codes(
    cli_regions: &[RegionId],
    cli_countries: &[String],
    config: &Config,
) -> Result<Vec<String>, ToolError> {
    let (regions, extra): (Vec<RegionId>, &[String]) =
        if cli_regions.is_empty() && cli_countries.is_empty() {
            let regions = config
                .regions
                .clone()
                .unwrap_or_else(|| RegionId::ALL.to_vec());
            (regions, config.countries.as_slice())
        } else {
            (cli_regions.to_vec(), cli_countries)
        };

    if let Some(unknown) = extra.iter().find(|code| country(code.trim()).is_none()) {
        return Err(ToolError::UnknownCountry(unknown.clone()));
    }

    Ok(country_codes(&regions)
        .into_iter()
        .map(String::from)
        .chain(extra.iter().cloned())
        .collect())
}

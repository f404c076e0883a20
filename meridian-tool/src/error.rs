use meridian_core::CalendarError;
use meridian_nager::NagerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Calendar error: {0}")]
    Calendar(#[from] CalendarError),

    #[error("Nager error: {0}")]
    Nager(#[from] NagerError),

    #[error("Invalid month: {0} (expected 1-12)")]
    InvalidMonth(u32),

    #[error("Unknown country code: {0} (run `mer regions` for the supported list)")]
    UnknownCountry(String),
}

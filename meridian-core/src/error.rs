use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Invalid month: {0} (expected 0-11)")]
    InvalidMonth(u32),

    #[error("Date out of range: {year}-{month:02}-{day:02}")]
    OutOfRange { year: i32, month: u32, day: u32 },
}

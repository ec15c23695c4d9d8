//! Error types for salon-hours operations.

use chrono::Weekday;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HoursError {
    #[error("Invalid time of day '{0}': expected HH:MM")]
    InvalidTime(String),

    #[error("Invalid hours on {day}: open {open} is not before close {close}")]
    InvertedHours {
        day: Weekday,
        open: String,
        close: String,
    },

    #[error("Invalid break on {day} ({start}-{end}): {reason}")]
    InvalidBreak {
        day: Weekday,
        start: String,
        end: String,
        reason: String,
    },

    #[error("Overlapping breaks on {day}: {first} and {second}")]
    OverlappingBreaks {
        day: Weekday,
        first: String,
        second: String,
    },

    #[error("Invalid duration: {0} minutes")]
    InvalidDuration(u32),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Local time {0} does not exist in timezone {1}")]
    NonexistentLocalTime(String, String),

    #[error("Unknown locale '{0}': expected en or ar")]
    UnknownLocale(String),

    #[error("Empty schedule text")]
    EmptySchedule,

    #[error("Time arithmetic overflow at {0}")]
    TimeOverflow(String),
}

pub type Result<T> = std::result::Result<T, HoursError>;

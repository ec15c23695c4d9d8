//! Conversion between absolute instants and a business's local wall clock.
//!
//! Schedules are written in local time, so instants from the booking flow
//! (usually UTC) are converted before they are checked.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{HoursError, Result};

fn parse_timezone(timezone: &str) -> Result<Tz> {
    timezone
        .parse()
        .map_err(|_| HoursError::InvalidTimezone(timezone.to_string()))
}

/// Wall-clock time at `instant` in the IANA `timezone`.
///
/// # Errors
/// Returns `HoursError::InvalidTimezone` for an unknown timezone name.
pub fn to_business_time(instant: DateTime<Utc>, timezone: &str) -> Result<NaiveDateTime> {
    let tz = parse_timezone(timezone)?;
    Ok(instant.with_timezone(&tz).naive_local())
}

/// The instant a local wall-clock time refers to in the IANA `timezone`.
///
/// Ambiguous times (DST fall-back) resolve to the earlier instant.
///
/// # Errors
/// Returns `HoursError::InvalidTimezone` for an unknown timezone name and
/// `HoursError::NonexistentLocalTime` for a time skipped by a DST gap.
pub fn from_business_time(local: NaiveDateTime, timezone: &str) -> Result<DateTime<Utc>> {
    let tz = parse_timezone(timezone)?;
    tz.from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| HoursError::NonexistentLocalTime(local.to_string(), timezone.to_string()))
}

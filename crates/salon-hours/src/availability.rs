//! Point-in-time and interval checks against a weekly schedule.
//!
//! Each check comes in two forms. The `try_*` functions take a structured
//! [`WeekSchedule`] and surface every error. The plain functions accept either
//! schedule form and never fail: when something goes wrong they log a warning
//! and answer "available" / "fits", so a broken schedule never blocks a
//! booking. Legacy text without schedule information counts as always open.
//!
//! Boundaries:
//! - an instant exactly at closing time is closed;
//! - an appointment may end exactly at closing time;
//! - an appointment may end exactly when a break starts, or start exactly when
//!   it ends.

use chrono::{Duration, NaiveDateTime};
use tracing::warn;

use crate::error::{HoursError, Result};
use crate::schedule::{OpenHours, WeekSchedule};
use crate::source::ScheduleSource;

/// Whether the business is open, and not on a break, at `at`.
///
/// Fails open: returns `true` when the schedule cannot be evaluated or when
/// legacy text carries no schedule information.
pub fn is_available_at<'a>(at: NaiveDateTime, schedule: impl Into<ScheduleSource<'a>>) -> bool {
    let Some(schedule) = schedule.into().resolve() else {
        return true;
    };

    match try_is_available_at(at, &schedule) {
        Ok(available) => available,
        Err(e) => {
            warn!(%at, error = %e, "availability check failed, treating as available");
            true
        }
    }
}

/// Strict form of [`is_available_at`].
///
/// # Errors
/// Returns an error if the day's hours are malformed or inverted, or if a
/// break reached while checking `at` is malformed.
pub fn try_is_available_at(at: NaiveDateTime, schedule: &WeekSchedule) -> Result<bool> {
    match schedule.hours_on(at.date())? {
        Some(hours) => hours.contains(at),
        None => Ok(false),
    }
}

/// Whether an appointment of `duration_minutes` starting at `start` fits
/// inside opening hours without touching a break.
///
/// Fails open: returns `true` when the schedule cannot be evaluated or when
/// legacy text carries no schedule information.
pub fn fits_interval<'a>(
    start: NaiveDateTime,
    duration_minutes: u32,
    schedule: impl Into<ScheduleSource<'a>>,
) -> bool {
    let Some(schedule) = schedule.into().resolve() else {
        return true;
    };

    match try_fits_interval(start, duration_minutes, &schedule) {
        Ok(fits) => fits,
        Err(e) => {
            warn!(%start, duration_minutes, error = %e, "interval check failed, treating as fitting");
            true
        }
    }
}

/// Strict form of [`fits_interval`].
///
/// # Errors
/// Returns an error if the day's times are malformed or inverted, or if the
/// appointment end cannot be represented.
pub fn try_fits_interval(
    start: NaiveDateTime,
    duration_minutes: u32,
    schedule: &WeekSchedule,
) -> Result<bool> {
    match schedule.hours_on(start.date())? {
        Some(hours) => fits_in_hours(&hours, start, duration_minutes),
        None => Ok(false),
    }
}

/// Interval check against hours already resolved for `start`'s day.
pub(crate) fn fits_in_hours(
    hours: &OpenHours<'_>,
    start: NaiveDateTime,
    duration_minutes: u32,
) -> Result<bool> {
    if !hours.contains(start)? {
        return Ok(false);
    }

    let end = appointment_end(start, duration_minutes)?;

    // Ending exactly at close is fine.
    if end > hours.close {
        return Ok(false);
    }

    for b in hours.breaks() {
        if b?.overlaps(start, end) {
            return Ok(false);
        }
    }
    Ok(true)
}

pub(crate) fn appointment_end(start: NaiveDateTime, duration_minutes: u32) -> Result<NaiveDateTime> {
    start
        .checked_add_signed(Duration::minutes(i64::from(duration_minutes)))
        .ok_or_else(|| HoursError::TimeOverflow(start.to_string()))
}

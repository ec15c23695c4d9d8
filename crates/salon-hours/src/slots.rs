//! Bookable slot enumeration for a single day.
//!
//! Candidates start at opening time and advance on a fixed grid until closing
//! time. A candidate is kept when an appointment starting there passes the
//! interval check; the grid advances regardless.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::availability::fits_in_hours;
use crate::error::{HoursError, Result};
use crate::schedule::WeekSchedule;
use crate::source::ScheduleSource;

/// Appointment length and grid granularity for slot enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotOptions {
    pub duration_minutes: u32,
    pub step_minutes: u32,
}

impl SlotOptions {
    /// Appointments as long as the grid step.
    pub fn uniform(minutes: u32) -> Self {
        Self {
            duration_minutes: minutes,
            step_minutes: minutes,
        }
    }
}

/// Bookable start times on `date` for appointments of `slot_minutes`, on a
/// `slot_minutes` grid.
///
/// Returns an empty list on any error. Unlike the point and interval checks
/// this does not fail open: an unreadable schedule offers no slots.
pub fn available_slots<'a>(
    date: NaiveDate,
    slot_minutes: u32,
    schedule: impl Into<ScheduleSource<'a>>,
) -> Vec<NaiveDateTime> {
    available_slots_with(date, SlotOptions::uniform(slot_minutes), schedule)
}

/// [`available_slots`] with separate appointment length and grid step.
pub fn available_slots_with<'a>(
    date: NaiveDate,
    options: SlotOptions,
    schedule: impl Into<ScheduleSource<'a>>,
) -> Vec<NaiveDateTime> {
    let Some(schedule) = schedule.into().resolve() else {
        debug!(%date, "no schedule information, no slots to offer");
        return Vec::new();
    };

    match try_available_slots(date, &options, &schedule) {
        Ok(slots) => slots,
        Err(e) => {
            warn!(%date, error = %e, "slot enumeration failed, offering no slots");
            Vec::new()
        }
    }
}

/// Strict form of [`available_slots_with`].
///
/// # Errors
/// Returns `HoursError::InvalidDuration` for a zero step, and any error from
/// resolving the day's hours.
pub fn try_available_slots(
    date: NaiveDate,
    options: &SlotOptions,
    schedule: &WeekSchedule,
) -> Result<Vec<NaiveDateTime>> {
    if options.step_minutes == 0 {
        return Err(HoursError::InvalidDuration(options.step_minutes));
    }

    let Some(hours) = schedule.hours_on(date)? else {
        return Ok(Vec::new());
    };

    let step = Duration::minutes(i64::from(options.step_minutes));
    let mut slots = Vec::new();
    let mut candidate = hours.open;

    while candidate < hours.close {
        if fits_in_hours(&hours, candidate, options.duration_minutes)? {
            slots.push(candidate);
        }
        candidate = candidate
            .checked_add_signed(step)
            .ok_or_else(|| HoursError::TimeOverflow(candidate.to_string()))?;
    }

    Ok(slots)
}

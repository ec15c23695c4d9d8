//! Weekly business-hours data model.
//!
//! Times are kept as the `"HH:MM"` strings the dashboard persists and are
//! parsed on use. [`DaySchedule::hours_on`] turns a day into concrete
//! wall-clock instants for a given date; [`WeekSchedule::validate`] is the
//! construction-time check for settings screens and imports.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{HoursError, Result};
use crate::locale::WEEK_ORDER;

pub const DEFAULT_OPEN_TIME: &str = "09:00";
pub const DEFAULT_CLOSE_TIME: &str = "17:00";

/// A break inside a working day, e.g. lunch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakPeriod {
    pub start_time: String,
    pub end_time: String,
}

impl BreakPeriod {
    pub fn new(start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self {
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }
}

/// One day's opening hours.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub is_open: bool,
    pub open_time: String,
    pub close_time: String,
    #[serde(default)]
    pub breaks: Vec<BreakPeriod>,
}

impl DaySchedule {
    pub fn open(open_time: impl Into<String>, close_time: impl Into<String>) -> Self {
        Self {
            is_open: true,
            open_time: open_time.into(),
            close_time: close_time.into(),
            breaks: Vec::new(),
        }
    }

    /// A closed day. The dormant times are the defaults the settings screen
    /// shows when the day is switched back on.
    pub fn closed() -> Self {
        Self {
            is_open: false,
            ..Self::open(DEFAULT_OPEN_TIME, DEFAULT_CLOSE_TIME)
        }
    }

    pub fn with_break(mut self, start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        self.breaks.push(BreakPeriod::new(start_time, end_time));
        self
    }

    /// Resolve this day's opening and closing times to instants on `date`.
    ///
    /// Returns `Ok(None)` for a closed day. Breaks are left unparsed here and
    /// resolved lazily by [`OpenHours::breaks`], so a malformed break only
    /// matters once a check reaches it.
    ///
    /// # Errors
    /// Returns `HoursError::InvalidTime` if the open or close time is malformed
    /// and `HoursError::InvertedHours` if the day does not open before it closes.
    pub fn hours_on(&self, date: NaiveDate) -> Result<Option<OpenHours<'_>>> {
        if !self.is_open {
            return Ok(None);
        }

        let (open, close) = self.opening_minutes(date.weekday())?;

        Ok(Some(OpenHours {
            open: at_minutes(date, open)?,
            close: at_minutes(date, close)?,
            date,
            breaks: &self.breaks,
        }))
    }

    fn opening_minutes(&self, day: Weekday) -> Result<(u32, u32)> {
        let open = minutes_of_day(&self.open_time)?;
        let close = minutes_of_day(&self.close_time)?;
        if open >= close {
            return Err(HoursError::InvertedHours {
                day,
                open: self.open_time.clone(),
                close: self.close_time.clone(),
            });
        }
        Ok((open, close))
    }

    fn validate(&self, day: Weekday) -> Result<()> {
        if !self.is_open {
            return Ok(());
        }

        let (open, close) = self.opening_minutes(day)?;

        let mut parsed = Vec::with_capacity(self.breaks.len());
        for b in &self.breaks {
            let start = minutes_of_day(&b.start_time)?;
            let end = minutes_of_day(&b.end_time)?;
            let invalid = |reason: &str| HoursError::InvalidBreak {
                day,
                start: b.start_time.clone(),
                end: b.end_time.clone(),
                reason: reason.to_string(),
            };
            if start >= end {
                return Err(invalid("break must end after it starts"));
            }
            if start < open || end > close {
                return Err(invalid("break falls outside opening hours"));
            }
            parsed.push((start, end, b));
        }

        // Order in the list is free; overlap is not.
        parsed.sort_by_key(|&(start, end, _)| (start, end));
        for pair in parsed.windows(2) {
            let (_, prev_end, prev) = pair[0];
            let (next_start, _, next) = pair[1];
            if next_start < prev_end {
                return Err(HoursError::OverlappingBreaks {
                    day,
                    first: format!("{}-{}", prev.start_time, prev.end_time),
                    second: format!("{}-{}", next.start_time, next.end_time),
                });
            }
        }

        Ok(())
    }
}

/// A business's weekly opening hours: exactly one entry per weekday.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub struct WeekSchedule {
    pub sunday: DaySchedule,
    pub monday: DaySchedule,
    pub tuesday: DaySchedule,
    pub wednesday: DaySchedule,
    pub thursday: DaySchedule,
    pub friday: DaySchedule,
    pub saturday: DaySchedule,
}

impl Default for WeekSchedule {
    /// Sunday closed, every other day 09:00-17:00 without breaks.
    fn default() -> Self {
        Self::from_fn(|day| match day {
            Weekday::Sun => DaySchedule::closed(),
            _ => DaySchedule::open(DEFAULT_OPEN_TIME, DEFAULT_CLOSE_TIME),
        })
    }
}

impl WeekSchedule {
    /// Build a schedule by computing each day.
    pub fn from_fn(mut f: impl FnMut(Weekday) -> DaySchedule) -> Self {
        Self {
            sunday: f(Weekday::Sun),
            monday: f(Weekday::Mon),
            tuesday: f(Weekday::Tue),
            wednesday: f(Weekday::Wed),
            thursday: f(Weekday::Thu),
            friday: f(Weekday::Fri),
            saturday: f(Weekday::Sat),
        }
    }

    pub fn day(&self, day: Weekday) -> &DaySchedule {
        match day {
            Weekday::Sun => &self.sunday,
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
        }
    }

    pub fn day_mut(&mut self, day: Weekday) -> &mut DaySchedule {
        match day {
            Weekday::Sun => &mut self.sunday,
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
        }
    }

    /// Days in Sunday-first order.
    pub fn days(&self) -> impl Iterator<Item = (Weekday, &DaySchedule)> {
        WEEK_ORDER.into_iter().map(move |day| (day, self.day(day)))
    }

    /// The hours in effect on `date`.
    pub fn hours_on(&self, date: NaiveDate) -> Result<Option<OpenHours<'_>>> {
        self.day(date.weekday()).hours_on(date)
    }

    /// Check every open day for malformed times, inverted hours, and breaks
    /// that are inverted, fall outside opening hours, or overlap each other.
    ///
    /// Closed days are not inspected.
    pub fn validate(&self) -> Result<()> {
        self.days().try_for_each(|(day, schedule)| schedule.validate(day))
    }
}

/// A half-open span of wall-clock time, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Interval {
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start <= at && at < self.end
    }

    /// Standard overlap test. Touching endpoints do not overlap.
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        start < self.end && end > self.start
    }
}

/// One day's hours resolved to concrete instants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenHours<'a> {
    pub open: NaiveDateTime,
    pub close: NaiveDateTime,
    date: NaiveDate,
    breaks: &'a [BreakPeriod],
}

impl OpenHours<'_> {
    /// The day's breaks in list order, each parsed as it is reached.
    pub fn breaks(&self) -> impl Iterator<Item = Result<Interval>> + '_ {
        self.breaks.iter().map(move |b| {
            Ok(Interval {
                start: at_minutes(self.date, minutes_of_day(&b.start_time)?)?,
                end: at_minutes(self.date, minutes_of_day(&b.end_time)?)?,
            })
        })
    }

    /// Open at `at`: inside `[open, close)` and outside every break.
    ///
    /// Opening hours are checked first. Breaks are then walked in list order
    /// and the walk stops at the first one containing `at`.
    ///
    /// # Errors
    /// Returns `HoursError::InvalidTime` for a malformed break reached by the walk.
    pub fn contains(&self, at: NaiveDateTime) -> Result<bool> {
        if at < self.open || at >= self.close {
            return Ok(false);
        }
        for b in self.breaks() {
            if b?.contains(at) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Written clock time for the end of the day, accepted as a close or break end.
pub const END_OF_DAY: &str = "24:00";

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Parse `"H:MM"` or `"HH:MM"` (24-hour clock).
pub fn parse_time_of_day(s: &str) -> Result<NaiveTime> {
    let invalid = || HoursError::InvalidTime(s.to_string());
    let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;

    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(hour) || hour.len() > 2 || !all_digits(minute) || minute.len() != 2 {
        return Err(invalid());
    }

    let hour: u32 = hour.parse().map_err(|_| invalid())?;
    let minute: u32 = minute.parse().map_err(|_| invalid())?;
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}

/// Minutes past midnight for a schedule time. Accepts everything
/// [`parse_time_of_day`] does plus [`END_OF_DAY`], which maps to 1440.
pub fn minutes_of_day(s: &str) -> Result<u32> {
    if s.trim() == END_OF_DAY {
        return Ok(MINUTES_PER_DAY);
    }
    let time = parse_time_of_day(s)?;
    Ok(time.hour() * 60 + time.minute())
}

/// Format minutes past midnight as `"HH:MM"`; 1440 is written `"24:00"`.
pub fn format_minutes_of_day(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

fn at_minutes(date: NaiveDate, minutes: u32) -> Result<NaiveDateTime> {
    date.and_time(NaiveTime::MIN)
        .checked_add_signed(Duration::minutes(i64::from(minutes)))
        .ok_or_else(|| HoursError::TimeOverflow(format!("{} {}", date, format_minutes_of_day(minutes))))
}

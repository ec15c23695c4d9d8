//! The two schedule representations the checks accept.

use std::borrow::Cow;

use crate::legacy::parse_legacy;
use crate::schedule::WeekSchedule;

/// A schedule handed to a check: the structured form, or legacy text that is
/// parsed on the way in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleSource<'a> {
    Structured(&'a WeekSchedule),
    Legacy(&'a str),
}

impl<'a> ScheduleSource<'a> {
    /// The structured schedule, or `None` when legacy text carries no
    /// schedule information.
    pub fn resolve(self) -> Option<Cow<'a, WeekSchedule>> {
        match self {
            ScheduleSource::Structured(schedule) => Some(Cow::Borrowed(schedule)),
            ScheduleSource::Legacy(text) => parse_legacy(text).map(Cow::Owned),
        }
    }
}

impl<'a> From<&'a WeekSchedule> for ScheduleSource<'a> {
    fn from(schedule: &'a WeekSchedule) -> Self {
        ScheduleSource::Structured(schedule)
    }
}

impl<'a> From<&'a str> for ScheduleSource<'a> {
    fn from(text: &'a str) -> Self {
        ScheduleSource::Legacy(text)
    }
}

impl<'a> From<&'a String> for ScheduleSource<'a> {
    fn from(text: &'a String) -> Self {
        ScheduleSource::Legacy(text.as_str())
    }
}

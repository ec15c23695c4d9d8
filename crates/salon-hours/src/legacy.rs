//! Legacy bilingual text form of a weekly schedule.
//!
//! Older tenants persisted their hours as human-readable lines such as
//!
//! ```text
//! Sunday: Closed
//! Monday: 09:00 - 17:00 (Break: 12:00-13:00)
//! الثلاثاء: 10:00 - 18:00 (استراحة: 13:00-14:00, 16:00-16:15)
//! ```
//!
//! The parser overlays those lines onto [`WeekSchedule::default`]. Lines it
//! cannot make sense of are skipped, never fatal. [`format_legacy`] writes the
//! same shape back out, so the text form can be regenerated from the
//! structured one.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::error::{HoursError, Result};
use crate::locale::{is_closed_label, parse_day_name, Locale};
use crate::schedule::{format_minutes_of_day, minutes_of_day, BreakPeriod, WeekSchedule};

/// Revision of the legacy text layout understood by this module.
pub const LEGACY_FORMAT_VERSION: u32 = 1;

static HOURS_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2}:\d{2})\s*-\s*(\d{1,2}:\d{2})").expect("hours pattern is valid")
});

static BREAK_LIST: LazyLock<Regex> = LazyLock::new(|| {
    let labels: Vec<String> = Locale::ALL
        .iter()
        .map(|locale| regex::escape(locale.break_label()))
        .collect();
    Regex::new(&format!(r"\(\s*(?:{})\s*:\s*([^)]*)\)", labels.join("|")))
        .expect("break pattern is valid")
});

static BREAK_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d{1,2}:\d{2})\s*-\s*(\d{1,2}:\d{2})\s*$").expect("break range pattern is valid")
});

/// Why a line of legacy text was ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No `:` separating the day from the hours.
    MissingSeparator,
    /// The day token is not a known weekday name.
    UnknownDay(String),
    /// The hours are neither a closed marker nor an `HH:MM - HH:MM` range.
    UnrecognizedHours(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingSeparator => f.write_str("missing ':' after day name"),
            SkipReason::UnknownDay(day) => write!(f, "unknown day '{}'", day),
            SkipReason::UnrecognizedHours(hours) => write!(f, "unrecognized hours '{}'", hours),
        }
    }
}

/// A legacy line the parser skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the input.
    pub line: usize,
    pub content: String,
    pub reason: SkipReason,
}

/// Result of parsing legacy text, with diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyParse {
    pub schedule: WeekSchedule,
    pub skipped: Vec<SkippedLine>,
}

/// Parse legacy schedule text.
///
/// Returns `None` for empty input. Unparseable lines are skipped and logged at
/// debug level; nothing here fails loudly.
pub fn parse_legacy(text: &str) -> Option<WeekSchedule> {
    match parse_legacy_report(text) {
        Ok(report) => Some(report.schedule),
        Err(HoursError::EmptySchedule) => None,
        Err(e) => {
            warn!(error = %e, "failed to parse legacy schedule text");
            None
        }
    }
}

/// Parse legacy schedule text, reporting every skipped line.
///
/// # Errors
/// Returns `HoursError::EmptySchedule` if the text is empty or blank.
pub fn parse_legacy_report(text: &str) -> Result<LegacyParse> {
    if text.trim().is_empty() {
        return Err(HoursError::EmptySchedule);
    }

    let mut schedule = WeekSchedule::default();
    let mut skipped = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Err(reason) = apply_line(&mut schedule, line) {
            debug!(line = index + 1, %reason, "skipping legacy schedule line");
            skipped.push(SkippedLine {
                line: index + 1,
                content: line.to_string(),
                reason,
            });
        }
    }

    Ok(LegacyParse { schedule, skipped })
}

fn apply_line(schedule: &mut WeekSchedule, line: &str) -> std::result::Result<(), SkipReason> {
    let (day_token, hours) = line.split_once(':').ok_or(SkipReason::MissingSeparator)?;
    let day_token = day_token.trim();
    let hours = hours.trim();

    let day = parse_day_name(day_token).ok_or_else(|| SkipReason::UnknownDay(day_token.to_string()))?;
    let entry = schedule.day_mut(day);

    if is_closed_label(hours) {
        entry.is_open = false;
        return Ok(());
    }

    let unrecognized = || SkipReason::UnrecognizedHours(hours.to_string());
    let caps = HOURS_RANGE.captures(hours).ok_or_else(unrecognized)?;
    let open = canonical_time(&caps[1]).ok_or_else(unrecognized)?;
    let close = canonical_time(&caps[2]).ok_or_else(unrecognized)?;

    entry.is_open = true;
    entry.open_time = open;
    entry.close_time = close;
    entry.breaks.clear();

    if let Some(list) = BREAK_LIST.captures(hours) {
        for range in list[1].split(',') {
            let Some(caps) = BREAK_RANGE.captures(range) else {
                debug!(range, "ignoring malformed break range");
                continue;
            };
            if let (Some(start), Some(end)) = (canonical_time(&caps[1]), canonical_time(&caps[2])) {
                entry.breaks.push(BreakPeriod::new(start, end));
            }
        }
    }

    Ok(())
}

fn canonical_time(s: &str) -> Option<String> {
    minutes_of_day(s).ok().map(format_minutes_of_day)
}

/// Write a schedule in the legacy text form, Sunday first, one line per day.
pub fn format_legacy(schedule: &WeekSchedule, locale: Locale) -> String {
    schedule
        .days()
        .map(|(day, hours)| {
            let name = locale.day_name(day);
            if !hours.is_open {
                return format!("{}: {}", name, locale.closed_label());
            }

            let mut line = format!("{}: {} - {}", name, hours.open_time, hours.close_time);
            if !hours.breaks.is_empty() {
                let ranges: Vec<String> = hours
                    .breaks
                    .iter()
                    .map(|b| format!("{}-{}", b.start_time, b.end_time))
                    .collect();
                line.push_str(&format!(" ({}: {})", locale.break_label(), ranges.join(", ")));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

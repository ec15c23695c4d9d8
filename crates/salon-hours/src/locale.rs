//! Weekday names and labels for the legacy text format, per supported locale.
//!
//! The legacy form mixes English and Arabic lines freely, so lookups try every
//! locale. English names are case-sensitive.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::HoursError;

/// Sunday-first week order used by the dashboard and the legacy text form.
pub const WEEK_ORDER: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// A language the legacy schedule text can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    English,
    Arabic,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::English, Locale::Arabic];

    /// Canonical day name written by the formatter.
    pub fn day_name(self, day: Weekday) -> &'static str {
        match self {
            Locale::English => match day {
                Weekday::Sun => "Sunday",
                Weekday::Mon => "Monday",
                Weekday::Tue => "Tuesday",
                Weekday::Wed => "Wednesday",
                Weekday::Thu => "Thursday",
                Weekday::Fri => "Friday",
                Weekday::Sat => "Saturday",
            },
            Locale::Arabic => match day {
                Weekday::Sun => "الأحد",
                Weekday::Mon => "الإثنين",
                Weekday::Tue => "الثلاثاء",
                Weekday::Wed => "الأربعاء",
                Weekday::Thu => "الخميس",
                Weekday::Fri => "الجمعة",
                Weekday::Sat => "السبت",
            },
        }
    }

    /// Look up a day name in this locale only.
    pub fn parse_day(self, token: &str) -> Option<Weekday> {
        if let Some(day) = WEEK_ORDER
            .into_iter()
            .find(|&day| self.day_name(day) == token)
        {
            return Some(day);
        }
        // Monday is commonly written without the hamza.
        match (self, token) {
            (Locale::Arabic, "الاثنين") => Some(Weekday::Mon),
            _ => None,
        }
    }

    pub fn closed_label(self) -> &'static str {
        match self {
            Locale::English => "Closed",
            Locale::Arabic => "مغلق",
        }
    }

    pub fn break_label(self) -> &'static str {
        match self {
            Locale::English => "Break",
            Locale::Arabic => "استراحة",
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::Arabic => "ar",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = HoursError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Locale::English),
            "ar" | "arabic" => Ok(Locale::Arabic),
            _ => Err(HoursError::UnknownLocale(s.to_string())),
        }
    }
}

/// Resolve a day name written in any supported locale.
pub fn parse_day_name(token: &str) -> Option<Weekday> {
    Locale::ALL
        .into_iter()
        .find_map(|locale| locale.parse_day(token))
}

/// Whether `token` is the "closed" marker of any supported locale.
pub fn is_closed_label(token: &str) -> bool {
    Locale::ALL
        .into_iter()
        .any(|locale| locale.closed_label() == token)
}

//! # salon-hours
//!
//! Business-hours availability engine for appointment booking.
//!
//! Given a weekly schedule of opening hours and breaks, the engine answers
//! whether a business is open at an instant, whether an appointment fits
//! without crossing a break or closing time, and which start times can be
//! offered for a day. Schedules arrive either structured ([`WeekSchedule`],
//! the JSON the settings screen stores) or as legacy bilingual text.
//!
//! All computation is pure and synchronous.
//!
//! ## Modules
//!
//! - [`schedule`] — `WeekSchedule` / `DaySchedule` data model and validation
//! - [`locale`] — English and Arabic weekday names and labels
//! - [`legacy`] — legacy text parser and formatter
//! - [`source`] — structured-or-legacy schedule input
//! - [`availability`] — point-in-time and interval-fit checks
//! - [`slots`] — bookable slot enumeration for a day
//! - [`zone`] — UTC ↔ business local time
//! - [`cache`] — caller-owned tenant schedule cache
//! - [`error`] — Error types

pub mod availability;
pub mod cache;
pub mod error;
pub mod legacy;
pub mod locale;
pub mod schedule;
pub mod slots;
pub mod source;
pub mod zone;

pub use availability::{fits_interval, is_available_at, try_fits_interval, try_is_available_at};
pub use cache::ScheduleCache;
pub use error::HoursError;
pub use legacy::{format_legacy, parse_legacy, parse_legacy_report, LegacyParse};
pub use locale::Locale;
pub use schedule::{BreakPeriod, DaySchedule, WeekSchedule};
pub use slots::{available_slots, available_slots_with, try_available_slots, SlotOptions};
pub use source::ScheduleSource;
pub use zone::{from_business_time, to_business_time};

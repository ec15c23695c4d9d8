//! WASM bindings for salon-hours.
//!
//! Exposes legacy schedule parsing, availability checks and slot enumeration
//! to the booking dashboard via `wasm-bindgen`. Schedules cross the boundary
//! as strings: JSON (`WeekSchedule`) when the text starts with `{`, legacy
//! schedule text otherwise. Datetimes are ISO 8601 strings in business local
//! time.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p salon-hours-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/salon-hours-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/salon_hours_wasm.wasm
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use salon_hours::{Locale, ScheduleSource, SlotOptions, WeekSchedule};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Input decoding
// ---------------------------------------------------------------------------

/// A schedule string from JavaScript, decoded but with legacy text unparsed.
enum ScheduleInput {
    Structured(WeekSchedule),
    Legacy(String),
}

impl ScheduleInput {
    fn decode(input: &str) -> Result<Self, String> {
        if input.trim_start().starts_with('{') {
            serde_json::from_str(input)
                .map(ScheduleInput::Structured)
                .map_err(|e| format!("Invalid schedule JSON: {}", e))
        } else {
            Ok(ScheduleInput::Legacy(input.to_string()))
        }
    }

    fn source(&self) -> ScheduleSource<'_> {
        match self {
            ScheduleInput::Structured(schedule) => ScheduleSource::Structured(schedule),
            ScheduleInput::Legacy(text) => ScheduleSource::Legacy(text),
        }
    }

    fn into_structured(self) -> Result<WeekSchedule, String> {
        match self {
            ScheduleInput::Structured(schedule) => Ok(schedule),
            ScheduleInput::Legacy(text) => salon_hours::parse_legacy_report(&text)
                .map(|report| report.schedule)
                .map_err(|e| e.to_string()),
        }
    }
}

/// Parse an ISO 8601 datetime as business local time.
///
/// Accepts naive local time (e.g., "2026-03-16T09:30" or "2026-03-16T09:30:00")
/// and RFC 3339 with an offset, whose wall-clock part is used as written.
fn parse_local_datetime(s: &str) -> Result<NaiveDateTime, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .ok_or_else(|| format!("Invalid datetime '{}'", s))
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    // Full datetimes are accepted; only the day matters.
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| parse_local_datetime(s).map(|dt| dt.date()))
        .map_err(|_| format!("Invalid date '{}'", s))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn slots_json(
    date: &str,
    duration_minutes: u32,
    step_minutes: Option<u32>,
    schedule: &str,
) -> Result<String, String> {
    let date = parse_date(date)?;
    let input = ScheduleInput::decode(schedule)?;
    let options = SlotOptions {
        duration_minutes,
        step_minutes: step_minutes.unwrap_or(duration_minutes),
    };

    let stamps: Vec<String> = salon_hours::available_slots_with(date, options, input.source())
        .iter()
        .map(|slot| slot.format("%Y-%m-%dT%H:%M:%S").to_string())
        .collect();
    to_json(&stamps)
}

fn js_err(message: String) -> JsValue {
    JsValue::from_str(&message)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Parse legacy schedule text into `WeekSchedule` JSON.
///
/// Returns the string `"null"` when the text carries no schedule information.
#[wasm_bindgen(js_name = "parseLegacySchedule")]
pub fn parse_legacy_schedule(text: &str) -> Result<String, JsValue> {
    to_json(&salon_hours::parse_legacy(text)).map_err(js_err)
}

/// Write a schedule (JSON or legacy text) as legacy text in `locale` ("en"/"ar").
#[wasm_bindgen(js_name = "formatLegacySchedule")]
pub fn format_legacy_schedule(schedule: &str, locale: &str) -> Result<String, JsValue> {
    let locale: Locale = locale.parse().map_err(|e: salon_hours::HoursError| js_err(e.to_string()))?;
    let schedule = ScheduleInput::decode(schedule)
        .and_then(ScheduleInput::into_structured)
        .map_err(js_err)?;
    Ok(salon_hours::format_legacy(&schedule, locale))
}

/// Throw if the schedule has malformed times, inverted hours, or breaks that
/// are inverted, outside opening hours, or overlapping.
#[wasm_bindgen(js_name = "validateSchedule")]
pub fn validate_schedule(schedule: &str) -> Result<(), JsValue> {
    let schedule = ScheduleInput::decode(schedule)
        .and_then(ScheduleInput::into_structured)
        .map_err(js_err)?;
    schedule.validate().map_err(|e| js_err(e.to_string()))
}

/// Whether the business is open at `at`.
///
/// Throws only for an unreadable datetime or JSON; schedule faults count as
/// available.
#[wasm_bindgen(js_name = "isAvailableAt")]
pub fn is_available_at(at: &str, schedule: &str) -> Result<bool, JsValue> {
    let at = parse_local_datetime(at).map_err(js_err)?;
    let input = ScheduleInput::decode(schedule).map_err(js_err)?;
    Ok(salon_hours::is_available_at(at, input.source()))
}

/// Whether an appointment of `duration_minutes` starting at `start` fits.
///
/// Throws only for an unreadable datetime or JSON; schedule faults count as
/// fitting.
#[wasm_bindgen(js_name = "fitsInterval")]
pub fn fits_interval(start: &str, duration_minutes: u32, schedule: &str) -> Result<bool, JsValue> {
    let start = parse_local_datetime(start).map_err(js_err)?;
    let input = ScheduleInput::decode(schedule).map_err(js_err)?;
    Ok(salon_hours::fits_interval(start, duration_minutes, input.source()))
}

/// Bookable start times on `date` as a JSON array of local datetime strings.
///
/// `step_minutes` defaults to `duration_minutes`. Schedule faults yield `[]`.
#[wasm_bindgen(js_name = "availableSlots")]
pub fn available_slots(
    date: &str,
    duration_minutes: u32,
    step_minutes: Option<u32>,
    schedule: &str,
) -> Result<String, JsValue> {
    slots_json(date, duration_minutes, step_minutes, schedule).map_err(js_err)
}

/// Convert an RFC 3339 instant to wall-clock time in the IANA `timezone`.
#[wasm_bindgen(js_name = "toBusinessTime")]
pub fn to_business_time(instant: &str, timezone: &str) -> Result<String, JsValue> {
    let instant = DateTime::parse_from_rfc3339(instant)
        .map_err(|e| js_err(format!("Invalid instant '{}': {}", instant, e)))?;
    let local = salon_hours::to_business_time(instant.with_timezone(&Utc), timezone)
        .map_err(|e| js_err(e.to_string()))?;
    Ok(local.format("%Y-%m-%dT%H:%M:%S").to_string())
}

//! Tests for the schedule data model: validation, resolution and JSON shape.

use chrono::{NaiveDate, Weekday};
use salon_hours::schedule::{
    format_minutes_of_day, minutes_of_day, parse_time_of_day, DaySchedule, WeekSchedule,
};
use salon_hours::HoursError;

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()
}

// ── Validation ──────────────────────────────────────────────────────────────

#[test]
fn default_schedule_is_valid() {
    assert_eq!(WeekSchedule::default().validate(), Ok(()));
}

#[test]
fn inverted_hours_are_rejected() {
    let mut week = WeekSchedule::default();
    week.wednesday = DaySchedule::open("18:00", "10:00");

    assert_eq!(
        week.validate(),
        Err(HoursError::InvertedHours {
            day: Weekday::Wed,
            open: "18:00".to_string(),
            close: "10:00".to_string(),
        })
    );
}

#[test]
fn equal_open_and_close_are_rejected() {
    let mut week = WeekSchedule::default();
    week.monday = DaySchedule::open("09:00", "09:00");

    assert!(matches!(week.validate(), Err(HoursError::InvertedHours { .. })));
}

#[test]
fn closed_days_are_not_inspected() {
    let mut week = WeekSchedule::default();
    week.sunday.open_time = "garbage".to_string();

    assert_eq!(week.validate(), Ok(()));
}

#[test]
fn break_outside_hours_is_rejected() {
    let mut week = WeekSchedule::default();
    week.monday = DaySchedule::open("09:00", "17:00").with_break("16:30", "17:30");

    assert!(matches!(
        week.validate(),
        Err(HoursError::InvalidBreak { day: Weekday::Mon, .. })
    ));
}

#[test]
fn break_ending_at_close_is_accepted() {
    let mut week = WeekSchedule::default();
    week.monday = DaySchedule::open("09:00", "17:00").with_break("16:30", "17:00");

    assert_eq!(week.validate(), Ok(()));
}

#[test]
fn midnight_close_is_accepted() {
    let mut week = WeekSchedule::default();
    week.saturday = DaySchedule::open("18:00", "24:00").with_break("23:30", "24:00");

    assert_eq!(week.validate(), Ok(()));
}

#[test]
fn malformed_break_is_reported_by_validation() {
    let mut week = WeekSchedule::default();
    week.monday = DaySchedule::open("09:00", "17:00").with_break("oops", "15:00");

    assert_eq!(week.validate(), Err(HoursError::InvalidTime("oops".to_string())));
}

#[test]
fn inverted_break_is_rejected() {
    let mut week = WeekSchedule::default();
    week.friday = DaySchedule::open("09:00", "17:00").with_break("13:00", "12:00");

    let err = week.validate().unwrap_err();
    assert!(err.to_string().contains("break must end after it starts"), "{}", err);
}

#[test]
fn overlapping_breaks_are_rejected_regardless_of_order() {
    let mut week = WeekSchedule::default();
    week.tuesday = DaySchedule::open("09:00", "17:00")
        .with_break("12:30", "13:30")
        .with_break("12:00", "13:00");

    assert_eq!(
        week.validate(),
        Err(HoursError::OverlappingBreaks {
            day: Weekday::Tue,
            first: "12:00-13:00".to_string(),
            second: "12:30-13:30".to_string(),
        })
    );
}

#[test]
fn back_to_back_breaks_in_any_order_are_accepted() {
    let mut week = WeekSchedule::default();
    week.tuesday = DaySchedule::open("09:00", "17:00")
        .with_break("15:00", "15:15")
        .with_break("12:00", "13:00")
        .with_break("13:00", "13:15");

    assert_eq!(week.validate(), Ok(()));
}

// ── Resolution ──────────────────────────────────────────────────────────────

#[test]
fn hours_on_resolves_to_the_given_date() {
    let day = DaySchedule::open("9:30", "18:00").with_break("13:00", "13:45");

    let hours = day.hours_on(monday()).unwrap().unwrap();

    assert_eq!(hours.open, monday().and_hms_opt(9, 30, 0).unwrap());
    assert_eq!(hours.close, monday().and_hms_opt(18, 0, 0).unwrap());
    let breaks: Vec<_> = hours.breaks().collect::<Result<_, _>>().unwrap();
    assert_eq!(breaks.len(), 1);
    assert_eq!(breaks[0].start, monday().and_hms_opt(13, 0, 0).unwrap());
}

#[test]
fn hours_on_leaves_malformed_breaks_for_later() {
    let day = DaySchedule::open("09:00", "17:00")
        .with_break("12:00", "13:00")
        .with_break("oops", "15:00");

    let hours = day.hours_on(monday()).unwrap().unwrap();
    let mut breaks = hours.breaks();

    assert!(breaks.next().unwrap().is_ok());
    assert_eq!(
        breaks.next().unwrap(),
        Err(HoursError::InvalidTime("oops".to_string()))
    );
}

#[test]
fn hours_on_midnight_close_is_next_day_start() {
    let day = DaySchedule::open("20:00", "24:00");

    let hours = day.hours_on(monday()).unwrap().unwrap();

    assert_eq!(hours.close, monday().succ_opt().unwrap().and_hms_opt(0, 0, 0).unwrap());
}

#[test]
fn hours_on_closed_day_is_none() {
    assert_eq!(DaySchedule::closed().hours_on(monday()), Ok(None));
}

#[test]
fn time_parsing_accepts_one_or_two_digit_hours() {
    assert!(parse_time_of_day("9:05").is_ok());
    assert!(parse_time_of_day("09:05").is_ok());
    assert!(parse_time_of_day(" 23:59 ").is_ok());
    assert!(parse_time_of_day("00:00").is_ok());
}

#[test]
fn minutes_of_day_accepts_end_of_day() {
    assert_eq!(minutes_of_day("00:00"), Ok(0));
    assert_eq!(minutes_of_day("9:30"), Ok(570));
    assert_eq!(minutes_of_day(" 24:00 "), Ok(1440));
    assert_eq!(minutes_of_day("24:01"), Err(HoursError::InvalidTime("24:01".to_string())));
    assert_eq!(format_minutes_of_day(1440), "24:00");
    assert_eq!(format_minutes_of_day(570), "09:30");
}

#[test]
fn time_parsing_rejects_malformed_input() {
    for bad in ["", "9", "9:5", "24:00", "12:60", "123:00", "-1:00", "ab:cd", "12:00:00", "+9:00"] {
        assert_eq!(
            parse_time_of_day(bad),
            Err(HoursError::InvalidTime(bad.to_string())),
            "{:?} should be rejected",
            bad
        );
    }
}

// ── JSON shape ──────────────────────────────────────────────────────────────

#[test]
fn json_uses_dashboard_field_names() {
    let mut week = WeekSchedule::default();
    week.monday = DaySchedule::open("09:00", "17:00").with_break("12:00", "13:00");

    let value = serde_json::to_value(&week).unwrap();

    assert_eq!(value["sunday"]["isOpen"], false);
    assert_eq!(value["monday"]["openTime"], "09:00");
    assert_eq!(value["monday"]["closeTime"], "17:00");
    assert_eq!(value["monday"]["breaks"][0]["startTime"], "12:00");
    assert_eq!(value["monday"]["breaks"][0]["endTime"], "13:00");
}

#[test]
fn json_without_breaks_deserializes() {
    let day = DaySchedule::open("10:00", "16:00");
    let json = r#"{"isOpen":true,"openTime":"10:00","closeTime":"16:00"}"#;

    assert_eq!(serde_json::from_str::<DaySchedule>(json).unwrap(), day);
}

#[test]
fn json_missing_a_day_is_rejected() {
    let mut value = serde_json::to_value(WeekSchedule::default()).unwrap();
    value.as_object_mut().unwrap().remove("saturday");

    assert!(serde_json::from_value::<WeekSchedule>(value).is_err());
}

//! Property-based tests for the availability checks and slot enumeration.
//!
//! Schedules are generated at minute precision with canonical `HH:MM` times,
//! on a single reference week (2026-03-15 is a Sunday).

use chrono::{Duration, NaiveDate, NaiveDateTime, Weekday};
use proptest::prelude::*;
use salon_hours::locale::WEEK_ORDER;
use salon_hours::schedule::{DaySchedule, WeekSchedule};
use salon_hours::{
    available_slots, available_slots_with, fits_interval, format_legacy, is_available_at,
    parse_legacy, Locale, SlotOptions,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn hhmm(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Date of `day` in the reference week.
fn date_of(day: Weekday) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 15 + day.num_days_from_sunday()).unwrap()
}

fn instant(day: Weekday, minute_of_day: u32) -> NaiveDateTime {
    date_of(day).and_hms_opt(0, 0, 0).unwrap() + Duration::minutes(i64::from(minute_of_day))
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_weekday() -> impl Strategy<Value = Weekday> {
    prop::sample::select(WEEK_ORDER.to_vec())
}

/// (open, close) in minutes, with at least an hour between them.
fn arb_hours() -> impl Strategy<Value = (u32, u32)> {
    (0u32..=1320).prop_flat_map(|open| (Just(open), (open + 60)..=1439))
}

/// Open day with a single break strictly inside the hours.
fn arb_day_with_break() -> impl Strategy<Value = (u32, u32, u32, u32)> {
    arb_hours().prop_flat_map(|(open, close)| {
        ((open + 1)..(close - 1)).prop_flat_map(move |bs| {
            ((bs + 1)..close).prop_map(move |be| (open, close, bs, be))
        })
    })
}

/// Open day with zero to three ordered, non-overlapping breaks.
fn arb_day() -> impl Strategy<Value = DaySchedule> {
    (arb_hours(), prop::collection::vec(0u32..1440, 0..=6)).prop_map(|((open, close), cuts)| {
        let mut cuts: Vec<u32> = cuts
            .into_iter()
            .map(|c| open + c % (close - open))
            .collect();
        cuts.sort_unstable();
        cuts.dedup();

        let mut day = DaySchedule::open(hhmm(open), hhmm(close));
        for pair in cuts.chunks_exact(2) {
            day = day.with_break(hhmm(pair[0]), hhmm(pair[1]));
        }
        day
    })
}

fn arb_week() -> impl Strategy<Value = WeekSchedule> {
    prop::collection::vec((any::<bool>(), arb_day()), 7).prop_map(|days| {
        let mut days = days.into_iter();
        WeekSchedule::from_fn(|_| {
            let (open, mut day) = days.next().unwrap();
            day.is_open = open;
            day
        })
    })
}

// ---------------------------------------------------------------------------
// Property 1: a closed day offers nothing
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn closed_day_is_never_available(
        day in arb_weekday(),
        mut schedule in arb_day(),
        minute in 0u32..1440,
        duration in 1u32..240,
    ) {
        schedule.is_open = false;
        let mut week = WeekSchedule::default();
        *week.day_mut(day) = schedule;

        prop_assert!(!is_available_at(instant(day, minute), &week));
        prop_assert!(!fits_interval(instant(day, minute), duration, &week));
        prop_assert!(available_slots(date_of(day), duration, &week).is_empty());
    }
}

// ---------------------------------------------------------------------------
// Property 2: open is inclusive, close is exclusive for instants
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn open_inclusive_close_exclusive(
        day in arb_weekday(),
        (open, close) in arb_hours(),
    ) {
        let mut week = WeekSchedule::default();
        *week.day_mut(day) = DaySchedule::open(hhmm(open), hhmm(close));

        prop_assert!(is_available_at(instant(day, open), &week));
        prop_assert!(is_available_at(instant(day, close - 1), &week));
        prop_assert!(!is_available_at(instant(day, close), &week));
        if open > 0 {
            prop_assert!(!is_available_at(instant(day, open - 1), &week));
        }
    }
}

// ---------------------------------------------------------------------------
// Property 3: an appointment may end exactly at close, not a minute later
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn appointment_end_inclusive_at_close(
        day in arb_weekday(),
        (open, close) in arb_hours(),
        offset in 0u32..60,
    ) {
        let mut week = WeekSchedule::default();
        *week.day_mut(day) = DaySchedule::open(hhmm(open), hhmm(close));

        let start = open + offset % (close - open);
        let duration = close - start;

        prop_assert!(fits_interval(instant(day, start), duration, &week));
        prop_assert!(!fits_interval(instant(day, start), duration + 1, &week));
    }
}

// ---------------------------------------------------------------------------
// Property 4: overlap with a break rejects; touching a break is fine
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn break_overlap_rules(
        day in arb_weekday(),
        (open, close, bs, be) in arb_day_with_break(),
        start in 0u32..1440,
        duration in 1u32..300,
    ) {
        let mut week = WeekSchedule::default();
        *week.day_mut(day) = DaySchedule::open(hhmm(open), hhmm(close)).with_break(hhmm(bs), hhmm(be));

        let end = start + duration;
        if start < be && end > bs {
            prop_assert!(!fits_interval(instant(day, start), duration, &week));
        }

        // Back-to-back: ending exactly at the break start.
        prop_assert!(fits_interval(instant(day, open), bs - open, &week));
        // Back-to-back: starting exactly at the break end.
        prop_assert!(fits_interval(instant(day, be), close - be, &week));
    }
}

// ---------------------------------------------------------------------------
// Property 5: checking through the legacy text gives the same answers
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn legacy_round_trip_preserves_answers(
        week in arb_week(),
        day in arb_weekday(),
        minutes in prop::collection::vec(0u32..1440, 1..20),
        duration in 1u32..180,
        use_arabic in any::<bool>(),
    ) {
        let locale = if use_arabic { Locale::Arabic } else { Locale::English };
        let text = format_legacy(&week, locale);
        let parsed = parse_legacy(&text).unwrap();

        for minute in minutes {
            let at = instant(day, minute);
            prop_assert_eq!(is_available_at(at, &week), is_available_at(at, &parsed));
            prop_assert_eq!(is_available_at(at, &week), is_available_at(at, text.as_str()));
            prop_assert_eq!(
                fits_interval(at, duration, &week),
                fits_interval(at, duration, &parsed)
            );
        }
        prop_assert_eq!(
            available_slots(date_of(day), duration, &week),
            available_slots(date_of(day), duration, &parsed)
        );
    }
}

// ---------------------------------------------------------------------------
// Property 6: every slot fits, slots ascend, slots sit on the grid
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn slots_fit_ascend_and_follow_the_grid(
        week in arb_week(),
        day in arb_weekday(),
        duration in 5u32..120,
        step in 5u32..60,
    ) {
        let options = SlotOptions { duration_minutes: duration, step_minutes: step };
        let slots = available_slots_with(date_of(day), options, &week);
        let hours = week.hours_on(date_of(day)).unwrap();

        match hours {
            None => prop_assert!(slots.is_empty()),
            Some(hours) => {
                for slot in &slots {
                    prop_assert!(fits_interval(*slot, duration, &week));
                    let offset = (*slot - hours.open).num_minutes();
                    prop_assert_eq!(offset % i64::from(step), 0);
                }
                for pair in slots.windows(2) {
                    prop_assert!(pair[0] < pair[1]);
                }
            }
        }
    }
}

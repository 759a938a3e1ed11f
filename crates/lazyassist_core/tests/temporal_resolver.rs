use chrono::{NaiveDate, NaiveDateTime};
use lazyassist_core::nlp::temporal::{resolve_detailed, TemporalRule};
use lazyassist_core::resolve;

/// Wednesday, 2024-03-13 10:30:00.
fn wednesday_morning() -> NaiveDateTime {
    at(2024, 3, 13, 10, 30, 0)
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

#[test]
fn empty_and_unrecognized_text_resolve_to_nothing() {
    let now = wednesday_morning();
    assert_eq!(resolve("", now), None);
    assert_eq!(resolve("sometime soon", now), None);
}

#[test]
fn now_anywhere_returns_reference_time_exactly() {
    let now = wednesday_morning();
    assert_eq!(resolve("right now please", now), Some(now));
    assert_eq!(resolve("NOW", now), Some(now));
    // "now" wins even over a later, more specific phrase.
    assert_eq!(resolve("now or tomorrow at 5pm", now), Some(now));
}

#[test]
fn today_and_tomorrow_use_end_of_day() {
    let now = wednesday_morning();
    assert_eq!(resolve("today", now), Some(at(2024, 3, 13, 23, 59, 59)));
    assert_eq!(resolve("Tomorrow", now), Some(at(2024, 3, 14, 23, 59, 59)));

    let new_years_eve = at(2024, 12, 31, 18, 0, 0);
    assert_eq!(
        resolve("tomorrow", new_years_eve),
        Some(at(2025, 1, 1, 23, 59, 59))
    );
}

#[test]
fn relative_offsets_keep_time_of_day() {
    let now = wednesday_morning();
    assert_eq!(resolve("in 3 days", now), Some(at(2024, 3, 16, 10, 30, 0)));
    assert_eq!(resolve("in 45 minutes", now), Some(at(2024, 3, 13, 11, 15, 0)));
    assert_eq!(resolve("in 1 hour", now), Some(at(2024, 3, 13, 11, 30, 0)));
    assert_eq!(resolve("in 2 weeks", now), Some(at(2024, 3, 27, 10, 30, 0)));
    assert_eq!(resolve("in 0 days", now), Some(now));
}

#[test]
fn weekday_rolls_to_next_occurrence_at_nine() {
    let now = wednesday_morning();
    assert_eq!(resolve("monday", now), Some(at(2024, 3, 18, 9, 0, 0)));
    assert_eq!(resolve("by friday", now), Some(at(2024, 3, 15, 9, 0, 0)));
    // Same weekday never resolves to today.
    assert_eq!(resolve("see you wednesday", now), Some(at(2024, 3, 20, 9, 0, 0)));

    let monday = at(2024, 3, 18, 8, 0, 0);
    assert_eq!(resolve("monday", monday), Some(at(2024, 3, 25, 9, 0, 0)));
}

#[test]
fn weekday_scan_order_is_monday_first() {
    let now = wednesday_morning();
    assert_eq!(
        resolve("friday or monday", now),
        Some(at(2024, 3, 18, 9, 0, 0))
    );
}

#[test]
fn clock_times_apply_twelve_hour_adjustment_on_today() {
    let now = wednesday_morning();
    assert_eq!(resolve("meeting at 3pm", now), Some(at(2024, 3, 13, 15, 0, 0)));
    assert_eq!(resolve("at 9:45", now), Some(at(2024, 3, 13, 9, 45, 0)));
    assert_eq!(resolve("7:15 pm", now), Some(at(2024, 3, 13, 19, 15, 0)));
    assert_eq!(resolve("at 12am", now), Some(at(2024, 3, 13, 0, 0, 0)));
    assert_eq!(resolve("at 12pm", now), Some(at(2024, 3, 13, 12, 0, 0)));
    // No marker keeps the hour as written, even when already past.
    assert_eq!(resolve("at 8", now), Some(at(2024, 3, 13, 8, 0, 0)));
}

#[test]
fn out_of_range_clock_time_is_absent() {
    let now = wednesday_morning();
    assert_eq!(resolve("at 25", now), None);
    assert_eq!(resolve("at 10:75", now), None);
}

#[test]
fn calendar_dates_roll_into_next_year_once_passed() {
    let now = wednesday_morning();
    assert_eq!(resolve("may 15", now), Some(at(2024, 5, 15, 9, 0, 0)));
    assert_eq!(resolve("15th may", now), Some(at(2024, 5, 15, 9, 0, 0)));
    assert_eq!(resolve("dec 25th", now), Some(at(2024, 12, 25, 9, 0, 0)));
    assert_eq!(resolve("sept 3", now), Some(at(2024, 9, 3, 9, 0, 0)));
    assert_eq!(resolve("march 1st", now), Some(at(2025, 3, 1, 9, 0, 0)));
    assert_eq!(resolve("january 20", now), Some(at(2025, 1, 20, 9, 0, 0)));
    // Same month and day stays in the current year.
    assert_eq!(resolve("march 13", now), Some(at(2024, 3, 13, 9, 0, 0)));
}

#[test]
fn invalid_calendar_dates_are_absent() {
    let now = wednesday_morning();
    assert_eq!(resolve("February 30", now), None);
    assert_eq!(resolve("april 31", now), None);
}

#[test]
fn rule_priority_decides_overlapping_phrases() {
    let now = wednesday_morning();

    let offset = resolve_detailed("in 2 days at 5pm", now).unwrap();
    assert_eq!(offset.rule, TemporalRule::RelativeOffset);
    assert_eq!(offset.at, at(2024, 3, 15, 10, 30, 0));

    let weekday = resolve_detailed("friday at 5pm", now).unwrap();
    assert_eq!(weekday.rule, TemporalRule::Weekday);

    let clock = resolve_detailed("may 15 at 3pm", now).unwrap();
    assert_eq!(clock.rule, TemporalRule::ClockTime);
    assert_eq!(clock.at, at(2024, 3, 13, 15, 0, 0));
}

#[test]
fn resolution_is_idempotent() {
    let now = wednesday_morning();
    for text in ["tomorrow", "in 3 hours", "monday", "at 4pm", "june 2nd", "nonsense"] {
        assert_eq!(resolve(text, now), resolve(text, now));
    }
}

#[test]
fn at_clock_phrasing_is_tried_before_bare_clock() {
    let now = wednesday_morning();
    assert_eq!(resolve("at 9 or 7pm", now), Some(at(2024, 3, 13, 9, 0, 0)));
}

#[test]
fn non_month_word_falls_through_to_day_month_order() {
    let now = wednesday_morning();
    let resolution = resolve_detailed("meeting 15 may", now).unwrap();
    assert_eq!(resolution.rule, TemporalRule::CalendarDate);
    assert_eq!(resolution.at, at(2024, 5, 15, 9, 0, 0));
}

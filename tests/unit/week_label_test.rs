//! Unit tests for week label derivation.

use chrono::{Datelike, Duration, NaiveDate};
use routinelog::routines::{week_label, week_number};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_push_day_example() {
    assert_eq!(week_label(date(2024, 1, 10)), "2024-W2");
}

#[test]
fn test_week_changes_only_on_sunday() {
    let start = date(2025, 1, 1);
    let end = date(2025, 12, 31);

    let mut day = start;
    let mut previous = week_number(day);
    while day < end {
        let next = day + Duration::days(1);
        let current = week_number(next);
        if next.weekday().num_days_from_sunday() == 0 {
            assert_eq!(current, previous + 1, "{}", next);
        } else {
            assert_eq!(current, previous, "{}", next);
        }
        previous = current;
        day = next;
    }
}

#[test]
fn test_week_resets_each_year() {
    for year in 2000..2040 {
        assert_eq!(week_number(date(year, 1, 1)), 1, "{}", year);
        let last = week_number(date(year, 12, 31));
        assert!((53..=54).contains(&last), "{} ends in week {}", year, last);
    }
}

#[test]
fn test_label_uses_calendar_year() {
    // Dec 31 and Jan 1 share an ISO week in some years, never a label here
    assert_eq!(week_label(date(2024, 12, 31)), "2024-W53");
    assert_eq!(week_label(date(2025, 1, 1)), "2025-W1");
}

//! Week labels for grouping routines.
//!
//! The week index is `ceil((day_of_year + weekday_of_jan1 + 1) / 7)` where
//! `day_of_year` is zero-based and `weekday_of_jan1` counts from Sunday = 0.
//! This is not ISO-8601 week numbering: the first days of January always
//! belong to week 1 of their own calendar year, and a year can reach week 54.
//! Stored labels depend on this exact formula, so it must not be swapped
//! for `IsoWeek`.

use chrono::{Datelike, Local, NaiveDate};

/// Week index of `date` within its calendar year (starting at 1).
pub fn week_number(date: NaiveDate) -> u32 {
    let day_of_year = date.ordinal0();
    let jan1_weekday = NaiveDate::from_yo_opt(date.year(), 1)
        .map(|jan1| jan1.weekday().num_days_from_sunday())
        .unwrap_or(0);

    (day_of_year + jan1_weekday + 1).div_ceil(7)
}

/// Label of the form `"<year>-W<n>"` for the given date.
pub fn week_label(date: NaiveDate) -> String {
    format!("{}-W{}", date.year(), week_number(date))
}

/// Today's date in the local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Week label for today in the local timezone.
pub fn current_week() -> String {
    week_label(today())
}

//! Birth date rules.

use chrono::{Datelike, Local, NaiveDate};

const MIN_YEAR: u32 = 1900;

fn is_leap_year(year: u32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(month: u32, year: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

/// Check a birth date against the local calendar date.
///
/// See [`is_valid_date_on`].
pub fn is_valid_date(day: u32, month: u32, year: u32) -> bool {
    is_valid_date_on(day, month, year, Local::now().date_naive())
}

/// Check that `day.month.year` is a real calendar date no earlier than 1900
/// and not after `today`.
pub fn is_valid_date_on(day: u32, month: u32, year: u32, today: NaiveDate) -> bool {
    if year < MIN_YEAR || !(1..=12).contains(&month) || day < 1 {
        return false;
    }

    if day > days_in_month(month, year) {
        return false;
    }

    let today = (today.year() as u32, today.month(), today.day());
    (year, month, day) <= today
}

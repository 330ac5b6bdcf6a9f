/// Pure date utility functions (Discord-agnostic)
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

use crate::constants::DATE_FORMAT;
use crate::error::ValidationError;

/// Exact DD.MM.YYYY shape, checked before calendar parsing
static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}\.[0-9]{2}\.[0-9]{4}$").expect("valid date pattern"));

/// Check whether text has the DD.MM.YYYY shape (digits only, no calendar check)
pub fn is_valid_date_format(text: &str) -> bool {
    DATE_PATTERN.is_match(text)
}

/// Parse a DD.MM.YYYY birthday, rejecting dates that don't exist (e.g. 31.02.2024)
pub fn parse_birthday_date(text: &str) -> Result<NaiveDate, ValidationError> {
    let text = text.trim();
    if !is_valid_date_format(text) {
        return Err(ValidationError::DateFormat(text.to_string()));
    }

    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|_| ValidationError::CalendarDate(text.to_string()))
}

/// Format a date as DD.MM.YYYY
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Check if a birthday falls on the given day (year ignored, Feb 29 matches only Feb 29)
pub fn matches_birthday(birthday: NaiveDate, today: NaiveDate) -> bool {
    birthday.month() == today.month() && birthday.day() == today.day()
}

/// First date on or after `from` with the birthday's month and day.
/// A Feb 29 birthday only occurs in leap years.
pub fn next_occurrence(birthday: NaiveDate, from: NaiveDate) -> Option<NaiveDate> {
    (from.year()..=from.year() + 8)
        .filter_map(|year| NaiveDate::from_ymd_opt(year, birthday.month(), birthday.day()))
        .find(|candidate| *candidate >= from)
}

/// Days from `today` until the birthday's next occurrence (0 when it is today)
pub fn days_until_birthday(birthday: NaiveDate, today: NaiveDate) -> Option<i64> {
    next_occurrence(birthday, today).map(|next| (next - today).num_days())
}

/// Format a date as "Day MonthName" (e.g., "15 March")
pub fn format_date_display(month: u32, day: u32) -> String {
    let month_name = get_month_name(month);
    format!("{} {}", day, month_name)
}

/// Get month name from month number (1-12)
pub fn get_month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

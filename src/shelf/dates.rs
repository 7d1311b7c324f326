//! Calendar helpers for due dates.
//!
//! Due dates travel as `YYYY-MM-DD` strings all the way to the data file. Because the
//! format is zero-padded, plain string comparison orders them correctly, which lets
//! [`overdue_days`] short-circuit before parsing anything.

use chrono::{Local, NaiveDate};
use tracing::warn;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Placeholder stored in place of a due date when a book is on the shelf.
pub const NO_DUE_DATE: &str = "N/A";

/// Today's date in the local time zone.
pub fn current_date() -> String {
    Local::now().date_naive().format(DATE_FORMAT).to_string()
}

/// True for the sentinel and for the empty string some data files carry.
pub fn is_no_due_date(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value == NO_DUE_DATE
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Strict `YYYY-MM-DD` check for user input: a real calendar date, zero-padded.
pub fn is_valid_date(value: &str) -> bool {
    value.len() == 10
        && parse_date(value).is_some_and(|d| d.format(DATE_FORMAT).to_string() == value)
}

/// Whole days `current` is past `due`. Zero when there is no due date, when the book
/// is due today or later, or when either side fails to parse.
pub fn overdue_days(current: &str, due: &str) -> i64 {
    if is_no_due_date(due) || due >= current {
        return 0;
    }

    match (parse_date(current), parse_date(due)) {
        (Some(current), Some(due)) => (current - due).num_days().max(0),
        _ => {
            warn!(current, due, "Could not parse dates for overdue check");
            0
        }
    }
}

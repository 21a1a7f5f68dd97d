use chrono::{NaiveDate, TimeZone, Utc};
use now::DateTimeNow;

pub const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d";

/// This is the standard way of converting a date to a string in studylog. It's also the key used
/// for storing a log.
pub fn canonical_date(date: NaiveDate) -> String {
    date.format(CANONICAL_DATE_FORMAT).to_string()
}

pub fn parse_canonical_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, CANONICAL_DATE_FORMAT).ok()
}

/// `MM-DD`, used for chart axes.
pub fn short_date(date: NaiveDate) -> String {
    date.format("%m-%d").to_string()
}

/// Returns the first and the last day of a month.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let start = Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0).single()?;
    Some((start.date_naive(), start.end_of_month().date_naive()))
}

use std::fmt::Display;

use anyhow::Result;
use chrono::{DateTime, Datelike, Local, NaiveDate};
use chrono_english::parse_date_string;
use clap::{CommandFactory, ValueEnum};

use crate::utils::time::{parse_canonical_date, CANONICAL_DATE_FORMAT};

use super::Args;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DateStyle {
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

/// A calendar month picked on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl From<NaiveDate> for YearMonth {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

/// Accepts canonical dates as well as things like "yesterday" or "15/03/2025".
pub fn parse_date_arg(value: &str, now: DateTime<Local>, style: DateStyle) -> Result<NaiveDate> {
    if let Some(date) = parse_canonical_date(value) {
        return Ok(date);
    }
    match parse_date_string(value, now, style.into()) {
        Ok(v) => Ok(v.date_naive()),
        Err(e) => Err(Args::command()
            .error(
                clap::error::ErrorKind::ValueValidation,
                format!("Failed to validate date {value}: {e}"),
            )
            .into()),
    }
}

/// Accepts `YYYY-MM`.
pub fn parse_month_arg(value: &str) -> Result<YearMonth> {
    match NaiveDate::parse_from_str(&format!("{value}-01"), CANONICAL_DATE_FORMAT) {
        Ok(date) => Ok(date.into()),
        Err(e) => Err(Args::command()
            .error(
                clap::error::ErrorKind::ValueValidation,
                format!("Failed to validate month {value}, expected YYYY-MM: {e}"),
            )
            .into()),
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::{Local, NaiveDate, TimeZone};

    use super::{parse_date_arg, parse_month_arg, DateStyle, YearMonth};

    #[test]
    fn canonical_dates_are_taken_as_is() -> Result<()> {
        let now = Local.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();

        assert_eq!(
            parse_date_arg("2023-11-30", now, DateStyle::Uk)?,
            NaiveDate::from_ymd_opt(2023, 11, 30).unwrap()
        );
        Ok(())
    }

    #[test]
    fn relative_dates_use_now() -> Result<()> {
        let now = Local.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();

        assert_eq!(
            parse_date_arg("yesterday", now, DateStyle::Uk)?,
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
        );
        Ok(())
    }

    #[test]
    fn date_style_controls_day_month_order() -> Result<()> {
        let now = Local.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();

        assert_eq!(
            parse_date_arg("04/02/2024", now, DateStyle::Uk)?,
            NaiveDate::from_ymd_opt(2024, 2, 4).unwrap()
        );
        assert_eq!(
            parse_date_arg("04/02/2024", now, DateStyle::Us)?,
            NaiveDate::from_ymd_opt(2024, 4, 2).unwrap()
        );
        Ok(())
    }

    #[test]
    fn nonsense_date_is_rejected() {
        let now = Local.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();

        assert!(parse_date_arg("not a date at all", now, DateStyle::Uk).is_err());
    }

    #[test]
    fn month_argument() -> Result<()> {
        assert_eq!(
            parse_month_arg("2024-02")?,
            YearMonth {
                year: 2024,
                month: 2
            }
        );
        assert!(parse_month_arg("2024-13").is_err());
        assert!(parse_month_arg("February").is_err());
        Ok(())
    }
}

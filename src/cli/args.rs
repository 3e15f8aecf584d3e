//! Parsing of free-form command line values
//!
//! Every failure here is a `PocketError::Parse` carrying the offending text
//! and the accepted format.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{PocketError, PocketResult};
use crate::models::{period, DateRange, Money, Period, TransactionType};

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

pub fn parse_amount(input: &str) -> PocketResult<Money> {
    Money::parse(input).map_err(|_| {
        PocketError::Parse(format!(
            "Invalid amount '{}'. Use whole units like '12000' or '12,000'",
            input
        ))
    })
}

pub fn parse_kind(input: &str) -> PocketResult<TransactionType> {
    input.parse().map_err(|_| {
        PocketError::Parse(format!(
            "Invalid transaction type '{}'. Use 'income' or 'expense'",
            input
        ))
    })
}

pub fn parse_day(input: &str) -> PocketResult<NaiveDate> {
    period::parse_date(input).map_err(|_| {
        PocketError::Parse(format!("Invalid date '{}'. Use YYYY-MM-DD", input))
    })
}

/// A date with optional time of day; a bare date means midnight
pub fn parse_datetime(input: &str) -> PocketResult<NaiveDateTime> {
    let trimmed = input.trim();
    if let Some(parsed) = DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
    {
        return Ok(parsed);
    }

    period::parse_date(trimmed)
        .map(period::start_of_day)
        .map_err(|_| {
            PocketError::Parse(format!(
                "Invalid date '{}'. Use YYYY-MM-DD or 'YYYY-MM-DD HH:MM'",
                input
            ))
        })
}

/// `YYYY-MM` or `YYYY`; the current month when absent
pub fn parse_period(input: Option<&str>) -> PocketResult<Period> {
    match input {
        Some(s) => Period::parse(s).map_err(|e| PocketError::Parse(e.to_string())),
        None => Ok(Period::current_month()),
    }
}

/// `YYYY-MM`, the current month when absent
pub fn parse_month(input: Option<&str>) -> PocketResult<(i32, u32)> {
    match parse_period(input)? {
        Period::Month { year, month } => Ok((year, month)),
        Period::Year { year } => Err(PocketError::Parse(format!(
            "Expected a month (YYYY-MM), got '{}'",
            year
        ))),
    }
}

/// `YYYY`, the current year when absent
pub fn parse_year(input: Option<&str>) -> PocketResult<i32> {
    match input {
        Some(s) => match Period::parse(s).map_err(|e| PocketError::Parse(e.to_string()))? {
            Period::Year { year } => Ok(year),
            Period::Month { .. } => Err(PocketError::Parse(format!(
                "Expected a year (YYYY), got '{}'",
                s
            ))),
        },
        None => Ok(Period::current_year().year_value()),
    }
}

/// Explicit `--from`/`--to` days win over the period
pub fn resolve_range(
    period: Option<&str>,
    from: Option<&str>,
    to: Option<&str>,
) -> PocketResult<DateRange> {
    match (from, to) {
        (Some(from), Some(to)) => {
            let (start, end) = (parse_day(from)?, parse_day(to)?);
            if start > end {
                return Err(PocketError::Validation(format!(
                    "Range start {} is after its end {}",
                    from, to
                )));
            }
            Ok(DateRange::from_dates(start, end))
        }
        (None, None) => Ok(parse_period(period)?.date_range()),
        _ => Err(PocketError::Validation(
            "--from and --to must be given together".into(),
        )),
    }
}

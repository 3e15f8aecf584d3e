//! Periods, date ranges and date keys
//!
//! Two comparison strategies live side by side and must not be merged:
//! - `Period::contains` buckets by calendar components (year, month),
//!   used for daily/monthly/yearly summaries.
//! - `DateRange::contains` compares instants inclusively on both ends,
//!   used by range queries and breakdowns.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// `YYYY-MM-DD` key for a calendar date (zero padded, sorts chronologically)
pub fn date_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Number of days in the given month, or None for an invalid month
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(next.signed_duration_since(first).num_days() as u32)
}

/// First instant of a day
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Last representable millisecond of a day (23:59:59.999)
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .unwrap_or_else(|| start_of_day(date))
}

/// Inclusive instant range `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    /// Range between two instants, both inclusive
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Range covering whole days from `start` 00:00:00 to `end` 23:59:59.999
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: start_of_day(start),
            end: end_of_day(end),
        }
    }

    /// Check whether an instant falls inside the range
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// Parse `YYYY-MM-DD..YYYY-MM-DD` as a whole-day range
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        let (start, end) = s
            .split_once("..")
            .ok_or_else(|| PeriodParseError::InvalidFormat(s.to_string()))?;
        let start = parse_date(start)?;
        let end = parse_date(end)?;
        Ok(Self::from_dates(start, end))
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> Result<NaiveDate, PeriodParseError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| PeriodParseError::InvalidFormat(s.trim().to_string()))
}

/// An aggregation period: a calendar month or a calendar year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Period {
    /// Calendar month (e.g., "2024-01")
    Month { year: i32, month: u32 },

    /// Calendar year (e.g., "2024")
    Year { year: i32 },
}

impl Period {
    /// Create a monthly period, rejecting months outside 1..=12
    pub fn month(year: i32, month: u32) -> Result<Self, PeriodParseError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month));
        }
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(PeriodParseError::InvalidYear(year));
        }
        Ok(Self::Month { year, month })
    }

    /// Create a yearly period
    pub fn year(year: i32) -> Result<Self, PeriodParseError> {
        if NaiveDate::from_ymd_opt(year, 1, 1).is_none() {
            return Err(PeriodParseError::InvalidYear(year));
        }
        Ok(Self::Year { year })
    }

    /// The month containing today's local date
    pub fn current_month() -> Self {
        let today = chrono::Local::now().date_naive();
        Self::Month {
            year: today.year(),
            month: today.month(),
        }
    }

    /// The year containing today's local date
    pub fn current_year() -> Self {
        Self::Year {
            year: chrono::Local::now().date_naive().year(),
        }
    }

    /// Calendar year of the period
    pub fn year_value(&self) -> i32 {
        match self {
            Self::Month { year, .. } | Self::Year { year } => *year,
        }
    }

    /// First calendar day of the period
    pub fn first_day(&self) -> NaiveDate {
        let (year, month) = match self {
            Self::Month { year, month } => (*year, *month),
            Self::Year { year } => (*year, 1),
        };
        NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Last calendar day of the period
    pub fn last_day(&self) -> NaiveDate {
        match self {
            Self::Month { year, month } => {
                let days = days_in_month(*year, *month).unwrap_or(1);
                NaiveDate::from_ymd_opt(*year, *month, days).unwrap_or(NaiveDate::MIN)
            }
            Self::Year { year } => NaiveDate::from_ymd_opt(*year, 12, 31).unwrap_or(NaiveDate::MIN),
        }
    }

    /// Instant range `[first day 00:00:00, last day 23:59:59.999]`
    pub fn date_range(&self) -> DateRange {
        DateRange::from_dates(self.first_day(), self.last_day())
    }

    /// Check by calendar components whether an instant belongs to this period
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        match self {
            Self::Month { year, month } => instant.year() == *year && instant.month() == *month,
            Self::Year { year } => instant.year() == *year,
        }
    }

    /// Get the next period of the same granularity
    pub fn next(&self) -> Self {
        match self {
            Self::Month { year, month } if *month == 12 => Self::Month {
                year: year + 1,
                month: 1,
            },
            Self::Month { year, month } => Self::Month {
                year: *year,
                month: month + 1,
            },
            Self::Year { year } => Self::Year { year: year + 1 },
        }
    }

    /// Get the previous period of the same granularity
    pub fn prev(&self) -> Self {
        match self {
            Self::Month { year, month } if *month == 1 => Self::Month {
                year: year - 1,
                month: 12,
            },
            Self::Month { year, month } => Self::Month {
                year: *year,
                month: month - 1,
            },
            Self::Year { year } => Self::Year { year: year - 1 },
        }
    }

    /// Parse a period string
    ///
    /// Formats:
    /// - Monthly: "2024-01"
    /// - Yearly: "2024"
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        let invalid = || PeriodParseError::InvalidFormat(s.to_string());

        match s.split_once('-') {
            Some((year, month)) => {
                let year: i32 = year.parse().map_err(|_| invalid())?;
                let month: u32 = month.parse().map_err(|_| invalid())?;
                Self::month(year, month)
            }
            None => {
                let year: i32 = s.parse().map_err(|_| invalid())?;
                Self::year(year)
            }
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Month { year, month } => write!(f, "{:04}-{:02}", year, month),
            Self::Year { year } => write!(f, "{:04}", year),
        }
    }
}

/// Error type for period and date parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
    InvalidYear(i32),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(f, "Invalid period format: {}", s),
            PeriodParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
            PeriodParseError::InvalidYear(y) => write!(f, "Invalid year: {}", y),
        }
    }
}

impl std::error::Error for PeriodParseError {}

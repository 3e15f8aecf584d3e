//! Month calendar view
//!
//! Weeks start on Sunday. Each day cell shows the day number and, when the
//! day has transactions, its balance without the currency suffix.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use tabled::{builder::Builder, settings::Style};

use crate::models::{date_key, period::days_in_month, DailySummary};

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Calendar grid for `year`-`month`, or `None` for an invalid month
pub fn format_month_calendar(year: i32, month: u32, days: &[DailySummary]) -> Option<String> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let length = days_in_month(year, month)?;

    let balances: HashMap<&str, &DailySummary> =
        days.iter().map(|d| (d.date.as_str(), d)).collect();

    let mut builder = Builder::default();
    builder.push_record(WEEKDAYS);

    let offset = first.weekday().num_days_from_sunday() as usize;
    let mut week: Vec<String> = vec![String::new(); offset];

    for day in 1..=length {
        let key = first.with_day(day).map(date_key).unwrap_or_default();
        let cell = match balances.get(key.as_str()) {
            Some(summary) => format!("{:>2}\n{}", day, summary.balance.format_balance("")),
            None => format!("{:>2}", day),
        };
        week.push(cell);

        if week.len() == 7 {
            builder.push_record(std::mem::take(&mut week));
        }
    }

    if !week.is_empty() {
        week.resize(7, String::new());
        builder.push_record(week);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    Some(format!("{} {:02}\n{}\n", year, month, table))
}

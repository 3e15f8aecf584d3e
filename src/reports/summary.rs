//! Daily, monthly and yearly summaries
//!
//! Bucketing here uses calendar components of each transaction's local
//! date-time (year, month, day), never instant ranges.

use std::collections::BTreeMap;

use chrono::Datelike;

use crate::models::{date_key, DailySummary, Period, PeriodSummary, Transaction};

fn in_month(txn: &Transaction, year: i32, month: u32) -> bool {
    txn.date.year() == year && txn.date.month() == month
}

/// One summary per day of `year`-`month` that has at least one transaction,
/// ascending by date key
pub fn daily_summaries(transactions: &[Transaction], year: i32, month: u32) -> Vec<DailySummary> {
    let mut days: BTreeMap<String, DailySummary> = BTreeMap::new();

    for txn in transactions.iter().filter(|t| in_month(t, year, month)) {
        let key = date_key(txn.calendar_date());
        days.entry(key.clone())
            .or_insert_with(|| DailySummary::new(key))
            .add(txn);
    }

    days.into_values().collect()
}

/// Totals for one calendar month; all zero when empty
pub fn monthly_summary(transactions: &[Transaction], year: i32, month: u32) -> PeriodSummary {
    PeriodSummary::from_transactions(transactions.iter().filter(|t| in_month(t, year, month)))
}

/// Totals for one calendar year; all zero when empty
pub fn yearly_summary(transactions: &[Transaction], year: i32) -> PeriodSummary {
    PeriodSummary::from_transactions(transactions.iter().filter(|t| t.date.year() == year))
}

/// Totals for a month or a year
pub fn period_summary(transactions: &[Transaction], period: Period) -> PeriodSummary {
    match period {
        Period::Month { year, month } => monthly_summary(transactions, year, month),
        Period::Year { year } => yearly_summary(transactions, year),
    }
}

/// Twelve monthly summaries for `year`, January first
pub fn monthly_summaries(transactions: &[Transaction], year: i32) -> Vec<(u32, PeriodSummary)> {
    let mut months: Vec<(u32, PeriodSummary)> =
        (1..=12).map(|m| (m, PeriodSummary::zero())).collect();

    for txn in transactions.iter().filter(|t| t.date.year() == year) {
        months[txn.date.month0() as usize].1.add(txn);
    }

    months
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NewTransaction, TransactionId, TransactionType};
    use crate::storage::Entity;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    fn txn(kind: TransactionType, amount: i64, date: NaiveDateTime) -> Transaction {
        Transaction::from_input(
            TransactionId::from(format!("t-{}-{}", amount, date)),
            NewTransaction::new(kind, Money::new(amount), date, "misc", "card"),
        )
    }

    fn mid_january_day() -> Vec<Transaction> {
        vec![
            txn(TransactionType::Income, 100000, at(2024, 1, 15, 9, 0, 0)),
            txn(TransactionType::Expense, 20000, at(2024, 1, 15, 12, 30, 0)),
            txn(TransactionType::Expense, 10000, at(2024, 1, 15, 23, 59, 59)),
        ]
    }

    #[test]
    fn test_daily_summary_scenario() {
        let days = daily_summaries(&mid_january_day(), 2024, 1);

        assert_eq!(
            days,
            vec![DailySummary {
                date: "2024-01-15".to_string(),
                total_income: Money::new(100000),
                total_expense: Money::new(30000),
                balance: Money::new(70000),
                transaction_count: 3,
            }]
        );
    }

    #[test]
    fn test_daily_summaries_sorted_and_sparse() {
        let txns = vec![
            txn(TransactionType::Expense, 3000, at(2024, 1, 28, 10, 0, 0)),
            txn(TransactionType::Expense, 1000, at(2024, 1, 2, 10, 0, 0)),
            txn(TransactionType::Income, 5000, at(2024, 1, 9, 10, 0, 0)),
            txn(TransactionType::Expense, 2000, at(2024, 1, 2, 18, 0, 0)),
        ];

        let days = daily_summaries(&txns, 2024, 1);
        let keys: Vec<_> = days.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(keys, vec!["2024-01-02", "2024-01-09", "2024-01-28"]);
        assert_eq!(days[0].transaction_count, 2);
        assert_eq!(days[0].balance, Money::new(-3000));
    }

    #[test]
    fn test_other_months_excluded() {
        let mut txns = mid_january_day();
        txns.push(txn(TransactionType::Expense, 99000, at(2024, 2, 1, 0, 0, 0)));
        txns.push(txn(TransactionType::Expense, 88000, at(2023, 1, 15, 12, 0, 0)));

        let days = daily_summaries(&txns, 2024, 1);
        assert_eq!(days.len(), 1);

        let january = monthly_summary(&txns, 2024, 1);
        assert_eq!(january.total_expense, Money::new(30000));
        assert_eq!(january.transaction_count, 3);
    }

    #[test]
    fn test_day_counts_add_up_to_month() {
        let txns: Vec<_> = (0..40)
            .map(|i| {
                let kind = if i % 3 == 0 {
                    TransactionType::Income
                } else {
                    TransactionType::Expense
                };
                txn(kind, 1000 + i, at(2024, 3, (i % 31) as u32 + 1, (i % 24) as u32, 0, 0))
            })
            .collect();

        let days = daily_summaries(&txns, 2024, 3);
        let counted: usize = days.iter().map(|d| d.transaction_count).sum();
        assert_eq!(counted, monthly_summary(&txns, 2024, 3).transaction_count);
        assert_eq!(counted, 40);

        for day in &days {
            assert_eq!(day.balance, day.total_income - day.total_expense);
        }
    }

    #[test]
    fn test_empty_laws() {
        assert!(daily_summaries(&[], 2024, 1).is_empty());
        assert_eq!(monthly_summary(&[], 2024, 1), PeriodSummary::zero());
        assert_eq!(yearly_summary(&[], 2024), PeriodSummary::zero());
    }

    #[test]
    fn test_yearly_summary_and_month_rows() {
        let txns = vec![
            txn(TransactionType::Income, 3000000, at(2024, 1, 25, 9, 0, 0)),
            txn(TransactionType::Expense, 500000, at(2024, 6, 1, 9, 0, 0)),
            txn(TransactionType::Expense, 250000, at(2024, 12, 31, 23, 59, 59)),
            txn(TransactionType::Expense, 777, at(2025, 1, 1, 0, 0, 0)),
        ];

        let year = yearly_summary(&txns, 2024);
        assert_eq!(year.total_income, Money::new(3000000));
        assert_eq!(year.total_expense, Money::new(750000));
        assert_eq!(year.balance, Money::new(2250000));
        assert_eq!(year.transaction_count, 3);

        let months = monthly_summaries(&txns, 2024);
        assert_eq!(months.len(), 12);
        assert_eq!(months[0].1.total_income, Money::new(3000000));
        assert_eq!(months[11].1.total_expense, Money::new(250000));
        assert_eq!(months[3].1, PeriodSummary::zero());

        assert_eq!(period_summary(&txns, Period::year(2024).unwrap()), year);
    }

    #[test]
    fn test_idempotent() {
        let txns = mid_january_day();
        assert_eq!(daily_summaries(&txns, 2024, 1), daily_summaries(&txns, 2024, 1));
        assert_eq!(monthly_summary(&txns, 2024, 1), monthly_summary(&txns, 2024, 1));
    }
}

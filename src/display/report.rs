//! Summary and breakdown views

use tabled::{settings::Style, Table, Tabled};

use crate::models::{
    CategoryBreakdown, DailySummary, Money, PaymentMethodBreakdown, PeriodSummary,
};

use super::{format_percent, Labels};

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Date")]
    label: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Expense")]
    expense: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Count")]
    count: usize,
}

#[derive(Tabled)]
struct BreakdownRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "Count")]
    count: usize,
}

fn render<T: Tabled>(rows: Vec<T>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

/// Income / expense / balance block under a title
pub fn format_period_summary(title: &str, summary: &PeriodSummary, labels: &Labels) -> String {
    format!(
        "{}\n{}\nIncome:       {}\nExpense:      {}\nBalance:      {}\nTransactions: {}\n",
        title,
        "=".repeat(title.chars().count()),
        labels.money(summary.total_income),
        labels.money(summary.total_expense),
        labels.balance(summary.balance),
        summary.transaction_count
    )
}

/// One row per day that had transactions
pub fn format_daily_table(days: &[DailySummary], labels: &Labels) -> String {
    if days.is_empty() {
        return "No transactions in this month.\n".to_string();
    }

    render(
        days.iter()
            .map(|day| SummaryRow {
                label: day.date.clone(),
                income: labels.money(day.total_income),
                expense: labels.money(day.total_expense),
                balance: labels.balance(day.balance),
                count: day.transaction_count,
            })
            .collect(),
    )
}

/// One row per month of a year; months without transactions are skipped
pub fn format_monthly_table(year: i32, months: &[(u32, PeriodSummary)], labels: &Labels) -> String {
    let rows: Vec<SummaryRow> = months
        .iter()
        .filter(|(_, summary)| summary.transaction_count > 0)
        .map(|(month, summary)| SummaryRow {
            label: format!("{}-{:02}", year, month),
            income: labels.money(summary.total_income),
            expense: labels.money(summary.total_expense),
            balance: labels.balance(summary.balance),
            count: summary.transaction_count,
        })
        .collect();

    if rows.is_empty() {
        return format!("No transactions in {}.\n", year);
    }
    render(rows)
}

pub fn format_category_breakdown(rows: &[CategoryBreakdown], labels: &Labels) -> String {
    if rows.is_empty() {
        return "No transactions in this range.\n".to_string();
    }

    render(
        rows.iter()
            .map(|row| BreakdownRow {
                name: labels.category(&row.category_id),
                amount: labels.money(row.amount),
                share: format_percent(row.percentage),
                count: row.transaction_count,
            })
            .collect(),
    )
}

pub fn format_payment_method_breakdown(
    rows: &[PaymentMethodBreakdown],
    labels: &Labels,
) -> String {
    if rows.is_empty() {
        return "No transactions in this range.\n".to_string();
    }

    render(
        rows.iter()
            .map(|row| BreakdownRow {
                name: labels.payment_method(&row.payment_method_id),
                amount: labels.money(row.amount),
                share: format_percent(row.percentage),
                count: row.transaction_count,
            })
            .collect(),
    )
}

/// All-time totals
pub fn format_totals(income: Money, expense: Money, balance: Money, labels: &Labels) -> String {
    format!(
        "Total income:  {}\nTotal expense: {}\nBalance:       {}\n",
        labels.money(income),
        labels.money(expense),
        labels.balance(balance)
    )
}

//! CSV export of transactions and breakdowns
//!
//! Amounts are written as plain integers so spreadsheets can sum them; names
//! are resolved through `Labels` with the usual fallback label.

use std::io::Write;

use serde::Serialize;

use crate::display::Labels;
use crate::error::{PocketError, PocketResult};
use crate::models::{CategoryBreakdown, PaymentMethodBreakdown, Transaction};

#[derive(Serialize)]
struct TransactionRecord<'a> {
    #[serde(rename = "ID")]
    id: &'a str,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Type")]
    kind: &'static str,
    #[serde(rename = "Amount")]
    amount: i64,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Payment Method")]
    payment_method: String,
    #[serde(rename = "Memo")]
    memo: &'a str,
}

#[derive(Serialize)]
struct BreakdownRecord<'a> {
    #[serde(rename = "ID")]
    id: &'a str,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Amount")]
    amount: i64,
    #[serde(rename = "Percentage")]
    percentage: i64,
    #[serde(rename = "Transactions")]
    transaction_count: usize,
}

fn write_records<W, T, I>(writer: W, records: I) -> PocketResult<()>
where
    W: Write,
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer
        .flush()
        .map_err(|e| PocketError::Export(format!("Failed to flush CSV output: {}", e)))
}

/// Export transactions in the order given
pub fn export_transactions_csv<W: Write>(
    transactions: &[Transaction],
    labels: &Labels,
    writer: W,
) -> PocketResult<()> {
    write_records(
        writer,
        transactions.iter().map(|txn| TransactionRecord {
            id: txn.id.as_str(),
            date: txn.date.format("%Y-%m-%d %H:%M:%S").to_string(),
            kind: txn.kind.as_str(),
            amount: txn.amount.value(),
            category: labels.category(&txn.category_id),
            payment_method: labels.payment_method(&txn.payment_method_id),
            memo: txn.memo.as_deref().unwrap_or(""),
        }),
    )
}

pub fn export_category_breakdown_csv<W: Write>(
    rows: &[CategoryBreakdown],
    labels: &Labels,
    writer: W,
) -> PocketResult<()> {
    write_records(
        writer,
        rows.iter().map(|row| BreakdownRecord {
            id: row.category_id.as_str(),
            name: labels.category(&row.category_id),
            amount: row.amount.value(),
            percentage: row.percentage,
            transaction_count: row.transaction_count,
        }),
    )
}

pub fn export_payment_method_breakdown_csv<W: Write>(
    rows: &[PaymentMethodBreakdown],
    labels: &Labels,
    writer: W,
) -> PocketResult<()> {
    write_records(
        writer,
        rows.iter().map(|row| BreakdownRecord {
            id: row.payment_method_id.as_str(),
            name: labels.payment_method(&row.payment_method_id),
            amount: row.amount.value(),
            percentage: row.percentage,
            transaction_count: row.transaction_count,
        }),
    )
}

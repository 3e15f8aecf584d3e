//! Transaction display formatting

use tabled::{settings::Style, Table, Tabled};

use crate::models::Transaction;
use crate::services::DayDetail;

use super::Labels;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Payment")]
    payment_method: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Memo")]
    memo: String,
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

fn row(txn: &Transaction, labels: &Labels) -> TransactionRow {
    TransactionRow {
        id: txn.id.to_string(),
        date: txn.date.format("%Y-%m-%d %H:%M").to_string(),
        category: labels.category(&txn.category_id),
        payment_method: labels.payment_method(&txn.payment_method_id),
        amount: labels.signed(txn.amount, txn.kind),
        memo: truncate(txn.memo.as_deref().unwrap_or(""), 30),
    }
}

/// Table of transactions in the order given
pub fn format_transaction_table(transactions: &[Transaction], labels: &Labels) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut table = Table::new(transactions.iter().map(|t| row(t, labels)));
    table.with(Style::rounded());
    format!("{}\n", table)
}

/// Multi-line detail view of one transaction
pub fn format_transaction_details(txn: &Transaction, labels: &Labels) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d %H:%M")));
    output.push_str(&format!("Amount:      {}\n", labels.signed(txn.amount, txn.kind)));
    output.push_str(&format!("Category:    {}\n", labels.category(&txn.category_id)));
    output.push_str(&format!(
        "Payment:     {}\n",
        labels.payment_method(&txn.payment_method_id)
    ));

    if let Some(memo) = &txn.memo {
        output.push_str(&format!("Memo:        {}\n", memo));
    }

    output
}

/// A day's transactions followed by its totals
pub fn format_day_detail(detail: &DayDetail, labels: &Labels) -> String {
    let mut output = format!("{}\n\n", detail.date.format("%Y-%m-%d (%a)"));

    output.push_str(&format_transaction_table(&detail.transactions, labels));
    output.push('\n');
    output.push_str(&format!(
        "Income:  {}\nExpense: {}\nBalance: {}\n",
        labels.money(detail.summary.total_income),
        labels.money(detail.summary.total_expense),
        labels.balance(detail.summary.balance)
    ));

    output
}

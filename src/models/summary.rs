//! Derived summary types
//!
//! None of these are stored; they are recomputed from the transaction set on
//! every call. Every summary keeps `balance == total_income - total_expense`.

use serde::{Deserialize, Serialize};

use super::ids::{CategoryId, PaymentMethodId};
use super::money::Money;
use super::transaction::{Transaction, TransactionType};

/// Income/expense totals for one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    /// `YYYY-MM-DD`
    pub date: String,
    pub total_income: Money,
    pub total_expense: Money,
    pub balance: Money,
    pub transaction_count: usize,
}

impl DailySummary {
    /// Empty summary for a date key
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            total_income: Money::zero(),
            total_expense: Money::zero(),
            balance: Money::zero(),
            transaction_count: 0,
        }
    }

    /// Fold one transaction into the totals
    pub fn add(&mut self, txn: &Transaction) {
        match txn.kind {
            TransactionType::Income => self.total_income += txn.amount,
            TransactionType::Expense => self.total_expense += txn.amount,
        }
        self.balance = self.total_income - self.total_expense;
        self.transaction_count += 1;
    }
}

/// Income/expense totals over a month, a year, or any subset of transactions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    pub total_income: Money,
    pub total_expense: Money,
    pub balance: Money,
    pub transaction_count: usize,
}

impl PeriodSummary {
    /// All-zero summary
    pub fn zero() -> Self {
        Self::default()
    }

    /// Fold one transaction into the totals
    pub fn add(&mut self, txn: &Transaction) {
        match txn.kind {
            TransactionType::Income => self.total_income += txn.amount,
            TransactionType::Expense => self.total_expense += txn.amount,
        }
        self.balance = self.total_income - self.total_expense;
        self.transaction_count += 1;
    }

    /// Summarize any sequence of transactions
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut summary = Self::zero();
        for txn in transactions {
            summary.add(txn);
        }
        summary
    }
}

/// One row of a category breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub category_id: CategoryId,
    pub amount: Money,
    /// Whole-number share of the breakdown total, rounded half up
    pub percentage: i64,
    pub transaction_count: usize,
}

/// One row of a payment method breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodBreakdown {
    pub payment_method_id: PaymentMethodId,
    pub amount: Money,
    /// Whole-number share of the breakdown total, rounded half up
    pub percentage: i64,
    pub transaction_count: usize,
}

//! Transaction model
//!
//! An income or expense entry with a positive amount, a local date+time,
//! a category and a payment method.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{CategoryId, PaymentMethodId, TransactionId};
use super::money::{Money, MAX_TRANSACTION_AMOUNT};
use super::period::date_key;
use crate::storage::Entity;

/// Whether a transaction (or category) is income or expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// Both types, income first
    pub fn all() -> &'static [Self] {
        &[Self::Income, Self::Expense]
    }

    /// Lowercase name as used in serialized data and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expense" | "out" => Ok(Self::Expense),
            other => Err(format!("Unknown transaction type: {}", other)),
        }
    }
}

/// A stored financial transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier, assigned by the store
    pub id: TransactionId,

    /// Income or expense
    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Amount in whole currency units (positive)
    pub amount: Money,

    /// Local date and time of the transaction
    pub date: NaiveDateTime,

    /// Category this transaction is filed under
    pub category_id: CategoryId,

    /// Payment method used
    pub payment_method_id: PaymentMethodId,

    /// Optional memo
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

impl Transaction {
    /// Calendar date of the transaction, ignoring time of day
    pub fn calendar_date(&self) -> NaiveDate {
        self.date.date()
    }

    /// `YYYY-MM-DD` key of the calendar date
    pub fn date_key(&self) -> String {
        date_key(self.calendar_date())
    }

    /// Check if this is an income transaction
    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    /// Check if this is an expense transaction
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Amount with expenses negated, so that summing gives a balance
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d %H:%M"),
            self.kind,
            self.amount
        )
    }
}

impl Entity for Transaction {
    type Id = TransactionId;
    type Input = NewTransaction;
    type Patch = TransactionPatch;

    const ID_PREFIX: &'static str = TransactionId::PREFIX;

    fn id(&self) -> &TransactionId {
        &self.id
    }

    fn from_input(id: TransactionId, input: NewTransaction) -> Self {
        Self {
            id,
            kind: input.kind,
            amount: input.amount,
            date: input.date,
            category_id: input.category_id,
            payment_method_id: input.payment_method_id,
            memo: input.memo,
        }
    }

    fn apply(&mut self, patch: TransactionPatch) {
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(category_id) = patch.category_id {
            self.category_id = category_id;
        }
        if let Some(payment_method_id) = patch.payment_method_id {
            self.payment_method_id = payment_method_id;
        }
        if let Some(memo) = patch.memo {
            self.memo = memo;
        }
    }
}

/// Input for creating a new transaction (everything but the id)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub kind: TransactionType,
    pub amount: Money,
    pub date: NaiveDateTime,
    pub category_id: CategoryId,
    pub payment_method_id: PaymentMethodId,
    pub memo: Option<String>,
}

impl NewTransaction {
    /// Create an input without a memo
    pub fn new(
        kind: TransactionType,
        amount: Money,
        date: NaiveDateTime,
        category_id: impl Into<CategoryId>,
        payment_method_id: impl Into<PaymentMethodId>,
    ) -> Self {
        Self {
            kind,
            amount,
            date,
            category_id: category_id.into(),
            payment_method_id: payment_method_id.into(),
            memo: None,
        }
    }

    /// Attach a memo
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    /// Check the input before it is handed to the store
    ///
    /// The store itself never validates; callers accepting user input do.
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        validate_amount(self.amount)?;
        if self.category_id.as_str().trim().is_empty() {
            return Err(TransactionValidationError::MissingCategory);
        }
        if self.payment_method_id.as_str().trim().is_empty() {
            return Err(TransactionValidationError::MissingPaymentMethod);
        }
        Ok(())
    }
}

/// Partial update for a transaction; `None` fields are left unchanged
///
/// `memo` is doubly optional:
/// - `None`: no change
/// - `Some(None)`: clear the memo
/// - `Some(Some(text))`: set the memo
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionPatch {
    pub kind: Option<TransactionType>,
    pub amount: Option<Money>,
    pub date: Option<NaiveDateTime>,
    pub category_id: Option<CategoryId>,
    pub payment_method_id: Option<PaymentMethodId>,
    pub memo: Option<Option<String>>,
}

impl TransactionPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn date(mut self, date: NaiveDateTime) -> Self {
        self.date = Some(date);
        self
    }

    pub fn category(mut self, category_id: impl Into<CategoryId>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn payment_method(mut self, payment_method_id: impl Into<PaymentMethodId>) -> Self {
        self.payment_method_id = Some(payment_method_id.into());
        self
    }

    pub fn memo(mut self, memo: Option<String>) -> Self {
        self.memo = Some(memo);
        self
    }

    /// Check whether the patch changes anything at all
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Validate only the fields the patch sets
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if let Some(amount) = self.amount {
            validate_amount(amount)?;
        }
        Ok(())
    }
}

fn validate_amount(amount: Money) -> Result<(), TransactionValidationError> {
    if !amount.is_positive() {
        Err(TransactionValidationError::NonPositiveAmount(amount))
    } else if amount > MAX_TRANSACTION_AMOUNT {
        Err(TransactionValidationError::AmountTooLarge(amount))
    } else {
        Ok(())
    }
}

/// Validation errors for transaction input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
    MissingCategory,
    MissingPaymentMethod,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than zero (got {})", amount)
            }
            Self::AmountTooLarge(amount) => write!(
                f,
                "Amount must not exceed {} (got {})",
                MAX_TRANSACTION_AMOUNT, amount
            ),
            Self::MissingCategory => write!(f, "A category is required"),
            Self::MissingPaymentMethod => write!(f, "A payment method is required"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn sample() -> Transaction {
        Transaction::from_input(
            TransactionId::from("transaction-1-0"),
            NewTransaction::new(
                TransactionType::Expense,
                Money::new(10000),
                at(2024, 1, 15, 9, 30),
                "food",
                "card",
            )
            .with_memo("lunch"),
        )
    }

    #[test]
    fn test_type_parse_and_display() {
        assert_eq!("income".parse::<TransactionType>(), Ok(TransactionType::Income));
        assert_eq!("Expense".parse::<TransactionType>(), Ok(TransactionType::Expense));
        assert!("transfer".parse::<TransactionType>().is_err());
        assert_eq!(TransactionType::Income.to_string(), "Income");
        assert_eq!(TransactionType::Expense.as_str(), "expense");
    }

    #[test]
    fn test_from_input() {
        let txn = sample();
        assert_eq!(txn.kind, TransactionType::Expense);
        assert_eq!(txn.amount, Money::new(10000));
        assert_eq!(txn.category_id.as_str(), "food");
        assert_eq!(txn.memo.as_deref(), Some("lunch"));
        assert_eq!(txn.date_key(), "2024-01-15");
        assert!(txn.is_expense());
        assert_eq!(txn.signed_amount(), Money::new(-10000));
    }

    #[test]
    fn test_apply_patch_keeps_id() {
        let mut txn = sample();
        let id = txn.id.clone();

        txn.apply(
            TransactionPatch::new()
                .amount(Money::new(25000))
                .category("new-category")
                .memo(Some("dinner".into())),
        );

        assert_eq!(txn.id, id);
        assert_eq!(txn.amount, Money::new(25000));
        assert_eq!(txn.category_id.as_str(), "new-category");
        assert_eq!(txn.memo.as_deref(), Some("dinner"));
        assert_eq!(txn.payment_method_id.as_str(), "card");
    }

    #[test]
    fn test_patch_clears_memo() {
        let mut txn = sample();
        txn.apply(TransactionPatch::new().memo(None));
        assert!(txn.memo.is_none());

        let mut txn = sample();
        txn.apply(TransactionPatch::new());
        assert_eq!(txn.memo.as_deref(), Some("lunch"));
    }

    #[test]
    fn test_validation() {
        let input = NewTransaction::new(
            TransactionType::Income,
            Money::new(0),
            at(2024, 1, 1, 0, 0),
            "salary",
            "bank",
        );
        assert_eq!(
            input.validate(),
            Err(TransactionValidationError::NonPositiveAmount(Money::new(0)))
        );

        let input = NewTransaction::new(
            TransactionType::Income,
            Money::new(100),
            at(2024, 1, 1, 0, 0),
            " ",
            "bank",
        );
        assert_eq!(input.validate(), Err(TransactionValidationError::MissingCategory));

        assert!(TransactionPatch::new().amount(Money::new(-5)).validate().is_err());
        assert!(TransactionPatch::new().amount(MAX_TRANSACTION_AMOUNT).validate().is_ok());
        assert!(TransactionPatch::new().validate().is_ok());
        assert!(TransactionPatch::new().is_empty());
    }

    #[test]
    fn test_amount_cap() {
        let input = NewTransaction::new(
            TransactionType::Expense,
            Money::new(i64::MAX),
            at(2024, 1, 1, 0, 0),
            "food",
            "card",
        );
        assert_eq!(
            input.validate(),
            Err(TransactionValidationError::AmountTooLarge(Money::new(i64::MAX)))
        );

        let over = MAX_TRANSACTION_AMOUNT + Money::new(1);
        assert_eq!(
            TransactionPatch::new().amount(over).validate(),
            Err(TransactionValidationError::AmountTooLarge(over))
        );
    }

    #[test]
    fn test_serialization_shape() {
        let txn = sample();
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["type"], "expense");
        assert_eq!(json["amount"], 10000);
        assert_eq!(json["categoryId"], "food");
        assert_eq!(json["paymentMethodId"], "card");

        let back: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(back, txn);
    }

    #[test]
    fn test_display() {
        assert_eq!(sample().to_string(), "2024-01-15 09:30 Expense 10,000원");
    }
}

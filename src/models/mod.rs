//! Core data models for CloudPocket
//!
//! Transactions, categories and payment methods, plus the money, period and
//! summary types derived from them.

pub mod category;
pub mod ids;
pub mod money;
pub mod payment_method;
pub mod period;
pub mod summary;
pub mod transaction;

pub use category::{Category, CategoryPatch, NameValidationError, NewCategory};
pub use ids::{CategoryId, IdGenerator, PaymentMethodId, TransactionId};
pub use money::{Money, MAX_TRANSACTION_AMOUNT};
pub use payment_method::{NewPaymentMethod, PaymentMethod, PaymentMethodPatch};
pub use period::{date_key, DateRange, Period};
pub use summary::{CategoryBreakdown, DailySummary, PaymentMethodBreakdown, PeriodSummary};
pub use transaction::{
    NewTransaction, Transaction, TransactionPatch, TransactionType, TransactionValidationError,
};

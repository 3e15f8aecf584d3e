//! Service layer for CloudPocket
//!
//! One service per entity type. These are the only entry points the CLI uses;
//! each borrows the shared `Storage` rather than owning global state.

pub mod category;
pub mod payment_method;
pub mod transaction;

pub use category::CategoryService;
pub use payment_method::PaymentMethodService;
pub use transaction::{DayDetail, PeriodBreakdowns, TransactionFilter, TransactionService};

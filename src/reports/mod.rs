//! Aggregation over transaction snapshots
//!
//! Everything here is a pure function of a transaction slice. Nothing reads
//! or writes a store directly; the services hand in `get_all()` snapshots.

pub mod breakdown;
pub mod summary;

pub use breakdown::{category_breakdown, payment_method_breakdown, percentage_of};
pub use summary::{
    daily_summaries, monthly_summaries, monthly_summary, period_summary, yearly_summary,
};

//! Export module for CloudPocket
//!
//! - CSV: transactions and breakdowns, for spreadsheets
//! - JSON: every store in one versioned document

pub mod csv;
pub mod json;

pub use csv::{
    export_category_breakdown_csv, export_payment_method_breakdown_csv, export_transactions_csv,
};
pub use json::{export_full_json, FullExport, EXPORT_SCHEMA_VERSION};

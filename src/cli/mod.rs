//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

mod args;
pub mod audit;
pub mod category;
pub mod config;
pub mod export;
pub mod payment;
pub mod report;
pub mod transaction;

pub use audit::handle_audit_command;
pub use category::{handle_category_command, CategoryCommands};
pub use config::{handle_config_command, ConfigCommands};
pub use export::{handle_export_command, ExportCommands};
pub use payment::{handle_payment_command, PaymentCommands};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

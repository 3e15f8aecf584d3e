//! CloudPocket - personal income and expense tracking
//!
//! This library provides the core of the CloudPocket tracker: recording
//! income and expense transactions against categories and payment methods,
//! and summarizing them by day, month and year with category and payment
//! method breakdowns.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, categories, payment methods, summaries)
//! - `storage`: Generic entity stores with optional JSON file backing
//! - `services`: Business logic layer (CRUD, queries, aggregation entry points)
//! - `reports`: Pure aggregation functions over transaction snapshots
//! - `audit`: Audit logging system
//! - `display`: Terminal formatting
//! - `export`: CSV and JSON export
//! - `cli`: Command handlers for the `pocket` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use cloudpocket::services::TransactionService;
//! use cloudpocket::storage::Storage;
//!
//! let storage = Storage::in_memory();
//! let service = TransactionService::new(&storage);
//! let summary = service.monthly_summary(2024, 1)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{PocketError, PocketResult};

//! Full JSON export
//!
//! Dumps every store into one versioned document.

use std::collections::HashSet;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PocketError, PocketResult};
use crate::models::{Category, PaymentMethod, Transaction};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full database export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    /// Version of the binary that wrote the export
    pub app_version: String,
    pub transactions: Vec<Transaction>,
    pub categories: Vec<Category>,
    pub payment_methods: Vec<PaymentMethod>,
    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub transaction_count: usize,
    pub category_count: usize,
    pub payment_method_count: usize,
    /// `YYYY-MM-DD` of the earliest transaction
    pub earliest_transaction: Option<String>,
    /// `YYYY-MM-DD` of the latest transaction
    pub latest_transaction: Option<String>,
}

impl FullExport {
    pub fn from_storage(storage: &Storage) -> PocketResult<Self> {
        let transactions = storage.transactions.get_all()?;
        let categories = storage.categories.get_all()?;
        let payment_methods = storage.payment_methods.get_all()?;

        let earliest_transaction = transactions.iter().min_by_key(|t| t.date).map(|t| t.date_key());
        let latest_transaction = transactions.iter().max_by_key(|t| t.date).map(|t| t.date_key());

        let metadata = ExportMetadata {
            transaction_count: transactions.len(),
            category_count: categories.len(),
            payment_method_count: payment_methods.len(),
            earliest_transaction,
            latest_transaction,
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            transactions,
            categories,
            payment_methods,
            metadata,
        })
    }

    /// Transactions pointing at categories or payment methods that no longer exist
    ///
    /// These are legal (deletes do not cascade) but worth reporting.
    pub fn dangling_references(&self) -> Vec<String> {
        let category_ids: HashSet<_> = self.categories.iter().map(|c| &c.id).collect();
        let method_ids: HashSet<_> = self.payment_methods.iter().map(|m| &m.id).collect();

        let mut problems = Vec::new();
        for txn in &self.transactions {
            if !category_ids.contains(&txn.category_id) {
                problems.push(format!(
                    "Transaction {} references unknown category {}",
                    txn.id, txn.category_id
                ));
            }
            if !method_ids.contains(&txn.payment_method_id) {
                problems.push(format!(
                    "Transaction {} references unknown payment method {}",
                    txn.id, txn.payment_method_id
                ));
            }
        }
        problems
    }
}

/// Write the full export to `writer`
pub fn export_full_json<W: Write>(export: &FullExport, writer: W, pretty: bool) -> PocketResult<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, export)
    } else {
        serde_json::to_writer(writer, export)
    }
    .map_err(|e| PocketError::Export(e.to_string()))
}

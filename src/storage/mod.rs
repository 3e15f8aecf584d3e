//! Storage layer for CloudPocket
//!
//! One generic `EntityStore` per entity type, optionally backed by JSON
//! snapshot files written atomically, plus the audit log hooks services use.

pub mod init;
pub mod store;

pub use init::initialize_storage;
pub use store::{Entity, EntityStore};

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::PocketPaths;
use crate::error::PocketError;
use crate::models::{Category, PaymentMethod, Transaction};

/// Owns the three entity stores; pass it by reference to the services
pub struct Storage {
    paths: Option<PocketPaths>,
    pub transactions: EntityStore<Transaction>,
    pub categories: EntityStore<Category>,
    pub payment_methods: EntityStore<PaymentMethod>,
    audit: Option<AuditLogger>,
}

impl Storage {
    /// File-backed storage under `paths`, with audit logging on
    pub fn new(paths: PocketPaths) -> Result<Self, PocketError> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: EntityStore::with_file(paths.transactions_file()),
            categories: EntityStore::with_file(paths.categories_file()),
            payment_methods: EntityStore::with_file(paths.payment_methods_file()),
            audit: Some(AuditLogger::new(paths.audit_log())),
            paths: Some(paths),
        })
    }

    /// Purely in-memory storage with no audit log
    pub fn in_memory() -> Self {
        Self {
            paths: None,
            transactions: EntityStore::in_memory(),
            categories: EntityStore::in_memory(),
            payment_methods: EntityStore::in_memory(),
            audit: None,
        }
    }

    pub fn paths(&self) -> Option<&PocketPaths> {
        self.paths.as_ref()
    }

    /// Turn audit logging on or off (on only has an effect for file-backed storage)
    pub fn set_audit_enabled(&mut self, enabled: bool) {
        self.audit = match (&self.paths, enabled) {
            (Some(paths), true) => Some(AuditLogger::new(paths.audit_log())),
            _ => None,
        };
    }

    pub fn audit_logger(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Load all stores from disk
    pub fn load_all(&self) -> Result<(), PocketError> {
        self.transactions.load()?;
        self.categories.load()?;
        self.payment_methods.load()?;
        Ok(())
    }

    /// Save all stores to disk
    pub fn save_all(&self) -> Result<(), PocketError> {
        self.transactions.save()?;
        self.categories.save()?;
        self.payment_methods.save()?;
        Ok(())
    }

    /// Check if `pocket init` has been run against this storage
    pub fn is_initialized(&self) -> bool {
        self.paths
            .as_ref()
            .map(|paths| paths.is_initialized())
            .unwrap_or(false)
    }

    fn log(&self, entry: AuditEntry) -> Result<(), PocketError> {
        match &self.audit {
            Some(logger) => logger.append(&entry),
            None => Ok(()),
        }
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), PocketError> {
        self.log(AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Result<(), PocketError> {
        self.log(AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff_summary,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), PocketError> {
        self.log(AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }

    pub fn log_clear(&self, entity_type: EntityType, removed: usize) -> Result<(), PocketError> {
        match &self.audit {
            Some(logger) => logger.cleared(entity_type, removed),
            None => Ok(()),
        }
    }
}

//! User settings for CloudPocket
//!
//! Manages display and logging preferences: the currency suffix, labels for
//! deleted categories and payment methods, audit logging and the default
//! breakdown filter.

use serde::{Deserialize, Serialize};

use super::paths::PocketPaths;
use crate::error::PocketError;
use crate::models::TransactionType;

/// User settings for CloudPocket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Suffix appended to formatted amounts
    #[serde(default = "default_currency_suffix")]
    pub currency_suffix: String,

    /// Label shown when a transaction refers to a deleted category
    #[serde(default = "default_category_fallback_label")]
    pub category_fallback_label: String,

    /// Label shown when a transaction refers to a deleted payment method
    #[serde(default = "default_payment_method_fallback_label")]
    pub payment_method_fallback_label: String,

    /// Whether create/update/delete operations are written to the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,

    /// Type filter applied to breakdown reports when none is given.
    /// Expense unless changed; `null` mixes both types on one base.
    #[serde(default = "default_breakdown_type")]
    pub default_breakdown_type: Option<TransactionType>,

    /// Whether initial setup has been completed
    #[serde(default)]
    pub setup_completed: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency_suffix() -> String {
    "원".to_string()
}

fn default_category_fallback_label() -> String {
    "Uncategorized".to_string()
}

fn default_payment_method_fallback_label() -> String {
    "Unassigned".to_string()
}

fn default_breakdown_type() -> Option<TransactionType> {
    Some(TransactionType::Expense)
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_suffix: default_currency_suffix(),
            category_fallback_label: default_category_fallback_label(),
            payment_method_fallback_label: default_payment_method_fallback_label(),
            audit_enabled: default_audit_enabled(),
            default_breakdown_type: default_breakdown_type(),
            setup_completed: false,
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &PocketPaths) -> Result<Self, PocketError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| PocketError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                PocketError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &PocketPaths) -> Result<(), PocketError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| PocketError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| PocketError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

//! Path management for CloudPocket
//!
//! Provides XDG-compliant path resolution for configuration and data files.
//!
//! ## Path Resolution Order
//!
//! 1. `CLOUDPOCKET_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/cloudpocket` or `~/.config/cloudpocket`
//! 3. Windows: `%APPDATA%\cloudpocket`

use std::path::PathBuf;

use crate::error::PocketError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "CLOUDPOCKET_DATA_DIR";

/// Manages all paths used by CloudPocket
#[derive(Debug, Clone)]
pub struct PocketPaths {
    base_dir: PathBuf,
}

impl PocketPaths {
    /// Create a new PocketPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, PocketError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create PocketPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/cloudpocket/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/cloudpocket/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to transactions.json
    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir().join("transactions.json")
    }

    /// Get the path to categories.json
    pub fn categories_file(&self) -> PathBuf {
        self.data_dir().join("categories.json")
    }

    /// Get the path to payment_methods.json
    pub fn payment_methods_file(&self) -> PathBuf {
        self.data_dir().join("payment_methods.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), PocketError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| PocketError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| PocketError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if CloudPocket has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, PocketError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                PocketError::Config("HOME environment variable not set".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("cloudpocket"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, PocketError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| PocketError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("cloudpocket"))
}

//! Audit log viewer

use crate::audit::AuditLogger;
use crate::error::{PocketError, PocketResult};
use crate::storage::Storage;

/// Print the most recent audit entries, oldest first
///
/// Reads the log even when auditing is currently switched off.
pub fn handle_audit_command(storage: &Storage, limit: usize) -> PocketResult<()> {
    let paths = storage
        .paths()
        .ok_or_else(|| PocketError::Config("Audit log requires file-backed storage".into()))?;
    let logger = AuditLogger::new(paths.audit_log());

    let entries = logger.read_recent(limit)?;
    if entries.is_empty() {
        println!("No audit entries recorded.");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}

//! Audit logging for CloudPocket
//!
//! Every create, update, delete and clear that goes through a service is
//! appended to `audit.log` as one JSON line. Update entries carry a short
//! field-by-field diff built by the service that made the change.

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;

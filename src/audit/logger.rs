//! Audit log file
//!
//! Entries are JSON objects separated by newlines. The file is only ever
//! appended to; reading streams it back through `serde_json`'s
//! multi-value deserializer.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{PocketError, PocketResult};

use super::entry::{AuditEntry, EntityType};

pub struct AuditLogger {
    path: PathBuf,
}

impl AuditLogger {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, action: &str, err: io::Error) -> PocketError {
        PocketError::Io(format!(
            "Failed to {} audit log {}: {}",
            action,
            self.path.display(),
            err
        ))
    }

    /// Append one entry
    pub fn append(&self, entry: &AuditEntry) -> PocketResult<()> {
        let mut line = serde_json::to_vec(entry)?;
        line.push(b'\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error("open", e))?;

        // One write per entry so lines from separate processes stay whole
        file.write_all(&line)
            .map_err(|e| self.io_error("append to", e))
    }

    /// Record that every entity of one type was removed at once
    pub fn cleared(&self, entity_type: EntityType, removed: usize) -> PocketResult<()> {
        self.append(&AuditEntry::clear(entity_type, removed))
    }

    /// All entries, oldest first; an absent file is an empty log
    pub fn read_all(&self) -> PocketResult<Vec<AuditEntry>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error("open", e)),
        };

        serde_json::Deserializer::from_reader(BufReader::new(file))
            .into_iter::<AuditEntry>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                PocketError::Json(format!(
                    "Corrupt audit log {} at line {}: {}",
                    self.path.display(),
                    e.line(),
                    e
                ))
            })
    }

    /// The last `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> PocketResult<Vec<AuditEntry>> {
        let entries = self.read_all()?;
        let skip = entries.len().saturating_sub(count);
        Ok(entries.into_iter().skip(skip).collect())
    }
}

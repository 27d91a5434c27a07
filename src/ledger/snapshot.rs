//! Snapshot persistence.
//!
//! The snapshot is a seed, not a log: it is read once at startup and written
//! once after a fresh corpus is generated. Later ingests and deletes never
//! touch it.

use std::fs;
use std::path::Path;
use tracing::{debug, info};

use super::error::SnapshotError;
use crate::models::Transaction;

/// Read a snapshot file as a list of records.
pub fn load(path: &Path) -> Result<Vec<Transaction>, SnapshotError> {
    let raw = fs::read_to_string(path)?;
    let records: Vec<Transaction> = serde_json::from_str(&raw)?;
    info!("Loaded {} records from snapshot {}", records.len(), path.display());
    Ok(records)
}

/// Write records as a pretty-printed JSON array, creating parent directories.
pub fn save(path: &Path, records: &[Transaction]) -> Result<(), SnapshotError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json)?;
    debug!("Wrote {} records to snapshot {}", records.len(), path.display());
    Ok(())
}

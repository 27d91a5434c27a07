use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("failed to load snapshot {path}: {source}")]
    Bootstrap {
        path: PathBuf,
        #[source]
        source: SnapshotError,
    },
    #[error("failed to write snapshot {path}: {source}")]
    SnapshotWrite {
        path: PathBuf,
        #[source]
        source: SnapshotError,
    },
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

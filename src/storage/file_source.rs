//! File-backed ledger source
//!
//! Reads an exported snapshot (JSON or YAML) from disk.

use std::path::{Path, PathBuf};

use super::file_io::{read_structured, write_atomic};
use super::snapshot::{LedgerSnapshot, LedgerSource};
use crate::error::FintrackResult;

/// Loads a [`LedgerSnapshot`] from a file on every call
#[derive(Debug, Clone)]
pub struct FileLedgerSource {
    path: PathBuf,
}

impl FileLedgerSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerSource for FileLedgerSource {
    fn load(&self) -> FintrackResult<LedgerSnapshot> {
        let snapshot: LedgerSnapshot = read_structured(&self.path)?;
        snapshot.validate()?;

        tracing::info!(
            path = %self.path.display(),
            transactions = snapshot.transactions.len(),
            categories = snapshot.categories.len(),
            budgets = snapshot.budgets.len(),
            "loaded ledger snapshot"
        );

        Ok(snapshot)
    }
}

/// Write a snapshot to `path` atomically
pub fn write_snapshot(path: impl AsRef<Path>, snapshot: &LedgerSnapshot) -> FintrackResult<()> {
    write_atomic(path, snapshot)
}

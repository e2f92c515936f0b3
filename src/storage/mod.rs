//! Storage layer for fintrack
//!
//! Loads ledger snapshots from JSON or YAML files and writes them back
//! atomically. The reports only ever see a [`LedgerSnapshot`].

pub mod file_io;
pub mod file_source;
pub mod init;
pub mod snapshot;

pub use file_io::{read_structured, write_atomic, FileFormat};
pub use file_source::{write_snapshot, FileLedgerSource};
pub use init::{initialize, sample_snapshot, InitOutcome};
pub use snapshot::{LedgerSnapshot, LedgerSource};

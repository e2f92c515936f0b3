//! File I/O utilities
//!
//! Snapshot files may be JSON or YAML, chosen by extension. Writes are atomic
//! (temp file, then rename) so a crash never leaves a half-written ledger.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::FintrackError;

/// Serialization format of a snapshot file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    /// Pick the format from the file extension; anything unknown is JSON
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Read and deserialize a file, failing if it does not exist
pub fn read_structured<T, P>(path: P) -> Result<T, FintrackError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Err(FintrackError::ledger_not_found(path.display().to_string()));
    }

    let file = File::open(path)
        .map_err(|e| FintrackError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;
    let reader = BufReader::new(file);

    match FileFormat::from_path(path) {
        FileFormat::Json => serde_json::from_reader(reader).map_err(|e| {
            FintrackError::Storage(format!("Failed to parse {}: {}", path.display(), e))
        }),
        FileFormat::Yaml => serde_yaml::from_reader(reader).map_err(|e| {
            FintrackError::Storage(format!("Failed to parse {}: {}", path.display(), e))
        }),
    }
}

/// Write data to a file atomically in the format its extension implies
pub fn write_atomic<T, P>(path: P, data: &T) -> Result<(), FintrackError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            FintrackError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("tmp");

    let result = write_temp(&temp_path, FileFormat::from_path(path), data).and_then(|()| {
        fs::rename(&temp_path, path)
            .map_err(|e| FintrackError::Storage(format!("Failed to rename temp file: {}", e)))
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_temp<T: Serialize>(
    temp_path: &Path,
    format: FileFormat,
    data: &T,
) -> Result<(), FintrackError> {
    let file = File::create(temp_path)
        .map_err(|e| FintrackError::Storage(format!("Failed to create temp file: {}", e)))?;
    let mut writer = BufWriter::new(file);

    match format {
        FileFormat::Json => serde_json::to_writer_pretty(&mut writer, data)
            .map_err(|e| FintrackError::Storage(format!("Failed to serialize data: {}", e)))?,
        FileFormat::Yaml => serde_yaml::to_writer(&mut writer, data)
            .map_err(|e| FintrackError::Storage(format!("Failed to serialize data: {}", e)))?,
    }

    writer
        .flush()
        .map_err(|e| FintrackError::Storage(format!("Failed to flush data: {}", e)))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| FintrackError::Storage(format!("Failed to sync data: {}", e)))?;

    Ok(())
}

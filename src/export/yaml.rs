//! YAML export of the report bundle

use std::io::Write;

use super::json::ReportBundle;
use crate::error::{FintrackError, FintrackResult};

/// Write the bundle as YAML with a short header comment
pub fn export_bundle_yaml<W: Write>(bundle: &ReportBundle, writer: &mut W) -> FintrackResult<()> {
    let export_err = |e: std::io::Error| FintrackError::Export(e.to_string());

    writeln!(writer, "# fintrack report export").map_err(export_err)?;
    writeln!(writer, "# Generated: {}", bundle.generated_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", bundle.app_version).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, bundle).map_err(|e| FintrackError::Export(e.to_string()))?;

    Ok(())
}

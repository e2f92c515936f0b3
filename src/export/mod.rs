//! Export of computed reports
//!
//! - JSON: the full report bundle, or any single report for `--json`
//! - YAML: the same bundle in a human-readable form
//!
//! Single-report CSV export lives on each report (`export_csv`).

pub mod json;
pub mod yaml;

pub use json::{export_bundle_json, to_json_pretty, ReportBundle, EXPORT_SCHEMA_VERSION};
pub use yaml::export_bundle_yaml;

//! CLI command handlers
//!
//! Bridges clap argument parsing with the reports and the storage layer.

pub mod report;
pub mod setup;

pub use report::{handle_report_command, ReportCommands, ReportContext};
pub use setup::{handle_config, handle_init};

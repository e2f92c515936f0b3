//! Configuration module for fintrack
//!
//! - Path resolution (environment override or platform config dir)
//! - Persisted user settings: analytics windows and report semantics

pub mod paths;
pub mod settings;

pub use paths::FintrackPaths;
pub use settings::Settings;

//! User settings for fintrack
//!
//! Holds the analytics window sizes, the two explicit semantic choices the
//! reports expose (budget scope and trend seed), and display preferences.
//! Every field has a serde default so older config files keep loading.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::paths::FintrackPaths;
use crate::error::FintrackError;
use crate::models::BudgetScope;
use crate::reports::{HealthThresholds, TrendSeed};

/// User settings for fintrack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Ledger snapshot to load when `--ledger` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger_path: Option<PathBuf>,

    /// Number of most recent months in the monthly series
    #[serde(default = "default_months_window")]
    pub months_window: usize,

    /// Trailing window, in days, for the balance trend
    #[serde(default = "default_trend_window_days")]
    pub trend_window_days: u32,

    /// Maximum points kept in the balance trend
    #[serde(default = "default_trend_max_points")]
    pub trend_max_points: usize,

    /// How many transactions the recent list shows
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,

    /// Which expenses count against budgets without a category
    #[serde(default)]
    pub budget_scope: BudgetScope,

    /// Starting balance of the trend's running total
    #[serde(default)]
    pub trend_seed: TrendSeed,

    /// Percentages at which a budget is flagged
    #[serde(default)]
    pub health_thresholds: HealthThresholds,

    /// Currency symbol used in terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Default log filter, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_months_window() -> usize {
    6
}

fn default_trend_window_days() -> u32 {
    30
}

fn default_trend_max_points() -> usize {
    14
}

fn default_recent_limit() -> usize {
    10
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            ledger_path: None,
            months_window: default_months_window(),
            trend_window_days: default_trend_window_days(),
            trend_max_points: default_trend_max_points(),
            recent_limit: default_recent_limit(),
            budget_scope: BudgetScope::default(),
            trend_seed: TrendSeed::default(),
            health_thresholds: HealthThresholds::default(),
            currency_symbol: default_currency(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if no file exists
    pub fn load_or_default(paths: &FintrackPaths) -> Result<Self, FintrackError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            tracing::debug!(path = %settings_path.display(), "no settings file, using defaults");
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| FintrackError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| FintrackError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FintrackPaths) -> Result<(), FintrackError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FintrackError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FintrackError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Ledger file to load: the configured one, else the default location
    pub fn resolve_ledger_path(&self, paths: &FintrackPaths) -> PathBuf {
        self.ledger_path
            .clone()
            .unwrap_or_else(|| paths.ledger_file())
    }

    /// Reject settings the reports cannot work with
    pub fn validate(&self) -> Result<(), FintrackError> {
        let t = &self.health_thresholds;
        if !(t.warning.is_finite() && t.critical.is_finite()) || t.warning > t.critical {
            return Err(FintrackError::Config(format!(
                "Budget warning threshold ({}) must not exceed critical threshold ({})",
                t.warning, t.critical
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.months_window, 6);
        assert_eq!(settings.trend_window_days, 30);
        assert_eq!(settings.trend_max_points, 14);
        assert_eq!(settings.recent_limit, 10);
        assert_eq!(settings.budget_scope, BudgetScope::AllExpenses);
        assert_eq!(settings.trend_seed, TrendSeed::Zero);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.months_window = 12;
        settings.budget_scope = BudgetScope::UncategorizedOnly;
        settings.trend_seed = TrendSeed::AllTime;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_default(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let loaded = Settings::load_or_default(&paths).unwrap();
        assert_eq!(loaded, Settings::default());
        assert!(!paths.settings_file().exists());
        assert!(!paths.export_dir().exists());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"months_window": 3}"#).unwrap();
        assert_eq!(settings.months_window, 3);
        assert_eq!(settings.trend_max_points, 14);
        assert_eq!(settings.currency_symbol, "$");
    }

    #[test]
    fn test_rejects_inverted_thresholds() {
        let mut settings = Settings::default();
        settings.health_thresholds = HealthThresholds {
            warning: 95.0,
            critical: 90.0,
        };
        assert!(matches!(settings.validate(), Err(FintrackError::Config(_))));
    }

    #[test]
    fn test_resolve_ledger_path() {
        let paths = FintrackPaths::with_base_dir(PathBuf::from("/tmp/fintrack-test"));
        let mut settings = Settings::default();
        assert_eq!(settings.resolve_ledger_path(&paths), paths.ledger_file());

        settings.ledger_path = Some(PathBuf::from("/data/ledger.yaml"));
        assert_eq!(
            settings.resolve_ledger_path(&paths),
            PathBuf::from("/data/ledger.yaml")
        );
    }
}

//! CLI commands for first-run setup and configuration

use chrono::NaiveDate;
use std::path::Path;

use crate::config::{FintrackPaths, Settings};
use crate::error::FintrackResult;
use crate::storage::initialize;

/// Handle `fintrack init`
pub fn handle_init(
    paths: &FintrackPaths,
    settings: &Settings,
    today: NaiveDate,
    force: bool,
) -> FintrackResult<()> {
    println!("Initializing fintrack at: {}", paths.base_dir().display());

    let outcome = initialize(paths, settings, today, force)?;
    let ledger = settings.resolve_ledger_path(paths);

    if outcome.settings_written {
        println!("Created settings: {}", paths.settings_file().display());
    } else {
        println!("Kept existing settings: {}", paths.settings_file().display());
    }

    if outcome.ledger_written {
        println!("Wrote sample ledger: {}", ledger.display());
    } else {
        println!(
            "Kept existing ledger: {} (use --force to replace it)",
            ledger.display()
        );
    }

    println!();
    println!("Run 'fintrack summary' to see your dashboard.");
    Ok(())
}

/// Handle `fintrack config`
pub fn handle_config(paths: &FintrackPaths, settings: &Settings, ledger: &Path) {
    println!("fintrack Configuration");
    println!("======================");
    println!("Base directory:   {}", paths.base_dir().display());
    println!("Settings file:    {}", paths.settings_file().display());
    println!("Ledger file:      {}", ledger.display());
    println!("Export directory: {}", paths.export_dir().display());
    println!();
    println!("Settings:");
    println!("  Months window:      {}", settings.months_window);
    println!("  Trend window:       {} days", settings.trend_window_days);
    println!("  Trend max points:   {}", settings.trend_max_points);
    println!("  Recent limit:       {}", settings.recent_limit);
    println!("  Budget scope:       {}", settings.budget_scope);
    println!("  Trend seed:         {}", settings.trend_seed);
    println!(
        "  Health thresholds:  warning {}%, critical {}%",
        settings.health_thresholds.warning, settings.health_thresholds.critical
    );
    println!("  Currency symbol:    {}", settings.currency_symbol);
    println!("  Log level:          {}", settings.log_level);
}

//! JSON export of the full report bundle
//!
//! Every report computed from one snapshot, stamped with a schema version
//! so downstream dashboards can check what they are reading.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::io::Write;

use crate::config::Settings;
use crate::error::{FintrackError, FintrackResult};
use crate::reports::{
    BalanceTrend, BudgetOverview, CategoryBreakdown, DashboardSummary, MonthlySeries,
    RecentTransactions, TrendWindow,
};
use crate::storage::LedgerSnapshot;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// All reports for one snapshot
#[derive(Debug, Clone, Serialize)]
pub struct ReportBundle {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub generated_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Reference date the trend window was computed from
    pub as_of: NaiveDate,

    pub summary: DashboardSummary,
    pub monthly: MonthlySeries,
    pub categories: CategoryBreakdown,
    pub trend: BalanceTrend,
    pub budgets: BudgetOverview,
    pub recent: RecentTransactions,
}

impl ReportBundle {
    /// Run every report over `snapshot` with the windows from `settings`
    pub fn generate(snapshot: &LedgerSnapshot, settings: &Settings, today: NaiveDate) -> Self {
        let transactions = &snapshot.transactions;

        let window = TrendWindow {
            today,
            days: settings.trend_window_days,
            max_points: settings.trend_max_points,
            seed: settings.trend_seed,
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            as_of: today,
            summary: DashboardSummary::generate(
                transactions,
                &snapshot.budgets,
                settings.months_window,
            ),
            monthly: MonthlySeries::generate(transactions, settings.months_window),
            categories: CategoryBreakdown::generate(transactions, &snapshot.categories),
            trend: BalanceTrend::generate(transactions, window),
            budgets: BudgetOverview::generate(
                &snapshot.budgets,
                transactions,
                settings.budget_scope,
                &settings.health_thresholds,
            ),
            recent: RecentTransactions::generate(
                transactions,
                &snapshot.categories,
                settings.recent_limit,
            ),
        }
    }
}

/// Write the bundle as JSON
pub fn export_bundle_json<W: Write>(
    bundle: &ReportBundle,
    writer: &mut W,
    pretty: bool,
) -> FintrackResult<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, bundle)
    } else {
        serde_json::to_writer(writer, bundle)
    }
    .map_err(|e| FintrackError::Export(e.to_string()))?;

    Ok(())
}

/// Serialize any report for `--json` output
pub fn to_json_pretty<T: Serialize>(value: &T) -> FintrackResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| FintrackError::Export(e.to_string()))
}

//! Aggregation engine
//!
//! Pure derivations from a ledger snapshot: totals, monthly series, category
//! breakdown, balance trend and budget progress. Nothing in here performs
//! I/O beyond the optional CSV writers, holds state between calls, or reads
//! the clock; the reference date for the trend is passed in.

pub mod budget_status;
pub mod categories;
pub mod dashboard;
pub mod monthly;
pub mod totals;
pub mod trend;

pub use budget_status::{BudgetHealth, BudgetOverview, BudgetRow, BudgetStatus, HealthThresholds};
pub use categories::{CategoryBreakdown, CategoryTotal};
pub use dashboard::{DashboardSummary, RecentEntry, RecentTransactions, TransactionFilter};
pub use monthly::{MonthKey, MonthlyRow, MonthlySeries};
pub use totals::{savings_rate, Totals};
pub use trend::{BalanceTrend, TrendPoint, TrendSeed, TrendWindow};

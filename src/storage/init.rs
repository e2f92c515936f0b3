//! First-run setup
//!
//! Writes default settings and a small sample ledger so every report has
//! something to show straight after `fintrack init`.

use chrono::{Duration, NaiveDate};

use super::file_source::write_snapshot;
use super::snapshot::LedgerSnapshot;
use crate::config::{FintrackPaths, Settings};
use crate::error::FintrackError;
use crate::models::{Budget, BudgetPeriod, Category, CategoryKind, Money, Transaction};

/// What [`initialize`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitOutcome {
    pub settings_written: bool,
    pub ledger_written: bool,
}

/// Create the data directory, settings file and sample ledger
///
/// An existing settings file is never replaced. An existing ledger is only
/// replaced when `force` is set.
pub fn initialize(
    paths: &FintrackPaths,
    settings: &Settings,
    today: NaiveDate,
    force: bool,
) -> Result<InitOutcome, FintrackError> {
    paths.ensure_directories()?;

    let settings_written = !paths.settings_file().exists();
    if settings_written {
        settings.save(paths)?;
    }

    let ledger_path = settings.resolve_ledger_path(paths);
    let ledger_written = force || !ledger_path.exists();
    if ledger_written {
        write_snapshot(&ledger_path, &sample_snapshot(today))?;
        tracing::info!(path = %ledger_path.display(), "wrote sample ledger");
    }

    Ok(InitOutcome {
        settings_written,
        ledger_written,
    })
}

/// Default categories: one income bucket and the common expense buckets
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new("Salary", CategoryKind::Income).with_color("#22c55e"),
        Category::new("Food", CategoryKind::Expense).with_color("#ef4444"),
        Category::new("Rent", CategoryKind::Expense).with_color("#3b82f6"),
        Category::new("Transport", CategoryKind::Expense).with_color("#f59e0b"),
        Category::new("Entertainment", CategoryKind::Expense).with_color("#a855f7"),
        Category::new("Gifts", CategoryKind::Both).with_color("#14b8a6"),
    ]
}

/// A sample ledger dated relative to `today`
pub fn sample_snapshot(today: NaiveDate) -> LedgerSnapshot {
    let categories = default_categories();
    let id = |name: &str| {
        categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.id)
    };
    let days_ago = |n: i64| today - Duration::days(n);

    let mut transactions = Vec::new();
    for month in 0..3 {
        let offset = month * 30;

        let mut salary = Transaction::income(Money::from_units(3200), days_ago(offset + 2))
            .with_description("Monthly salary");
        salary.category_id = id("Salary");
        transactions.push(salary);

        let mut rent = Transaction::expense(Money::from_units(1150), days_ago(offset + 1))
            .with_description("Rent");
        rent.category_id = id("Rent");
        transactions.push(rent);

        let mut groceries = Transaction::expense(Money::from_cents(18_450), days_ago(offset + 5))
            .with_description("Groceries");
        groceries.category_id = id("Food");
        transactions.push(groceries);

        let mut bus = Transaction::expense(Money::from_units(48), days_ago(offset + 9))
            .with_description("Transit pass top-up");
        bus.category_id = id("Transport");
        transactions.push(bus);
    }

    let mut cinema = Transaction::expense(Money::from_cents(3_250), days_ago(4))
        .with_description("Cinema");
    cinema.category_id = id("Entertainment");
    transactions.push(cinema);

    transactions.push(
        Transaction::expense(Money::from_cents(1_299), days_ago(6)).with_description("Hardware store"),
    );

    let month_start = days_ago(29);
    let mut budgets = vec![Budget::new(
        "Monthly spending",
        Money::from_units(2000),
        BudgetPeriod::Monthly,
        month_start,
    )];
    if let Some(food) = id("Food") {
        budgets.push(
            Budget::new("Groceries", Money::from_units(250), BudgetPeriod::Monthly, month_start)
                .for_category(food),
        );
    }

    LedgerSnapshot::new(transactions, categories, budgets)
}

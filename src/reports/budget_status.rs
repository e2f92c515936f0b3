//! Budget progress
//!
//! Spent, remaining and percentage-used for each budget, and an overview
//! across all budgets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;

use crate::display::report::{format_bar, separator};
use crate::error::FintrackResult;
use crate::models::{Budget, BudgetScope, Money, Transaction};

/// Percentages at which a budget changes health
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthThresholds {
    pub warning: f64,
    pub critical: f64,
}

impl Default for HealthThresholds {
    fn default() -> Self {
        Self {
            warning: 70.0,
            critical: 90.0,
        }
    }
}

/// Coarse budget state for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BudgetHealth {
    OnTrack,
    Warning,
    Critical,
}

impl fmt::Display for BudgetHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OnTrack => write!(f, "On track"),
            Self::Warning => write!(f, "Warning"),
            Self::Critical => write!(f, "Critical"),
        }
    }
}

/// Progress of one budget
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetStatus {
    pub spent: Money,
    /// `spent / amount * 100`, or `0` when the budget amount is zero
    pub percentage: f64,
    /// `amount - spent`; negative when over budget
    pub remaining: Money,
}

impl BudgetStatus {
    /// Compute progress for `budget` against the ledger
    ///
    /// Never fails: a zero budget amount yields a percentage of zero and a
    /// remaining of `-spent`.
    pub fn compute(budget: &Budget, transactions: &[Transaction], scope: BudgetScope) -> Self {
        let spent: Money = transactions
            .iter()
            .filter(|t| budget.applies_to(t, scope))
            .map(|t| t.amount)
            .sum();

        Self {
            spent,
            percentage: spent.percent_of(budget.amount),
            remaining: budget.amount - spent,
        }
    }

    pub fn is_over_budget(&self) -> bool {
        self.remaining.is_negative()
    }

    /// Percentage clamped to 100 for progress bars
    pub fn progress(&self) -> f64 {
        self.percentage.min(100.0)
    }

    pub fn health(&self, thresholds: &HealthThresholds) -> BudgetHealth {
        if self.percentage >= thresholds.critical {
            BudgetHealth::Critical
        } else if self.percentage >= thresholds.warning {
            BudgetHealth::Warning
        } else {
            BudgetHealth::OnTrack
        }
    }
}

/// A budget together with its progress
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetRow {
    pub budget: Budget,
    pub status: BudgetStatus,
    pub health: BudgetHealth,
}

/// Progress across every budget
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BudgetOverview {
    pub rows: Vec<BudgetRow>,
    /// Sum of budget amounts
    pub total_budgeted: Money,
    /// Sum of per-budget spending; an expense counted by two budgets is
    /// counted twice here
    pub total_spent: Money,
    /// Mean percentage used, rounded to a whole number; zero with no budgets
    pub average_utilization: f64,
}

impl BudgetOverview {
    pub fn generate(
        budgets: &[Budget],
        transactions: &[Transaction],
        scope: BudgetScope,
        thresholds: &HealthThresholds,
    ) -> Self {
        let rows: Vec<BudgetRow> = budgets
            .iter()
            .map(|budget| {
                let status = BudgetStatus::compute(budget, transactions, scope);
                BudgetRow {
                    budget: budget.clone(),
                    health: status.health(thresholds),
                    status,
                }
            })
            .collect();

        let total_budgeted = budgets.iter().map(|b| b.amount).sum();
        let total_spent = rows.iter().map(|r| r.status.spent).sum();
        let average_utilization = if rows.is_empty() {
            0.0
        } else {
            let sum: f64 = rows.iter().map(|r| r.status.percentage).sum();
            (sum / rows.len() as f64).round()
        };

        Self {
            rows,
            total_budgeted,
            total_spent,
            average_utilization,
        }
    }

    pub fn over_budget(&self) -> impl Iterator<Item = &BudgetRow> {
        self.rows.iter().filter(|r| r.status.is_over_budget())
    }

    /// Format the overview for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str("Budget Progress\n");
        output.push_str(&"=".repeat(78));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("No budgets found.\n");
            return output;
        }

        output.push_str(&format!(
            "Budgets: {}   Total budgeted: {}   Average used: {:.0}%\n\n",
            self.rows.len(),
            self.total_budgeted.format_with_symbol(symbol),
            self.average_utilization
        ));

        for row in &self.rows {
            let status = &row.status;
            let ends = row
                .budget
                .end_date
                .map(|d| d.format("%b %-d, %Y").to_string())
                .unwrap_or_else(|| "Ongoing".to_string());

            output.push_str(&format!(
                "{} [{}] {} - {}\n",
                row.budget.name,
                row.budget.period,
                row.budget.start_date.format("%b %-d, %Y"),
                ends
            ));
            output.push_str(&format!(
                "  {} {:>5.1}%  {} of {}  ({})\n",
                format_bar(status.progress(), 100.0, 20),
                status.percentage,
                status.spent.format_with_symbol(symbol),
                row.budget.amount.format_with_symbol(symbol),
                row.health
            ));
            let remaining_label = if status.is_over_budget() {
                "Over budget"
            } else {
                "Remaining"
            };
            output.push_str(&format!(
                "  {}: {}\n",
                remaining_label,
                status.remaining.abs().format_with_symbol(symbol)
            ));
        }

        output.push_str(&separator(78));
        output.push('\n');

        output
    }

    /// Export the overview to CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> FintrackResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record([
            "Budget",
            "Period",
            "Amount",
            "Spent",
            "Remaining",
            "Percentage",
            "Health",
        ])?;

        for row in &self.rows {
            csv.write_record([
                row.budget.name.clone(),
                row.budget.period.to_string(),
                format!("{:.2}", row.budget.amount.as_f64()),
                format!("{:.2}", row.status.spent.as_f64()),
                format!("{:.2}", row.status.remaining.as_f64()),
                format!("{:.2}", row.status.percentage),
                row.health.to_string(),
            ])?;
        }

        csv.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetPeriod, CategoryId};
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    fn budget(units: i64) -> Budget {
        Budget::new("Monthly", Money::from_units(units), BudgetPeriod::Monthly, date())
    }

    fn expense(units: i64) -> Transaction {
        Transaction::expense(Money::from_units(units), date())
    }

    #[test]
    fn test_overall_budget_counts_all_expenses() {
        let ledger = vec![
            expense(50).with_category(CategoryId::new()),
            expense(70),
            Transaction::income(Money::from_units(1000), date()),
        ];
        let status = BudgetStatus::compute(&budget(200), &ledger, BudgetScope::AllExpenses);

        assert_eq!(status.spent, Money::from_units(120));
        assert_eq!(status.percentage, 60.0);
        assert_eq!(status.remaining, Money::from_units(80));
        assert!(!status.is_over_budget());
    }

    #[test]
    fn test_overall_budget_uncategorized_scope() {
        let ledger = vec![expense(50).with_category(CategoryId::new()), expense(70)];
        let status = BudgetStatus::compute(&budget(200), &ledger, BudgetScope::UncategorizedOnly);
        assert_eq!(status.spent, Money::from_units(70));
        assert_eq!(status.percentage, 35.0);
    }

    #[test]
    fn test_category_budget() {
        let food = CategoryId::new();
        let ledger = vec![
            expense(30).with_category(food),
            expense(500).with_category(CategoryId::new()),
            expense(10),
        ];
        let status = BudgetStatus::compute(&budget(100).for_category(food), &ledger, BudgetScope::AllExpenses);
        assert_eq!(status.spent, Money::from_units(30));
        assert_eq!(status.remaining, Money::from_units(70));
    }

    #[test]
    fn test_zero_amount_budget() {
        let ledger = vec![expense(25), expense(5)];
        let status = BudgetStatus::compute(&budget(0), &ledger, BudgetScope::AllExpenses);

        assert_eq!(status.percentage, 0.0);
        assert!(status.percentage.is_finite());
        assert_eq!(status.remaining, Money::from_units(-30));
        assert!(status.is_over_budget());
    }

    #[test]
    fn test_over_budget_and_progress_clamp() {
        let status = BudgetStatus::compute(&budget(100), &[expense(150)], BudgetScope::AllExpenses);
        assert_eq!(status.percentage, 150.0);
        assert_eq!(status.progress(), 100.0);
        assert_eq!(status.remaining, Money::from_units(-50));
        assert!(status.is_over_budget());
    }

    #[test]
    fn test_health_thresholds() {
        let thresholds = HealthThresholds::default();
        let at = |pct: i64| BudgetStatus::compute(&budget(100), &[expense(pct)], BudgetScope::AllExpenses);

        assert_eq!(at(69).health(&thresholds), BudgetHealth::OnTrack);
        assert_eq!(at(70).health(&thresholds), BudgetHealth::Warning);
        assert_eq!(at(89).health(&thresholds), BudgetHealth::Warning);
        assert_eq!(at(90).health(&thresholds), BudgetHealth::Critical);
        assert_eq!(at(0).health(&thresholds), BudgetHealth::OnTrack);
    }

    #[test]
    fn test_overview() {
        let food = CategoryId::new();
        let budgets = vec![budget(200), budget(100).for_category(food)];
        let ledger = vec![expense(50).with_category(food), expense(70)];
        let overview = BudgetOverview::generate(
            &budgets,
            &ledger,
            BudgetScope::AllExpenses,
            &HealthThresholds::default(),
        );

        assert_eq!(overview.rows.len(), 2);
        assert_eq!(overview.total_budgeted, Money::from_units(300));
        assert_eq!(overview.rows[0].status.spent, Money::from_units(120));
        assert_eq!(overview.rows[1].status.spent, Money::from_units(50));
        assert_eq!(overview.total_spent, Money::from_units(170));
        // (60 + 50) / 2
        assert_eq!(overview.average_utilization, 55.0);
        assert_eq!(overview.over_budget().count(), 0);
    }

    #[test]
    fn test_overview_empty() {
        let overview =
            BudgetOverview::generate(&[], &[], BudgetScope::AllExpenses, &HealthThresholds::default());
        assert!(overview.rows.is_empty());
        assert!(overview.total_budgeted.is_zero());
        assert_eq!(overview.average_utilization, 0.0);
        assert!(overview.format_terminal("$").contains("No budgets found."));
    }

    #[test]
    fn test_format_terminal_over_budget() {
        let overview = BudgetOverview::generate(
            &[budget(100)],
            &[expense(150)],
            BudgetScope::AllExpenses,
            &HealthThresholds::default(),
        );
        let output = overview.format_terminal("$");
        assert!(output.contains("Over budget: $50.00"));
        assert!(output.contains("Ongoing"));
        assert!(output.contains("Critical"));
    }

    #[test]
    fn test_export_csv() {
        let overview = BudgetOverview::generate(
            &[budget(200)],
            &[expense(50), expense(70)],
            BudgetScope::AllExpenses,
            &HealthThresholds::default(),
        );
        let mut buf = Vec::new();
        overview.export_csv(&mut buf).unwrap();
        let csv = String::from_utf8(buf).unwrap();
        assert!(csv.contains("Monthly,monthly,200.00,120.00,80.00,60.00,On track"));
    }
}

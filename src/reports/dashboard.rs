//! Dashboard summary and recent activity

use serde::Serialize;

use super::monthly::MonthlySeries;
use super::totals::Totals;
use crate::display::report::separator;
use crate::models::{Budget, Category, CategoryIndex, Money, Transaction, TransactionType};

/// Headline figures for the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub totals: Totals,
    /// Sum of every budget's amount
    pub total_budgeted: Money,
    pub savings_rate: f64,
    /// Averages over the windowed monthly series
    pub average_monthly_income: Money,
    pub average_monthly_expenses: Money,
    pub months_considered: usize,
    pub transaction_count: usize,
    pub budget_count: usize,
}

impl DashboardSummary {
    pub fn generate(transactions: &[Transaction], budgets: &[Budget], months_window: usize) -> Self {
        let totals = Totals::compute(transactions);
        let monthly = MonthlySeries::generate(transactions, months_window);

        Self {
            savings_rate: totals.savings_rate(),
            totals,
            total_budgeted: budgets.iter().map(|b| b.amount).sum(),
            average_monthly_income: monthly.average_income(),
            average_monthly_expenses: monthly.average_expenses(),
            months_considered: monthly.rows.len(),
            transaction_count: transactions.len(),
            budget_count: budgets.len(),
        }
    }

    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();
        let line = |label: &str, value: String| format!("{:<26} {:>16}\n", label, value);

        output.push_str("Financial Overview\n");
        output.push_str(&"=".repeat(44));
        output.push('\n');
        output.push_str(&line("Balance", self.totals.balance.format_with_symbol(symbol)));
        output.push_str(&line("Total income", self.totals.income.format_with_symbol(symbol)));
        output.push_str(&line("Total expenses", self.totals.expenses.format_with_symbol(symbol)));
        output.push_str(&line("Total budgeted", self.total_budgeted.format_with_symbol(symbol)));
        output.push_str(&separator(44));
        output.push('\n');
        output.push_str(&line(
            "Avg monthly income",
            self.average_monthly_income.format_with_symbol(symbol),
        ));
        output.push_str(&line(
            "Avg monthly expenses",
            self.average_monthly_expenses.format_with_symbol(symbol),
        ));
        output.push_str(&line("Savings rate", format!("{:.1}%", self.savings_rate)));
        output.push_str(&separator(44));
        output.push('\n');
        output.push_str(&format!(
            "{} transactions, {} budgets, {} months of history\n",
            self.transaction_count, self.budget_count, self.months_considered
        ));

        output
    }
}

/// A transaction with its category name resolved
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentEntry {
    pub transaction: Transaction,
    /// `None` when the category is missing or unknown
    pub category_name: Option<String>,
}

/// Most recent transactions, newest first
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RecentTransactions {
    pub entries: Vec<RecentEntry>,
}

/// Search and type filter for transaction listings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Case-insensitive substring of the description or the category name
    pub search: Option<String>,
    /// `None` matches both types
    pub kind: Option<TransactionType>,
}

impl TransactionFilter {
    pub fn new(search: Option<String>, kind: Option<TransactionType>) -> Self {
        Self { search, kind }
    }

    /// Both conditions must hold; an empty search matches everything
    pub fn matches(&self, txn: &Transaction, category_name: Option<&str>) -> bool {
        if self.kind.is_some_and(|kind| kind != txn.transaction_type) {
            return false;
        }

        let needle = match self.search.as_deref() {
            Some(s) if !s.is_empty() => s.to_lowercase(),
            _ => return true,
        };
        let contains = |text: Option<&str>| text.is_some_and(|t| t.to_lowercase().contains(&needle));

        contains(txn.description.as_deref()) || contains(category_name)
    }
}

impl RecentTransactions {
    /// Take the `limit` most recent transactions; ties on date keep input order
    pub fn generate(transactions: &[Transaction], categories: &[Category], limit: usize) -> Self {
        Self::generate_filtered(transactions, categories, &TransactionFilter::default(), limit)
    }

    /// Like [`RecentTransactions::generate`], keeping only transactions that
    /// pass `filter`
    pub fn generate_filtered(
        transactions: &[Transaction],
        categories: &[Category],
        filter: &TransactionFilter,
        limit: usize,
    ) -> Self {
        let index = CategoryIndex::new(categories);
        let mut sorted: Vec<&Transaction> = transactions.iter().collect();
        sorted.sort_by(|a, b| b.transaction_date.cmp(&a.transaction_date));

        let entries = sorted
            .into_iter()
            .map(|txn| (txn, index.name(txn.category_id)))
            .filter(|(txn, name)| filter.matches(txn, *name))
            .take(limit)
            .map(|(txn, name)| RecentEntry {
                transaction: txn.clone(),
                category_name: name.map(str::to_string),
            })
            .collect();

        Self { entries }
    }

    pub fn format_terminal(&self, symbol: &str) -> String {
        if self.entries.is_empty() {
            return "No transactions found.\n".to_string();
        }

        let mut output = String::new();
        output.push_str(&format!(
            "{:<13} {:<28} {:<16} {:>14}\n",
            "Date", "Description", "Category", "Amount"
        ));
        output.push_str(&separator(74));
        output.push('\n');

        for entry in &self.entries {
            let txn = &entry.transaction;
            let sign = if txn.is_income() { "+" } else { "-" };
            output.push_str(&format!(
                "{:<13} {:<28} {:<16} {:>14}\n",
                txn.transaction_date.format("%b %-d, %Y"),
                txn.description.as_deref().unwrap_or("Transaction"),
                entry.category_name.as_deref().unwrap_or(""),
                format!("{}{}", sign, txn.amount.format_with_symbol(symbol))
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetPeriod, CategoryKind};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_summary() {
        let ledger = vec![
            Transaction::income(Money::from_units(1000), date(2024, 1, 1)),
            Transaction::expense(Money::from_units(400), date(2024, 1, 15)),
            Transaction::income(Money::from_units(1000), date(2024, 2, 1)),
            Transaction::expense(Money::from_units(600), date(2024, 2, 15)),
        ];
        let budgets = vec![
            Budget::new("A", Money::from_units(300), BudgetPeriod::Monthly, date(2024, 1, 1)),
            Budget::new("B", Money::from_units(200), BudgetPeriod::Weekly, date(2024, 1, 1)),
        ];
        let summary = DashboardSummary::generate(&ledger, &budgets, 6);

        assert_eq!(summary.totals.balance, Money::from_units(1000));
        assert_eq!(summary.total_budgeted, Money::from_units(500));
        assert_eq!(summary.savings_rate, 50.0);
        assert_eq!(summary.average_monthly_income, Money::from_units(1000));
        assert_eq!(summary.average_monthly_expenses, Money::from_units(500));
        assert_eq!(summary.months_considered, 2);
        assert_eq!(summary.budget_count, 2);
    }

    #[test]
    fn test_summary_empty() {
        let summary = DashboardSummary::generate(&[], &[], 6);
        assert_eq!(summary.totals, Totals::default());
        assert!(summary.total_budgeted.is_zero());
        assert_eq!(summary.savings_rate, 0.0);
        assert!(summary.average_monthly_income.is_zero());
        assert_eq!(summary.months_considered, 0);
    }

    #[test]
    fn test_recent_newest_first_with_limit() {
        let food = Category::new("Food", CategoryKind::Expense);
        let ledger = vec![
            Transaction::expense(Money::from_units(1), date(2024, 1, 1)).with_description("old"),
            Transaction::expense(Money::from_units(2), date(2024, 3, 1))
                .with_category(food.id)
                .with_description("newest"),
            Transaction::expense(Money::from_units(3), date(2024, 2, 1)).with_description("middle"),
        ];
        let recent = RecentTransactions::generate(&ledger, std::slice::from_ref(&food), 2);

        assert_eq!(recent.entries.len(), 2);
        assert_eq!(recent.entries[0].transaction.description.as_deref(), Some("newest"));
        assert_eq!(recent.entries[0].category_name.as_deref(), Some("Food"));
        assert_eq!(recent.entries[1].transaction.description.as_deref(), Some("middle"));
        assert!(recent.entries[1].category_name.is_none());
    }

    #[test]
    fn test_recent_ties_keep_input_order() {
        let d = date(2024, 1, 1);
        let ledger = vec![
            Transaction::expense(Money::from_units(1), d).with_description("first"),
            Transaction::expense(Money::from_units(2), d).with_description("second"),
        ];
        let recent = RecentTransactions::generate(&ledger, &[], 10);
        assert_eq!(recent.entries[0].transaction.description.as_deref(), Some("first"));
    }

    #[test]
    fn test_recent_empty() {
        let recent = RecentTransactions::generate(&[], &[], 10);
        assert!(recent.entries.is_empty());
        assert_eq!(recent.format_terminal("$"), "No transactions found.\n");
    }

    fn searchable_ledger(food: &Category) -> Vec<Transaction> {
        vec![
            Transaction::expense(Money::from_units(12), date(2024, 1, 3))
                .with_category(food.id)
                .with_description("Corner shop"),
            Transaction::expense(Money::from_units(30), date(2024, 1, 4))
                .with_description("Weekly GROCERIES run"),
            Transaction::income(Money::from_units(900), date(2024, 1, 5))
                .with_description("Salary for groceries fund"),
            Transaction::expense(Money::from_units(5), date(2024, 1, 6)),
        ]
    }

    fn descriptions(recent: &RecentTransactions) -> Vec<Option<&str>> {
        recent
            .entries
            .iter()
            .map(|e| e.transaction.description.as_deref())
            .collect()
    }

    #[test]
    fn test_filter_matches_description_case_insensitively() {
        let food = Category::new("Food", CategoryKind::Expense);
        let ledger = searchable_ledger(&food);
        let filter = TransactionFilter::new(Some("Groceries".into()), None);

        let recent = RecentTransactions::generate_filtered(
            &ledger,
            std::slice::from_ref(&food),
            &filter,
            10,
        );
        assert_eq!(
            descriptions(&recent),
            vec![Some("Salary for groceries fund"), Some("Weekly GROCERIES run")]
        );
    }

    #[test]
    fn test_filter_matches_category_name() {
        let food = Category::new("Food", CategoryKind::Expense);
        let ledger = searchable_ledger(&food);
        let filter = TransactionFilter::new(Some("fOO".into()), None);

        let recent = RecentTransactions::generate_filtered(
            &ledger,
            std::slice::from_ref(&food),
            &filter,
            10,
        );
        assert_eq!(descriptions(&recent), vec![Some("Corner shop")]);
        assert_eq!(recent.entries[0].category_name.as_deref(), Some("Food"));
    }

    #[test]
    fn test_filter_by_type_and_search() {
        let food = Category::new("Food", CategoryKind::Expense);
        let ledger = searchable_ledger(&food);
        let cats = std::slice::from_ref(&food);

        let expenses = TransactionFilter::new(None, Some(TransactionType::Expense));
        let recent = RecentTransactions::generate_filtered(&ledger, cats, &expenses, 10);
        assert_eq!(recent.entries.len(), 3);
        assert!(recent.entries.iter().all(|e| e.transaction.is_expense()));

        let both = TransactionFilter::new(Some("groceries".into()), Some(TransactionType::Income));
        let recent = RecentTransactions::generate_filtered(&ledger, cats, &both, 10);
        assert_eq!(descriptions(&recent), vec![Some("Salary for groceries fund")]);
    }

    #[test]
    fn test_empty_filter_matches_everything_and_limit_applies_after() {
        let food = Category::new("Food", CategoryKind::Expense);
        let ledger = searchable_ledger(&food);
        let cats = std::slice::from_ref(&food);

        let empty = TransactionFilter::new(Some(String::new()), None);
        assert_eq!(
            RecentTransactions::generate_filtered(&ledger, cats, &empty, 10).entries.len(),
            4
        );

        let expenses = TransactionFilter::new(None, Some(TransactionType::Expense));
        let recent = RecentTransactions::generate_filtered(&ledger, cats, &expenses, 2);
        assert_eq!(descriptions(&recent), vec![None, Some("Weekly GROCERIES run")]);
    }

    #[test]
    fn test_summary_format_terminal() {
        let ledger = vec![Transaction::income(Money::from_cents(123456), date(2024, 1, 1))];
        let output = DashboardSummary::generate(&ledger, &[], 6).format_terminal("$");
        assert!(output.contains("$1,234.56"));
        assert!(output.contains("100.0%"));
    }
}

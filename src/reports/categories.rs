//! Expense breakdown by category
//!
//! Every expense lands in exactly one bucket, keyed by the resolved category
//! name. Missing or unknown category references go to "Other".

use serde::Serialize;
use std::collections::HashMap;
use std::io::Write;

use crate::display::report::{format_bar, format_percentage, separator};
use crate::error::FintrackResult;
use crate::models::{Category, CategoryIndex, Money, Transaction};

/// Spending in one category bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category_name: String,
    pub total: Money,
    /// Number of expense transactions in the bucket
    pub count: usize,
    /// Share of all expenses
    pub percentage: f64,
}

/// Expense totals per category
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CategoryBreakdown {
    /// Sorted by total, largest first, then by name
    pub rows: Vec<CategoryTotal>,
    /// Sum of all rows
    pub total_expenses: Money,
    pub transaction_count: usize,
}

impl CategoryBreakdown {
    pub fn generate(transactions: &[Transaction], categories: &[Category]) -> Self {
        let index = CategoryIndex::new(categories);
        let mut buckets: HashMap<&str, (Money, usize)> = HashMap::new();
        let mut total_expenses = Money::zero();
        let mut transaction_count = 0;

        for txn in transactions.iter().filter(|t| t.is_expense()) {
            let bucket = buckets
                .entry(index.name_or_other(txn.category_id))
                .or_insert((Money::zero(), 0));
            bucket.0 += txn.amount;
            bucket.1 += 1;
            total_expenses += txn.amount;
            transaction_count += 1;
        }

        let mut rows: Vec<CategoryTotal> = buckets
            .into_iter()
            .map(|(name, (total, count))| CategoryTotal {
                category_name: name.to_string(),
                total,
                count,
                percentage: total.percent_of(total_expenses),
            })
            .collect();

        rows.sort_by(|a, b| {
            b.total
                .cmp(&a.total)
                .then_with(|| a.category_name.cmp(&b.category_name))
        });

        Self {
            rows,
            total_expenses,
            transaction_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Look up a bucket by name
    pub fn get(&self, category_name: &str) -> Option<&CategoryTotal> {
        self.rows.iter().find(|r| r.category_name == category_name)
    }

    /// Keep only the `limit` largest buckets
    ///
    /// `total_expenses` and percentages still refer to every expense.
    pub fn retain_top(&mut self, limit: usize) {
        self.rows.truncate(limit);
    }

    /// Format the breakdown for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str("Spending by Category\n");
        output.push_str(&"=".repeat(72));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("No expenses found.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<28} {:>14} {:>6} {:>7}  {}\n",
            "Category", "Amount", "Count", "%", ""
        ));
        output.push_str(&separator(72));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!(
                "{:<28} {:>14} {:>6} {:>7}  {}\n",
                truncate(&row.category_name, 28),
                row.total.format_with_symbol(symbol),
                row.count,
                format_percentage(row.percentage),
                format_bar(row.percentage, 100.0, 10)
            ));
        }

        output.push_str(&separator(72));
        output.push('\n');
        output.push_str(&format!(
            "{:<28} {:>14} {:>6}\n",
            "TOTAL SPENDING",
            self.total_expenses.format_with_symbol(symbol),
            self.transaction_count
        ));

        output
    }

    /// Export the breakdown to CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> FintrackResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Category", "Amount", "Transaction Count", "Percentage"])?;

        for row in &self.rows {
            csv.write_record([
                row.category_name.clone(),
                format!("{:.2}", row.total.as_f64()),
                row.count.to_string(),
                format!("{:.2}", row.percentage),
            ])?;
        }

        csv.flush()?;
        Ok(())
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

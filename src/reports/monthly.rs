//! Monthly income/expense series
//!
//! Groups the ledger by calendar month of each transaction's date and keeps
//! the most recent months present in the data.

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;

use crate::display::report::{format_bar, separator};
use crate::error::FintrackResult;
use crate::models::{Money, Transaction, TransactionType};

/// A calendar month; ordering is chronological
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Short label such as `Jan 2024`
    pub fn label(&self) -> String {
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(first) => first.format("%b %Y").to_string(),
            None => format!("{:04}-{:02}", self.year, self.month),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{:04}-{:02}", self.year, self.month))
    }
}

/// Totals for one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyRow {
    pub month: MonthKey,
    pub month_label: String,
    pub income: Money,
    pub expenses: Money,
    pub net: Money,
}

/// Chronologically ascending monthly series
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MonthlySeries {
    pub rows: Vec<MonthlyRow>,
}

#[derive(Default)]
struct MonthAccumulator {
    income: Money,
    expenses: Money,
}

impl MonthlySeries {
    /// Build the series for the last `months_window` months present in the
    /// ledger
    ///
    /// Grouping uses the transaction's calendar date as-is; there is no
    /// timezone conversion that could move a transaction across a month
    /// boundary.
    pub fn generate(transactions: &[Transaction], months_window: usize) -> Self {
        let mut by_month: BTreeMap<MonthKey, MonthAccumulator> = BTreeMap::new();

        for txn in transactions {
            let acc = by_month.entry(MonthKey::of(txn.transaction_date)).or_default();
            match txn.transaction_type {
                TransactionType::Income => acc.income += txn.amount,
                TransactionType::Expense => acc.expenses += txn.amount,
            }
        }

        let skip = by_month.len().saturating_sub(months_window);
        let rows = by_month
            .into_iter()
            .skip(skip)
            .map(|(month, acc)| MonthlyRow {
                month,
                month_label: month.label(),
                income: acc.income,
                expenses: acc.expenses,
                net: acc.income - acc.expenses,
            })
            .collect();

        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Mean monthly income over the series, zero when empty
    pub fn average_income(&self) -> Money {
        self.average(|row| row.income)
    }

    /// Mean monthly expenses over the series, zero when empty
    pub fn average_expenses(&self) -> Money {
        self.average(|row| row.expenses)
    }

    fn average(&self, field: impl Fn(&MonthlyRow) -> Money) -> Money {
        if self.rows.is_empty() {
            return Money::zero();
        }
        let total: Money = self.rows.iter().map(field).sum();
        let count = self.rows.len() as f64;
        Money::from_cents((total.cents() as f64 / count).round() as i64)
    }

    /// Format the series for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str("Monthly Income vs Expenses\n");
        output.push_str(&"=".repeat(72));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("No transactions found.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<10} {:>14} {:>14} {:>14}  {}\n",
            "Month", "Income", "Expenses", "Net", "Spent"
        ));
        output.push_str(&separator(72));
        output.push('\n');

        let max_expenses = self
            .rows
            .iter()
            .map(|r| r.expenses.as_f64())
            .fold(0.0, f64::max);

        for row in &self.rows {
            output.push_str(&format!(
                "{:<10} {:>14} {:>14} {:>14}  {}\n",
                row.month_label,
                row.income.format_with_symbol(symbol),
                row.expenses.format_with_symbol(symbol),
                row.net.format_with_symbol(symbol),
                format_bar(row.expenses.as_f64(), max_expenses, 12)
            ));
        }

        output.push_str(&separator(72));
        output.push('\n');
        output.push_str(&format!(
            "{:<10} {:>14} {:>14}\n",
            "Average",
            self.average_income().format_with_symbol(symbol),
            self.average_expenses().format_with_symbol(symbol)
        ));

        output
    }

    /// Export the series to CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> FintrackResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Month", "Income", "Expenses", "Net"])?;

        for row in &self.rows {
            csv.write_record([
                row.month_label.clone(),
                format!("{:.2}", row.income.as_f64()),
                format!("{:.2}", row.expenses.as_f64()),
                format!("{:.2}", row.net.as_f64()),
            ])?;
        }

        csv.flush()?;
        Ok(())
    }
}

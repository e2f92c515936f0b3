//! Recent running-balance trend
//!
//! Daily income/expense totals over a trailing window, with a running balance
//! accumulated in date order.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::display::report::separator;
use crate::models::{Money, Transaction, TransactionType};

/// Where the running balance starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TrendSeed {
    /// Start at zero: the trend shows only net flow inside the window
    #[default]
    Zero,
    /// Start at the net of everything dated before the window
    AllTime,
}

impl fmt::Display for TrendSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zero => write!(f, "zero"),
            Self::AllTime => write!(f, "all-time"),
        }
    }
}

impl FromStr for TrendSeed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "zero" => Ok(Self::Zero),
            "all-time" | "alltime" | "all_time" => Ok(Self::AllTime),
            other => Err(format!("Unknown trend seed: {}", other)),
        }
    }
}

/// Window parameters for [`BalanceTrend::generate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendWindow {
    /// Reference date, normally today
    pub today: NaiveDate,
    /// Transactions dated on or after `today - days` are included
    pub days: u32,
    /// Keep at most this many of the most recent points
    pub max_points: usize,
    pub seed: TrendSeed,
}

impl TrendWindow {
    /// First date inside the window
    ///
    /// A window reaching past the earliest representable date covers
    /// everything.
    pub fn cutoff(&self) -> NaiveDate {
        self.today
            .checked_sub_signed(Duration::days(i64::from(self.days)))
            .unwrap_or(NaiveDate::MIN)
    }
}

/// One day in the trend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub income: Money,
    pub expenses: Money,
    /// Running balance up to and including `date`
    pub balance: Money,
}

/// Running balance over the trailing window
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BalanceTrend {
    /// Ascending by date
    pub points: Vec<TrendPoint>,
    /// Balance the running total started from
    pub opening_balance: Money,
    /// Net flow over every day in the window, including days dropped by
    /// `max_points`
    pub window_net: Money,
}

impl BalanceTrend {
    pub fn generate(transactions: &[Transaction], window: TrendWindow) -> Self {
        let cutoff = window.cutoff();
        let mut by_day: BTreeMap<NaiveDate, (Money, Money)> = BTreeMap::new();
        let mut before_window = Money::zero();

        for txn in transactions {
            if txn.transaction_date < cutoff {
                before_window += txn.signed_amount();
                continue;
            }
            let day = by_day
                .entry(txn.transaction_date)
                .or_insert((Money::zero(), Money::zero()));
            match txn.transaction_type {
                TransactionType::Income => day.0 += txn.amount,
                TransactionType::Expense => day.1 += txn.amount,
            }
        }

        let opening_balance = match window.seed {
            TrendSeed::Zero => Money::zero(),
            TrendSeed::AllTime => before_window,
        };

        let mut running = opening_balance;
        let mut points: Vec<TrendPoint> = by_day
            .into_iter()
            .map(|(date, (income, expenses))| {
                running += income - expenses;
                TrendPoint {
                    date,
                    income,
                    expenses,
                    balance: running,
                }
            })
            .collect();

        let window_net = running - opening_balance;

        let excess = points.len().saturating_sub(window.max_points);
        points.drain(..excess);

        tracing::debug!(
            cutoff = %cutoff,
            points = points.len(),
            dropped = excess,
            seed = %window.seed,
            "built balance trend"
        );

        Self {
            points,
            opening_balance,
            window_net,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Balance at the last point, or the opening balance when empty
    pub fn closing_balance(&self) -> Money {
        self.points
            .last()
            .map(|p| p.balance)
            .unwrap_or(self.opening_balance)
    }

    /// Format the trend for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str("Daily Balance Trend\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if self.points.is_empty() {
            output.push_str("No transactions in the selected window.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<12} {:>14} {:>14} {:>14}\n",
            "Date", "Income", "Expenses", "Balance"
        ));
        output.push_str(&separator(60));
        output.push('\n');

        for point in &self.points {
            output.push_str(&format!(
                "{:<12} {:>14} {:>14} {:>14}\n",
                point.date.format("%b %-d"),
                point.income.format_with_symbol(symbol),
                point.expenses.format_with_symbol(symbol),
                point.balance.format_with_symbol(symbol)
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn window(today: NaiveDate, days: u32, max_points: usize, seed: TrendSeed) -> TrendWindow {
        TrendWindow {
            today,
            days,
            max_points,
            seed,
        }
    }

    fn income(units: i64, d: NaiveDate) -> Transaction {
        Transaction::income(Money::from_units(units), d)
    }

    fn expense(units: i64, d: NaiveDate) -> Transaction {
        Transaction::expense(Money::from_units(units), d)
    }

    #[test]
    fn test_empty_ledger() {
        let trend = BalanceTrend::generate(&[], window(date(2024, 3, 1), 30, 14, TrendSeed::Zero));
        assert!(trend.is_empty());
        assert_eq!(trend.closing_balance(), Money::zero());
    }

    #[test]
    fn test_groups_by_day_and_accumulates() {
        let today = date(2024, 3, 31);
        let ledger = vec![
            expense(20, date(2024, 3, 20)),
            income(100, date(2024, 3, 10)),
            expense(5, date(2024, 3, 10)),
            expense(10, date(2024, 3, 20)),
        ];
        let trend = BalanceTrend::generate(&ledger, window(today, 30, 14, TrendSeed::Zero));

        assert_eq!(trend.points.len(), 2);
        assert_eq!(trend.points[0].date, date(2024, 3, 10));
        assert_eq!(trend.points[0].income, Money::from_units(100));
        assert_eq!(trend.points[0].expenses, Money::from_units(5));
        assert_eq!(trend.points[0].balance, Money::from_units(95));
        assert_eq!(trend.points[1].expenses, Money::from_units(30));
        assert_eq!(trend.points[1].balance, Money::from_units(65));
    }

    #[test]
    fn test_cutoff_is_inclusive() {
        let today = date(2024, 3, 31);
        let ledger = vec![
            income(1, date(2024, 3, 1)), // exactly 30 days before
            income(1, date(2024, 2, 29)), // 31 days before
        ];
        let trend = BalanceTrend::generate(&ledger, window(today, 30, 14, TrendSeed::Zero));
        assert_eq!(trend.points.len(), 1);
        assert_eq!(trend.points[0].date, date(2024, 3, 1));
    }

    #[test]
    fn test_last_balance_equals_window_net_with_zero_seed() {
        let today = date(2024, 6, 30);
        let ledger = vec![
            income(300, date(2024, 6, 1)),
            expense(45, date(2024, 6, 2)),
            expense(12, date(2024, 6, 15)),
            income(20, date(2024, 6, 29)),
            expense(999, date(2024, 1, 1)),
        ];
        let trend = BalanceTrend::generate(&ledger, window(today, 30, 14, TrendSeed::Zero));

        let included: Money = trend.points.iter().map(|p| p.income - p.expenses).sum();
        assert_eq!(trend.closing_balance(), included);
        assert_eq!(trend.closing_balance(), Money::from_units(263));
        assert_eq!(trend.window_net, included);
        assert!(trend.opening_balance.is_zero());
    }

    #[test]
    fn test_truncation_keeps_most_recent_points() {
        let today = date(2024, 1, 31);
        let ledger: Vec<_> = (1..=20).map(|d| income(1, date(2024, 1, d))).collect();
        let trend = BalanceTrend::generate(&ledger, window(today, 30, 14, TrendSeed::Zero));

        assert_eq!(trend.points.len(), 14);
        assert_eq!(trend.points[0].date, date(2024, 1, 7));
        assert_eq!(trend.points[13].date, date(2024, 1, 20));
        // Running balance is computed before truncation
        assert_eq!(trend.points[0].balance, Money::from_units(7));
        assert_eq!(trend.closing_balance(), Money::from_units(20));
        assert_eq!(trend.window_net, Money::from_units(20));
    }

    #[test]
    fn test_all_time_seed_carries_prior_balance() {
        let today = date(2024, 3, 31);
        let ledger = vec![
            income(1000, date(2023, 12, 1)),
            expense(200, date(2024, 1, 15)),
            expense(50, date(2024, 3, 20)),
        ];
        let trend = BalanceTrend::generate(&ledger, window(today, 30, 14, TrendSeed::AllTime));

        assert_eq!(trend.opening_balance, Money::from_units(800));
        assert_eq!(trend.points.len(), 1);
        assert_eq!(trend.points[0].balance, Money::from_units(750));
        assert_eq!(trend.window_net, Money::from_units(-50));
    }

    #[test]
    fn test_zero_seed_ignores_prior_balance() {
        let today = date(2024, 3, 31);
        let ledger = vec![income(1000, date(2023, 12, 1)), expense(50, date(2024, 3, 20))];
        let trend = BalanceTrend::generate(&ledger, window(today, 30, 14, TrendSeed::Zero));
        assert_eq!(trend.points[0].balance, Money::from_units(-50));
    }

    #[test]
    fn test_max_points_zero() {
        let today = date(2024, 3, 31);
        let ledger = vec![income(10, date(2024, 3, 30))];
        let trend = BalanceTrend::generate(&ledger, window(today, 30, 0, TrendSeed::Zero));
        assert!(trend.is_empty());
        assert_eq!(trend.window_net, Money::from_units(10));
    }

    #[test]
    fn test_huge_window_covers_everything() {
        let today = date(2024, 3, 31);
        let ledger = vec![
            income(500, date(1900, 1, 1)),
            expense(20, date(2024, 3, 30)),
        ];
        let huge = window(today, u32::MAX, 14, TrendSeed::AllTime);
        assert_eq!(huge.cutoff(), NaiveDate::MIN);

        let trend = BalanceTrend::generate(&ledger, huge);
        assert_eq!(trend.points.len(), 2);
        assert!(trend.opening_balance.is_zero());
        assert_eq!(trend.closing_balance(), Money::from_units(480));
    }

    #[test]
    fn test_window_near_date_limits() {
        let trend = BalanceTrend::generate(
            &[income(1, NaiveDate::MIN)],
            window(NaiveDate::MIN, 30, 14, TrendSeed::Zero),
        );
        assert_eq!(trend.points.len(), 1);
    }

    #[test]
    fn test_large_amounts_saturate() {
        let today = date(2024, 3, 31);
        let ledger = vec![
            Transaction::income(Money::from_cents(i64::MAX), date(2024, 3, 29)),
            Transaction::income(Money::from_cents(i64::MAX), date(2024, 3, 30)),
        ];
        let trend = BalanceTrend::generate(&ledger, window(today, 30, 14, TrendSeed::Zero));
        assert_eq!(trend.closing_balance(), Money::from_cents(i64::MAX));
    }

    #[test]
    fn test_seed_parsing() {
        assert_eq!("zero".parse::<TrendSeed>().unwrap(), TrendSeed::Zero);
        assert_eq!("all-time".parse::<TrendSeed>().unwrap(), TrendSeed::AllTime);
        assert!("yesterday".parse::<TrendSeed>().is_err());
    }
}

//! Ledger totals
//!
//! Income, expenses and net balance over a slice of transactions, plus the
//! savings rate derived from them.

use serde::Serialize;

use crate::models::{Money, Transaction, TransactionType};

/// Income/expense totals of a ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    pub income: Money,
    pub expenses: Money,
    /// `income - expenses`
    pub balance: Money,
}

impl Totals {
    /// Sum a ledger in one pass
    ///
    /// Each transaction lands in exactly one of the two sums, so the result
    /// does not depend on input order.
    pub fn compute(transactions: &[Transaction]) -> Self {
        let mut income = Money::zero();
        let mut expenses = Money::zero();

        for txn in transactions {
            match txn.transaction_type {
                TransactionType::Income => income += txn.amount,
                TransactionType::Expense => expenses += txn.amount,
            }
        }

        Self {
            income,
            expenses,
            balance: income - expenses,
        }
    }

    pub fn savings_rate(&self) -> f64 {
        savings_rate(self.income, self.balance)
    }
}

/// Share of income that was kept, as a percentage
///
/// `0.0` when there is no income. Negative when spending exceeded income.
pub fn savings_rate(total_income: Money, net_balance: Money) -> f64 {
    if total_income.is_positive() {
        net_balance.percent_of(total_income)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_ledger() {
        let totals = Totals::compute(&[]);
        assert_eq!(totals, Totals::default());
        assert!(totals.income.is_zero());
        assert!(totals.expenses.is_zero());
        assert!(totals.balance.is_zero());
        assert_eq!(totals.savings_rate(), 0.0);
    }

    #[test]
    fn test_income_and_expense() {
        let ledger = vec![
            Transaction::income(Money::from_units(100), date(2024, 1, 5)),
            Transaction::expense(Money::from_units(40), date(2024, 1, 10)),
        ];
        let totals = Totals::compute(&ledger);
        assert_eq!(totals.income, Money::from_units(100));
        assert_eq!(totals.expenses, Money::from_units(40));
        assert_eq!(totals.balance, Money::from_units(60));
    }

    #[test]
    fn test_balance_identity_and_order_independence() {
        let mut ledger = vec![
            Transaction::expense(Money::from_cents(1999), date(2024, 2, 1)),
            Transaction::income(Money::from_cents(250000), date(2024, 2, 1)),
            Transaction::expense(Money::from_cents(4550), date(2024, 1, 3)),
            Transaction::expense(Money::from_cents(1), date(2023, 12, 31)),
        ];
        let forward = Totals::compute(&ledger);
        ledger.reverse();
        let backward = Totals::compute(&ledger);

        assert_eq!(forward, backward);
        assert_eq!(forward.balance, forward.income - forward.expenses);
        assert_eq!(forward.expenses.cents(), 1999 + 4550 + 1);
    }

    #[test]
    fn test_overspending_gives_negative_balance() {
        let ledger = vec![
            Transaction::income(Money::from_units(50), date(2024, 1, 1)),
            Transaction::expense(Money::from_units(80), date(2024, 1, 2)),
        ];
        let totals = Totals::compute(&ledger);
        assert_eq!(totals.balance, Money::from_units(-30));
        assert_eq!(totals.savings_rate(), -60.0);
    }

    #[test]
    fn test_many_maximum_records_do_not_overflow() {
        let ledger: Vec<_> = (0..200_000)
            .map(|_| Transaction::income(Money::MAX_RECORD, date(2024, 1, 1)))
            .collect();
        let totals = Totals::compute(&ledger);
        assert_eq!(totals.income, Money::from_cents(i64::MAX));
        assert_eq!(totals.balance, totals.income);
        assert!(totals.savings_rate().is_finite());
    }

    #[test]
    fn test_savings_rate() {
        assert_eq!(savings_rate(Money::from_units(100), Money::from_units(60)), 60.0);
        assert_eq!(savings_rate(Money::zero(), Money::from_units(-40)), 0.0);
        assert_eq!(savings_rate(Money::zero(), Money::zero()), 0.0);
    }
}

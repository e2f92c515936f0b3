//! Budget model
//!
//! A budget caps spending either for one category or, when no category is
//! set, for a scope chosen by [`BudgetScope`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, CategoryId};
use super::money::Money;
use super::period::BudgetPeriod;
use super::transaction::Transaction;

/// Which expenses count against a budget that has no category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BudgetScope {
    /// Every expense counts (an "overall" budget)
    #[default]
    AllExpenses,
    /// Only expenses without a category reference count
    UncategorizedOnly,
}

impl fmt::Display for BudgetScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllExpenses => write!(f, "all-expenses"),
            Self::UncategorizedOnly => write!(f, "uncategorized-only"),
        }
    }
}

/// A spending cap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,

    pub name: String,

    /// Cap for one period
    pub amount: Money,

    #[serde(default)]
    pub period: BudgetPeriod,

    /// Category this budget is limited to
    #[serde(default)]
    pub category_id: Option<CategoryId>,

    pub start_date: NaiveDate,

    /// `None` means ongoing
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl Budget {
    pub fn new(
        name: impl Into<String>,
        amount: Money,
        period: BudgetPeriod,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: BudgetId::new(),
            name: name.into(),
            amount,
            period,
            category_id: None,
            start_date,
            end_date: None,
        }
    }

    pub fn for_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn ending(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Whether `txn` counts against this budget
    ///
    /// Income never counts. With a category set, only expenses in exactly
    /// that category count; otherwise `scope` decides.
    pub fn applies_to(&self, txn: &Transaction, scope: BudgetScope) -> bool {
        if !txn.is_expense() {
            return false;
        }
        match (self.category_id, scope) {
            (Some(category_id), _) => txn.category_id == Some(category_id),
            (None, BudgetScope::AllExpenses) => true,
            (None, BudgetScope::UncategorizedOnly) => txn.category_id.is_none(),
        }
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.name.trim().is_empty() {
            return Err(BudgetValidationError::EmptyName);
        }

        if self.amount.is_negative() {
            return Err(BudgetValidationError::NegativeAmount(self.amount));
        }

        if self.amount > Money::MAX_RECORD {
            return Err(BudgetValidationError::AmountTooLarge(self.amount));
        }

        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(BudgetValidationError::EndBeforeStart {
                    start: self.start_date,
                    end,
                });
            }
        }

        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.name, self.amount, self.period)
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    EmptyName,
    NegativeAmount(Money),
    AmountTooLarge(Money),
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Budget name cannot be empty"),
            Self::NegativeAmount(amount) => {
                write!(f, "Budget amount cannot be negative ({})", amount)
            }
            Self::AmountTooLarge(amount) => write!(
                f,
                "Budget amount {} exceeds the maximum of {}",
                amount,
                Money::MAX_RECORD
            ),
            Self::EndBeforeStart { start, end } => {
                write!(f, "Budget end date {} is before start date {}", end, start)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}

//! Ledger snapshots and the source that supplies them
//!
//! The reports never fetch anything themselves. A [`LedgerSource`] hands over
//! one [`LedgerSnapshot`]; the caller passes its slices into the reports.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{FintrackError, FintrackResult};
use crate::models::{Budget, Category, CategoryId, CategoryKind, Transaction};

/// One consistent copy of everything the reports read
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
}

impl LedgerSnapshot {
    pub fn new(
        transactions: Vec<Transaction>,
        categories: Vec<Category>,
        budgets: Vec<Budget>,
    ) -> Self {
        Self {
            transactions,
            categories,
            budgets,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty() && self.categories.is_empty() && self.budgets.is_empty()
    }

    /// Check every record before the reports see it
    ///
    /// Structural problems (negative amounts, empty names, inverted date
    /// ranges) are errors. A transaction filed under a category meant for the
    /// other direction is only logged.
    pub fn validate(&self) -> FintrackResult<()> {
        for category in &self.categories {
            category.validate().map_err(|e| {
                FintrackError::Validation(format!("category {}: {}", category.id.short(), e))
            })?;
        }

        for budget in &self.budgets {
            budget.validate().map_err(|e| {
                FintrackError::Validation(format!("budget '{}': {}", budget.name, e))
            })?;
        }

        let kinds: HashMap<CategoryId, CategoryKind> =
            self.categories.iter().map(|c| (c.id, c.kind)).collect();

        for txn in &self.transactions {
            txn.validate().map_err(|e| {
                FintrackError::Validation(format!("transaction {}: {}", txn.id.short(), e))
            })?;

            let kind = txn.category_id.and_then(|id| kinds.get(&id));
            if let Some(kind) = kind {
                if !kind.accepts(txn.transaction_type) {
                    tracing::warn!(
                        transaction = %txn.id.short(),
                        category_kind = %kind,
                        transaction_type = %txn.transaction_type,
                        "transaction filed under a category of the other type"
                    );
                }
            }
        }

        Ok(())
    }
}

/// Supplies ledger snapshots to the reports
///
/// Implementations own all fetching, parsing and validation.
pub trait LedgerSource {
    fn load(&self) -> FintrackResult<LedgerSnapshot>;
}

impl LedgerSource for LedgerSnapshot {
    fn load(&self) -> FintrackResult<LedgerSnapshot> {
        self.validate()?;
        Ok(self.clone())
    }
}

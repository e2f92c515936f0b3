//! Core data models for fintrack
//!
//! Typed records for the ledger: transactions, categories and budgets, plus
//! the exact [`Money`] type every aggregate is computed in.

pub mod budget;
pub mod category;
pub mod ids;
pub mod money;
pub mod period;
pub mod transaction;

pub use budget::{Budget, BudgetScope, BudgetValidationError};
pub use category::{Category, CategoryIndex, CategoryKind, CategoryValidationError, OTHER_CATEGORY};
pub use ids::{BudgetId, CategoryId, TransactionId};
pub use money::{Money, MoneyParseError};
pub use period::BudgetPeriod;
pub use transaction::{Transaction, TransactionType, TransactionValidationError};

//! Transaction model
//!
//! A ledger entry as delivered by the data source. The amount is always
//! non-negative; whether it adds to or subtracts from the balance is carried
//! by [`TransactionType`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, TransactionId};
use super::money::Money;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn is_income(&self) -> bool {
        matches!(self, Self::Income)
    }

    pub fn is_expense(&self) -> bool {
        matches!(self, Self::Expense)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// A single ledger record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Non-negative amount; sign comes from `transaction_type`
    pub amount: Money,

    #[serde(rename = "type")]
    pub transaction_type: TransactionType,

    /// Category reference (may be absent or point at an unknown category)
    #[serde(default)]
    pub category_id: Option<CategoryId>,

    /// Calendar date of the transaction, with no timezone attached
    pub transaction_date: NaiveDate,

    #[serde(default)]
    pub description: Option<String>,
}

impl Transaction {
    /// Create a new transaction with a fresh id
    pub fn new(transaction_type: TransactionType, amount: Money, date: NaiveDate) -> Self {
        Self {
            id: TransactionId::new(),
            amount,
            transaction_type,
            category_id: None,
            transaction_date: date,
            description: None,
        }
    }

    pub fn income(amount: Money, date: NaiveDate) -> Self {
        Self::new(TransactionType::Income, amount, date)
    }

    pub fn expense(amount: Money, date: NaiveDate) -> Self {
        Self::new(TransactionType::Expense, amount, date)
    }

    /// Builder-style category assignment
    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_income(&self) -> bool {
        self.transaction_type.is_income()
    }

    pub fn is_expense(&self) -> bool {
        self.transaction_type.is_expense()
    }

    /// Contribution of this transaction to a balance: `+amount` for income,
    /// `-amount` for expenses
    pub fn signed_amount(&self) -> Money {
        match self.transaction_type {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.amount.is_negative() {
            return Err(TransactionValidationError::NegativeAmount(self.amount));
        }
        if self.amount > Money::MAX_RECORD {
            return Err(TransactionValidationError::AmountTooLarge(self.amount));
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_income() { "+" } else { "-" };
        write!(
            f,
            "{} {} {}{}",
            self.transaction_date.format("%Y-%m-%d"),
            self.description.as_deref().unwrap_or("Transaction"),
            sign,
            self.amount
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NegativeAmount(Money),
    AmountTooLarge(Money),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount(amount) => {
                write!(f, "Transaction amount cannot be negative ({})", amount)
            }
            Self::AmountTooLarge(amount) => write!(
                f,
                "Transaction amount {} exceeds the maximum of {}",
                amount,
                Money::MAX_RECORD
            ),
        }
    }
}

impl std::error::Error for TransactionValidationError {}

//! Category model
//!
//! Categories label transactions for breakdowns and scope budgets. A category
//! declares which transaction types it is meant for.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::ids::CategoryId;
use super::transaction::TransactionType;

/// Name of the synthetic bucket for expenses with no resolvable category
pub const OTHER_CATEGORY: &str = "Other";

/// Maximum length of a category name
pub const MAX_NAME_LEN: usize = 50;

/// Which transaction types a category applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    #[default]
    Expense,
    Both,
}

impl CategoryKind {
    /// Whether a transaction of the given type may use this category
    pub fn accepts(&self, transaction_type: TransactionType) -> bool {
        match self {
            Self::Both => true,
            Self::Income => transaction_type.is_income(),
            Self::Expense => transaction_type.is_expense(),
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
            Self::Both => write!(f, "both"),
        }
    }
}

/// A transaction category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,

    pub name: String,

    #[serde(rename = "type", default)]
    pub kind: CategoryKind,

    /// Display color hint, e.g. `#22c55e`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Category {
    pub fn new(name: impl Into<String>, kind: CategoryKind) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            kind,
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        let len = self.name.chars().count();
        if len > MAX_NAME_LEN {
            return Err(CategoryValidationError::NameTooLong(len));
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Lookup of category names by id, built once per report
#[derive(Debug, Default)]
pub struct CategoryIndex<'a> {
    names: HashMap<CategoryId, &'a str>,
}

impl<'a> CategoryIndex<'a> {
    pub fn new(categories: &'a [Category]) -> Self {
        Self {
            names: categories.iter().map(|c| (c.id, c.name.as_str())).collect(),
        }
    }

    /// Resolve a category reference, `None` when absent or unknown
    pub fn name(&self, id: Option<CategoryId>) -> Option<&'a str> {
        id.and_then(|id| self.names.get(&id).copied())
    }

    /// Resolve a category reference, falling back to [`OTHER_CATEGORY`]
    pub fn name_or_other(&self, id: Option<CategoryId>) -> &'a str {
        self.name(id).unwrap_or(OTHER_CATEGORY)
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => write!(
                f,
                "Category name too long ({} chars, max {})",
                len, MAX_NAME_LEN
            ),
        }
    }
}

impl std::error::Error for CategoryValidationError {}

//! Typed identifiers for ledger records
//!
//! Records arrive from the external data source keyed by UUID. Each entity
//! gets its own newtype so a budget's category reference can never be
//! compared against a transaction id by accident.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident, $tag:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh random id
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Short tagged form used in terminal output, e.g. `cat-550e8400`
            pub fn short(&self) -> String {
                let simple = self.0.simple().to_string();
                format!("{}{}", $tag, &simple[..8])
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            /// Accepts a bare UUID or one carrying the short-form tag
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix($tag).unwrap_or(s);
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

record_id!(
    /// Identifier of a ledger transaction
    TransactionId,
    "txn-"
);
record_id!(
    /// Identifier of a transaction category
    CategoryId,
    "cat-"
);
record_id!(
    /// Identifier of a budget definition
    BudgetId,
    "bud-"
);

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "550e8400-e29b-41d4-a716-446655440000";

    #[test]
    fn test_new_ids_are_unique() {
        assert_ne!(TransactionId::new(), TransactionId::new());
        assert!(!BudgetId::new().as_uuid().is_nil());
    }

    #[test]
    fn test_display_is_full_uuid() {
        let id: CategoryId = RAW.parse().unwrap();
        assert_eq!(id.to_string(), RAW);
    }

    #[test]
    fn test_short_form() {
        let id: BudgetId = RAW.parse().unwrap();
        assert_eq!(id.short(), "bud-550e8400");
    }

    #[test]
    fn test_parse_accepts_tag() {
        let plain: CategoryId = RAW.parse().unwrap();
        let tagged: CategoryId = format!("cat-{}", RAW).parse().unwrap();
        assert_eq!(plain, tagged);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("not-a-uuid".parse::<TransactionId>().is_err());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id: TransactionId = RAW.parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", RAW));
        let back: TransactionId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}

//! Budget recurrence period
//!
//! The period is descriptive metadata on a budget: it tells the reader how
//! often the cap nominally resets. Spending is not filtered by it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Weekly,
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl BudgetPeriod {
    pub fn all() -> &'static [Self] {
        &[Self::Weekly, Self::Monthly, Self::Quarterly, Self::Yearly]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BudgetPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|p| p.as_str() == lower)
            .ok_or_else(|| format!("Unknown budget period: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for period in BudgetPeriod::all() {
            assert_eq!(period.as_str().parse::<BudgetPeriod>().unwrap(), *period);
        }
        assert_eq!("Quarterly".parse::<BudgetPeriod>().unwrap(), BudgetPeriod::Quarterly);
        assert!("fortnightly".parse::<BudgetPeriod>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&BudgetPeriod::Yearly).unwrap();
        assert_eq!(json, "\"yearly\"");
    }
}

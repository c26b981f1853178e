//! Challenge rules: the roster, the daily target and the penalty.
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const DEFAULT_TARGET_STEPS: u64 = 10_000;
pub const DEFAULT_PENALTY_AMOUNT: u64 = 50;
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₱";

pub const DEFAULT_ROSTER: [&str; 16] = [
    "Del", "Giem", "Glaiz", "Jeun", "Joy", "Kokoy", "Leanne", "Lui", "Ramon", "Robert", "Sarah",
    "Sheila", "Shin", "Yohan", "Zephanny", "Sam",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChallengeRules {
    /// Daily step threshold below which a penalty applies
    pub target_steps: u64,
    /// Fixed charge per missed day
    pub penalty_amount: u64,
    pub currency_symbol: String,
    /// Eligible participants, in display order
    pub roster: Vec<String>,
}

impl Default for ChallengeRules {
    fn default() -> Self {
        Self {
            target_steps: DEFAULT_TARGET_STEPS,
            penalty_amount: DEFAULT_PENALTY_AMOUNT,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            roster: DEFAULT_ROSTER.iter().map(|name| name.to_string()).collect(),
        }
    }
}

impl ChallengeRules {
    pub fn validate(&self) -> Result<()> {
        if self.target_steps == 0 {
            bail!("target_steps must be greater than zero");
        }
        if self.roster.is_empty() {
            bail!("roster cannot be empty");
        }

        let mut seen = HashSet::new();
        for name in &self.roster {
            if name.trim().is_empty() {
                bail!("roster names cannot be empty");
            }
            if !seen.insert(name.as_str()) {
                bail!("roster contains '{}' more than once", name);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::submission::SubmissionError;

    #[test]
    fn test_default_rules() {
        let rules = ChallengeRules::default();
        assert_eq!(rules.target_steps, 10_000);
        assert_eq!(rules.penalty_amount, 50);
        assert_eq!(rules.roster.len(), 16);
        assert_eq!(rules.roster[0], "Del");
        assert_eq!(rules.roster[15], "Sam");
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicate_and_blank_names() {
        let rules = ChallengeRules {
            roster: vec!["A".to_string(), "A".to_string()],
            ..ChallengeRules::default()
        };
        let err = rules.validate().unwrap_err();
        assert!(err.to_string().contains("more than once"));
        // Startup problems are not request errors
        assert!(err.downcast_ref::<SubmissionError>().is_none());

        let rules = ChallengeRules {
            roster: vec!["A".to_string(), "  ".to_string()],
            ..ChallengeRules::default()
        };
        assert!(rules.validate().is_err());

        let rules = ChallengeRules {
            target_steps: 0,
            ..ChallengeRules::default()
        };
        assert!(rules.validate().is_err());
    }
}

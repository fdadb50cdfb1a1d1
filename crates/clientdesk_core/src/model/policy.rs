//! Insurance policy value object.
//!
//! # Invariants
//! - `description` is never blank for a stored policy.
//! - `premium` is non-negative by construction (stored in cents).
//! - A person owns at most `MAX_POLICIES` policies.

use super::fields::ValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Upper bound on policies attached to one person.
pub const MAX_POLICIES: usize = 5;

/// Non-negative premium amount in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Premium(u64);

impl Premium {
    pub fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub fn cents(self) -> u64 {
        self.0
    }

    /// Parses a decimal amount such as `1200`, `99.5` or `12.30`.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        let (whole, fraction) = match trimmed.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (trimmed, ""),
        };
        let digits_only = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if whole.is_empty() || !digits_only(whole) || fraction.len() > 2 || !digits_only(fraction)
        {
            return Err(ValidationError::InvalidPremium);
        }
        if trimmed.ends_with('.') {
            return Err(ValidationError::InvalidPremium);
        }

        let whole: u64 = whole.parse().map_err(|_| ValidationError::InvalidPremium)?;
        let fraction_cents = match fraction.len() {
            0 => 0,
            1 => u64::from(fraction.as_bytes()[0] - b'0') * 10,
            _ => fraction.parse::<u64>().map_err(|_| ValidationError::InvalidPremium)?,
        };
        whole
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(fraction_cents))
            .map(Self)
            .ok_or(ValidationError::InvalidPremium)
    }
}

impl Display for Premium {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// One insurance policy held by a client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Policy {
    description: String,
    expiry: Option<NaiveDate>,
    premium: Option<Premium>,
}

impl Policy {
    pub fn new(
        description: &str,
        expiry: Option<NaiveDate>,
        premium: Option<Premium>,
    ) -> Result<Self, ValidationError> {
        let policy = Self {
            description: description.trim().to_string(),
            expiry,
            premium,
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Shorthand for a policy with only a description.
    pub fn named(description: &str) -> Result<Self, ValidationError> {
        Self::new(description, None, None)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.description.trim().is_empty() {
            return Err(ValidationError::EmptyPolicyDescription);
        }
        Ok(())
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn expiry(&self) -> Option<NaiveDate> {
        self.expiry
    }

    pub fn premium(&self) -> Option<Premium> {
        self.premium
    }

    /// Case-insensitive substring match against the description.
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        let keyword = keyword.trim();
        !keyword.is_empty()
            && self
                .description
                .to_lowercase()
                .contains(&keyword.to_lowercase())
    }
}

impl Display for Policy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.description)?;
        if let Some(expiry) = self.expiry {
            write!(f, " (expires {expiry})")?;
        }
        if let Some(premium) = self.premium {
            write!(f, " ${premium}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Policy, Premium};
    use crate::model::fields::ValidationError;

    #[test]
    fn premium_parses_whole_and_fractional_amounts() {
        assert_eq!(Premium::parse("1200").unwrap().cents(), 120_000);
        assert_eq!(Premium::parse(" 99.5 ").unwrap().cents(), 9_950);
        assert_eq!(Premium::parse("0.07").unwrap().cents(), 7);
        assert_eq!(Premium::parse("12.30").unwrap().to_string(), "12.30");
    }

    #[test]
    fn premium_rejects_negative_and_malformed_amounts() {
        for raw in ["-1", "", "1.234", "1.", ".5", "abc", "1,000"] {
            assert_eq!(
                Premium::parse(raw).unwrap_err(),
                ValidationError::InvalidPremium,
                "accepted `{raw}`"
            );
        }
    }

    #[test]
    fn policy_requires_description() {
        assert_eq!(
            Policy::named("  ").unwrap_err(),
            ValidationError::EmptyPolicyDescription
        );
        assert_eq!(Policy::named(" life ").unwrap().description(), "life");
    }

    #[test]
    fn policy_keyword_match_is_case_insensitive_substring() {
        let policy = Policy::named("life insurance").unwrap();
        assert!(policy.matches_keyword("LiFe"));
        assert!(policy.matches_keyword("life insurance"));
        assert!(!policy.matches_keyword("car"));
        assert!(!policy.matches_keyword(""));
    }
}

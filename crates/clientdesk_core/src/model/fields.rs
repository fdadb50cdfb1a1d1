//! Validated person field value objects.
//!
//! # Responsibility
//! - Enforce local format constraints at construction time.
//! - Provide normalized comparison keys used by person identity.
//!
//! # Invariants
//! - Every constructor trims surrounding whitespace before validation.
//! - A value that exists has already passed validation; deserialization goes
//!   through the same constructors.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;

pub const NAME_CONSTRAINTS: &str =
    "Names should only contain alphanumeric characters and spaces, and it should not be blank";
pub const PHONE_CONSTRAINTS: &str =
    "Phone numbers should only contain numbers, and it should be at least 3 digits long";
pub const EMAIL_CONSTRAINTS: &str = "Emails should be of the format local-part@domain \
and adhere to the following constraints:\n\
1. The local-part should only contain alphanumeric characters and these special characters, \
excluding the parentheses, (+_.-). The local-part may not start or end with any special characters.\n\
2. This is followed by a '@' and then a domain name. The domain name is made up of domain labels \
separated by periods. The domain name must end with a domain label at least 2 characters long, \
have each domain label start and end with alphanumeric characters, and have each domain label \
consist of alphanumeric characters, separated only by hyphens, if any.";
pub const ADDRESS_CONSTRAINTS: &str = "Addresses can take any values, and it should not be blank";
pub const RELATIONSHIP_CONSTRAINTS: &str =
    "Relationship should only contain alphabetic characters and spaces, and it should not be blank";
pub const TAG_CONSTRAINTS: &str = "Tags names should be alphanumeric";

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 ]*$").expect("valid name regex"));
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{3,}$").expect("valid phone regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9]+(?:[+_.\-][A-Za-z0-9]+)*@[A-Za-z0-9]+(?:-[A-Za-z0-9]+)*(?:\.[A-Za-z0-9]+(?:-[A-Za-z0-9]+)*)*$",
    )
    .expect("valid email regex")
});
static RELATIONSHIP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z ]*$").expect("valid relationship regex"));
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("valid tag regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

const CLIENT_RELATIONSHIP: &str = "client";

/// Constraint violation raised by a value-object constructor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{}", NAME_CONSTRAINTS)]
    InvalidName,
    #[error("{}", PHONE_CONSTRAINTS)]
    InvalidPhone,
    #[error("{}", EMAIL_CONSTRAINTS)]
    InvalidEmail,
    #[error("{}", ADDRESS_CONSTRAINTS)]
    InvalidAddress,
    #[error("{}", RELATIONSHIP_CONSTRAINTS)]
    InvalidRelationship,
    #[error("{}", TAG_CONSTRAINTS)]
    InvalidTag,
    #[error("Policy description should not be blank")]
    EmptyPolicyDescription,
    #[error("Premium should be a non-negative amount with at most two decimal places")]
    InvalidPremium,
    #[error("Cannot have more than {max} policies.")]
    TooManyPolicies { max: usize },
}

macro_rules! string_value {
    ($(#[$meta:meta])* $name:ident) => {
        string_value!(@define [PartialEq, Eq, Hash, PartialOrd, Ord] $(#[$meta])* $name);
    };
    // Comparison impls are supplied by hand.
    ($(#[$meta:meta])* $name:ident, custom_ord) => {
        string_value!(@define [] $(#[$meta])* $name);
    };
    (@define [$($derive:ident),*] $(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Serialize, Deserialize $(, $derive)*)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(&value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

string_value!(
    /// Person display name.
    Name
);
string_value!(
    /// Digits-only phone number.
    Phone
);
string_value!(
    /// Contact email address.
    Email
);
string_value!(
    /// Free-form postal address.
    Address
);
string_value!(
    /// Free-form classification of a person, for example `client` or `lead`.
    Relationship
);
string_value!(
    /// Short alphanumeric label. Compares case-insensitively, so `VIP` and
    /// `vip` are the same tag; the first spelling seen is kept for display.
    Tag,
    custom_ord
);

impl Name {
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        if !NAME_RE.is_match(trimmed) {
            return Err(ValidationError::InvalidName);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Lowercased name with internal whitespace runs collapsed.
    pub fn identity_key(&self) -> String {
        WHITESPACE_RE
            .replace_all(&self.0, " ")
            .to_ascii_lowercase()
    }
}

impl Phone {
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        if !PHONE_RE.is_match(trimmed) {
            return Err(ValidationError::InvalidPhone);
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl Email {
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        if !EMAIL_RE.is_match(trimmed) {
            return Err(ValidationError::InvalidEmail);
        }
        let last_label_len = trimmed
            .rsplit(['.', '@'])
            .next()
            .map_or(0, |label| label.len());
        if last_label_len < 2 {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn identity_key(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

impl Address {
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::InvalidAddress);
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl Relationship {
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        if !RELATIONSHIP_RE.is_match(trimmed) {
            return Err(ValidationError::InvalidRelationship);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns whether this relationship classifies the person as a client.
    pub fn is_client(&self) -> bool {
        self.0.trim().eq_ignore_ascii_case(CLIENT_RELATIONSHIP)
    }
}

impl Tag {
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        if !TAG_RE.is_match(trimmed) {
            return Err(ValidationError::InvalidTag);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Lowercased label used for equality, ordering and matching.
    pub fn match_key(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for Tag {}

impl std::hash::Hash for Tag {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.match_key().hash(state);
    }
}

impl PartialOrd for Tag {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tag {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.match_key().cmp(&other.match_key())
    }
}

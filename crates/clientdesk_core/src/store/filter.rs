//! Predicates that narrow the displayed person list.

use crate::model::fields::{Relationship, Tag};
use crate::model::person::Person;

/// Active narrowing applied to the registry for display and index lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PersonFilter {
    #[default]
    All,
    /// Any keyword equals a whole word of the name, ignoring case.
    NameKeywords(Vec<String>),
    Criteria(FilterCriteria),
}

/// Field criteria combined with AND; values inside one field combine with OR.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Case-insensitive substrings of any policy description.
    pub policy_keywords: Vec<String>,
    pub tags: Vec<Tag>,
    pub relationship: Option<Relationship>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.policy_keywords.is_empty() && self.tags.is_empty() && self.relationship.is_none()
    }

    fn matches(&self, person: &Person) -> bool {
        let policy_match = self.policy_keywords.is_empty()
            || person.policies().iter().any(|policy| {
                self.policy_keywords
                    .iter()
                    .any(|keyword| policy.matches_keyword(keyword))
            });
        let tag_match = self.tags.is_empty()
            || self.tags.iter().any(|wanted| {
                person
                    .tags()
                    .iter()
                    .any(|tag| tag == wanted)
            });
        let relationship_match = self.relationship.as_ref().map_or(true, |wanted| {
            person
                .relationship()
                .as_str()
                .eq_ignore_ascii_case(wanted.as_str())
        });
        policy_match && tag_match && relationship_match
    }
}

impl PersonFilter {
    pub fn matches(&self, person: &Person) -> bool {
        match self {
            Self::All => true,
            Self::NameKeywords(keywords) => person.name().as_str().split_whitespace().any(|word| {
                keywords
                    .iter()
                    .any(|keyword| word.eq_ignore_ascii_case(keyword.trim()))
            }),
            Self::Criteria(criteria) => criteria.matches(person),
        }
    }
}

//! View-narrowing commands. These never touch the registry or history.

use super::CommandOutcome;
use crate::store::filter::{FilterCriteria, PersonFilter};
use crate::store::session::Session;

fn listed(session: &Session) -> CommandOutcome {
    CommandOutcome::message(format!(
        "{} persons listed!",
        session.filtered_persons().len()
    ))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListCommand;

impl ListCommand {
    pub const KEYWORD: &'static str = "list";

    pub fn execute(&self, session: &mut Session) -> CommandOutcome {
        session.show_all();
        CommandOutcome::message("Listed all persons")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindCommand {
    keywords: Vec<String>,
}

impl FindCommand {
    pub const KEYWORD: &'static str = "find";
    pub const USAGE: &'static str = "find: Finds all persons whose names contain any of the \
specified keywords (case-insensitive) and displays them as a list with index numbers.\n\
Parameters: KEYWORD [MORE_KEYWORDS]...\nExample: find alice bob charlie";

    pub fn new(keywords: Vec<String>) -> Self {
        Self { keywords }
    }

    pub fn execute(&self, session: &mut Session) -> CommandOutcome {
        session.set_filter(PersonFilter::NameKeywords(self.keywords.clone()));
        listed(session)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCommand {
    criteria: FilterCriteria,
}

impl FilterCommand {
    pub const KEYWORD: &'static str = "filter";
    pub const USAGE: &'static str = "filter: Shows persons matching every given field. \
Within one field any value may match.\n\
Parameters: [pol/POLICY_KEYWORD]... [t/TAG]... [r/RELATIONSHIP]\nExample: filter pol/life t/vip";

    pub fn new(criteria: FilterCriteria) -> Self {
        Self { criteria }
    }

    pub fn execute(&self, session: &mut Session) -> CommandOutcome {
        session.set_filter(PersonFilter::Criteria(self.criteria.clone()));
        listed(session)
    }
}

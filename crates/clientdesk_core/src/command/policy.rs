//! Policy add/replace/remove on a client.
//!
//! # Invariants
//! - Checks run in order: person index, client relationship, then policy
//!   index or policy count. A non-client always fails with `NotAClient`.
//! - A client never holds more than `MAX_POLICIES` policies.

use super::{CommandError, CommandOutcome};
use crate::index::Index;
use crate::model::policy::{Policy, MAX_POLICIES};
use crate::store::session::Session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyChange {
    Add(Policy),
    Replace { index: Index, policy: Policy },
    Remove { index: Index },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyCommand {
    person_index: Index,
    change: PolicyChange,
}

impl PolicyCommand {
    pub const KEYWORD: &'static str = "policy";
    pub const USAGE: &'static str = "policy: Adds, edits or removes a policy of the client \
identified by the index number used in the displayed person list.\n\
Parameters: INDEX [POLICY_INDEX] pol/DESCRIPTION [exp/YYYY-MM-DD] [pre/PREMIUM]\n\
An empty pol/ together with POLICY_INDEX removes that policy.\n\
Example: policy 1 pol/Life insurance exp/2030-01-01 pre/1200";

    pub fn new(person_index: Index, change: PolicyChange) -> Self {
        Self {
            person_index,
            change,
        }
    }

    pub fn add(person_index: Index, policy: Policy) -> Self {
        Self::new(person_index, PolicyChange::Add(policy))
    }

    pub fn replace(person_index: Index, index: Index, policy: Policy) -> Self {
        Self::new(person_index, PolicyChange::Replace { index, policy })
    }

    pub fn remove(person_index: Index, index: Index) -> Self {
        Self::new(person_index, PolicyChange::Remove { index })
    }

    pub fn person_index(&self) -> Index {
        self.person_index
    }

    pub fn change(&self) -> &PolicyChange {
        &self.change
    }

    pub fn execute(&self, session: &mut Session) -> Result<CommandOutcome, CommandError> {
        let target = session
            .person_at(self.person_index)
            .ok_or(CommandError::InvalidPersonIndex)?;
        if !target.is_client() {
            return Err(CommandError::NotAClient);
        }

        let mut policies = target.policies().to_vec();
        let action = match &self.change {
            PolicyChange::Add(policy) => {
                if policies.len() >= MAX_POLICIES {
                    return Err(CommandError::TooManyPolicies);
                }
                policies.push(policy.clone());
                "Added policy to Person"
            }
            PolicyChange::Replace { index, policy } => {
                let slot = policies
                    .get_mut(index.zero_based())
                    .ok_or(CommandError::InvalidPolicyIndex)?;
                *slot = policy.clone();
                "Policy updated for Person"
            }
            PolicyChange::Remove { index } => {
                if index.zero_based() >= policies.len() {
                    return Err(CommandError::InvalidPolicyIndex);
                }
                policies.remove(index.zero_based());
                "Removed policy from Person"
            }
        };

        let edited = target.with_policies(policies)?;
        session
            .store_mut()
            .registry_mut()
            .set_person(&target, edited.clone())?;
        let changed = session.store_mut().commit();
        Ok(CommandOutcome::changed(format!("{action}: {edited}"), changed))
    }
}

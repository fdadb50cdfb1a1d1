//! Command execution context: versioned store plus the filtered view.
//!
//! # Responsibility
//! - Own the single `VersionedStore` that commands mutate.
//! - Track the active `PersonFilter` that display indices refer to.
//!
//! # Invariants
//! - The filtered view is recomputed from the live registry on every read, so
//!   it never shows partially applied state.

use super::filter::PersonFilter;
use super::history::VersionedStore;
use super::registry::{PersonRegistry, RegistryError};
use crate::clock::{Clock, SystemClock};
use crate::index::Index;
use crate::model::meeting::Meeting;
use crate::model::person::Person;
use chrono::{Duration, NaiveDateTime};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Session {
    store: VersionedStore,
    filter: PersonFilter,
    clock: Arc<dyn Clock>,
}

impl Session {
    /// Seeds history snapshot `S0` from `persons`.
    pub fn new(persons: Vec<Person>) -> Result<Self, RegistryError> {
        Ok(Self::from_registry(PersonRegistry::from_persons(persons)?))
    }

    pub fn from_registry(registry: PersonRegistry) -> Self {
        Self {
            store: VersionedStore::new(registry),
            filter: PersonFilter::All,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    pub fn store(&self) -> &VersionedStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut VersionedStore {
        &mut self.store
    }

    pub fn registry(&self) -> &PersonRegistry {
        self.store.registry()
    }

    pub fn filter(&self) -> &PersonFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: PersonFilter) {
        self.filter = filter;
    }

    pub fn show_all(&mut self) {
        self.filter = PersonFilter::All;
    }

    /// Ordered projection of the live registry through the active filter.
    pub fn filtered_persons(&self) -> Vec<Arc<Person>> {
        self.registry()
            .as_list()
            .iter()
            .filter(|person| self.filter.matches(person))
            .cloned()
            .collect()
    }

    pub fn person_at(&self, index: Index) -> Option<Arc<Person>> {
        self.registry()
            .as_list()
            .iter()
            .filter(|person| self.filter.matches(person))
            .nth(index.zero_based())
            .cloned()
    }

    /// Meetings starting within `window` of the clock's now, soonest first.
    pub fn upcoming_meetings(&self, window: Duration) -> Vec<(Arc<Person>, Meeting)> {
        let now = self.now();
        let mut upcoming: Vec<(Arc<Person>, Meeting)> = self
            .registry()
            .as_list()
            .iter()
            .flat_map(|person| {
                person
                    .meetings()
                    .iter()
                    .filter(|meeting| meeting.is_coming_up_within(now, window))
                    .map(|meeting| (Arc::clone(person), meeting.clone()))
            })
            .collect();
        upcoming.sort_by_key(|(_, meeting)| meeting.start());
        upcoming
    }
}

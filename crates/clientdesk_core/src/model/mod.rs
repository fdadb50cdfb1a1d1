//! Client book domain model.
//!
//! # Responsibility
//! - Define validated value objects for person, policy and meeting data.
//! - Keep derived views (client status, earliest meeting) next to the data.
//!
//! # Invariants
//! - Every model value is validated at construction or deserialization.
//! - Person identity (`PersonIdentity`) is distinct from structural equality.

pub mod fields;
pub mod meeting;
pub mod person;
pub mod policy;

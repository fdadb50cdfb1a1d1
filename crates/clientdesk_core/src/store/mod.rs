//! In-memory client book state.
//!
//! # Responsibility
//! - Hold the identity-unique person registry.
//! - Version registry snapshots for undo/redo.
//! - Expose the filtered view that command indices refer to.
//!
//! # Invariants
//! - The registry is the only owner of the live person list.
//! - Every successful mutating command ends with `VersionedStore::commit`.

pub mod filter;
pub mod history;
pub mod registry;
pub mod session;

//! Snapshot history over the person registry.
//!
//! # Responsibility
//! - Keep immutable registry snapshots and a cursor for undo/redo.
//! - Hold the live registry that commands mutate between commits.
//!
//! # Invariants
//! - `snapshots` is never empty and `cursor < snapshots.len()`.
//! - Committing after an undo discards every snapshot past the cursor.
//! - Committing a live state equal to `snapshots[cursor]` is a no-op.

use super::registry::PersonRegistry;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("No more commands to undo!")]
    NoUndoableState,
    #[error("No more commands to redo!")]
    NoRedoableState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedStore {
    live: PersonRegistry,
    snapshots: Vec<PersonRegistry>,
    cursor: usize,
}

impl VersionedStore {
    /// Seeds the history with `initial` as snapshot `S0`.
    pub fn new(initial: PersonRegistry) -> Self {
        Self {
            snapshots: vec![initial.clone()],
            live: initial,
            cursor: 0,
        }
    }

    pub fn registry(&self) -> &PersonRegistry {
        &self.live
    }

    pub fn registry_mut(&mut self) -> &mut PersonRegistry {
        &mut self.live
    }

    /// Records the live registry as a new snapshot.
    ///
    /// Returns `false` without touching history when nothing changed since the
    /// current snapshot.
    pub fn commit(&mut self) -> bool {
        if self.live == self.snapshots[self.cursor] {
            return false;
        }
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(self.live.clone());
        self.cursor += 1;
        true
    }

    pub fn undo(&mut self) -> Result<(), HistoryError> {
        if !self.can_undo() {
            return Err(HistoryError::NoUndoableState);
        }
        self.cursor -= 1;
        self.live = self.snapshots[self.cursor].clone();
        Ok(())
    }

    pub fn redo(&mut self) -> Result<(), HistoryError> {
        if !self.can_redo() {
            return Err(HistoryError::NoRedoableState);
        }
        self.cursor += 1;
        self.live = self.snapshots[self.cursor].clone();
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn snapshot_count(&self) -> usize {
        self.snapshots.len()
    }
}

//! Whole-book commands: clear, undo and redo.

use super::{CommandError, CommandOutcome};
use crate::store::session::Session;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearCommand;

impl ClearCommand {
    pub const KEYWORD: &'static str = "clear";

    pub fn execute(&self, session: &mut Session) -> CommandOutcome {
        session.store_mut().registry_mut().clear();
        let changed = session.store_mut().commit();
        session.show_all();
        CommandOutcome::changed("Client book has been cleared!", changed)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UndoCommand;

impl UndoCommand {
    pub const KEYWORD: &'static str = "undo";

    pub fn execute(&self, session: &mut Session) -> Result<CommandOutcome, CommandError> {
        session.store_mut().undo()?;
        session.show_all();
        Ok(CommandOutcome::changed("Undo success!", true))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RedoCommand;

impl RedoCommand {
    pub const KEYWORD: &'static str = "redo";

    pub fn execute(&self, session: &mut Session) -> Result<CommandOutcome, CommandError> {
        session.store_mut().redo()?;
        session.show_all();
        Ok(CommandOutcome::changed("Redo success!", true))
    }
}

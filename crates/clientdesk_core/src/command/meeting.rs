//! Meeting scheduling commands.
//!
//! # Invariants
//! - A person never holds two meetings with the same start.
//! - Any meeting change re-sorts the registry (meeting lists differ).

use super::{CommandError, CommandOutcome};
use crate::index::Index;
use crate::model::meeting::Meeting;
use crate::store::session::Session;
use chrono::NaiveDateTime;

/// Duration used when `dur/` is omitted on a new meeting.
pub const DEFAULT_MEETING_MINUTES: u32 = 60;

/// Partial update merged into an existing meeting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeetingEdit {
    pub start: Option<NaiveDateTime>,
    pub duration_minutes: Option<u32>,
    pub agenda: Option<String>,
    pub notes: Option<String>,
}

impl MeetingEdit {
    pub fn is_empty(&self) -> bool {
        self.start.is_none()
            && self.duration_minutes.is_none()
            && self.agenda.is_none()
            && self.notes.is_none()
    }

    fn apply(&self, meeting: &Meeting) -> Meeting {
        meeting.with_changes(
            self.start,
            self.duration_minutes,
            self.agenda.as_deref(),
            self.notes.as_deref(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeetingChange {
    Add(Meeting),
    Edit { index: Index, edit: MeetingEdit },
    Remove { index: Index },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingCommand {
    person_index: Index,
    change: MeetingChange,
}

impl MeetingCommand {
    pub const KEYWORD: &'static str = "meeting";
    pub const USAGE: &'static str = "meeting: Schedules, edits or removes a meeting with the \
person identified by the index number used in the displayed person list.\n\
Parameters: INDEX [MEETING_INDEX] [d/YYYY-MM-DD or DAY tm/HH:MM] [dur/MINUTES] [ag/AGENDA] [no/NOTES]\n\
A new meeting needs d/ and tm/. MEETING_INDEX with no other field removes that meeting.\n\
Example: meeting 1 d/Wednesday tm/16:00 dur/45 ag/Policy review";

    pub fn new(person_index: Index, change: MeetingChange) -> Self {
        Self {
            person_index,
            change,
        }
    }

    pub fn add(person_index: Index, meeting: Meeting) -> Self {
        Self::new(person_index, MeetingChange::Add(meeting))
    }

    pub fn edit(person_index: Index, index: Index, edit: MeetingEdit) -> Self {
        Self::new(person_index, MeetingChange::Edit { index, edit })
    }

    pub fn remove(person_index: Index, index: Index) -> Self {
        Self::new(person_index, MeetingChange::Remove { index })
    }

    pub fn person_index(&self) -> Index {
        self.person_index
    }

    pub fn change(&self) -> &MeetingChange {
        &self.change
    }

    pub fn execute(&self, session: &mut Session) -> Result<CommandOutcome, CommandError> {
        let target = session
            .person_at(self.person_index)
            .ok_or(CommandError::InvalidPersonIndex)?;

        let mut meetings = target.meetings().to_vec();
        let action = match &self.change {
            MeetingChange::Add(meeting) => {
                if target.has_meeting_at(meeting.start()) {
                    return Err(CommandError::DuplicateMeeting(meeting.start()));
                }
                meetings.push(meeting.clone());
                "New meeting scheduled for Person"
            }
            MeetingChange::Edit { index, edit } => {
                let position = index.zero_based();
                let current = meetings
                    .get(position)
                    .ok_or(CommandError::InvalidMeetingIndex)?;
                let updated = edit.apply(current);
                let clashes = meetings
                    .iter()
                    .enumerate()
                    .any(|(i, other)| i != position && other.start() == updated.start());
                if clashes {
                    return Err(CommandError::DuplicateMeeting(updated.start()));
                }
                meetings[position] = updated;
                "Meeting updated for Person"
            }
            MeetingChange::Remove { index } => {
                if index.zero_based() >= meetings.len() {
                    return Err(CommandError::InvalidMeetingIndex);
                }
                meetings.remove(index.zero_based());
                "Meeting removed for Person"
            }
        };

        let edited = target.with_meetings(meetings);
        session
            .store_mut()
            .registry_mut()
            .set_person(&target, edited.clone())?;
        let changed = session.store_mut().commit();
        Ok(CommandOutcome::changed(format!("{action}: {edited}"), changed))
    }
}

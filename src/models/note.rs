use chrono::NaiveDate;
use serde::Serialize;

use super::{NoteId, SessionId, Timestamp};

/// Title given to notes captured from a finished timer session
pub const SESSION_NOTE_TITLE: &str = "Session Note";

/// Free text, optionally pointing back at the session it was written during
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    pub id: NoteId,
    pub session_id: Option<SessionId>,
    pub date: NaiveDate,
    pub title: String,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Note {
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "Untitled"
        } else {
            &self.title
        }
    }
}

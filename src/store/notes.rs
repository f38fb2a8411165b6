use crate::clock::Clock;
use crate::db::DatabaseOps;
use crate::error::Result;
use crate::models::{Note, NoteId, SessionId, Timestamp};

/// All notes, most recently edited first
#[derive(Debug, Default)]
pub struct NoteStore {
    pub notes: Vec<Note>,
}

impl NoteStore {
    pub fn load(&mut self, db: &impl DatabaseOps) -> Result<()> {
        self.notes = db.get_notes()?;
        Ok(())
    }

    /// Create a note dated today
    pub fn add(
        &mut self,
        db: &impl DatabaseOps,
        clock: &dyn Clock,
        title: &str,
        content: &str,
        session_id: Option<SessionId>,
    ) -> Result<NoteId> {
        let now = Timestamp::new(clock.now_timestamp());
        let id = db.insert_note(session_id, clock.today(), title, content, now)?;
        log::debug!("created note {}", id);
        self.load(db)?;
        Ok(id)
    }

    /// Replace title and content, bumping `updated_at`
    pub fn update(
        &mut self,
        db: &impl DatabaseOps,
        clock: &dyn Clock,
        id: NoteId,
        title: &str,
        content: &str,
    ) -> Result<()> {
        db.update_note(id, title, content, Timestamp::new(clock.now_timestamp()))?;
        self.load(db)
    }

    pub fn remove(&mut self, db: &impl DatabaseOps, id: NoteId) -> Result<()> {
        db.delete_note(id)?;
        self.load(db)
    }
}

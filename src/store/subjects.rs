use crate::clock::Clock;
use crate::db::DatabaseOps;
use crate::error::Result;
use crate::models::{Subject, SubjectId, Timestamp};

/// The subject list, reloaded from the database after every change
#[derive(Debug, Default)]
pub struct SubjectStore {
    pub subjects: Vec<Subject>,
}

impl SubjectStore {
    pub fn load(&mut self, db: &impl DatabaseOps) -> Result<()> {
        self.subjects = db.get_subjects()?;
        Ok(())
    }

    pub fn get(&self, id: SubjectId) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    pub fn add(
        &mut self,
        db: &impl DatabaseOps,
        clock: &dyn Clock,
        name: &str,
        color: &str,
    ) -> Result<SubjectId> {
        let id = db.insert_subject(name, color, Timestamp::new(clock.now_timestamp()))?;
        log::info!("created subject {} ({})", id, name);
        self.load(db)?;
        Ok(id)
    }

    /// Rename and/or recolor
    pub fn update(
        &mut self,
        db: &impl DatabaseOps,
        id: SubjectId,
        name: &str,
        color: &str,
    ) -> Result<()> {
        db.update_subject(id, name, color)?;
        self.load(db)
    }

    /// Delete a subject that has no sessions.
    ///
    /// Returns `Ok(false)` without touching anything when sessions exist;
    /// otherwise deletes the subject's plans and the subject and returns
    /// `Ok(true)`.
    pub fn remove(&mut self, db: &impl DatabaseOps, id: SubjectId) -> Result<bool> {
        let count = db.session_count_for_subject(id)?;
        if count > 0 {
            log::warn!("refusing to delete subject {}: {} sessions", id, count);
            return Ok(false);
        }

        db.delete_subject(id)?;
        log::info!("deleted subject {}", id);
        self.load(db)?;
        Ok(true)
    }
}

use chrono::NaiveDate;
use rusqlite::Connection;

use crate::config::get_db_path;
use crate::error::Result;
use crate::models::{
    DailyPlan, NewSession, Note, NoteId, PlanId, PlanRow, Session, SessionId, Subject, SubjectId,
    SubjectSeconds, Timestamp,
};

use super::schema::init_schema;
use super::{DatabaseOps, queries};

/// Database connection wrapper
pub struct Database {
    pub conn: Connection,
}

impl Database {
    /// Open the database, creating it if necessary
    pub fn open() -> Result<Self> {
        let path = get_db_path()?;
        log::info!("opening database at {}", path.display());
        let conn = Connection::open(&path)?;
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |_| Ok(()))?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }
}

impl DatabaseOps for Database {
    fn get_subjects(&self) -> Result<Vec<Subject>> {
        queries::get_subjects(&self.conn).map_err(Into::into)
    }

    fn insert_subject(&self, name: &str, color: &str, created_at: Timestamp) -> Result<SubjectId> {
        queries::insert_subject(&self.conn, name, color, created_at).map_err(Into::into)
    }

    fn update_subject(&self, id: SubjectId, name: &str, color: &str) -> Result<usize> {
        queries::update_subject(&self.conn, id, name, color).map_err(Into::into)
    }

    fn delete_subject(&self, id: SubjectId) -> Result<usize> {
        queries::delete_subject(&self.conn, id).map_err(Into::into)
    }

    fn session_count_for_subject(&self, id: SubjectId) -> Result<i64> {
        queries::session_count_for_subject(&self.conn, id).map_err(Into::into)
    }

    fn insert_session(&self, session: &NewSession) -> Result<SessionId> {
        queries::insert_session(&self.conn, session).map_err(Into::into)
    }

    fn get_sessions_for_date(&self, date: NaiveDate) -> Result<Vec<Session>> {
        queries::get_sessions_for_date(&self.conn, date).map_err(Into::into)
    }

    fn get_sessions_in_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Session>> {
        queries::get_sessions_in_range(&self.conn, start, end).map_err(Into::into)
    }

    fn get_all_sessions(&self) -> Result<Vec<Session>> {
        queries::get_all_sessions(&self.conn).map_err(Into::into)
    }

    fn total_seconds_for_subject_on_date(&self, id: SubjectId, date: NaiveDate) -> Result<i64> {
        queries::total_seconds_for_subject_on_date(&self.conn, id, date).map_err(Into::into)
    }

    fn total_seconds_on_date(&self, date: NaiveDate) -> Result<i64> {
        queries::total_seconds_on_date(&self.conn, date).map_err(Into::into)
    }

    fn total_seconds_by_date(&self, dates: &[NaiveDate]) -> Result<Vec<(NaiveDate, i64)>> {
        queries::total_seconds_by_date(&self.conn, dates).map_err(Into::into)
    }

    fn seconds_by_subject(
        &self,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Vec<SubjectSeconds>> {
        queries::seconds_by_subject(&self.conn, range).map_err(Into::into)
    }

    fn get_plans_for_date(&self, date: NaiveDate) -> Result<Vec<PlanRow>> {
        queries::get_plans_for_date(&self.conn, date).map_err(Into::into)
    }

    fn get_all_plans(&self) -> Result<Vec<DailyPlan>> {
        queries::get_all_plans(&self.conn).map_err(Into::into)
    }

    fn upsert_plan(&self, date: NaiveDate, subject_id: SubjectId, target: i64) -> Result<usize> {
        queries::upsert_plan(&self.conn, date, subject_id, target).map_err(Into::into)
    }

    fn delete_plan(&self, id: PlanId) -> Result<usize> {
        queries::delete_plan(&self.conn, id).map_err(Into::into)
    }

    fn get_notes(&self) -> Result<Vec<Note>> {
        queries::get_notes(&self.conn).map_err(Into::into)
    }

    fn get_note(&self, id: NoteId) -> Result<Option<Note>> {
        queries::get_note(&self.conn, id).map_err(Into::into)
    }

    fn insert_note(
        &self,
        session_id: Option<SessionId>,
        date: NaiveDate,
        title: &str,
        content: &str,
        now: Timestamp,
    ) -> Result<NoteId> {
        queries::insert_note(&self.conn, session_id, date, title, content, now).map_err(Into::into)
    }

    fn update_note(
        &self,
        id: NoteId,
        title: &str,
        content: &str,
        now: Timestamp,
    ) -> Result<usize> {
        queries::update_note(&self.conn, id, title, content, now).map_err(Into::into)
    }

    fn delete_note(&self, id: NoteId) -> Result<usize> {
        queries::delete_note(&self.conn, id).map_err(Into::into)
    }

    fn reset_all(&self) -> Result<()> {
        queries::reset_all(&self.conn).map_err(Into::into)
    }
}

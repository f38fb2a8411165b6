mod connection;
mod export;
pub mod queries;
mod schema;

use chrono::NaiveDate;

use crate::error::Result;
use crate::models::{
    DailyPlan, NewSession, Note, NoteId, PlanId, PlanRow, Session, SessionId, Subject, SubjectId,
    SubjectSeconds, Timestamp,
};

pub use connection::Database;
pub use export::export_all;

/// Every persistence operation the stores, timer and stats need.
///
/// `Database` is the only implementation; the trait keeps the callers
/// independent of the rusqlite connection.
pub trait DatabaseOps {
    // subjects
    fn get_subjects(&self) -> Result<Vec<Subject>>;
    fn insert_subject(&self, name: &str, color: &str, created_at: Timestamp) -> Result<SubjectId>;
    fn update_subject(&self, id: SubjectId, name: &str, color: &str) -> Result<usize>;
    fn delete_subject(&self, id: SubjectId) -> Result<usize>;
    fn session_count_for_subject(&self, id: SubjectId) -> Result<i64>;

    // sessions
    fn insert_session(&self, session: &NewSession) -> Result<SessionId>;
    fn get_sessions_for_date(&self, date: NaiveDate) -> Result<Vec<Session>>;
    fn get_sessions_in_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Session>>;
    fn get_all_sessions(&self) -> Result<Vec<Session>>;

    // aggregates
    fn total_seconds_for_subject_on_date(&self, id: SubjectId, date: NaiveDate) -> Result<i64>;
    fn total_seconds_on_date(&self, date: NaiveDate) -> Result<i64>;
    fn total_seconds_by_date(&self, dates: &[NaiveDate]) -> Result<Vec<(NaiveDate, i64)>>;
    fn seconds_by_subject(
        &self,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Vec<SubjectSeconds>>;

    // plans
    fn get_plans_for_date(&self, date: NaiveDate) -> Result<Vec<PlanRow>>;
    fn get_all_plans(&self) -> Result<Vec<DailyPlan>>;
    fn upsert_plan(&self, date: NaiveDate, subject_id: SubjectId, target: i64) -> Result<usize>;
    fn delete_plan(&self, id: PlanId) -> Result<usize>;

    // notes
    fn get_notes(&self) -> Result<Vec<Note>>;
    fn get_note(&self, id: NoteId) -> Result<Option<Note>>;
    fn insert_note(
        &self,
        session_id: Option<SessionId>,
        date: NaiveDate,
        title: &str,
        content: &str,
        now: Timestamp,
    ) -> Result<NoteId>;
    fn update_note(&self, id: NoteId, title: &str, content: &str, now: Timestamp)
    -> Result<usize>;
    fn delete_note(&self, id: NoteId) -> Result<usize>;

    fn reset_all(&self) -> Result<()>;
}

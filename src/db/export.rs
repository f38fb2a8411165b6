use serde::Serialize;

use crate::clock::Clock;
use crate::error::Result;
use crate::models::{DailyPlan, Note, Session, Subject};

use super::DatabaseOps;

/// Read-only snapshot of every table, written out as JSON
#[derive(Debug, Serialize)]
pub struct ExportSnapshot {
    #[serde(rename = "exportDate")]
    pub export_date: String,
    pub subjects: Vec<Subject>,
    pub study_sessions: Vec<Session>,
    pub daily_plans: Vec<DailyPlan>,
    pub notes: Vec<Note>,
}

impl ExportSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Collect the full contents of the database
pub fn export_all(db: &impl DatabaseOps, clock: &dyn Clock) -> Result<ExportSnapshot> {
    Ok(ExportSnapshot {
        export_date: clock.now_datetime().to_rfc3339(),
        subjects: db.get_subjects()?,
        study_sessions: db.get_all_sessions()?,
        daily_plans: db.get_all_plans()?,
        notes: db.get_notes()?,
    })
}

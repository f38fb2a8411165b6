use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;

use super::{DurationSecs, SessionId, SubjectId, Timestamp};

/// One completed, timed study interval
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub id: SessionId,
    pub subject_id: SubjectId,
    pub started_at: Timestamp,
    pub ended_at: Timestamp,
    /// Local calendar date of `started_at`; daily totals group on this
    pub started_on: NaiveDate,
    pub duration_secs: DurationSecs,
    pub note: String,
}

/// A session about to be inserted; the database assigns the id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSession {
    pub subject_id: SubjectId,
    pub started_at: DateTime<Local>,
    pub ended_at: DateTime<Local>,
    pub duration_secs: DurationSecs,
    pub note: String,
}

impl NewSession {
    pub fn started_on(&self) -> NaiveDate {
        self.started_at.date_naive()
    }

    /// Attach the assigned id
    pub fn into_session(self, id: SessionId) -> Session {
        Session {
            id,
            subject_id: self.subject_id,
            started_at: Timestamp::from_datetime(self.started_at),
            ended_at: Timestamp::from_datetime(self.ended_at),
            started_on: self.started_on(),
            duration_secs: self.duration_secs,
            note: self.note,
        }
    }
}

impl Session {
    /// Get the start time as a DateTime
    pub fn start_datetime(&self) -> DateTime<Local> {
        self.started_at.to_local()
    }

    /// Get the end time as a DateTime
    pub fn end_datetime(&self) -> DateTime<Local> {
        self.ended_at.to_local()
    }
}

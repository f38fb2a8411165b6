use chrono::{Duration, NaiveDate};

use crate::db::DatabaseOps;
use crate::error::Result;
use crate::models::Session;

/// How far back the history view reaches
pub const HISTORY_DAYS: i64 = 30;

/// Read-only session listings; sessions are only created by the timer
#[derive(Debug, Default)]
pub struct SessionStore {
    /// Sessions started on the loaded day
    pub today: Vec<Session>,
    /// Sessions of the last `HISTORY_DAYS` days
    pub history: Vec<Session>,
}

impl SessionStore {
    pub fn load(&mut self, db: &impl DatabaseOps, today: NaiveDate) -> Result<()> {
        self.today = db.get_sessions_for_date(today)?;
        self.history = db.get_sessions_in_range(today - Duration::days(HISTORY_DAYS - 1), today)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, FixedClock};
    use crate::db::Database;
    use crate::models::{DurationSecs, NewSession, Timestamp};

    #[test]
    fn test_load_splits_today_and_history() {
        let db = Database::open_in_memory().unwrap();
        let clock = FixedClock::at(2026, 10, 14, 9, 0);
        let math = db
            .insert_subject("Math", "#4A90D9", Timestamp::new(0))
            .unwrap();

        for days_ago in [0, 0, 3, 29, 30] {
            let start = clock.now_datetime() - Duration::days(days_ago);
            db.insert_session(&NewSession {
                subject_id: math,
                started_at: start,
                ended_at: start + Duration::minutes(10),
                duration_secs: DurationSecs::new(600),
                note: String::new(),
            })
            .unwrap();
        }

        let mut store = SessionStore::default();
        store.load(&db, clock.today()).unwrap();
        assert_eq!(store.today.len(), 2);
        assert_eq!(store.history.len(), 4);
    }
}

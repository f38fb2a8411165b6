use chrono::NaiveDate;

use crate::db::DatabaseOps;
use crate::error::Result;
use crate::models::{PlanId, PlanProgress, SubjectId};
use crate::stats::plans_with_progress;

/// Plans for one date, with progress, reloaded after every change
#[derive(Debug, Default)]
pub struct PlanStore {
    pub plans: Vec<PlanProgress>,
    date: Option<NaiveDate>,
}

impl PlanStore {
    /// The date the plans were last loaded for
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn load(&mut self, db: &impl DatabaseOps, date: NaiveDate) -> Result<()> {
        self.plans = plans_with_progress(db, date)?;
        self.date = Some(date);
        Ok(())
    }

    /// Set the target for (date, subject), replacing any existing plan
    pub fn add(
        &mut self,
        db: &impl DatabaseOps,
        subject_id: SubjectId,
        target_minutes: i64,
        date: NaiveDate,
    ) -> Result<()> {
        db.upsert_plan(date, subject_id, target_minutes)?;
        log::info!(
            "planned {} min for subject {} on {}",
            target_minutes,
            subject_id,
            date
        );
        self.load(db, date)
    }

    pub fn remove(&mut self, db: &impl DatabaseOps, id: PlanId) -> Result<()> {
        db.delete_plan(id)?;
        if let Some(date) = self.date {
            self.load(db, date)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, FixedClock};
    use crate::db::Database;
    use crate::models::Timestamp;

    #[test]
    fn test_add_twice_keeps_latest_target() {
        let db = Database::open_in_memory().unwrap();
        let clock = FixedClock::at(2026, 10, 14, 9, 0);
        let math = db
            .insert_subject("Math", "#4A90D9", Timestamp::new(0))
            .unwrap();
        let mut store = PlanStore::default();

        store.add(&db, math, 30, clock.today()).unwrap();
        store.add(&db, math, 90, clock.today()).unwrap();

        assert_eq!(store.plans.len(), 1);
        assert_eq!(store.plans[0].plan.target_minutes, 90);
        assert_eq!(db.get_all_plans().unwrap().len(), 1);
    }

    #[test]
    fn test_same_subject_on_different_dates() {
        let db = Database::open_in_memory().unwrap();
        let clock = FixedClock::at(2026, 10, 14, 9, 0);
        let math = db
            .insert_subject("Math", "#4A90D9", Timestamp::new(0))
            .unwrap();
        let mut store = PlanStore::default();
        let tomorrow = clock.today().succ_opt().unwrap();

        store.add(&db, math, 30, clock.today()).unwrap();
        store.add(&db, math, 45, tomorrow).unwrap();

        assert_eq!(store.date(), Some(tomorrow));
        assert_eq!(store.plans.len(), 1);
        assert_eq!(db.get_all_plans().unwrap().len(), 2);
    }

    #[test]
    fn test_remove_reloads_loaded_date() {
        let db = Database::open_in_memory().unwrap();
        let clock = FixedClock::at(2026, 10, 14, 9, 0);
        let math = db
            .insert_subject("Math", "#4A90D9", Timestamp::new(0))
            .unwrap();
        let mut store = PlanStore::default();
        store.add(&db, math, 30, clock.today()).unwrap();

        let id = store.plans[0].plan.id;
        store.remove(&db, id).unwrap();
        assert!(store.plans.is_empty());
    }
}

use chrono::{Datelike, Duration, NaiveDate};

use crate::db::DatabaseOps;
use crate::error::Result;
use crate::models::{DailyStat, PlanProgress, SubjectId, SubjectStat};

/// Convert a total of seconds to minutes, rounding half away from zero.
///
/// Always applied to a summed total, never per session.
pub fn seconds_to_minutes(total_secs: i64) -> i64 {
    (total_secs as f64 / 60.0).round() as i64
}

/// The Monday-to-Sunday week containing `today`
pub fn week_dates(today: NaiveDate) -> [NaiveDate; 7] {
    let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
    std::array::from_fn(|i| monday + Duration::days(i as i64))
}

/// Minutes studied for one subject on one date
pub fn total_minutes_for_subject_on_date(
    db: &impl DatabaseOps,
    subject_id: SubjectId,
    date: NaiveDate,
) -> Result<i64> {
    Ok(seconds_to_minutes(
        db.total_seconds_for_subject_on_date(subject_id, date)?,
    ))
}

/// Minutes studied across all subjects on one date
pub fn daily_total_minutes(db: &impl DatabaseOps, date: NaiveDate) -> Result<i64> {
    Ok(seconds_to_minutes(db.total_seconds_on_date(date)?))
}

/// One entry per input date, in input order, zero for days without sessions
pub fn weekly_stats(db: &impl DatabaseOps, dates: &[NaiveDate]) -> Result<Vec<DailyStat>> {
    let totals = db.total_seconds_by_date(dates)?;
    Ok(dates
        .iter()
        .map(|&date| {
            let secs = totals
                .iter()
                .find(|(d, _)| *d == date)
                .map_or(0, |(_, secs)| *secs);
            DailyStat {
                date,
                total_minutes: seconds_to_minutes(secs),
            }
        })
        .collect())
}

/// Per-subject totals, optionally limited to `start..=end`.
///
/// Every subject is listed, idle ones at zero, largest total first.
pub fn subject_stats(
    db: &impl DatabaseOps,
    range: Option<(NaiveDate, NaiveDate)>,
) -> Result<Vec<SubjectStat>> {
    Ok(db
        .seconds_by_subject(range)?
        .into_iter()
        .map(|row| SubjectStat {
            subject_id: row.subject_id,
            subject_name: row.subject_name,
            subject_color: row.subject_color,
            total_minutes: seconds_to_minutes(row.total_seconds),
            session_count: row.session_count,
        })
        .collect())
}

/// Plans for `date`, each with the minutes actually studied for its subject
pub fn plans_with_progress(db: &impl DatabaseOps, date: NaiveDate) -> Result<Vec<PlanProgress>> {
    db.get_plans_for_date(date)?
        .into_iter()
        .map(|row| -> Result<PlanProgress> {
            let actual = total_minutes_for_subject_on_date(db, row.plan.subject_id, date)?;
            Ok(row.with_actual(actual))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, FixedClock};
    use crate::db::Database;
    use crate::models::Timestamp;
    use crate::timer::StudyTimer;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Record a session of `secs` for `subject` starting at the clock's time
    fn study(db: &Database, clock: &FixedClock, subject: SubjectId, secs: i64) {
        let mut timer = StudyTimer::new();
        timer.start(Some(subject), clock).unwrap();
        for _ in 0..secs {
            timer.tick();
        }
        clock.advance_secs(secs);
        timer.stop(db, clock).unwrap();
    }

    #[test]
    fn test_seconds_to_minutes_rounds_half_up() {
        assert_eq!(seconds_to_minutes(0), 0);
        assert_eq!(seconds_to_minutes(29), 0);
        assert_eq!(seconds_to_minutes(30), 1);
        assert_eq!(seconds_to_minutes(89), 1);
        assert_eq!(seconds_to_minutes(90), 2);
        assert_eq!(seconds_to_minutes(125), 2);
    }

    #[test]
    fn test_week_dates_start_on_monday() {
        // 2026-10-14 is a Wednesday
        let week = week_dates(date(2026, 10, 14));
        assert_eq!(week[0], date(2026, 10, 12));
        assert_eq!(week[6], date(2026, 10, 18));

        // Sunday belongs to the week that started six days earlier
        let week = week_dates(date(2026, 10, 18));
        assert_eq!(week[0], date(2026, 10, 12));

        // Monday is its own week start
        let week = week_dates(date(2026, 10, 12));
        assert_eq!(week[0], date(2026, 10, 12));
    }

    #[test]
    fn test_week_dates_cross_month_boundary() {
        let week = week_dates(date(2026, 11, 1));
        assert_eq!(week[0], date(2026, 10, 26));
        assert_eq!(week[6], date(2026, 11, 1));
    }

    #[test]
    fn test_math_scenario_daily_total_and_plan_progress() {
        let db = Database::open_in_memory().unwrap();
        let clock = FixedClock::at(2026, 10, 14, 9, 0);
        let math = db
            .insert_subject("Math", "#4A90D9", Timestamp::new(0))
            .unwrap();

        study(&db, &clock, math, 125);
        let sessions = db.get_all_sessions().unwrap();
        assert_eq!(sessions[0].duration_secs.as_secs(), 125);
        assert_eq!(daily_total_minutes(&db, clock.today()).unwrap(), 2);

        db.upsert_plan(clock.today(), math, 60).unwrap();
        let plans = plans_with_progress(&db, clock.today()).unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].actual_minutes, 2);
        assert!((plans[0].progress() - 2.0 / 60.0).abs() < 1e-9);
        assert!(!plans[0].is_complete());
    }

    #[test]
    fn test_rounding_applies_to_the_sum() {
        let db = Database::open_in_memory().unwrap();
        let clock = FixedClock::at(2026, 10, 14, 9, 0);
        let math = db
            .insert_subject("Math", "#4A90D9", Timestamp::new(0))
            .unwrap();

        // 3 x 20s rounds to 0 each, but 60s in total
        for _ in 0..3 {
            study(&db, &clock, math, 20);
        }
        assert_eq!(
            total_minutes_for_subject_on_date(&db, math, clock.today()).unwrap(),
            1
        );
    }

    #[test]
    fn test_weekly_stats_keeps_input_order_and_zeros() {
        let db = Database::open_in_memory().unwrap();
        let clock = FixedClock::at(2026, 10, 14, 9, 0);
        let math = db
            .insert_subject("Math", "#4A90D9", Timestamp::new(0))
            .unwrap();
        study(&db, &clock, math, 600);

        let dates = [date(2026, 10, 16), date(2026, 10, 14), date(2026, 10, 12)];
        let stats = weekly_stats(&db, &dates).unwrap();
        assert_eq!(stats.len(), 3);
        assert_eq!(stats.iter().map(|s| s.date).collect::<Vec<_>>(), dates);
        assert_eq!(
            stats.iter().map(|s| s.total_minutes).collect::<Vec<_>>(),
            vec![0, 10, 0]
        );

        let week = weekly_stats(&db, &week_dates(clock.today())).unwrap();
        assert_eq!(week.len(), 7);
        assert_eq!(week[2].total_minutes, 10);
    }

    #[test]
    fn test_subject_stats_range_and_zero_subjects() {
        let db = Database::open_in_memory().unwrap();
        let clock = FixedClock::at(2026, 10, 5, 9, 0);
        let math = db
            .insert_subject("Math", "#4A90D9", Timestamp::new(0))
            .unwrap();
        let art = db
            .insert_subject("Art", "#E74C3C", Timestamp::new(0))
            .unwrap();
        db.insert_subject("History", "#2ECC71", Timestamp::new(0))
            .unwrap();

        // Outside the range
        study(&db, &clock, math, 3600);
        // Inside the range
        clock.advance_secs(9 * 24 * 3600);
        study(&db, &clock, art, 300);
        study(&db, &clock, math, 120);

        let week = week_dates(clock.today());
        let stats = subject_stats(&db, Some((week[0], week[6]))).unwrap();
        assert_eq!(stats.len(), 3);
        assert_eq!(stats[0].subject_id, art);
        assert_eq!(stats[0].total_minutes, 5);
        assert_eq!(stats[1].subject_id, math);
        assert_eq!(stats[1].total_minutes, 2);
        assert_eq!(stats[1].session_count, 1);
        assert_eq!(stats[2].subject_name, "History");
        assert_eq!(stats[2].total_minutes, 0);
        assert_eq!(stats[2].session_count, 0);

        let all_time = subject_stats(&db, None).unwrap();
        assert_eq!(all_time[0].subject_id, math);
        assert_eq!(all_time[0].total_minutes, 62);
        assert_eq!(all_time[0].session_count, 2);
    }

    #[test]
    fn test_plans_with_progress_per_subject() {
        let db = Database::open_in_memory().unwrap();
        let clock = FixedClock::at(2026, 10, 14, 9, 0);
        let math = db
            .insert_subject("Math", "#4A90D9", Timestamp::new(0))
            .unwrap();
        let art = db
            .insert_subject("Art", "#E74C3C", Timestamp::new(0))
            .unwrap();
        db.upsert_plan(clock.today(), math, 30).unwrap();
        db.upsert_plan(clock.today(), art, 0).unwrap();
        study(&db, &clock, math, 45 * 60);

        let plans = plans_with_progress(&db, clock.today()).unwrap();
        // Ordered by subject name
        assert_eq!(plans[0].subject_name, "Art");
        assert_eq!(plans[0].actual_minutes, 0);
        assert_eq!(plans[0].progress(), 0.0);
        assert_eq!(plans[1].subject_name, "Math");
        assert_eq!(plans[1].actual_minutes, 45);
        assert!(plans[1].is_complete());
        assert_eq!(plans[1].progress(), 1.0);
    }
}

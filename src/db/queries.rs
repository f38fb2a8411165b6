use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter};

use crate::models::{
    DailyPlan, NewSession, Note, NoteId, PlanId, PlanRow, Session, SessionId, Subject, SubjectId,
    SubjectSeconds, Timestamp,
};

fn subject_from_row(row: &Row<'_>) -> rusqlite::Result<Subject> {
    Ok(Subject {
        id: row.get(0)?,
        name: row.get(1)?,
        color: row.get(2)?,
        created_at: row.get(3)?,
    })
}

fn session_from_row(row: &Row<'_>) -> rusqlite::Result<Session> {
    Ok(Session {
        id: row.get(0)?,
        subject_id: row.get(1)?,
        started_at: row.get(2)?,
        ended_at: row.get(3)?,
        started_on: row.get(4)?,
        duration_secs: row.get(5)?,
        note: row.get(6)?,
    })
}

fn plan_from_row(row: &Row<'_>) -> rusqlite::Result<DailyPlan> {
    Ok(DailyPlan {
        id: row.get(0)?,
        date: row.get(1)?,
        subject_id: row.get(2)?,
        target_minutes: row.get(3)?,
    })
}

fn note_from_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        session_id: row.get(1)?,
        date: row.get(2)?,
        title: row.get(3)?,
        content: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

fn subject_seconds_from_row(row: &Row<'_>) -> rusqlite::Result<SubjectSeconds> {
    Ok(SubjectSeconds {
        subject_id: row.get(0)?,
        subject_name: row.get(1)?,
        subject_color: row.get(2)?,
        total_seconds: row.get(3)?,
        session_count: row.get(4)?,
    })
}

const SESSION_COLUMNS: &str =
    "id, subject_id, started_at, ended_at, started_on, duration_secs, note";

// ===== subjects =====

/// Get all subjects ordered by name
pub fn get_subjects(conn: &Connection) -> rusqlite::Result<Vec<Subject>> {
    let mut stmt =
        conn.prepare("SELECT id, name, color, created_at FROM subjects ORDER BY name, id")?;
    let subjects = stmt.query_map([], subject_from_row)?;
    subjects.collect()
}

/// Create a new subject
pub fn insert_subject(
    conn: &Connection,
    name: &str,
    color: &str,
    created_at: Timestamp,
) -> rusqlite::Result<SubjectId> {
    conn.execute(
        "INSERT INTO subjects (name, color, created_at) VALUES (?1, ?2, ?3)",
        params![name, color, created_at],
    )?;
    Ok(SubjectId::new(conn.last_insert_rowid()))
}

/// Rename and/or recolor a subject
pub fn update_subject(
    conn: &Connection,
    id: SubjectId,
    name: &str,
    color: &str,
) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE subjects SET name = ?1, color = ?2 WHERE id = ?3",
        params![name, color, id],
    )
}

/// Delete a subject together with the plans that reference it.
///
/// Callers check the session count first; sessions still referencing the
/// subject make the final delete fail on the foreign key.
pub fn delete_subject(conn: &Connection, id: SubjectId) -> rusqlite::Result<usize> {
    let tx = conn.unchecked_transaction()?;
    tx.execute("DELETE FROM daily_plans WHERE subject_id = ?1", params![id])?;
    let deleted = tx.execute("DELETE FROM subjects WHERE id = ?1", params![id])?;
    tx.commit()?;
    Ok(deleted)
}

/// Count sessions logged against a subject
pub fn session_count_for_subject(conn: &Connection, id: SubjectId) -> rusqlite::Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM study_sessions WHERE subject_id = ?1",
        params![id],
        |row| row.get(0),
    )
}

// ===== sessions =====

/// Save a finished session to the database
pub fn insert_session(conn: &Connection, session: &NewSession) -> rusqlite::Result<SessionId> {
    conn.execute(
        "INSERT INTO study_sessions
            (subject_id, started_at, ended_at, started_on, duration_secs, note)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            session.subject_id,
            session.started_at.timestamp(),
            session.ended_at.timestamp(),
            session.started_on(),
            session.duration_secs,
            session.note,
        ],
    )?;
    Ok(SessionId::new(conn.last_insert_rowid()))
}

/// Get sessions that started on the given local date, newest first
pub fn get_sessions_for_date(conn: &Connection, date: NaiveDate) -> rusqlite::Result<Vec<Session>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {SESSION_COLUMNS} FROM study_sessions
         WHERE started_on = ?1
         ORDER BY started_at DESC, id DESC"
    ))?;
    let sessions = stmt.query_map(params![date], session_from_row)?;
    sessions.collect()
}

/// Get sessions that started within `start..=end`, newest first
pub fn get_sessions_in_range(
    conn: &Connection,
    start: NaiveDate,
    end: NaiveDate,
) -> rusqlite::Result<Vec<Session>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {SESSION_COLUMNS} FROM study_sessions
         WHERE started_on BETWEEN ?1 AND ?2
         ORDER BY started_at DESC, id DESC"
    ))?;
    let sessions = stmt.query_map(params![start, end], session_from_row)?;
    sessions.collect()
}

/// Total seconds studied for one subject on one date
pub fn total_seconds_for_subject_on_date(
    conn: &Connection,
    subject_id: SubjectId,
    date: NaiveDate,
) -> rusqlite::Result<i64> {
    conn.query_row(
        "SELECT COALESCE(SUM(duration_secs), 0) FROM study_sessions
         WHERE subject_id = ?1 AND started_on = ?2",
        params![subject_id, date],
        |row| row.get(0),
    )
}

/// Total seconds studied across all subjects on one date
pub fn total_seconds_on_date(conn: &Connection, date: NaiveDate) -> rusqlite::Result<i64> {
    conn.query_row(
        "SELECT COALESCE(SUM(duration_secs), 0) FROM study_sessions WHERE started_on = ?1",
        params![date],
        |row| row.get(0),
    )
}

/// Total seconds per date for the dates that have any sessions
pub fn total_seconds_by_date(
    conn: &Connection,
    dates: &[NaiveDate],
) -> rusqlite::Result<Vec<(NaiveDate, i64)>> {
    if dates.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; dates.len()].join(", ");
    let mut stmt = conn.prepare(&format!(
        "SELECT started_on, SUM(duration_secs) FROM study_sessions
         WHERE started_on IN ({placeholders})
         GROUP BY started_on"
    ))?;
    let rows = stmt.query_map(params_from_iter(dates.iter()), |row| {
        Ok((row.get(0)?, row.get(1)?))
    })?;
    rows.collect()
}

/// Seconds and session counts for every subject, optionally within `start..=end`.
///
/// The date filter sits in the join condition so subjects without matching
/// sessions still appear with zero totals.
pub fn seconds_by_subject(
    conn: &Connection,
    range: Option<(NaiveDate, NaiveDate)>,
) -> rusqlite::Result<Vec<SubjectSeconds>> {
    let range_filter = if range.is_some() {
        "AND ss.started_on BETWEEN ?1 AND ?2"
    } else {
        ""
    };
    let mut stmt = conn.prepare(&format!(
        "SELECT s.id, s.name, s.color,
                COALESCE(SUM(ss.duration_secs), 0) AS total,
                COUNT(ss.id)
         FROM subjects s
         LEFT JOIN study_sessions ss ON ss.subject_id = s.id {range_filter}
         GROUP BY s.id
         ORDER BY total DESC, s.name"
    ))?;

    let totals = match range {
        Some((start, end)) => stmt.query_map(params![start, end], subject_seconds_from_row)?,
        None => stmt.query_map([], subject_seconds_from_row)?,
    };
    totals.collect()
}

// ===== plans =====

/// Get plans for a date joined with their subject, ordered by subject name
pub fn get_plans_for_date(conn: &Connection, date: NaiveDate) -> rusqlite::Result<Vec<PlanRow>> {
    let mut stmt = conn.prepare(
        "SELECT dp.id, dp.date, dp.subject_id, dp.target_minutes, s.name, s.color
         FROM daily_plans dp
         JOIN subjects s ON s.id = dp.subject_id
         WHERE dp.date = ?1
         ORDER BY s.name, dp.id",
    )?;
    let plans = stmt.query_map(params![date], |row| {
        Ok(PlanRow {
            plan: plan_from_row(row)?,
            subject_name: row.get(4)?,
            subject_color: row.get(5)?,
        })
    })?;
    plans.collect()
}

/// Insert a plan, or replace the target of the existing plan for (date, subject)
pub fn upsert_plan(
    conn: &Connection,
    date: NaiveDate,
    subject_id: SubjectId,
    target_minutes: i64,
) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT INTO daily_plans (date, subject_id, target_minutes) VALUES (?1, ?2, ?3)
         ON CONFLICT(date, subject_id) DO UPDATE SET target_minutes = excluded.target_minutes",
        params![date, subject_id, target_minutes],
    )
}

/// Delete a plan by ID
pub fn delete_plan(conn: &Connection, id: PlanId) -> rusqlite::Result<usize> {
    conn.execute("DELETE FROM daily_plans WHERE id = ?1", params![id])
}

// ===== notes =====

/// Get all notes, most recently edited first
pub fn get_notes(conn: &Connection) -> rusqlite::Result<Vec<Note>> {
    let mut stmt = conn.prepare(
        "SELECT id, session_id, date, title, content, created_at, updated_at
         FROM notes ORDER BY updated_at DESC, id DESC",
    )?;
    let notes = stmt.query_map([], note_from_row)?;
    notes.collect()
}

/// Get a single note by ID
pub fn get_note(conn: &Connection, id: NoteId) -> rusqlite::Result<Option<Note>> {
    conn.query_row(
        "SELECT id, session_id, date, title, content, created_at, updated_at
         FROM notes WHERE id = ?1",
        params![id],
        note_from_row,
    )
    .optional()
}

/// Create a note; `created_at` and `updated_at` both start at `now`
pub fn insert_note(
    conn: &Connection,
    session_id: Option<SessionId>,
    date: NaiveDate,
    title: &str,
    content: &str,
    now: Timestamp,
) -> rusqlite::Result<NoteId> {
    conn.execute(
        "INSERT INTO notes (session_id, date, title, content, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
        params![session_id, date, title, content, now],
    )?;
    Ok(NoteId::new(conn.last_insert_rowid()))
}

/// Replace a note's title and content
pub fn update_note(
    conn: &Connection,
    id: NoteId,
    title: &str,
    content: &str,
    updated_at: Timestamp,
) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE notes SET title = ?1, content = ?2, updated_at = ?3 WHERE id = ?4",
        params![title, content, updated_at, id],
    )
}

/// Delete a note by ID
pub fn delete_note(conn: &Connection, id: NoteId) -> rusqlite::Result<usize> {
    conn.execute("DELETE FROM notes WHERE id = ?1", params![id])
}

// ===== data management =====

/// Every session in insertion order
pub fn get_all_sessions(conn: &Connection) -> rusqlite::Result<Vec<Session>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {SESSION_COLUMNS} FROM study_sessions ORDER BY id"
    ))?;
    let sessions = stmt.query_map([], session_from_row)?;
    sessions.collect()
}

/// Every plan in insertion order
pub fn get_all_plans(conn: &Connection) -> rusqlite::Result<Vec<DailyPlan>> {
    let mut stmt =
        conn.prepare("SELECT id, date, subject_id, target_minutes FROM daily_plans ORDER BY id")?;
    let plans = stmt.query_map([], plan_from_row)?;
    plans.collect()
}

/// Clear all four tables, dependents first
pub fn reset_all(conn: &Connection) -> rusqlite::Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(
        "DELETE FROM notes;
         DELETE FROM study_sessions;
         DELETE FROM daily_plans;
         DELETE FROM subjects;",
    )?;
    tx.commit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::models::DurationSecs;
    use chrono::{DateTime, Local, TimeZone};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn local(y: i32, m: u32, d: u32, h: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, h, 0, 0).single().unwrap()
    }

    fn session(subject_id: SubjectId, start: DateTime<Local>, secs: i64) -> NewSession {
        NewSession {
            subject_id,
            started_at: start,
            ended_at: start + chrono::Duration::seconds(secs),
            duration_secs: DurationSecs::new(secs),
            note: String::new(),
        }
    }

    #[test]
    fn test_save_and_load_session() {
        let db = Database::open_in_memory().unwrap();
        let math = insert_subject(&db.conn, "Math", "#4A90D9", Timestamp::new(0)).unwrap();

        let mut new = session(math, local(2026, 10, 14, 9), 1500);
        new.note = "chapter 3".to_string();
        let id = insert_session(&db.conn, &new).unwrap();
        assert!(i64::from(id) > 0);

        let sessions = get_sessions_for_date(&db.conn, date(2026, 10, 14)).unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].duration_secs, DurationSecs::new(1500));
        assert_eq!(sessions[0].note, "chapter 3");
        assert_eq!(sessions[0].started_on, date(2026, 10, 14));
        assert!(get_sessions_for_date(&db.conn, date(2026, 10, 15)).unwrap().is_empty());
    }

    #[test]
    fn test_session_requires_existing_subject() {
        let db = Database::open_in_memory().unwrap();
        let orphan = session(SubjectId::new(42), local(2026, 10, 14, 9), 60);
        assert!(insert_session(&db.conn, &orphan).is_err());
    }

    #[test]
    fn test_sessions_in_range_is_inclusive() {
        let db = Database::open_in_memory().unwrap();
        let math = insert_subject(&db.conn, "Math", "#4A90D9", Timestamp::new(0)).unwrap();
        for day in [12, 13, 14, 15] {
            insert_session(&db.conn, &session(math, local(2026, 10, day, 9), 60)).unwrap();
        }

        let sessions =
            get_sessions_in_range(&db.conn, date(2026, 10, 13), date(2026, 10, 14)).unwrap();
        assert_eq!(sessions.len(), 2);
        // Newest first
        assert_eq!(sessions[0].started_on, date(2026, 10, 14));
    }

    #[test]
    fn test_totals_by_subject_and_date() {
        let db = Database::open_in_memory().unwrap();
        let math = insert_subject(&db.conn, "Math", "#4A90D9", Timestamp::new(0)).unwrap();
        let art = insert_subject(&db.conn, "Art", "#E74C3C", Timestamp::new(0)).unwrap();

        insert_session(&db.conn, &session(math, local(2026, 10, 14, 9), 100)).unwrap();
        insert_session(&db.conn, &session(math, local(2026, 10, 14, 11), 50)).unwrap();
        insert_session(&db.conn, &session(art, local(2026, 10, 14, 13), 30)).unwrap();
        insert_session(&db.conn, &session(math, local(2026, 10, 15, 9), 999)).unwrap();

        let today = date(2026, 10, 14);
        assert_eq!(total_seconds_for_subject_on_date(&db.conn, math, today).unwrap(), 150);
        assert_eq!(total_seconds_for_subject_on_date(&db.conn, art, today).unwrap(), 30);
        assert_eq!(total_seconds_on_date(&db.conn, today).unwrap(), 180);
        assert_eq!(total_seconds_on_date(&db.conn, date(2026, 10, 1)).unwrap(), 0);

        let mut by_date =
            total_seconds_by_date(&db.conn, &[date(2026, 10, 15), today, date(2026, 10, 16)])
                .unwrap();
        by_date.sort();
        assert_eq!(by_date, vec![(today, 180), (date(2026, 10, 15), 999)]);
    }

    #[test]
    fn test_seconds_by_subject_includes_idle_subjects() {
        let db = Database::open_in_memory().unwrap();
        let math = insert_subject(&db.conn, "Math", "#4A90D9", Timestamp::new(0)).unwrap();
        insert_subject(&db.conn, "Art", "#E74C3C", Timestamp::new(0)).unwrap();
        insert_session(&db.conn, &session(math, local(2026, 10, 14, 9), 120)).unwrap();
        insert_session(&db.conn, &session(math, local(2026, 9, 1, 9), 600)).unwrap();

        let all = seconds_by_subject(&db.conn, None).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].subject_name, "Math");
        assert_eq!(all[0].total_seconds, 720);
        assert_eq!(all[0].session_count, 2);
        assert_eq!(all[1].subject_name, "Art");
        assert_eq!(all[1].total_seconds, 0);
        assert_eq!(all[1].session_count, 0);

        let week =
            seconds_by_subject(&db.conn, Some((date(2026, 10, 12), date(2026, 10, 18)))).unwrap();
        assert_eq!(week.len(), 2);
        assert_eq!(week[0].total_seconds, 120);
        assert_eq!(week[0].session_count, 1);
    }

    #[test]
    fn test_upsert_plan_replaces_target() {
        let db = Database::open_in_memory().unwrap();
        let math = insert_subject(&db.conn, "Math", "#4A90D9", Timestamp::new(0)).unwrap();
        let today = date(2026, 10, 14);

        upsert_plan(&db.conn, today, math, 30).unwrap();
        upsert_plan(&db.conn, today, math, 45).unwrap();

        let plans = get_plans_for_date(&db.conn, today).unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].plan.target_minutes, 45);
        assert_eq!(plans[0].subject_name, "Math");
        assert_eq!(get_all_plans(&db.conn).unwrap().len(), 1);
    }

    #[test]
    fn test_delete_subject_removes_its_plans() {
        let db = Database::open_in_memory().unwrap();
        let math = insert_subject(&db.conn, "Math", "#4A90D9", Timestamp::new(0)).unwrap();
        upsert_plan(&db.conn, date(2026, 10, 14), math, 30).unwrap();
        upsert_plan(&db.conn, date(2026, 10, 15), math, 30).unwrap();

        assert_eq!(delete_subject(&db.conn, math).unwrap(), 1);
        assert!(get_subjects(&db.conn).unwrap().is_empty());
        assert!(get_all_plans(&db.conn).unwrap().is_empty());
    }

    #[test]
    fn test_delete_subject_with_sessions_fails_and_keeps_plans() {
        let db = Database::open_in_memory().unwrap();
        let math = insert_subject(&db.conn, "Math", "#4A90D9", Timestamp::new(0)).unwrap();
        upsert_plan(&db.conn, date(2026, 10, 14), math, 30).unwrap();
        insert_session(&db.conn, &session(math, local(2026, 10, 14, 9), 60)).unwrap();

        assert!(delete_subject(&db.conn, math).is_err());
        assert_eq!(get_all_plans(&db.conn).unwrap().len(), 1);
        assert_eq!(session_count_for_subject(&db.conn, math).unwrap(), 1);
    }

    #[test]
    fn test_note_crud() {
        let db = Database::open_in_memory().unwrap();
        let today = date(2026, 10, 14);

        let first = insert_note(&db.conn, None, today, "Ideas", "", Timestamp::new(100)).unwrap();
        let second = insert_note(&db.conn, None, today, "Todo", "x", Timestamp::new(200)).unwrap();

        let notes = get_notes(&db.conn).unwrap();
        assert_eq!(notes.iter().map(|n| n.id).collect::<Vec<_>>(), vec![second, first]);

        update_note(&db.conn, first, "Ideas", "more", Timestamp::new(300)).unwrap();
        let notes = get_notes(&db.conn).unwrap();
        assert_eq!(notes[0].id, first);
        assert_eq!(notes[0].content, "more");
        assert_eq!(notes[0].created_at, Timestamp::new(100));
        assert_eq!(notes[0].updated_at, Timestamp::new(300));

        assert_eq!(delete_note(&db.conn, second).unwrap(), 1);
        assert!(get_note(&db.conn, second).unwrap().is_none());
    }

    #[test]
    fn test_reset_all_clears_every_table() {
        let db = Database::open_in_memory().unwrap();
        let math = insert_subject(&db.conn, "Math", "#4A90D9", Timestamp::new(0)).unwrap();
        let sid = insert_session(&db.conn, &session(math, local(2026, 10, 14, 9), 60)).unwrap();
        upsert_plan(&db.conn, date(2026, 10, 14), math, 30).unwrap();
        insert_note(&db.conn, Some(sid), date(2026, 10, 14), "n", "", Timestamp::new(0)).unwrap();

        reset_all(&db.conn).unwrap();

        assert!(get_subjects(&db.conn).unwrap().is_empty());
        assert!(get_all_sessions(&db.conn).unwrap().is_empty());
        assert!(get_all_plans(&db.conn).unwrap().is_empty());
        assert!(get_notes(&db.conn).unwrap().is_empty());
    }
}

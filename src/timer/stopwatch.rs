use chrono::{DateTime, Local};
use std::time::Instant;

use crate::clock::Clock;
use crate::config::MIN_SESSION_SECS;
use crate::db::DatabaseOps;
use crate::error::{Result, StudyError};
use crate::models::{DurationSecs, NewSession, Session, SubjectId};

use super::Ticker;

/// Where the stopwatch is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerStatus {
    #[default]
    Idle,
    Running,
    Paused,
}

impl TimerStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TimerStatus::Idle => "READY",
            TimerStatus::Running => "STUDYING",
            TimerStatus::Paused => "PAUSED",
        }
    }
}

/// What the stopwatch is tracking while not idle
#[derive(Debug, Clone, PartialEq, Eq)]
struct Tracked {
    subject_id: SubjectId,
    started_at: DateTime<Local>,
    note: String,
}

/// The study stopwatch state machine.
///
/// Elapsed time only grows through [`StudyTimer::tick`], one second per
/// call, and only while running. The embedded [`Ticker`] is armed while
/// running and cancelled on every other transition.
#[derive(Debug, Default)]
pub struct StudyTimer {
    status: TimerStatus,
    tracked: Option<Tracked>,
    elapsed_secs: i64,
    ticker: Ticker,
}

impl StudyTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn is_idle(&self) -> bool {
        self.status == TimerStatus::Idle
    }

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    pub fn is_paused(&self) -> bool {
        self.status == TimerStatus::Paused
    }

    /// Active seconds counted so far
    pub fn elapsed_secs(&self) -> i64 {
        self.elapsed_secs
    }

    pub fn subject_id(&self) -> Option<SubjectId> {
        self.tracked.as_ref().map(|t| t.subject_id)
    }

    pub fn started_at(&self) -> Option<DateTime<Local>> {
        self.tracked.as_ref().map(|t| t.started_at)
    }

    pub fn note(&self) -> &str {
        self.tracked.as_ref().map_or("", |t| t.note.as_str())
    }

    /// Begin timing a subject from zero.
    ///
    /// Fails with `NoSubjectSelected` without a subject and with `TimerActive`
    /// if a session is already running or paused; state is untouched then.
    pub fn start(&mut self, subject_id: Option<SubjectId>, clock: &dyn Clock) -> Result<()> {
        if !self.is_idle() {
            return Err(StudyError::TimerActive);
        }
        let subject_id = subject_id.ok_or(StudyError::NoSubjectSelected)?;

        self.tracked = Some(Tracked {
            subject_id,
            started_at: clock.now_datetime(),
            note: String::new(),
        });
        self.elapsed_secs = 0;
        self.status = TimerStatus::Running;
        self.ticker.arm(clock.instant());
        log::debug!("timer started for subject {}", subject_id);
        Ok(())
    }

    /// Freeze elapsed time
    pub fn pause(&mut self) {
        if self.is_running() {
            self.ticker.cancel();
            self.status = TimerStatus::Paused;
            log::debug!("timer paused at {}s", self.elapsed_secs);
        }
    }

    /// Continue counting from the frozen elapsed value
    pub fn resume(&mut self, clock: &dyn Clock) {
        if self.is_paused() {
            self.ticker.arm(clock.instant());
            self.status = TimerStatus::Running;
            log::debug!("timer resumed at {}s", self.elapsed_secs);
        }
    }

    /// Count one second of study time
    pub fn tick(&mut self) {
        if self.is_running() {
            self.elapsed_secs += 1;
        }
    }

    /// Deliver every tick the ticker has due at `now`
    pub fn pump(&mut self, now: Instant) -> u32 {
        let due = self.ticker.due(now);
        for _ in 0..due {
            self.tick();
        }
        due
    }

    /// Replace the in-flight note; ignored while idle
    pub fn set_note(&mut self, text: impl Into<String>) {
        if let Some(tracked) = self.tracked.as_mut() {
            tracked.note = text.into();
        }
    }

    /// End the session, persisting it when long enough.
    ///
    /// Returns `Ok(None)` when idle or when fewer than `MIN_SESSION_SECS`
    /// were counted. If the insert fails the timer keeps its state.
    pub fn stop(&mut self, db: &impl DatabaseOps, clock: &dyn Clock) -> Result<Option<Session>> {
        let Some(tracked) = self.tracked.as_ref() else {
            return Ok(None);
        };

        if self.elapsed_secs < MIN_SESSION_SECS {
            log::info!("discarding {}s session (below minimum)", self.elapsed_secs);
            self.clear();
            return Ok(None);
        }

        let new = NewSession {
            subject_id: tracked.subject_id,
            started_at: tracked.started_at,
            ended_at: clock.now_datetime(),
            duration_secs: DurationSecs::new(self.elapsed_secs),
            note: tracked.note.clone(),
        };
        let id = db.insert_session(&new)?;
        log::info!(
            "saved session {} ({}s) for subject {}",
            id,
            new.duration_secs.as_secs(),
            new.subject_id
        );

        self.clear();
        Ok(Some(new.into_session(id)))
    }

    /// Discard the session without saving
    pub fn reset(&mut self) {
        if !self.is_idle() {
            log::debug!("timer reset, discarding {}s", self.elapsed_secs);
        }
        self.clear();
    }

    fn clear(&mut self) {
        self.ticker.cancel();
        self.status = TimerStatus::Idle;
        self.tracked = None;
        self.elapsed_secs = 0;
    }
}

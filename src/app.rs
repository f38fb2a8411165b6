use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{DefaultTerminal, Frame, widgets::ListState};
use std::time::{Duration, Instant};

use crate::clock::{Clock, SystemClock};
use crate::config::{MIN_SESSION_SECS, TICK_RATE, get_export_path};
use crate::db::{Database, DatabaseOps, export_all};
use crate::error::{Result, StudyError};
use crate::event::{AppEvent, poll_event};
use crate::form::{Form, FormKind};
use crate::format::format_duration;
use crate::models::{DailyStat, NoteId, SESSION_NOTE_TITLE, Subject, SubjectId, SubjectStat};
use crate::stats::{daily_total_minutes, subject_stats, week_dates, weekly_stats};
use crate::store::{NoteStore, PlanStore, SessionStore, SubjectStore};
use crate::timer::StudyTimer;
use crate::ui::{
    render_confirm_modal, render_form_modal, render_notes, render_plans, render_stats,
    render_subjects, render_timer,
};
use crate::validation::{
    ValidationResult, parse_target_minutes, require_subject, validate_new_subject_name,
    validate_note, validate_update_subject_name,
};

/// How long a footer notification stays up
const NOTIFICATION_TTL: Duration = Duration::from_secs(4);

/// The current view/screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Timer,
    Plans,
    Notes,
    Stats,
    Subjects,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Timer,
        View::Plans,
        View::Notes,
        View::Stats,
        View::Subjects,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            View::Timer => "Timer",
            View::Plans => "Plans",
            View::Notes => "Notes",
            View::Stats => "Stats",
            View::Subjects => "Subjects",
        }
    }

    fn index(&self) -> usize {
        View::ALL.iter().position(|v| v == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        View::ALL[(self.index() + 1) % View::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        View::ALL[(self.index() + View::ALL.len() - 1) % View::ALL.len()]
    }
}

/// Which range the per-subject breakdown covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatsRange {
    #[default]
    Week,
    AllTime,
}

impl StatsRange {
    pub fn toggle(&self) -> Self {
        match self {
            StatsRange::Week => StatsRange::AllTime,
            StatsRange::AllTime => StatsRange::Week,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatsRange::Week => "This Week",
            StatsRange::AllTime => "All Time",
        }
    }
}

/// A destructive action waiting for a yes/no
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    DiscardTimer,
    DeleteSubject(SubjectId),
    DeleteNote(NoteId),
    ResetAll,
}

impl ConfirmAction {
    pub fn prompt(&self) -> &'static str {
        match self {
            ConfirmAction::DiscardTimer => "Discard the running session?",
            ConfirmAction::DeleteSubject(_) => {
                "Delete this subject? Subjects with sessions cannot be deleted."
            }
            ConfirmAction::DeleteNote(_) => "Delete this note?",
            ConfirmAction::ResetAll => "Delete ALL subjects, sessions, plans and notes?",
        }
    }
}

/// The current modal state - only one modal can be open at a time
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Modal {
    #[default]
    None,
    Form(Form),
    Confirm(ConfirmAction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    shown_at: Instant,
}

/// Everything loaded from the database for display
#[derive(Debug, Default)]
pub struct AppData {
    pub today: Option<NaiveDate>,
    pub subjects: SubjectStore,
    pub sessions: SessionStore,
    pub plans: PlanStore,
    pub notes: NoteStore,
    pub today_minutes: i64,
    pub week: Vec<DailyStat>,
    pub subject_stats: Vec<SubjectStat>,
    pub stats_range: StatsRange,
}

/// Selection state for each list view
#[derive(Debug, Default)]
pub struct ListStates {
    pub plans: ListState,
    pub notes: ListState,
    pub subjects: ListState,
}

/// The main application state
pub struct App {
    pub running: bool,
    pub view: View,
    pub modal: Modal,
    pub timer: StudyTimer,
    /// Subject picked on the timer view
    pub selected_subject: usize,
    pub data: AppData,
    pub lists: ListStates,
    pub notification: Option<Notification>,
    clock: Box<dyn Clock>,
    db: Database,
}

impl App {
    /// Open the on-disk database and load everything
    pub fn new() -> Result<Self> {
        Ok(Self::with_database(Database::open()?, Box::new(SystemClock)))
    }

    pub fn with_database(db: Database, clock: Box<dyn Clock>) -> Self {
        let mut app = Self {
            running: false,
            view: View::Timer,
            modal: Modal::None,
            timer: StudyTimer::new(),
            selected_subject: 0,
            data: AppData::default(),
            lists: ListStates::default(),
            notification: None,
            clock,
            db,
        };
        app.refresh_data();
        app
    }

    /// The subject the timer view has selected, if any exist
    pub fn selected_subject(&self) -> Option<&Subject> {
        self.data.subjects.subjects.get(self.selected_subject)
    }

    /// The subject the running/paused timer is tracking
    pub fn timer_subject(&self) -> Option<&Subject> {
        self.timer
            .subject_id()
            .and_then(|id| self.data.subjects.get(id))
    }

    /// Run the application's main loop
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;

        while self.running {
            terminal.draw(|frame| self.render(frame))?;

            match poll_event(TICK_RATE)? {
                Some(AppEvent::Key(key)) => self.handle_key_event(key),
                Some(AppEvent::Tick) => self.handle_tick(),
                Some(AppEvent::Resize) | None => {}
            }
            // Keys can starve ticks, so the stopwatch is pumped every pass
            self.timer.pump(self.clock.instant());
        }

        Ok(())
    }

    /// Render the current view
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        match self.view {
            View::Timer => render_timer(frame, area, self),
            View::Plans => render_plans(frame, area, self),
            View::Notes => render_notes(frame, area, self),
            View::Stats => render_stats(frame, area, self),
            View::Subjects => render_subjects(frame, area, self),
        }

        // Render modal on top if visible
        match &self.modal {
            Modal::None => {}
            Modal::Form(form) => {
                render_form_modal(frame, area, form, &self.data.subjects.subjects)
            }
            Modal::Confirm(action) => render_confirm_modal(frame, area, *action),
        }
    }

    /// Handle a key event
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        // Handle modal input first
        match self.modal {
            Modal::Form(_) => {
                self.handle_form_key(key);
                return;
            }
            Modal::Confirm(action) => {
                self.handle_confirm_key(key, action);
                return;
            }
            Modal::None => {}
        }

        // Global keys
        match (key.modifiers, key.code) {
            (_, KeyCode::Char('q')) | (_, KeyCode::Esc) => self.quit(),
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => self.quit(),
            (_, KeyCode::Tab) => self.view = self.view.next(),
            (_, KeyCode::BackTab) => self.view = self.view.prev(),
            (_, KeyCode::Char(c @ '1'..='5')) => {
                let idx = c as usize - '1' as usize;
                self.view = View::ALL[idx];
            }
            _ => match self.view {
                View::Timer => self.handle_timer_key(key),
                View::Plans => self.handle_plans_key(key),
                View::Notes => self.handle_notes_key(key),
                View::Stats => self.handle_stats_key(key),
                View::Subjects => self.handle_subjects_key(key),
            },
        }
    }

    fn handle_timer_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') if self.timer.is_idle() => {
                let len = self.data.subjects.subjects.len();
                if len > 0 {
                    self.selected_subject = (self.selected_subject + len - 1) % len;
                }
            }
            KeyCode::Right | KeyCode::Char('l') if self.timer.is_idle() => {
                let len = self.data.subjects.subjects.len();
                if len > 0 {
                    self.selected_subject = (self.selected_subject + 1) % len;
                }
            }
            KeyCode::Char('s') => {
                if self.timer.is_paused() {
                    self.timer.resume(self.clock.as_ref());
                } else if self.timer.is_idle() {
                    self.start_timer();
                }
            }
            KeyCode::Char('p') => self.timer.pause(),
            KeyCode::Char('x') if !self.timer.is_idle() => self.stop_timer(),
            KeyCode::Char('r') if !self.timer.is_idle() => {
                self.modal = Modal::Confirm(ConfirmAction::DiscardTimer);
            }
            KeyCode::Char('e') if !self.timer.is_idle() => {
                self.modal = Modal::Form(Form::timer_note(self.timer.note()));
            }
            KeyCode::Char('n') => self.modal = Modal::Form(Form::new_subject()),
            _ => {}
        }
    }

    fn handle_plans_key(&mut self, key: KeyEvent) {
        let len = self.data.plans.plans.len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => select_next(&mut self.lists.plans, len),
            KeyCode::Char('k') | KeyCode::Up => select_prev(&mut self.lists.plans, len),
            KeyCode::Char('a') => {
                if self.data.subjects.subjects.is_empty() {
                    self.notify(
                        NotificationLevel::Warning,
                        "No subjects: create one first with [n] on the timer view",
                    );
                } else {
                    self.modal = Modal::Form(Form::new_plan(self.selected_subject));
                }
            }
            KeyCode::Char('d') => {
                if let Some(plan) = selected(&self.lists.plans, &self.data.plans.plans) {
                    let id = plan.plan.id;
                    let result = self.data.plans.remove(&self.db, id);
                    self.after_mutation(result, "Failed to delete plan");
                }
            }
            _ => {}
        }
    }

    fn handle_notes_key(&mut self, key: KeyEvent) {
        let len = self.data.notes.notes.len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => select_next(&mut self.lists.notes, len),
            KeyCode::Char('k') | KeyCode::Up => select_prev(&mut self.lists.notes, len),
            KeyCode::Char('a') => self.modal = Modal::Form(Form::new_note()),
            KeyCode::Enter | KeyCode::Char('e') => {
                if let Some(note) = selected(&self.lists.notes, &self.data.notes.notes) {
                    self.modal = Modal::Form(Form::edit_note(note));
                }
            }
            KeyCode::Char('d') => {
                if let Some(note) = selected(&self.lists.notes, &self.data.notes.notes) {
                    self.modal = Modal::Confirm(ConfirmAction::DeleteNote(note.id));
                }
            }
            _ => {}
        }
    }

    fn handle_stats_key(&mut self, key: KeyEvent) {
        if let KeyCode::Char('w') | KeyCode::Left | KeyCode::Right = key.code {
            self.data.stats_range = self.data.stats_range.toggle();
            self.refresh_data();
        }
    }

    fn handle_subjects_key(&mut self, key: KeyEvent) {
        let len = self.data.subjects.subjects.len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => select_next(&mut self.lists.subjects, len),
            KeyCode::Char('k') | KeyCode::Up => select_prev(&mut self.lists.subjects, len),
            KeyCode::Char('a') | KeyCode::Char('n') => {
                self.modal = Modal::Form(Form::new_subject());
            }
            KeyCode::Enter | KeyCode::Char('e') => {
                if let Some(subject) = selected(&self.lists.subjects, &self.data.subjects.subjects)
                {
                    self.modal = Modal::Form(Form::edit_subject(subject));
                }
            }
            KeyCode::Char('d') => {
                if let Some(subject) = selected(&self.lists.subjects, &self.data.subjects.subjects)
                {
                    self.modal = Modal::Confirm(ConfirmAction::DeleteSubject(subject.id));
                }
            }
            KeyCode::Char('x') => self.export_data(),
            KeyCode::Char('R') => self.modal = Modal::Confirm(ConfirmAction::ResetAll),
            _ => {}
        }
    }

    /// Handle form modal keys
    fn handle_form_key(&mut self, key: KeyEvent) {
        let subject_count = self.data.subjects.subjects.len();
        let Modal::Form(form) = &mut self.modal else {
            return;
        };

        match key.code {
            KeyCode::Esc => self.modal = Modal::None,
            KeyCode::Tab | KeyCode::Down | KeyCode::Up => form.next_field(),
            KeyCode::Left => form.cycle(false, subject_count),
            KeyCode::Right => form.cycle(true, subject_count),
            KeyCode::Backspace => form.pop_char(),
            KeyCode::Enter => self.submit_form(),
            KeyCode::Char(c) => form.push_char(c),
            _ => {}
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent, action: ConfirmAction) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                self.modal = Modal::None;
                self.confirm(action);
            }
            KeyCode::Char('n') | KeyCode::Esc => self.modal = Modal::None,
            _ => {}
        }
    }

    fn confirm(&mut self, action: ConfirmAction) {
        match action {
            ConfirmAction::DiscardTimer => {
                self.timer.reset();
                self.notify(NotificationLevel::Info, "Session discarded");
            }
            ConfirmAction::DeleteSubject(id) if self.timer.subject_id() == Some(id) => self.notify(
                NotificationLevel::Warning,
                "Cannot delete: the timer is tracking this subject",
            ),
            ConfirmAction::DeleteSubject(id) => match self.data.subjects.remove(&self.db, id) {
                Ok(true) => {
                    self.refresh_data();
                    self.notify(NotificationLevel::Info, "Subject deleted");
                }
                Ok(false) => self.notify(
                    NotificationLevel::Warning,
                    "Cannot delete: this subject has recorded sessions",
                ),
                Err(e) => self.report_error("Failed to delete subject", e),
            },
            ConfirmAction::DeleteNote(id) => {
                let result = self.data.notes.remove(&self.db, id);
                self.after_mutation(result, "Failed to delete note");
            }
            ConfirmAction::ResetAll => {
                if !self.timer.is_idle() {
                    self.timer.reset();
                }
                match self.db.reset_all() {
                    Ok(()) => {
                        log::warn!("all data reset");
                        self.refresh_data();
                        self.notify(NotificationLevel::Info, "All data has been reset");
                    }
                    Err(e) => self.report_error("Failed to reset data", e),
                }
            }
        }
    }

    /// Validate and apply the open form
    fn submit_form(&mut self) {
        let Modal::Form(form) = &self.modal else {
            return;
        };
        let form = form.clone();

        match self.apply_form(&form) {
            Ok(Ok(())) => self.modal = Modal::None,
            Ok(Err(message)) => {
                if let Modal::Form(open) = &mut self.modal {
                    open.error = Some(message);
                }
            }
            Err(e) => {
                self.modal = Modal::None;
                self.report_error("Failed to save", e);
            }
        }
    }

    /// Storage errors are the outer `Result`; validation failures the inner one
    fn apply_form(&mut self, form: &Form) -> Result<ValidationResult> {
        let clock = self.clock.as_ref();
        match form.kind {
            FormKind::NewSubject => {
                let name = form.value(0);
                if let Err(message) = validate_new_subject_name(name, &self.data.subjects.subjects)
                {
                    return Ok(Err(message));
                }
                let id = self.data.subjects.add(&self.db, clock, name, &form.color)?;
                // Select the new subject on the timer view
                if let Some(idx) = self.data.subjects.subjects.iter().position(|s| s.id == id) {
                    self.selected_subject = idx;
                }
            }
            FormKind::EditSubject(id) => {
                let name = form.value(0);
                if let Err(message) =
                    validate_update_subject_name(name, &self.data.subjects.subjects, id)
                {
                    return Ok(Err(message));
                }
                self.data.subjects.update(&self.db, id, name, &form.color)?;
            }
            FormKind::NewPlan => {
                let subject = self
                    .data
                    .subjects
                    .subjects
                    .get(form.subject_index)
                    .map(|s| s.id);
                let subject_id = match require_subject(subject) {
                    Ok(id) => id,
                    Err(message) => return Ok(Err(message)),
                };
                let target = match parse_target_minutes(form.value(0)) {
                    Ok(target) => target,
                    Err(message) => return Ok(Err(message)),
                };
                self.data
                    .plans
                    .add(&self.db, subject_id, target, clock.today())?;
            }
            FormKind::NewNote => {
                let (title, content) = (form.value(0), form.value(1));
                if let Err(message) = validate_note(title, content) {
                    return Ok(Err(message));
                }
                self.data
                    .notes
                    .add(&self.db, clock, title, content, None)?;
            }
            FormKind::EditNote(id) => {
                let (title, content) = (form.value(0), form.value(1));
                if let Err(message) = validate_note(title, content) {
                    return Ok(Err(message));
                }
                self.data.notes.update(&self.db, clock, id, title, content)?;
            }
            FormKind::TimerNote => self.timer.set_note(form.value(0)),
        }

        self.refresh_data();
        Ok(Ok(()))
    }

    fn start_timer(&mut self) {
        let subject = self.selected_subject().map(|s| s.id);
        match self.timer.start(subject, self.clock.as_ref()) {
            Ok(()) => {}
            Err(StudyError::NoSubjectSelected) => self.notify(
                NotificationLevel::Warning,
                "Pick a subject before starting (press [n] to create one)",
            ),
            Err(e) => self.report_error("Could not start timer", e),
        }
    }

    /// Stop and save, capturing a non-empty in-flight note as a linked note
    fn stop_timer(&mut self) {
        let clock = self.clock.as_ref();
        match self.timer.stop(&self.db, clock) {
            Ok(Some(session)) => {
                if !session.note.trim().is_empty()
                    && let Err(e) = self.data.notes.add(
                        &self.db,
                        clock,
                        SESSION_NOTE_TITLE,
                        session.note.trim(),
                        Some(session.id),
                    )
                {
                    self.report_error("Session saved but its note was not", e);
                    self.refresh_data();
                    return;
                }
                self.refresh_data();
                self.notify(
                    NotificationLevel::Info,
                    format!(
                        "Saved {} session",
                        format_duration(session.duration_secs.as_secs())
                    ),
                );
            }
            Ok(None) => self.notify(
                NotificationLevel::Warning,
                format!("Sessions under {}s are not saved", MIN_SESSION_SECS),
            ),
            Err(e) => self.report_error("Failed to save session", e),
        }
    }

    fn export_data(&mut self) {
        let result = export_all(&self.db, self.clock.as_ref()).and_then(|snapshot| {
            let path = get_export_path(self.clock.today())?;
            std::fs::write(&path, snapshot.to_json()?)?;
            Ok(path)
        });

        match result {
            Ok(path) => {
                log::info!("exported data to {}", path.display());
                self.notify(
                    NotificationLevel::Info,
                    format!("Exported to {}", path.display()),
                );
            }
            Err(e) => self.report_error("Export failed", e),
        }
    }

    /// Handle a timer tick
    fn handle_tick(&mut self) {
        if let Some(n) = &self.notification
            && n.shown_at.elapsed() >= NOTIFICATION_TTL
        {
            self.notification = None;
        }

        // A new calendar day starts fresh totals and plans
        if self.data.today != Some(self.clock.today()) {
            self.refresh_data();
        }
    }

    /// Reload every collection and derived statistic
    pub fn refresh_data(&mut self) {
        if let Err(e) = self.load_all() {
            self.report_error("Failed to load data", e);
        }
    }

    fn load_all(&mut self) -> Result<()> {
        let today = self.clock.today();
        self.data.today = Some(today);

        self.data.subjects.load(&self.db)?;
        self.data.sessions.load(&self.db, today)?;
        self.data.plans.load(&self.db, today)?;
        self.data.notes.load(&self.db)?;

        self.data.today_minutes = daily_total_minutes(&self.db, today)?;
        let week = week_dates(today);
        self.data.week = weekly_stats(&self.db, &week)?;
        let range = match self.data.stats_range {
            StatsRange::Week => Some((week[0], week[6])),
            StatsRange::AllTime => None,
        };
        self.data.subject_stats = subject_stats(&self.db, range)?;

        let subject_count = self.data.subjects.subjects.len();
        if self.selected_subject >= subject_count {
            self.selected_subject = subject_count.saturating_sub(1);
        }
        clamp_selection(&mut self.lists.plans, self.data.plans.plans.len());
        clamp_selection(&mut self.lists.notes, self.data.notes.notes.len());
        clamp_selection(&mut self.lists.subjects, subject_count);
        Ok(())
    }

    fn after_mutation(&mut self, result: Result<()>, context: &str) {
        match result {
            Ok(()) => self.refresh_data(),
            Err(e) => self.report_error(context, e),
        }
    }

    fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notification = Some(Notification {
            message: message.into(),
            level,
            shown_at: Instant::now(),
        });
    }

    fn report_error(&mut self, context: &str, error: StudyError) {
        log::error!("{}: {}", context, error);
        self.notify(NotificationLevel::Error, format!("{}: {}", context, error));
    }

    /// Quit the application
    fn quit(&mut self) {
        self.running = false;
    }
}

fn selected<'a, T>(state: &ListState, items: &'a [T]) -> Option<&'a T> {
    state.selected().and_then(|i| items.get(i))
}

fn select_next(state: &mut ListState, len: usize) {
    if len > 0 {
        let i = state.selected().map_or(0, |i| (i + 1) % len);
        state.select(Some(i));
    }
}

fn select_prev(state: &mut ListState, len: usize) {
    if len > 0 {
        let i = state
            .selected()
            .map_or(0, |i| if i == 0 { len - 1 } else { i - 1 });
        state.select(Some(i));
    }
}

fn clamp_selection(state: &mut ListState, len: usize) {
    match state.selected() {
        _ if len == 0 => state.select(None),
        Some(i) if i >= len => state.select(Some(len - 1)),
        None => state.select(Some(0)),
        _ => {}
    }
}

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::app::App;
use crate::format::{format_duration, format_minutes, format_timer_display};
use crate::timer::TimerStatus;
use crate::ui;

/// Render the timer view
pub fn render_timer(frame: &mut Frame, area: Rect, app: &App) {
    let [header, body, controls, footer] = ui::view_layout(area);
    ui::render_header(frame, header, app, "Studystone");

    let chunks = Layout::vertical([
        Constraint::Length(3), // Timer display
        Constraint::Length(2), // Status label
        Constraint::Length(2), // Subject picker
        Constraint::Length(2), // In-flight note
        Constraint::Min(1),    // Today's sessions
    ])
    .split(body);

    let tracked = app.timer_subject().or_else(|| app.selected_subject());
    let subject_color = tracked.map_or(Color::Gray, |s| s.display_color());

    // Stopwatch display
    let timer_color = match app.timer.status() {
        TimerStatus::Running => subject_color,
        TimerStatus::Paused => Color::Yellow,
        TimerStatus::Idle => Color::DarkGray,
    };
    let time_str = format_timer_display(app.timer.elapsed_secs());
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            time_str,
            Style::default().fg(timer_color).bold(),
        )))
        .centered()
        .block(Block::default().borders(Borders::NONE)),
        chunks[0],
    );

    let mut status = vec![Span::styled(
        app.timer.status().label(),
        Style::default().fg(timer_color).bold(),
    )];
    if let Some(started) = app.timer.started_at() {
        status.push(Span::raw(format!("  since {}", started.format("%H:%M"))).dark_gray());
    }
    frame.render_widget(Paragraph::new(Line::from(status)).centered(), chunks[1]);

    // Subject picker; locked while a session is in flight
    let subject_line = match tracked {
        Some(subject) if app.timer.is_idle() => Line::from(vec![
            Span::styled("< ", Style::default().dark_gray()),
            Span::styled(
                subject.name.clone(),
                Style::default().fg(subject.display_color()).bold(),
            ),
            Span::styled(" >", Style::default().dark_gray()),
        ]),
        Some(subject) => Line::from(Span::styled(
            subject.name.clone(),
            Style::default().fg(subject.display_color()).bold(),
        )),
        None => Line::from("No subjects yet - press [n] to create one").dark_gray(),
    };
    frame.render_widget(Paragraph::new(subject_line).centered(), chunks[2]);

    if !app.timer.is_idle() {
        let note = app.timer.note();
        let note_line = if note.is_empty() {
            Line::from("[e] add a note to this session").dark_gray()
        } else {
            Line::from(format!("Note: {}", note)).italic()
        };
        frame.render_widget(Paragraph::new(note_line).centered(), chunks[3]);
    }

    render_today(frame, chunks[4], app);

    let hints = match app.timer.status() {
        TimerStatus::Running => "[p] Pause  [x] Stop & Save  [r] Discard  [e] Note",
        TimerStatus::Paused => "[s] Resume  [x] Stop & Save  [r] Discard  [e] Note",
        TimerStatus::Idle => "[←/→] Subject  [s] Start  [n] New Subject",
    };
    ui::render_controls(frame, controls, hints);
    ui::render_footer(frame, footer, app);
}

/// Today's sessions with the rounded daily total in the title
fn render_today(frame: &mut Frame, area: Rect, app: &App) {
    let title = format!("Today: {}", format_minutes(app.data.today_minutes));

    let items: Vec<ListItem> = if app.data.sessions.today.is_empty() {
        vec![ListItem::new(Line::from("No sessions today").dark_gray().centered())]
    } else {
        app.data
            .sessions
            .today
            .iter()
            .map(|session| {
                let subject = app.data.subjects.get(session.subject_id);
                let name = subject.map_or("(deleted)", |s| s.name.as_str());
                let color = subject.map_or(Color::Gray, |s| s.display_color());
                ListItem::new(Line::from(vec![
                    Span::styled("■ ", Style::default().fg(color)),
                    Span::styled(format!("{:<16}", name), Style::default().bold()),
                    Span::styled(
                        format_duration(session.duration_secs.as_secs()),
                        Style::default().fg(Color::Yellow),
                    ),
                    Span::raw("  "),
                    Span::styled(
                        format!(
                            "{} - {}",
                            session.start_datetime().format("%H:%M"),
                            session.end_datetime().format("%H:%M")
                        ),
                        Style::default().dark_gray(),
                    ),
                ]))
            })
            .collect()
    };

    frame.render_widget(
        List::new(items).block(Block::default().borders(Borders::TOP).title(title)),
        area,
    );
}

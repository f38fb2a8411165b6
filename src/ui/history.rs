use chrono::NaiveDate;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use crate::app::App;
use crate::format::{format_date_display, format_duration};
use crate::models::Session;
use crate::store::SubjectStore;

/// Render recent sessions grouped by the day they started
pub fn render_history(frame: &mut Frame, area: Rect, app: &App) {
    let today = app.data.today;
    let items = build_history_items(&app.data.sessions.history, &app.data.subjects, today);

    frame.render_widget(
        List::new(items).block(Block::default().borders(Borders::ALL).title("Recent Sessions")),
        area,
    );
}

fn build_history_items(
    sessions: &[Session],
    subjects: &SubjectStore,
    today: Option<NaiveDate>,
) -> Vec<ListItem<'static>> {
    let mut items = Vec::new();
    let mut current_date: Option<NaiveDate> = None;

    for session in sessions {
        let date = session.started_on;

        // Add date header if new day
        if current_date != Some(date) {
            current_date = Some(date);
            let date_str = match today {
                Some(t) if t == date => "Today".to_string(),
                Some(t) if t.pred_opt() == Some(date) => "Yesterday".to_string(),
                _ => format_date_display(date),
            };
            items.push(ListItem::new(Line::from(vec![Span::styled(
                date_str,
                Style::default().bold().underlined(),
            )])));
        }

        let subject = subjects.get(session.subject_id);
        let name = subject.map_or_else(|| "(deleted)".to_string(), |s| s.name.clone());
        let color = subject.map_or(Color::Gray, |s| s.display_color());

        let mut spans = vec![
            Span::raw("  "),
            Span::styled(name, Style::default().fg(color).bold()),
            Span::raw("  "),
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
        ];
        if !session.note.is_empty() {
            spans.push(Span::styled(
                format!("  {}", session.note),
                Style::default().italic().dark_gray(),
            ));
        }
        items.push(ListItem::new(Line::from(spans)));
    }

    if items.is_empty() {
        items.push(ListItem::new(
            Line::from("No sessions yet. Start the timer!").centered(),
        ));
    }

    items
}

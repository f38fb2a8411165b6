use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use crate::app::App;
use crate::ui;

/// Render the note list with a preview of the selected note
pub fn render_notes(frame: &mut Frame, area: Rect, app: &mut App) {
    let [header, body, controls, footer] = ui::view_layout(area);
    ui::render_header(frame, header, app, "Notes");

    let [list_area, preview_area] =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).areas(body);

    let notes = &app.data.notes.notes;
    let items: Vec<ListItem> = if notes.is_empty() {
        vec![ListItem::new(Line::from("No notes yet").dark_gray())]
    } else {
        notes
            .iter()
            .map(|note| {
                let mut spans = vec![
                    Span::styled(
                        note.date.format("%m/%d ").to_string(),
                        Style::default().dark_gray(),
                    ),
                    Span::raw(note.display_title().to_string()),
                ];
                if note.session_id.is_some() {
                    spans.push(Span::styled(" ⏱", Style::default().fg(Color::Cyan)));
                }
                ListItem::new(Line::from(spans))
            })
            .collect()
    };

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("All Notes"))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, list_area, &mut app.lists.notes);

    let selected = app
        .lists
        .notes
        .selected()
        .and_then(|i| app.data.notes.notes.get(i));
    let preview = match selected {
        Some(note) => {
            let mut lines = vec![
                Line::from(note.display_title().to_string()).bold(),
                Line::from(note.date.format("%A, %B %-d, %Y").to_string()).dark_gray(),
                Line::from(""),
            ];
            lines.extend(note.content.lines().map(|l| Line::from(l.to_string())));
            Paragraph::new(lines).wrap(Wrap { trim: false })
        }
        None => Paragraph::new("Select a note to preview it").dark_gray(),
    };
    frame.render_widget(
        preview.block(Block::default().borders(Borders::ALL).title("Preview")),
        preview_area,
    );

    ui::render_controls(frame, controls, "[j/k] Navigate  [a] New  [e/Enter] Edit  [d] Delete");
    ui::render_footer(frame, footer, app);
}

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use crate::app::App;
use crate::ui;

/// Render the subject list with color swatches
pub fn render_subjects(frame: &mut Frame, area: Rect, app: &mut App) {
    let [header, body, controls, footer] = ui::view_layout(area);
    ui::render_header(frame, header, app, "Subjects");

    let subjects = &app.data.subjects.subjects;
    let items: Vec<ListItem> = if subjects.is_empty() {
        vec![ListItem::new(
            Line::from("No subjects yet - press [a] to add one").dark_gray(),
        )]
    } else {
        subjects
            .iter()
            .map(|s| {
                ListItem::new(Line::from(vec![
                    Span::styled("██ ", Style::default().fg(s.display_color())),
                    Span::styled(format!("{:<20}", s.name), Style::default().bold()),
                    Span::styled(s.color.clone(), Style::default().dark_gray()),
                ]))
            })
            .collect()
    };

    let list = List::new(items)
        .block(Block::default().borders(Borders::NONE))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, body, &mut app.lists.subjects);

    ui::render_controls(
        frame,
        controls,
        "[j/k] Navigate  [a] Add  [e] Edit  [d] Delete  [x] Export JSON  [R] Reset All",
    );
    ui::render_footer(frame, footer, app);
}

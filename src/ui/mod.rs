mod confirm;
mod form;
mod history;
mod notes;
mod plans;
mod stats;
mod subjects;
mod timer;

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, NotificationLevel, View};

pub use confirm::render_confirm_modal;
pub use form::render_form_modal;
pub use notes::render_notes;
pub use plans::render_plans;
pub use stats::render_stats;
pub use subjects::render_subjects;
pub use timer::render_timer;

/// Split a view into header, body, controls and footer rows
pub fn view_layout(area: Rect) -> [Rect; 4] {
    Layout::vertical([
        Constraint::Length(3), // Title + tabs
        Constraint::Min(1),    // Body
        Constraint::Length(2), // Controls
        Constraint::Length(1), // Footer
    ])
    .areas(area)
}

/// Render the view title with the tab strip underneath
pub fn render_header(frame: &mut Frame, area: Rect, app: &App, title: &str) {
    let [title_area, tabs_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(2)]).areas(area);

    frame.render_widget(
        Paragraph::new(Line::from(title.to_string()).bold().blue().centered()),
        title_area,
    );

    let tabs: Vec<Span> = View::ALL
        .iter()
        .enumerate()
        .flat_map(|(i, view)| {
            let label = format!("{} {}", i + 1, view.label());
            if *view == app.view {
                vec![
                    Span::raw("[ "),
                    Span::styled(label, Style::default().bold().fg(Color::Cyan)),
                    Span::raw(" ]"),
                ]
            } else {
                vec![
                    Span::raw("  "),
                    Span::styled(label, Style::default().dark_gray()),
                    Span::raw("  "),
                ]
            }
        })
        .collect();

    frame.render_widget(
        Paragraph::new(Line::from(tabs))
            .centered()
            .block(Block::default().borders(Borders::BOTTOM)),
        tabs_area,
    );
}

/// Render the key hints for the current view
pub fn render_controls(frame: &mut Frame, area: Rect, controls: &str) {
    frame.render_widget(
        Paragraph::new(controls)
            .centered()
            .dark_gray()
            .block(Block::default().borders(Borders::TOP)),
        area,
    );
}

/// Render the footer area with either a notification or navigation text
pub fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    if let Some(ref n) = app.notification {
        let color = match n.level {
            NotificationLevel::Info => Color::Green,
            NotificationLevel::Warning => Color::Yellow,
            NotificationLevel::Error => Color::Red,
        };
        frame.render_widget(
            Paragraph::new(n.message.as_str())
                .centered()
                .style(Style::default().fg(color).bold()),
            area,
        );
    } else {
        frame.render_widget(
            Paragraph::new("[Tab/1-5] Switch View  [q] Quit")
                .centered()
                .dark_gray(),
            area,
        );
    }
}

/// Centered rectangle of at most `width` x `height` inside `area`
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fits_inside() {
        let area = Rect::new(0, 0, 80, 24);
        let rect = centered_rect(area, 50, 10);
        assert_eq!(rect, Rect::new(15, 7, 50, 10));

        let small = centered_rect(Rect::new(0, 0, 20, 8), 50, 10);
        assert_eq!(small.width, 16);
        assert_eq!(small.height, 4);
    }
}

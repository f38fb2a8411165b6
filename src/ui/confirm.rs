use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::ConfirmAction;
use crate::ui::centered_rect;

/// Render a yes/no prompt for a destructive action
pub fn render_confirm_modal(frame: &mut Frame, area: Rect, action: ConfirmAction) {
    let modal_area = centered_rect(area, 48, 7);
    frame.render_widget(Clear, modal_area);

    let border = match action {
        ConfirmAction::ResetAll => Color::Red,
        _ => Color::Yellow,
    };
    let block = Block::default()
        .title(" Confirm ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let [prompt_area, controls_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

    frame.render_widget(
        Paragraph::new(action.prompt())
            .centered()
            .wrap(Wrap { trim: true }),
        prompt_area,
    );
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("[y]", Style::default().bold()),
            Span::raw(" Yes   "),
            Span::styled("[n]", Style::default().bold()),
            Span::raw(" No"),
        ]))
        .centered()
        .dark_gray(),
        controls_area,
    );
}

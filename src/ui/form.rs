use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::form::{Form, Picker};
use crate::models::{Subject, parse_hex_color};
use crate::ui::centered_rect;

/// Render a form modal as an overlay
pub fn render_form_modal(frame: &mut Frame, area: Rect, form: &Form, subjects: &[Subject]) {
    let field_rows = form.fields.len() as u16 * 3;
    let picker_rows = if form.picker() == Picker::None { 0 } else { 2 };
    let modal_area = centered_rect(area, 56, field_rows + picker_rows + 6);

    // Clear the area behind the modal
    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .title(form.kind.title())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let mut constraints: Vec<Constraint> =
        form.fields.iter().map(|_| Constraint::Length(3)).collect();
    constraints.push(Constraint::Length(picker_rows));
    constraints.push(Constraint::Length(1)); // Error
    constraints.push(Constraint::Min(1)); // Controls
    let chunks = Layout::vertical(constraints).split(inner);

    for (i, field) in form.fields.iter().enumerate() {
        let focused = i == form.focus;
        let style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let text = if focused {
            format!("{}_", field.value)
        } else {
            field.value.clone()
        };
        frame.render_widget(
            Paragraph::new(text).block(
                Block::default()
                    .title(field.label)
                    .borders(Borders::ALL)
                    .border_style(style),
            ),
            chunks[i],
        );
    }

    let picker_line = match form.picker() {
        Picker::Color => Some(Line::from(vec![
            Span::raw("Color: "),
            Span::styled("< ", Style::default().dark_gray()),
            Span::styled("████", Style::default().fg(parse_hex_color(&form.color))),
            Span::raw(format!(" {}", form.color)),
            Span::styled(" >", Style::default().dark_gray()),
        ])),
        Picker::Subject => {
            let subject = subjects.get(form.subject_index);
            let (name, color) = subject.map_or(("(none)".to_string(), Color::Gray), |s| {
                (s.name.clone(), s.display_color())
            });
            Some(Line::from(vec![
                Span::raw("Subject: "),
                Span::styled("< ", Style::default().dark_gray()),
                Span::styled(name, Style::default().fg(color).bold()),
                Span::styled(" >", Style::default().dark_gray()),
            ]))
        }
        Picker::None => None,
    };
    let fields = form.fields.len();
    if let Some(line) = picker_line {
        frame.render_widget(Paragraph::new(line).centered(), chunks[fields]);
    }

    if let Some(error) = form.error {
        frame.render_widget(
            Paragraph::new(error).centered().red().bold(),
            chunks[fields + 1],
        );
    }

    let mut controls = vec![
        Span::styled("[Enter]", Style::default().bold()),
        Span::raw(" Save   "),
    ];
    if fields > 1 {
        controls.push(Span::styled("[Tab]", Style::default().bold()));
        controls.push(Span::raw(" Next Field   "));
    }
    if form.picker() != Picker::None {
        controls.push(Span::styled("[←/→]", Style::default().bold()));
        controls.push(Span::raw(" Change   "));
    }
    controls.push(Span::styled("[Esc]", Style::default().bold()));
    controls.push(Span::raw(" Cancel"));
    frame.render_widget(
        Paragraph::new(Line::from(controls)).centered().dark_gray(),
        chunks[fields + 2],
    );
}

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem},
};

use crate::app::App;
use crate::format::{format_date_display, format_minutes};
use crate::models::PlanProgress;
use crate::ui;

const BAR_WIDTH: usize = 20;

/// Render today's plans with progress toward each target
pub fn render_plans(frame: &mut Frame, area: Rect, app: &mut App) {
    let [header, body, controls, footer] = ui::view_layout(area);
    ui::render_header(frame, header, app, "Daily Plans");

    let [overall_area, list_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(1)]).areas(body);

    let plans = &app.data.plans.plans;
    let done = plans.iter().filter(|p| p.is_complete()).count();
    let ratio = if plans.is_empty() {
        0.0
    } else {
        plans.iter().map(PlanProgress::progress).sum::<f64>() / plans.len() as f64
    };
    let date_title = app
        .data
        .plans
        .date()
        .map(format_date_display)
        .unwrap_or_default();
    frame.render_widget(
        Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(date_title))
            .gauge_style(Style::default().fg(Color::Green))
            .label(format!("{}/{} complete", done, plans.len()))
            .ratio(ratio),
        overall_area,
    );

    let items: Vec<ListItem> = if plans.is_empty() {
        vec![ListItem::new(
            Line::from("Nothing planned for today - press [a] to add a target").dark_gray(),
        )]
    } else {
        plans.iter().map(plan_item).collect()
    };

    let list = List::new(items)
        .block(Block::default().borders(Borders::NONE))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, list_area, &mut app.lists.plans);

    ui::render_controls(frame, controls, "[j/k] Navigate  [a] Add/Update Target  [d] Delete");
    ui::render_footer(frame, footer, app);
}

fn plan_item(plan: &PlanProgress) -> ListItem<'static> {
    let color = plan.display_color();
    let filled = (plan.progress() * BAR_WIDTH as f64).round() as usize;
    let bar = format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled));
    let status = if plan.is_complete() {
        Span::styled(" ✓", Style::default().fg(Color::Green).bold())
    } else {
        Span::raw("")
    };

    ListItem::new(Line::from(vec![
        Span::styled("■ ", Style::default().fg(color)),
        Span::styled(format!("{:<16}", plan.subject_name), Style::default().bold()),
        Span::styled(bar, Style::default().fg(color)),
        Span::raw(format!(
            "  {} / {}",
            format_minutes(plan.actual_minutes),
            format_minutes(plan.plan.target_minutes)
        )),
        status,
    ]))
}

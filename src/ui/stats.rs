use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
};

use crate::app::App;
use crate::format::{day_label, format_minutes};
use crate::models::{DailyStat, SubjectStat};
use crate::ui;

/// Render the statistics view
pub fn render_stats(frame: &mut Frame, area: Rect, app: &App) {
    let [header, body, controls, footer] = ui::view_layout(area);
    ui::render_header(frame, header, app, "Study Statistics");

    let [charts, history_area] =
        Layout::vertical([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(body);
    let [week_area, legend_area] =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(charts);

    let today = app.data.today;
    render_week_chart(frame, week_area, &app.data.week, today);
    render_legend(
        frame,
        legend_area,
        &app.data.subject_stats,
        app.data.stats_range.label(),
    );
    ui::history::render_history(frame, history_area, app);

    ui::render_controls(frame, controls, "[w/←/→] Week / All Time");
    ui::render_footer(frame, footer, app);
}

fn render_week_chart(
    frame: &mut Frame,
    area: Rect,
    week: &[DailyStat],
    today: Option<chrono::NaiveDate>,
) {
    let total: i64 = week.iter().map(|d| d.total_minutes).sum();
    let title = format!("This Week: {}", format_minutes(total));

    let bars: Vec<Bar> = week
        .iter()
        .map(|day| {
            let color = if Some(day.date) == today {
                Color::Cyan
            } else {
                Color::Blue
            };
            Bar::default()
                .value(day.total_minutes.max(0) as u64)
                .label(Line::from(day_label(day.date)))
                .text_value(format_minutes(day.total_minutes))
                .style(Style::default().fg(color))
        })
        .collect();

    let max = week.iter().map(|d| d.total_minutes).max().unwrap_or(0).max(1);
    let chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .bar_width(5)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars))
        .max(max as u64);

    frame.render_widget(chart, area);
}

fn render_legend(frame: &mut Frame, area: Rect, stats: &[SubjectStat], range: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("By Subject ({})", range));

    if stats.is_empty() {
        frame.render_widget(
            Paragraph::new("No subjects yet").centered().dark_gray().block(block),
            area,
        );
        return;
    }

    let total: i64 = stats.iter().map(|s| s.total_minutes).sum();
    let lines: Vec<Line> = stats
        .iter()
        .map(|stat| {
            let pct = if total > 0 {
                (stat.total_minutes as f64 / total as f64) * 100.0
            } else {
                0.0
            };
            let color = stat.display_color();
            Line::from(vec![
                Span::styled("■ ", Style::default().fg(color)),
                Span::styled(format!("{:<12}", stat.subject_name), Style::default().fg(color)),
                Span::raw(format!(
                    "{:>8}  ({:.0}%)  {} sessions",
                    format_minutes(stat.total_minutes),
                    pct,
                    stat.session_count
                )),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

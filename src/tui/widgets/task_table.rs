use chrono::NaiveDate;
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Cell, Row, Table, TableState};

use crate::Config;
use crate::models::Task;
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};
use crate::utils::{DeadlineStatus, deadline_status, parse_date};

/// Render the visible task list as a table. The deadline cell is tinted by
/// urgency, recomputed against `today` on every render so tasks change color
/// as their deadline approaches without any stored state.
pub fn render_task_table(
    f: &mut Frame,
    area: Rect,
    tasks: &[Task],
    table_state: &mut TableState,
    config: &Config,
    today: NaiveDate,
) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let highlight_fg = parse_color(&active_theme.highlight_fg);

    let rows: Vec<Row> = tasks
        .iter()
        .map(|task| {
            let deadline_bg = match parse_date(&task.deadline) {
                Ok(deadline) => match deadline_status(deadline, today) {
                    DeadlineStatus::Urgent => parse_color(&active_theme.urgent_bg),
                    DeadlineStatus::Warning => parse_color(&active_theme.warning_bg),
                    DeadlineStatus::Normal => parse_color(&active_theme.normal_bg),
                },
                // unparseable deadlines get no tint rather than a misleading one
                Err(_) => parse_color(&active_theme.bg),
            };
            let deadline_fg = get_contrast_text_color(deadline_bg);

            Row::new(vec![
                Cell::from("○"),
                Cell::from(task.description.clone()),
                Cell::from(task.start_date.clone()),
                Cell::from(task.deadline.clone())
                    .style(Style::default().fg(deadline_fg).bg(deadline_bg)),
            ])
        })
        .collect();

    let header = Row::new(vec!["Done", "Task", "Start Date", "Deadline"])
        .style(Style::default().fg(fg_color))
        .bottom_margin(1);

    let title = format!("Tasks ({})", tasks.len());
    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Min(10),
            Constraint::Length(12),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(title))
    .style(Style::default().fg(fg_color))
    .row_highlight_style(Style::default().fg(highlight_fg).bg(highlight_bg))
    .highlight_symbol("> ");

    f.render_stateful_widget(table, area, table_state);
}

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::Config;
use crate::tui::app::{TaskField, TaskForm};
use crate::tui::widgets::color::parse_color;
use crate::tui::widgets::popup_area;
use crate::utils::format_key_binding_for_display;

/// Render the add-task form as a popup over the task table.
pub fn render_task_form(f: &mut Frame, area: Rect, form: &TaskForm, config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let highlight_bg = parse_color(&active_theme.highlight_bg);

    let popup = popup_area(area, 60, 80);
    f.render_widget(Clear, popup);

    let outer = Block::default()
        .borders(Borders::ALL)
        .title("New Task")
        .style(Style::default().fg(fg_color).bg(bg_color));
    let inner = outer.inner(popup);
    f.render_widget(outer, popup);

    let fields = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Description
            Constraint::Length(3), // Start date
            Constraint::Length(3), // Deadline
            Constraint::Min(0),    // Hint
        ])
        .split(inner);

    let focused_style = Style::default().fg(highlight_bg).add_modifier(Modifier::BOLD);
    let normal_style = Style::default().fg(fg_color);
    let style_for = |field: TaskField| {
        if form.current_field == field {
            focused_style
        } else {
            normal_style
        }
    };

    super::input::render_input(
        f,
        fields[0],
        &form.description,
        "Task",
        style_for(TaskField::Description),
        form.current_field == TaskField::Description,
        false,
    );
    super::input::render_input(
        f,
        fields[1],
        &form.start_date,
        "Start Date (YYYY-MM-DD)",
        style_for(TaskField::StartDate),
        form.current_field == TaskField::StartDate,
        false,
    );
    super::input::render_input(
        f,
        fields[2],
        &form.deadline,
        "Deadline (YYYY-MM-DD)",
        style_for(TaskField::Deadline),
        form.current_field == TaskField::Deadline,
        false,
    );

    let hint = format!(
        "Tab: next field  {}: save  Esc: cancel",
        format_key_binding_for_display(&config.key_bindings.save)
    );
    let hint_line = Paragraph::new(hint).style(Style::default().fg(fg_color));
    f.render_widget(hint_line, fields[3]);
}

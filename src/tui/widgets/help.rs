use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::Config;
use crate::tui::widgets::color::parse_color;
use crate::tui::widgets::popup_area;
use crate::utils::format_key_binding_for_display;

pub fn render_help(f: &mut Frame, area: Rect, config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);

    let popup = popup_area(area, 60, 70);

    // Clear the background first so content doesn't show through
    f.render_widget(Clear, popup);

    let paragraph = Paragraph::new(build_help_text(config))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help - Key Bindings")
                .title_alignment(Alignment::Center)
                .style(Style::default().fg(fg_color).bg(bg_color)),
        )
        .style(Style::default().fg(fg_color).bg(bg_color))
        .wrap(ratatui::widgets::Wrap { trim: true });

    f.render_widget(paragraph, popup);
}

fn build_help_text(config: &Config) -> Vec<Line<'static>> {
    let k = &config.key_bindings;
    let entry = |binding: &str, action: &str| {
        Line::from(format!("  {:<10} {}", format_key_binding_for_display(binding), action))
    };

    vec![
        Line::from("Task list"),
        entry(&k.list_down, "Move selection down"),
        entry(&k.list_up, "Move selection up"),
        entry(&k.new, "New task"),
        entry(&k.complete, "Mark selected task done"),
        entry(&k.undo, "Undo the last completed task"),
        entry(&k.refresh, "Reload tasks from the server"),
        entry(&k.quit, "Quit"),
        Line::from(""),
        Line::from("Login / Register"),
        entry("Tab", "Switch field"),
        entry("Enter", "Submit"),
        entry(&k.toggle_auth, "Switch between login and register"),
        Line::from(""),
        Line::from("Forms"),
        entry("Tab", "Next field"),
        entry(&k.save, "Save"),
        entry("Esc", "Cancel"),
        Line::from(""),
        entry(&k.help, "Close this help"),
    ]
}

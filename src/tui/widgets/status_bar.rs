use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Paragraph;

use crate::Config;
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};

pub fn render_status_bar(
    f: &mut Frame,
    area: Rect,
    message: Option<&String>,
    key_hints: &[String],
    config: &Config,
) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let highlight_bg = parse_color(&active_theme.highlight_bg);

    let max_width = area.width as usize;

    let (content, style) = if let Some(msg) = message {
        // Status messages get a highlighted background for visibility
        let msg_fg = get_contrast_text_color(highlight_bg);
        (
            truncate(msg, max_width),
            Style::default()
                .fg(msg_fg)
                .bg(highlight_bg)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        // Key hints joined with bullet separators, fitting as many as possible
        let mut hints_text = String::new();
        for (i, hint) in key_hints.iter().enumerate() {
            let candidate_len = if i == 0 {
                hint.chars().count()
            } else {
                hints_text.chars().count() + 3 + hint.chars().count()
            };
            if candidate_len > max_width {
                break;
            }
            if i > 0 {
                hints_text.push_str(" • ");
            }
            hints_text.push_str(hint);
        }
        (hints_text, Style::default().fg(fg_color).bg(bg_color))
    };

    let paragraph = Paragraph::new(content).style(style);
    f.render_widget(paragraph, area);
}

fn truncate(text: &str, max_width: usize) -> String {
    if text.chars().count() <= max_width {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_width.saturating_sub(3)).collect();
    truncated.push_str("...");
    truncated
}

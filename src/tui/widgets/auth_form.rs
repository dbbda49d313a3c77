use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::Config;
use crate::session::AuthMode;
use crate::tui::app::{AuthField, AuthForm};
use crate::tui::widgets::color::parse_color;
use crate::utils::format_key_binding_for_display;

/// Render the login/registration form centered in the main pane, with the
/// notice line ("Login failed", "Registered. Please log in.") underneath.
pub fn render_auth_form(
    f: &mut Frame,
    area: Rect,
    form: &AuthForm,
    mode: AuthMode,
    notice: Option<&str>,
    config: &Config,
) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let highlight_bg = parse_color(&active_theme.highlight_bg);

    let (title, submit_label, switch_label) = match mode {
        AuthMode::Login => ("Login", "log in", "register"),
        AuthMode::Register => ("Register", "register", "log in"),
    };

    // Center a fixed-size form box in the available area
    let form_width = area.width.clamp(20, 50);
    let form_height = 11u16.min(area.height);
    let form_area = Rect::new(
        area.x + (area.width.saturating_sub(form_width)) / 2,
        area.y + (area.height.saturating_sub(form_height)) / 2,
        form_width,
        form_height,
    );

    let outer = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(Style::default().fg(fg_color));
    let inner = outer.inner(form_area);
    f.render_widget(outer, form_area);

    let fields = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Username
            Constraint::Length(3), // Password
            Constraint::Length(1), // Notice
            Constraint::Min(0),    // Hint
        ])
        .split(inner);

    let focused_style = Style::default().fg(highlight_bg).add_modifier(Modifier::BOLD);
    let normal_style = Style::default().fg(fg_color);

    let username_focused = form.current_field == AuthField::Username;
    super::input::render_input(
        f,
        fields[0],
        &form.username,
        "Username",
        if username_focused { focused_style } else { normal_style },
        username_focused,
        false,
    );

    let password_focused = form.current_field == AuthField::Password;
    super::input::render_input(
        f,
        fields[1],
        &form.password,
        "Password",
        if password_focused { focused_style } else { normal_style },
        password_focused,
        true,
    );

    if let Some(notice) = notice {
        let notice_line = Paragraph::new(Line::from(notice.to_string()))
            .style(Style::default().fg(parse_color(&active_theme.urgent_bg)));
        f.render_widget(notice_line, fields[2]);
    }

    let hint = format!(
        "Enter: {}  {}: {}",
        submit_label,
        format_key_binding_for_display(&config.key_bindings.toggle_auth),
        switch_label
    );
    let hint_line = Paragraph::new(hint).style(Style::default().fg(fg_color));
    f.render_widget(hint_line, fields[3]);
}

use ratatui::Frame;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders};

use crate::tui::app::{App, Mode};
use crate::tui::layout::Layout;
use crate::tui::widgets::auth_form::render_auth_form;
use crate::tui::widgets::color::parse_color;
use crate::tui::widgets::help::render_help;
use crate::tui::widgets::status_bar::render_status_bar;
use crate::tui::widgets::task_form::render_task_form;
use crate::tui::widgets::task_table::render_task_table;
use crate::utils;

pub fn render(f: &mut Frame, app: &mut App, layout: &Layout) {
    // Outer border with the app title centered in the top border
    let active_theme = app.config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let outer_block = Block::default()
        .borders(Borders::ALL)
        .title("TaskDue")
        .title_alignment(ratatui::layout::Alignment::Center)
        .style(Style::default().fg(fg_color).bg(bg_color));
    f.render_widget(outer_block, f.area());

    if let Some(mode) = app.session.auth_mode() {
        render_auth_form(
            f,
            layout.main_area,
            &app.auth_form,
            mode,
            app.session.notice(),
            &app.config,
        );
    } else {
        render_task_table(
            f,
            layout.main_area,
            app.tasks.tasks(),
            &mut app.table_state,
            &app.config,
            utils::today(),
        );

        if app.mode == Mode::Create {
            if let Some(ref form) = app.task_form {
                render_task_form(f, layout.main_area, form, &app.config);
            }
        }
    }

    // Help popup overlays whatever is underneath
    if app.mode == Mode::Help {
        render_help(f, f.area(), &app.config);
    }

    let key_hints = get_key_hints(app);
    render_status_bar(
        f,
        layout.status_area,
        app.status.message.as_ref(),
        &key_hints,
        &app.config,
    );
}

fn get_key_hints(app: &App) -> Vec<String> {
    let k = &app.config.key_bindings;
    let d = utils::format_key_binding_for_display;

    if app.mode == Mode::Help {
        return vec![format!("Esc or {}: Exit help", d(&k.help))];
    }

    if !app.session.is_authenticated() {
        return vec![
            "Tab: Switch field".to_string(),
            "Enter: Submit".to_string(),
            format!("{}: Login/Register", d(&k.toggle_auth)),
            "Esc: Quit".to_string(),
        ];
    }

    match app.mode {
        Mode::Create => vec![
            "Tab: Next field".to_string(),
            format!("{}: Save", d(&k.save)),
            "Esc: Cancel".to_string(),
        ],
        _ => {
            let mut hints = vec![
                format!("{}: Quit", d(&k.quit)),
                format!("{}: New", d(&k.new)),
                format!("{}: Done", d(&k.complete)),
            ];
            if app.tasks.has_pending_undo() {
                hints.push(format!("{}: Undo", d(&k.undo)));
            }
            hints.push(format!("{}: Refresh", d(&k.refresh)));
            hints.push(format!("{}/{}: Navigate", d(&k.list_up), d(&k.list_down)));
            hints.push(format!("{}: Help", d(&k.help)));
            hints
        }
    }
}

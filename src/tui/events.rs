use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    size as terminal_size,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io;

use crate::tui::app::{App, AuthField, Mode, TaskField};
use crate::tui::error::TuiError;
use crate::tui::layout::Layout;
use crate::utils::{has_primary_modifier, parse_key_binding};

/// Guard that ensures terminal state is restored even on panic.
/// If the terminal is left in raw mode or the alternate screen, the user's
/// terminal is unusable afterwards.
struct TerminalGuard {
    raw_mode_enabled: bool,
    alternate_screen_enabled: bool,
}

impl TerminalGuard {
    fn new() -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        Ok(Self {
            raw_mode_enabled: true,
            alternate_screen_enabled: true,
        })
    }

    /// Manually restore terminal state (called on normal exit).
    /// After calling this, the guard does nothing on drop.
    fn restore(&mut self) -> Result<(), TuiError> {
        if self.raw_mode_enabled {
            disable_raw_mode()?;
            self.raw_mode_enabled = false;
        }
        if self.alternate_screen_enabled {
            execute!(io::stdout(), LeaveAlternateScreen)?;
            self.alternate_screen_enabled = false;
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Ignore errors in drop, this is already a cleanup path
        if self.raw_mode_enabled {
            let _ = disable_raw_mode();
        }
        if self.alternate_screen_enabled {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        }
    }
}

/// True when the key event matches a configured binding string ("q",
/// "Ctrl+s", "F1", ...). Unparseable bindings never match.
fn binding_matches(binding: &str, key_event: &KeyEvent) -> bool {
    match parse_key_binding(binding) {
        Ok(parsed) => {
            key_event.code == parsed.key_code
                && parsed.requires_ctrl == has_primary_modifier(key_event.modifiers)
        }
        Err(_) => false,
    }
}

pub fn run_event_loop(mut app: App) -> Result<(), TuiError> {
    // Check terminal size before entering the alternate screen so the error
    // message lands in the normal terminal
    let (width, height) = terminal_size().map_err(TuiError::IoError)?;

    let min_width = Layout::MIN_WIDTH + 2;
    let min_height = Layout::MIN_HEIGHT + 2;
    if width < min_width || height < min_height {
        return Err(TuiError::RenderError(format!(
            "Terminal size too small. Current: {}x{}, Minimum required: {}x{}.",
            width, height, min_width, min_height
        )));
    }

    let mut guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    loop {
        app.check_status_message_timeout();

        terminal.draw(|f| {
            let layout = Layout::calculate(f.area());
            crate::tui::render::render(f, &mut app, &layout);
        })?;

        if event::poll(std::time::Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key_event) => {
                    // Only process Press events to avoid double-processing on
                    // platforms that also report Release
                    if key_event.kind == KeyEventKind::Press
                        && handle_key_event(&mut app, key_event)?
                    {
                        break; // Quit requested
                    }
                }
                Event::Resize(_, _) => {
                    // Layout is recalculated from the frame area on next draw
                }
                _ => {}
            }
        }
    }

    guard.restore()?;

    Ok(())
}

/// Dispatch a key press. Returns true when the application should exit.
fn handle_key_event(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    if app.mode == Mode::Help {
        if key_event.code == KeyCode::Esc || binding_matches(&app.config.key_bindings.help, &key_event)
        {
            app.mode = Mode::List;
        }
        return Ok(false);
    }

    if !app.session.is_authenticated() {
        return handle_auth_keys(app, key_event);
    }

    match app.mode {
        Mode::Create => handle_task_form_keys(app, key_event),
        _ => handle_list_keys(app, key_event),
    }
}

/// Keys on the login/registration form. Plain characters type into the
/// focused field, so only modified and special keys carry actions here.
fn handle_auth_keys(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    if binding_matches(&app.config.key_bindings.toggle_auth, &key_event) {
        app.toggle_auth_mode();
        return Ok(false);
    }
    if binding_matches(&app.config.key_bindings.help, &key_event) {
        app.mode = Mode::Help;
        return Ok(false);
    }

    match key_event.code {
        KeyCode::Esc => return Ok(true),
        KeyCode::Tab | KeyCode::Down | KeyCode::Up => app.auth_form.next_field(),
        KeyCode::Enter => match app.auth_form.current_field {
            AuthField::Username => app.auth_form.next_field(),
            AuthField::Password => app.submit_auth(),
        },
        KeyCode::Backspace => app.auth_form.active_input().backspace(),
        KeyCode::Delete => app.auth_form.active_input().delete(),
        KeyCode::Left => app.auth_form.active_input().move_left(),
        KeyCode::Right => app.auth_form.active_input().move_right(),
        KeyCode::Home => app.auth_form.active_input().move_home(),
        KeyCode::End => app.auth_form.active_input().move_end(),
        KeyCode::Char(c) if !has_primary_modifier(key_event.modifiers) => {
            app.auth_form.active_input().insert_char(c);
        }
        _ => {}
    }

    Ok(false)
}

/// Keys on the task table.
fn handle_list_keys(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    let bindings = &app.config.key_bindings;

    if binding_matches(&bindings.quit, &key_event) {
        return Ok(true);
    }
    if binding_matches(&bindings.help, &key_event) {
        app.mode = Mode::Help;
    } else if binding_matches(&bindings.new, &key_event) {
        app.open_task_form();
    } else if binding_matches(&bindings.complete, &key_event)
        || binding_matches(&bindings.select, &key_event)
    {
        app.complete_selected();
    } else if binding_matches(&bindings.undo, &key_event) {
        app.undo();
    } else if binding_matches(&bindings.refresh, &key_event) {
        app.load_tasks();
    } else if binding_matches(&bindings.list_down, &key_event) || key_event.code == KeyCode::Down {
        app.select_next();
    } else if binding_matches(&bindings.list_up, &key_event) || key_event.code == KeyCode::Up {
        app.select_previous();
    }

    Ok(false)
}

/// Keys on the add-task form.
fn handle_task_form_keys(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    if binding_matches(&app.config.key_bindings.save, &key_event) {
        app.submit_task_form();
        return Ok(false);
    }

    let Some(form) = app.task_form.as_mut() else {
        app.mode = Mode::List;
        return Ok(false);
    };

    match key_event.code {
        KeyCode::Esc => app.cancel_task_form(),
        KeyCode::Tab => form.next_field(),
        KeyCode::BackTab => form.previous_field(),
        KeyCode::Enter => {
            // Enter advances through the fields; on the last one it submits
            if form.current_field == TaskField::Deadline {
                app.submit_task_form();
            } else {
                form.next_field();
            }
        }
        KeyCode::Backspace => form.active_input().backspace(),
        KeyCode::Delete => form.active_input().delete(),
        KeyCode::Left => form.active_input().move_left(),
        KeyCode::Right => form.active_input().move_right(),
        KeyCode::Home => form.active_input().move_home(),
        KeyCode::End => form.active_input().move_end(),
        KeyCode::Char(c) if !has_primary_modifier(key_event.modifiers) => {
            form.active_input().insert_char(c);
        }
        _ => {}
    }

    Ok(false)
}

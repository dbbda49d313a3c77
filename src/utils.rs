use chrono::NaiveDate;
use directories::ProjectDirs;
use std::path::PathBuf;

/// Profile mode for the application (dev or prod)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Dev,
    Prod,
}

/// Get the configuration directory path for taskdue
/// If profile is Dev, uses "taskdue-dev" instead of "taskdue"
pub fn get_config_dir(profile: Profile) -> Option<PathBuf> {
    let app_name = match profile {
        Profile::Dev => "taskdue-dev",
        Profile::Prod => "taskdue",
    };
    ProjectDirs::from("com", "taskdue", app_name).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Parse a date string in ISO 8601 format (YYYY-MM-DD)
pub fn parse_date(date_str: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
}

/// Today's date according to the local wall clock
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Today's date as an ISO 8601 string (YYYY-MM-DD)
pub fn today_string() -> String {
    today().format("%Y-%m-%d").to_string()
}

/// How urgent a deadline is relative to a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineStatus {
    Urgent,
    Warning,
    Normal,
}

/// Classify a deadline by whole calendar days remaining from `today`:
/// fewer than 2 days left is urgent, 2 to 5 is a warning, more is normal.
/// Past deadlines count as urgent.
pub fn deadline_status(deadline: NaiveDate, today: NaiveDate) -> DeadlineStatus {
    let days_left = (deadline - today).num_days();
    if days_left < 2 {
        DeadlineStatus::Urgent
    } else if days_left <= 5 {
        DeadlineStatus::Warning
    } else {
        DeadlineStatus::Normal
    }
}

/// Parsed key binding information
#[derive(Debug, Clone)]
pub struct ParsedKeyBinding {
    pub key_code: crossterm::event::KeyCode,
    pub requires_ctrl: bool,
}

/// Check if a key event has the primary modifier (Ctrl on Windows/Linux, Option/Alt on macOS)
pub fn has_primary_modifier(modifiers: crossterm::event::KeyModifiers) -> bool {
    #[cfg(target_os = "macos")]
    {
        modifiers.contains(crossterm::event::KeyModifiers::CONTROL)
            || modifiers.contains(crossterm::event::KeyModifiers::ALT)
    }

    #[cfg(not(target_os = "macos"))]
    {
        modifiers.contains(crossterm::event::KeyModifiers::CONTROL)
    }
}

/// Format a key binding string for display, showing the platform-appropriate modifier
pub fn format_key_binding_for_display(key_binding: &str) -> String {
    #[cfg(target_os = "macos")]
    {
        key_binding.replace("Ctrl+", "Opt+")
    }

    #[cfg(not(target_os = "macos"))]
    {
        key_binding.to_string()
    }
}

/// Parse a key binding string from config into a ParsedKeyBinding
/// Supports single keys ("q", "u"), special keys ("Enter", "Esc", "F1"),
/// and the Ctrl modifier ("Ctrl+s")
pub fn parse_key_binding(key_str: &str) -> Result<ParsedKeyBinding, String> {
    let key_str = key_str.trim();

    if let Some(key_part) = key_str.strip_prefix("Ctrl+") {
        let key_code = parse_key_code(key_part)?;
        return Ok(ParsedKeyBinding {
            key_code,
            requires_ctrl: true,
        });
    }

    let key_code = parse_key_code(key_str)?;
    Ok(ParsedKeyBinding {
        key_code,
        requires_ctrl: false,
    })
}

fn parse_key_code(key_str: &str) -> Result<crossterm::event::KeyCode, String> {
    use crossterm::event::KeyCode;

    match key_str {
        "Enter" => Ok(KeyCode::Enter),
        "Esc" | "Escape" => Ok(KeyCode::Esc),
        "Backspace" => Ok(KeyCode::Backspace),
        "Tab" => Ok(KeyCode::Tab),
        "Space" | " " => Ok(KeyCode::Char(' ')),
        "Left" => Ok(KeyCode::Left),
        "Right" => Ok(KeyCode::Right),
        "Up" => Ok(KeyCode::Up),
        "Down" => Ok(KeyCode::Down),
        "Home" => Ok(KeyCode::Home),
        "End" => Ok(KeyCode::End),
        "Delete" => Ok(KeyCode::Delete),
        _ => {
            if let Some(num) = key_str.strip_prefix('F') {
                if let Ok(n) = num.parse::<u8>() {
                    if (1..=12).contains(&n) {
                        return Ok(KeyCode::F(n));
                    }
                }
            }
            let mut chars = key_str.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(KeyCode::Char(c)),
                _ => Err(format!("Unknown key binding: {}", key_str)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn parse_date_accepts_iso_and_rejects_garbage() {
        assert!(parse_date("2024-01-10").is_ok());
        assert!(parse_date("10/01/2024").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn deadline_status_classifies_by_days_left() {
        let today = date("2024-03-10");
        // tomorrow: less than 2 days left
        assert_eq!(deadline_status(date("2024-03-11"), today), DeadlineStatus::Urgent);
        // 2 and 5 days out bound the warning band
        assert_eq!(deadline_status(date("2024-03-12"), today), DeadlineStatus::Warning);
        assert_eq!(deadline_status(date("2024-03-15"), today), DeadlineStatus::Warning);
        // 6 days out is back to normal
        assert_eq!(deadline_status(date("2024-03-16"), today), DeadlineStatus::Normal);
        // overdue stays urgent
        assert_eq!(deadline_status(date("2024-03-09"), today), DeadlineStatus::Urgent);
        assert_eq!(deadline_status(today, today), DeadlineStatus::Urgent);
    }

    #[test]
    fn key_binding_parsing_handles_modifiers_and_specials() {
        let plain = parse_key_binding("q").unwrap();
        assert_eq!(plain.key_code, crossterm::event::KeyCode::Char('q'));
        assert!(!plain.requires_ctrl);

        let ctrl = parse_key_binding("Ctrl+z").unwrap();
        assert_eq!(ctrl.key_code, crossterm::event::KeyCode::Char('z'));
        assert!(ctrl.requires_ctrl);

        let f1 = parse_key_binding("F1").unwrap();
        assert_eq!(f1.key_code, crossterm::event::KeyCode::F(1));

        assert!(parse_key_binding("NotAKey").is_err());
    }
}

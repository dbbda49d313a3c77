use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::utils;

/// Current configuration version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the remote todo service
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub key_bindings: KeyBindings,
    #[serde(default = "default_current_theme")]
    pub current_theme: String,
    #[serde(default)]
    pub themes: HashMap<String, Theme>,
    #[serde(default = "default_config_version")]
    pub config_version: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    #[serde(default = "default_quit")]
    pub quit: String,
    #[serde(default = "default_new")]
    pub new: String,
    #[serde(default = "default_complete")]
    pub complete: String,
    #[serde(default = "default_undo")]
    pub undo: String,
    #[serde(default = "default_refresh")]
    pub refresh: String,
    #[serde(default = "default_list_up")]
    pub list_up: String,
    #[serde(default = "default_list_down")]
    pub list_down: String,
    #[serde(default = "default_select")]
    pub select: String,
    #[serde(default = "default_save")]
    pub save: String,
    #[serde(default = "default_help")]
    pub help: String,
    #[serde(default = "default_toggle_auth")]
    pub toggle_auth: String,
}

/// Colors are named ("red", "lightgreen"), hex ("#ffd6d6") or rgb().
/// The three `*_bg` tint entries color the deadline cell by urgency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default = "default_fg")]
    pub fg: String,
    #[serde(default = "default_bg")]
    pub bg: String,
    #[serde(default = "default_highlight_bg")]
    pub highlight_bg: String,
    #[serde(default = "default_highlight_fg")]
    pub highlight_fg: String,
    #[serde(default = "default_urgent_bg")]
    pub urgent_bg: String,
    #[serde(default = "default_warning_bg")]
    pub warning_bg: String,
    #[serde(default = "default_normal_bg")]
    pub normal_bg: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            request_timeout_secs: default_request_timeout_secs(),
            key_bindings: KeyBindings::default(),
            current_theme: default_current_theme(),
            themes: HashMap::new(),
            config_version: Some(CURRENT_CONFIG_VERSION),
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: default_quit(),
            new: default_new(),
            complete: default_complete(),
            undo: default_undo(),
            refresh: default_refresh(),
            list_up: default_list_up(),
            list_down: default_list_down(),
            select: default_select(),
            save: default_save(),
            help: default_help(),
            toggle_auth: default_toggle_auth(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: default_fg(),
            bg: default_bg(),
            highlight_bg: default_highlight_bg(),
            highlight_fg: default_highlight_fg(),
            urgent_bg: default_urgent_bg(),
            warning_bg: default_warning_bg(),
            normal_bg: default_normal_bg(),
        }
    }
}

impl Theme {
    /// Preset themes that are always available
    pub fn get_preset_themes() -> HashMap<String, Theme> {
        let mut themes = HashMap::new();

        themes.insert("default".to_string(), Theme::default());

        themes.insert(
            "pastel".to_string(),
            Theme {
                fg: "white".to_string(),
                bg: "black".to_string(),
                highlight_bg: "blue".to_string(),
                highlight_fg: "white".to_string(),
                // the pastel palette of the classic web todo lists
                urgent_bg: "#ffd6d6".to_string(),
                warning_bg: "#ffe5b4".to_string(),
                normal_bg: "#d0f5df".to_string(),
            },
        );

        themes.insert(
            "monochrome".to_string(),
            Theme {
                fg: "white".to_string(),
                bg: "black".to_string(),
                highlight_bg: "white".to_string(),
                highlight_fg: "black".to_string(),
                urgent_bg: "white".to_string(),
                warning_bg: "gray".to_string(),
                normal_bg: "darkgray".to_string(),
            },
        );

        themes
    }
}

// Default value functions
fn default_server_url() -> String {
    "https://todo-backend-x6ue.onrender.com".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_quit() -> String {
    "q".to_string()
}

fn default_new() -> String {
    "n".to_string()
}

fn default_complete() -> String {
    "Space".to_string()
}

fn default_undo() -> String {
    "u".to_string()
}

fn default_refresh() -> String {
    "F5".to_string()
}

fn default_list_up() -> String {
    "k".to_string()
}

fn default_list_down() -> String {
    "j".to_string()
}

fn default_select() -> String {
    "Enter".to_string()
}

fn default_save() -> String {
    "Ctrl+s".to_string()
}

fn default_help() -> String {
    "F1".to_string()
}

fn default_toggle_auth() -> String {
    "Ctrl+r".to_string()
}

fn default_current_theme() -> String {
    "default".to_string()
}

fn default_fg() -> String {
    "white".to_string()
}

fn default_bg() -> String {
    "black".to_string()
}

fn default_highlight_bg() -> String {
    "blue".to_string()
}

fn default_highlight_fg() -> String {
    "white".to_string()
}

fn default_urgent_bg() -> String {
    "red".to_string()
}

fn default_warning_bg() -> String {
    "yellow".to_string()
}

fn default_normal_bg() -> String {
    "green".to_string()
}

fn default_config_version() -> Option<u32> {
    Some(CURRENT_CONFIG_VERSION)
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config directory: {0}")]
    ConfigDirError(String),
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to write config file: {0}")]
    WriteError(String),
}

impl Config {
    /// Load configuration from file, or create a default one if missing.
    /// Uses the provided profile to determine the config path.
    pub fn load_with_profile(profile: utils::Profile) -> Result<Self, ConfigError> {
        let config_path = Self::get_config_path(profile)?;
        Self::load_from_path(&config_path)
    }

    /// Load configuration from an explicit file path (the `--config` flag),
    /// writing a default file there when none exists.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let contents =
                fs::read_to_string(path).map_err(|e| ConfigError::ReadError(e.to_string()))?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            let mut config = Config::default();
            config.save_to_path(path)?;
            Ok(config)
        }
    }

    /// Load configuration from file, using the production profile
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_profile(utils::Profile::Prod)
    }

    /// Save configuration to file
    pub fn save_with_profile(&mut self, profile: utils::Profile) -> Result<(), ConfigError> {
        let config_path = Self::get_config_path(profile)?;
        self.save_to_path(&config_path)
    }

    /// Save configuration to an explicit file path, creating parent
    /// directories as needed
    pub fn save_to_path(&mut self, path: &Path) -> Result<(), ConfigError> {
        self.config_version = Some(CURRENT_CONFIG_VERSION);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::WriteError(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, toml_string).map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn get_config_path(profile: utils::Profile) -> Result<PathBuf, ConfigError> {
        let config_dir = utils::get_config_dir(profile).ok_or_else(|| {
            ConfigError::ConfigDirError("Could not determine config directory".to_string())
        })?;
        Ok(config_dir.join("config.toml"))
    }

    /// Get the currently active theme: user-defined themes shadow presets,
    /// unknown names fall back to the default theme.
    pub fn get_active_theme(&self) -> Theme {
        if let Some(theme) = self.themes.get(&self.current_theme) {
            theme.clone()
        } else if let Some(theme) = Theme::get_preset_themes().get(&self.current_theme) {
            theme.clone()
        } else {
            Theme::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_full_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server_url, default_server_url());
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.key_bindings.quit, "q");
        assert_eq!(config.current_theme, "default");
    }

    #[test]
    fn partial_toml_keeps_defaults_for_missing_fields() {
        let config: Config = toml::from_str(
            r#"
            server_url = "http://localhost:3000"

            [key_bindings]
            undo = "Ctrl+z"
            "#,
        )
        .unwrap();
        assert_eq!(config.server_url, "http://localhost:3000");
        assert_eq!(config.key_bindings.undo, "Ctrl+z");
        assert_eq!(config.key_bindings.quit, "q");
        assert_eq!(config.key_bindings.save, "Ctrl+s");
    }

    #[test]
    fn active_theme_prefers_user_theme_and_falls_back() {
        let mut config = Config::default();
        config.current_theme = "pastel".to_string();
        assert_eq!(config.get_active_theme().urgent_bg, "#ffd6d6");

        config.current_theme = "no-such-theme".to_string();
        assert_eq!(config.get_active_theme().urgent_bg, default_urgent_bg());

        config.themes.insert(
            "pastel".to_string(),
            Theme {
                urgent_bg: "#ff0000".to_string(),
                ..Theme::default()
            },
        );
        config.current_theme = "pastel".to_string();
        assert_eq!(config.get_active_theme().urgent_bg, "#ff0000");
    }

    #[test]
    fn load_from_path_creates_a_default_file_then_reads_edits_back() {
        let dir = std::env::temp_dir().join(format!("taskdue-config-test-{}", std::process::id()));
        let path = dir.join("config.toml");
        let _ = fs::remove_dir_all(&dir);

        let created = Config::load_from_path(&path).unwrap();
        assert_eq!(created.server_url, default_server_url());
        assert!(path.exists());

        fs::write(&path, "server_url = \"http://localhost:9090\"\n").unwrap();
        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.server_url, "http://localhost:9090");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let mut config = Config::default();
        config.server_url = "http://127.0.0.1:8080".to_string();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.server_url, config.server_url);
        assert_eq!(parsed.config_version, Some(CURRENT_CONFIG_VERSION));
    }
}

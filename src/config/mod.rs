//! Configuration management module.
//!
//! This module handles loading, saving, and managing application configuration,
//! including the theme, log level, content file, timings and hotkey bindings.

mod error;
mod hotkeys;

pub use error::ConfigError;
pub use hotkeys::{
    build_footer_text, default_hotkeys, format_hotkey_display, get_action_for_event,
    matches_hotkey, Hotkey, HotkeyAction, InputMode, ViewHotkeys,
};

use crate::error::AppError;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/folio-tui";
const MAX_DELAY_MS: u64 = 60 * 60 * 1000;
const MAX_TICK_RATE_MS: u64 = 1000;

/// Timing and threshold knobs of the page.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    pub autoplay_interval_ms: u64,
    pub menu_close_delay_ms: u64,
    pub back_to_top_threshold: u32,
    pub reveal_threshold: f32,
    pub tick_rate_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Timings {
            autoplay_interval_ms: 5000,
            menu_close_delay_ms: 300,
            back_to_top_threshold: 200,
            reveal_threshold: 0.2,
            tick_rate_ms: 50,
        }
    }
}

impl Timings {
    pub fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.autoplay_interval_ms)
    }

    pub fn menu_close_delay(&self) -> Duration {
        Duration::from_millis(self.menu_close_delay_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    /// Reject values the controllers cannot work with.
    ///
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &str, message: &str| ConfigError::InvalidValue {
            field: field.to_string(),
            message: message.to_string(),
        };
        if !(1..=MAX_DELAY_MS).contains(&self.autoplay_interval_ms) {
            return Err(invalid("autoplay_interval_ms", "must be between 1 and 3600000"));
        }
        if self.menu_close_delay_ms > MAX_DELAY_MS {
            return Err(invalid("menu_close_delay_ms", "must be at most 3600000"));
        }
        if !(1..=MAX_TICK_RATE_MS).contains(&self.tick_rate_ms) {
            return Err(invalid("tick_rate_ms", "must be between 1 and 1000"));
        }
        if !(self.reveal_threshold > 0.0 && self.reveal_threshold <= 1.0) {
            return Err(invalid("reveal_threshold", "must be in (0, 1]"));
        }
        Ok(())
    }
}

/// Oversees management of configuration file.
///
#[derive(Debug, Clone)]
pub struct Config {
    pub theme_name: String,
    pub log_level: String,
    pub content_path: Option<PathBuf>,
    pub timings: Timings,
    pub hotkeys: ViewHotkeys,
    file_path: Option<PathBuf>,
}

/// On-disk shape of `config.yml`; every key is optional.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default = "default_theme_name")]
    pub theme_name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub content_path: Option<PathBuf>,
    #[serde(default)]
    pub timings: Timings,
    #[serde(default)]
    pub hotkeys: ViewHotkeys,
}

fn default_theme_name() -> String {
    "tokyo-night".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl Config {
    /// Return a new instance holding the defaults.
    ///
    pub fn new() -> Config {
        Config {
            theme_name: default_theme_name(),
            log_level: default_log_level(),
            content_path: None,
            timings: Timings::default(),
            hotkeys: ViewHotkeys::default(),
            file_path: None,
        }
    }

    /// Try to load an existing configuration from the disk using the custom
    /// directory if provided. If no file exists yet, one is written with the
    /// defaults.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        // Use default path unless custom path provided
        let dir_path = match custom_path {
            Some(path) => Path::new(&path).to_path_buf(),
            None => Config::default_path()?,
        };

        if !dir_path.exists() {
            fs::create_dir_all(&dir_path).map_err(|e| ConfigError::CreateDirectoryFailed {
                path: dir_path.clone(),
                source: e,
            })?;
        }

        let file_path = dir_path.join(Path::new(FILE_NAME));
        self.file_path = Some(file_path.clone());

        if file_path.exists() {
            let contents = fs::read_to_string(&file_path).map_err(|e| ConfigError::LoadFailed {
                path: file_path.clone(),
                message: format!("IO error: {}", e),
            })?;
            let data: FileSpec = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;
            data.timings.validate()?;
            self.theme_name = data.theme_name;
            self.log_level = data.log_level;
            self.content_path = data.content_path;
            self.timings = data.timings;
            self.hotkeys = data.hotkeys;
        } else {
            self.save()?;
        }

        Ok(())
    }

    /// Save the current configuration to disk.
    ///
    pub fn save(&self) -> Result<(), AppError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;
        let data = FileSpec {
            theme_name: self.theme_name.clone(),
            log_level: self.log_level.clone(),
            content_path: self.content_path.clone(),
            timings: self.timings.clone(),
            hotkeys: self.hotkeys.clone(),
        };
        let content = serde_yaml::to_string(&data)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        if let Some(parent) = file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::CreateDirectoryFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let mut file = fs::File::create(file_path).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        write!(file, "{}", content).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        file.flush().map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        Ok(())
    }

    /// Path of the loaded configuration file, if any.
    ///
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Parsed log level, falling back to `Info` for unknown names.
    ///
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }

    /// Returns the path buffer for the default path to the configuration file
    /// or an error if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, AppError> {
        match dirs::home_dir() {
            Some(home) => Ok(home.join(Path::new(DEFAULT_DIRECTORY_PATH))),
            None => Err(ConfigError::HomeDirectoryNotFound.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("folio-tui-config-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_defaults() {
        let config = Config::new();
        assert_eq!(config.theme_name, "tokyo-night");
        assert_eq!(config.timings.autoplay_interval(), Duration::from_millis(5000));
        assert_eq!(config.timings.menu_close_delay(), Duration::from_millis(300));
        assert_eq!(config.timings.back_to_top_threshold, 200);
        assert_eq!(config.level_filter(), LevelFilter::Info);
        assert!(config.timings.validate().is_ok());
    }

    #[test]
    fn test_load_writes_defaults_on_first_run() {
        let dir = temp_dir("first-run");
        let mut config = Config::new();
        config.load(dir.to_str()).unwrap();
        let file = dir.join(FILE_NAME);
        assert!(file.exists());
        assert_eq!(config.file_path(), Some(file.as_path()));
        let contents = fs::read_to_string(file).unwrap();
        assert!(contents.contains("autoplay_interval_ms"));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = temp_dir("round-trip");
        let mut config = Config::new();
        config.load(dir.to_str()).unwrap();
        config.theme_name = "nord".to_string();
        config.timings.autoplay_interval_ms = 2500;
        config.content_path = Some(PathBuf::from("/tmp/content.yml"));
        config.save().unwrap();

        let mut reloaded = Config::new();
        reloaded.load(dir.to_str()).unwrap();
        assert_eq!(reloaded.theme_name, "nord");
        assert_eq!(reloaded.timings.autoplay_interval_ms, 2500);
        assert_eq!(reloaded.content_path, Some(PathBuf::from("/tmp/content.yml")));
        assert_eq!(reloaded.hotkeys, ViewHotkeys::default());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = temp_dir("partial");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(FILE_NAME), "log_level: debug\ntimings:\n  tick_rate_ms: 20\n").unwrap();
        let mut config = Config::new();
        config.load(dir.to_str()).unwrap();
        assert_eq!(config.level_filter(), LevelFilter::Debug);
        assert_eq!(config.timings.tick_rate_ms, 20);
        assert_eq!(config.timings.autoplay_interval_ms, 5000);
        assert_eq!(config.theme_name, "tokyo-night");
    }

    #[test]
    fn test_rebinding_one_key_keeps_the_rest() {
        let dir = temp_dir("rebind");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(FILE_NAME), "hotkeys:\n  menu:\n    close_menu: q\n").unwrap();
        let mut config = Config::new();
        config.load(dir.to_str()).unwrap();
        let defaults = ViewHotkeys::default();
        assert_eq!(config.hotkeys.page, defaults.page);
        assert_eq!(config.hotkeys.menu.len(), defaults.menu.len());
        assert_eq!(
            config.hotkeys.menu.get(&HotkeyAction::CloseMenu),
            Some(&"q".parse::<Hotkey>().unwrap())
        );
        assert_eq!(
            config.hotkeys.menu.get(&HotkeyAction::MenuSelect),
            defaults.menu.get(&HotkeyAction::MenuSelect)
        );
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let timings = Timings {
            autoplay_interval_ms: 0,
            ..Timings::default()
        };
        assert!(matches!(
            timings.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "autoplay_interval_ms"
        ));

        let timings = Timings {
            menu_close_delay_ms: u64::MAX,
            ..Timings::default()
        };
        assert!(matches!(
            timings.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "menu_close_delay_ms"
        ));

        let timings = Timings {
            autoplay_interval_ms: 3_600_001,
            ..Timings::default()
        };
        assert!(timings.validate().is_err());

        let timings = Timings {
            autoplay_interval_ms: 3_600_000,
            menu_close_delay_ms: 0,
            ..Timings::default()
        };
        assert!(timings.validate().is_ok());

        let timings = Timings {
            reveal_threshold: 1.5,
            ..Timings::default()
        };
        assert!(timings.validate().is_err());

        let dir = temp_dir("invalid");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(FILE_NAME), "timings:\n  tick_rate_ms: 0\n").unwrap();
        let mut config = Config::new();
        assert!(config.load(dir.to_str()).is_err());
    }

    #[test]
    fn test_save_without_path_fails() {
        assert!(Config::new().save().is_err());
    }

    #[test]
    fn test_unknown_log_level_falls_back() {
        let config = Config {
            log_level: "chatty".to_string(),
            ..Config::new()
        };
        assert_eq!(config.level_filter(), LevelFilter::Info);
    }
}

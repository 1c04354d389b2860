//! Configuration management for chromeless
//!
//! This module handles loading and managing application configuration
//! from config files and environment variables.

use crate::renderer::Color;
use crate::utils::error::{ChromeError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Window configuration
    pub window: WindowConfig,

    /// Title bar and frame configuration
    pub chrome: ChromeConfig,

    /// General application settings
    pub general: GeneralConfig,
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Initial window width (logical pixels)
    pub width: u32,

    /// Initial window height (logical pixels)
    pub height: u32,

    /// Minimum window width (logical pixels)
    pub min_width: u32,

    /// Minimum window height (logical pixels)
    pub min_height: u32,

    /// Maximum window width, unbounded when absent
    pub max_width: Option<u32>,

    /// Maximum window height, unbounded when absent
    pub max_height: Option<u32>,

    /// Window title
    pub title: String,

    /// Optional icon file (PNG, ICO or BMP)
    pub icon: Option<PathBuf>,

    /// Start maximized
    pub start_maximized: bool,
}

/// Which chrome implementation a window gets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChromeMode {
    /// Custom chrome where the platform hooks exist (Windows), system decoration elsewhere
    #[default]
    Auto,

    /// Custom chrome on every platform
    Custom,

    /// Always use the platform's own decoration
    System,
}

impl std::str::FromStr for ChromeMode {
    type Err = ChromeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(ChromeMode::Auto),
            "custom" => Ok(ChromeMode::Custom),
            "system" => Ok(ChromeMode::System),
            other => Err(ChromeError::Config(format!(
                "Invalid chrome mode '{}', must be one of: auto, custom, system",
                other
            ))),
        }
    }
}

/// Title bar and frame configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromeConfig {
    /// Chrome implementation selection
    pub mode: ChromeMode,

    /// Title bar height (logical pixels)
    pub title_bar_height: u32,

    /// Side of the square title bar buttons (logical pixels)
    pub button_size: u32,

    /// Side of the square title bar icon (logical pixels)
    pub icon_size: u32,

    /// Title text size (logical pixels)
    pub title_font_size: f32,

    /// Title bar background (hex)
    pub title_bar_color: String,

    /// Window border (hex)
    pub border_color: String,

    /// Title text and button glyph color (hex)
    pub foreground_color: String,

    /// Content area background (hex)
    pub background_color: String,

    /// Resize frame thickness at 96 DPI
    pub resize_border: u32,

    /// Padded border thickness at 96 DPI
    pub padded_border: u32,
}

/// General application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 960,
            height: 600,
            min_width: 320,
            min_height: 200,
            max_width: None,
            max_height: None,
            title: "Chromeless".to_string(),
            icon: None,
            start_maximized: false,
        }
    }
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            mode: ChromeMode::Auto,
            title_bar_height: 32,
            button_size: 28,
            icon_size: 16,
            title_font_size: 13.0,
            title_bar_color: "#2B2B2B".to_string(),
            border_color: "#3C3C3C".to_string(),
            foreground_color: "#E6E6E6".to_string(),
            background_color: "#1E1E1E".to_string(),
            resize_border: 4,
            padded_border: 4,
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl ChromeConfig {
    pub fn title_bar_color(&self) -> Result<Color> {
        Color::from_hex(&self.title_bar_color)
    }

    pub fn border_color(&self) -> Result<Color> {
        Color::from_hex(&self.border_color)
    }

    pub fn foreground_color(&self) -> Result<Color> {
        Color::from_hex(&self.foreground_color)
    }

    pub fn background_color(&self) -> Result<Color> {
        Color::from_hex(&self.background_color)
    }
}

impl Config {
    /// Load configuration from various sources
    ///
    /// Configuration is loaded in the following order (later sources override earlier):
    /// 1. Default values
    /// 2. System config file (/etc/chromeless/config.toml on Linux)
    /// 3. User config file (~/.config/chromeless/config.toml on Linux)
    /// 4. Environment variables (CHROMELESS_* prefix)
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Some(system_path) = Self::system_config_path() {
            if system_path.exists() {
                config.merge_from_file(&system_path)?;
            }
        }

        if let Some(user_path) = Self::user_config_path() {
            if user_path.exists() {
                config.merge_from_file(&user_path)?;
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from an explicit file, then apply environment overrides
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = Self::default();
        config.merge_from_file(path)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to user config file
    pub fn save(&self) -> Result<()> {
        let path = Self::user_config_path()
            .ok_or_else(|| ChromeError::Config("Cannot determine user config path".to_string()))?;
        self.save_to(&path)
    }

    /// Save configuration to the given path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ChromeError::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let toml = toml::to_string_pretty(self)
            .map_err(|e| ChromeError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, toml)
            .map_err(|e| ChromeError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Merge configuration from a TOML file.
    ///
    /// Every struct is `#[serde(default)]`, so a partial file only replaces
    /// the keys it names.
    fn merge_from_file(&mut self, path: &Path) -> Result<()> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ChromeError::Config(format!("Failed to read config file: {}", e)))?;

        let mut merged = toml::Value::try_from(&*self)
            .map_err(|e| ChromeError::Config(format!("Failed to serialize config: {}", e)))?;
        let overlay: toml::Value = toml::from_str(&contents)
            .map_err(|e| ChromeError::Config(format!("Failed to parse config file: {}", e)))?;
        merge_values(&mut merged, overlay);

        *self = merged
            .try_into()
            .map_err(|e| ChromeError::Config(format!("Failed to parse config file: {}", e)))?;

        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(width) = std::env::var("CHROMELESS_WINDOW_WIDTH") {
            self.window.width = width
                .parse()
                .map_err(|_| ChromeError::Config("Invalid CHROMELESS_WINDOW_WIDTH".to_string()))?;
        }

        if let Ok(height) = std::env::var("CHROMELESS_WINDOW_HEIGHT") {
            self.window.height = height
                .parse()
                .map_err(|_| ChromeError::Config("Invalid CHROMELESS_WINDOW_HEIGHT".to_string()))?;
        }

        if let Ok(mode) = std::env::var("CHROMELESS_CHROME_MODE") {
            self.chrome.mode = mode.parse()?;
        }

        if let Ok(color) = std::env::var("CHROMELESS_TITLE_BAR_COLOR") {
            self.chrome.title_bar_color = color;
        }

        if let Ok(log_level) = std::env::var("CHROMELESS_LOG_LEVEL") {
            self.general.log_level = log_level;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ChromeError::Config("Window dimensions must be non-zero".to_string()));
        }

        if let Some(max_width) = self.window.max_width {
            if max_width < self.window.min_width {
                return Err(ChromeError::Config("max_width must not be below min_width".to_string()));
            }
        }

        if let Some(max_height) = self.window.max_height {
            if max_height < self.window.min_height {
                return Err(ChromeError::Config("max_height must not be below min_height".to_string()));
            }
        }

        if self.chrome.button_size > self.chrome.title_bar_height {
            return Err(ChromeError::Config(
                "button_size must fit inside title_bar_height".to_string(),
            ));
        }

        if self.chrome.title_font_size <= 0.0 {
            return Err(ChromeError::Config("title_font_size must be positive".to_string()));
        }

        self.chrome.title_bar_color()?;
        self.chrome.border_color()?;
        self.chrome.foreground_color()?;
        self.chrome.background_color()?;

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.general.log_level.as_str()) {
            return Err(ChromeError::Config(format!(
                "Invalid log level '{}', must be one of: {:?}",
                self.general.log_level, valid_log_levels
            )));
        }

        Ok(())
    }

    /// Get system config file path
    fn system_config_path() -> Option<PathBuf> {
        #[cfg(target_os = "linux")]
        return Some(PathBuf::from("/etc/chromeless/config.toml"));

        #[cfg(target_os = "windows")]
        return std::env::var("PROGRAMDATA")
            .ok()
            .map(|p| PathBuf::from(p).join("Chromeless").join("config.toml"));

        #[cfg(target_os = "macos")]
        return Some(PathBuf::from("/Library/Application Support/Chromeless/config.toml"));

        #[allow(unreachable_code)]
        None
    }

    /// Get user config file path
    pub fn user_config_path() -> Option<PathBuf> {
        #[cfg(target_os = "linux")]
        return dirs::config_dir().map(|p| p.join("chromeless").join("config.toml"));

        #[cfg(not(target_os = "linux"))]
        return dirs::config_dir().map(|p| p.join("Chromeless").join("config.toml"));
    }
}

/// Recursively overlay `overlay` onto `base`; tables merge key by key
fn merge_values(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.window.width, 960);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.chrome.mode, ChromeMode::Auto);
        assert_eq!(config.chrome.title_bar_height, 32);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.window.width = 0;
        assert!(config.validate().is_err());

        config.window.width = 960;
        config.chrome.title_bar_color = "not-a-color".to_string();
        assert!(config.validate().is_err());

        config.chrome.title_bar_color = "#202020".to_string();
        config.window.max_width = Some(100);
        assert!(config.validate().is_err());

        config.window.max_width = None;
        config.chrome.button_size = 64;
        assert!(config.validate().is_err());

        config.chrome.button_size = 28;
        config.general.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&toml).unwrap();

        assert_eq!(config.window.width, deserialized.window.width);
        assert_eq!(config.chrome.border_color, deserialized.chrome.border_color);
    }

    #[test]
    fn test_chrome_mode_parsing() {
        assert_eq!("auto".parse::<ChromeMode>().unwrap(), ChromeMode::Auto);
        assert_eq!("Custom".parse::<ChromeMode>().unwrap(), ChromeMode::Custom);
        assert_eq!("SYSTEM".parse::<ChromeMode>().unwrap(), ChromeMode::System);
        assert!("frameless".parse::<ChromeMode>().is_err());
    }

    #[test]
    fn test_merge_keeps_unnamed_keys() {
        let mut base = toml::Value::try_from(Config::default()).unwrap();
        let overlay: toml::Value = toml::from_str("[window]\nwidth = 1024\n").unwrap();
        merge_values(&mut base, overlay);

        let merged: Config = base.try_into().unwrap();
        assert_eq!(merged.window.width, 1024);
        assert_eq!(merged.window.height, 600);
        assert_eq!(merged.chrome.title_bar_height, 32);
    }
}

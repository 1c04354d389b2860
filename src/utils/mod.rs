//! Utility module for chromeless
//!
//! This module provides common utilities used throughout the crate:
//! - Error handling with custom error types
//! - Configuration management
//! - Geometry primitives
//! - One-time process startup

pub mod config;
pub mod error;
pub mod geometry;
pub mod startup;

// Re-export commonly used items
pub use config::{ChromeConfig, ChromeMode, Config, GeneralConfig, WindowConfig};
pub use error::{ChromeError, IntoChromeError, Result};
pub use geometry::{Margins, Point, Rect, Size};

/// Initialize the application configuration
///
/// Loads configuration from:
/// 1. Default values
/// 2. System configuration file
/// 3. User configuration file
/// 4. Environment variables
pub fn load_config() -> Result<Config> {
    Config::load()
}

/// Scale a logical length by the display scale factor, rounding to whole pixels
pub fn scale_px(logical: f64, scale_factor: f64) -> f64 {
    (logical * scale_factor).round()
}

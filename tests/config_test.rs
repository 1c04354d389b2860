//! Integration tests for configuration loading
//!
//! Environment overrides are process-wide, so every test that reads
//! configuration runs serially.

use anyhow::Result;
use chromeless::{ChromeMode, Config};
use serial_test::serial;
use std::env;
use std::fs;
use tempfile::TempDir;

const ENV_VARS: [&str; 5] = [
    "CHROMELESS_WINDOW_WIDTH",
    "CHROMELESS_WINDOW_HEIGHT",
    "CHROMELESS_CHROME_MODE",
    "CHROMELESS_TITLE_BAR_COLOR",
    "CHROMELESS_LOG_LEVEL",
];

fn clear_env() {
    for var in ENV_VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_partial_file_keeps_defaults() -> Result<()> {
    clear_env();
    let dir = TempDir::new()?;
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r##"
[window]
title = "Partial"

[chrome]
mode = "custom"
title_bar_color = "#101820"
"##,
    )?;

    let config = Config::load_from(&path)?;
    assert_eq!(config.window.title, "Partial");
    assert_eq!(config.chrome.mode, ChromeMode::Custom);
    assert_eq!(config.chrome.title_bar_color, "#101820");
    assert_eq!(config.window.width, Config::default().window.width);
    assert_eq!(config.chrome.button_size, Config::default().chrome.button_size);
    Ok(())
}

#[test]
#[serial]
fn test_save_and_reload() -> Result<()> {
    clear_env();
    let dir = TempDir::new()?;
    let path = dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.window.width = 1024;
    config.window.max_width = Some(2048);
    config.chrome.border_color = "#FF0000".to_string();
    config.save_to(&path)?;

    let loaded = Config::load_from(&path)?;
    assert_eq!(loaded.window.width, 1024);
    assert_eq!(loaded.window.max_width, Some(2048));
    assert_eq!(loaded.chrome.border_color, "#FF0000");
    Ok(())
}

#[test]
#[serial]
fn test_environment_overrides_file() -> Result<()> {
    clear_env();
    let dir = TempDir::new()?;
    let path = dir.path().join("config.toml");
    fs::write(&path, "[window]\nwidth = 700\n")?;

    env::set_var("CHROMELESS_WINDOW_WIDTH", "1280");
    env::set_var("CHROMELESS_CHROME_MODE", "system");
    let config = Config::load_from(&path);
    clear_env();

    let config = config?;
    assert_eq!(config.window.width, 1280);
    assert_eq!(config.chrome.mode, ChromeMode::System);
    Ok(())
}

#[test]
#[serial]
fn test_invalid_values_are_rejected() -> Result<()> {
    clear_env();
    let dir = TempDir::new()?;

    let bad_color = dir.path().join("color.toml");
    fs::write(&bad_color, "[chrome]\nborder_color = \"red\"\n")?;
    assert!(Config::load_from(&bad_color).is_err());

    let bad_toml = dir.path().join("broken.toml");
    fs::write(&bad_toml, "[window\nwidth = ")?;
    assert!(Config::load_from(&bad_toml).is_err());

    assert!(Config::load_from(&dir.path().join("missing.toml")).is_err());

    let valid = dir.path().join("valid.toml");
    fs::write(&valid, "[window]\nheight = 480\n")?;
    env::set_var("CHROMELESS_WINDOW_HEIGHT", "tall");
    let result = Config::load_from(&valid);
    clear_env();
    assert!(result.is_err());
    Ok(())
}

use anyhow::{Context, Result};
use chromeless::renderer::Color;
use chromeless::utils::startup::{self, StartupOptions};
use chromeless::{ChromeMode, Config};
use clap::Parser;
use log::info;
use std::path::PathBuf;

/// chromeless - a frameless window with a custom title bar
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Window title
    #[arg(short, long)]
    title: Option<String>,

    /// Window width
    #[arg(long)]
    width: Option<u32>,

    /// Window height
    #[arg(long)]
    height: Option<u32>,

    /// Chrome mode: auto, custom or system
    #[arg(short, long, value_name = "MODE")]
    mode: Option<ChromeMode>,

    /// Window icon (PNG, ICO or BMP)
    #[arg(short, long, value_name = "FILE")]
    icon: Option<PathBuf>,

    /// Title bar color (#RRGGBB)
    #[arg(long, value_name = "COLOR")]
    title_bar_color: Option<String>,

    /// Border color (#RRGGBB)
    #[arg(long, value_name = "COLOR")]
    border_color: Option<String>,

    /// Read configuration from this file instead of the default locations
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    /// Apply command-line overrides on top of the loaded configuration
    fn apply(self, config: &mut Config) -> Result<()> {
        if let Some(title) = self.title {
            config.window.title = title;
        }
        if let Some(width) = self.width {
            config.window.width = width;
        }
        if let Some(height) = self.height {
            config.window.height = height;
        }
        if let Some(mode) = self.mode {
            config.chrome.mode = mode;
        }
        if let Some(icon) = self.icon {
            config.window.icon = Some(icon);
        }
        if let Some(color) = self.title_bar_color {
            Color::from_hex(&color).context("Invalid --title-bar-color")?;
            config.chrome.title_bar_color = color;
        }
        if let Some(color) = self.border_color {
            Color::from_hex(&color).context("Invalid --border-color")?;
            config.chrome.border_color = color;
        }
        if self.debug {
            config.general.log_level = "debug".to_string();
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::load().context("Failed to load configuration")?,
    };
    args.apply(&mut config)?;
    config.validate().context("Invalid configuration")?;

    startup::init(&StartupOptions {
        log_level: config.general.log_level.clone(),
        ..StartupOptions::default()
    });

    info!(
        "Opening '{}' ({}x{}, {:?} chrome)",
        config.window.title, config.window.width, config.window.height, config.chrome.mode
    );

    chromeless::run(config)?;
    Ok(())
}

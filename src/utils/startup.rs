//! One-time process configuration.
//!
//! Logging and DPI awareness are process-wide, so they are set here once at
//! application startup instead of as a side effect of creating a window.

use env_logger::Env;
use log::{debug, info};
use std::sync::Once;

static INIT: Once = Once::new();

/// Process-wide startup options
#[derive(Debug, Clone)]
pub struct StartupOptions {
    /// Default log filter when RUST_LOG is not set
    pub log_level: String,

    /// Opt the process into per-monitor DPI awareness
    pub high_dpi: bool,
}

impl Default for StartupOptions {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            high_dpi: true,
        }
    }
}

/// Initialize logging and platform settings. Later calls are ignored.
pub fn init(options: &StartupOptions) {
    INIT.call_once(|| {
        // A test harness or an embedding application may already own the logger.
        let _ = env_logger::Builder::from_env(Env::default().default_filter_or(&options.log_level))
            .format_timestamp_millis()
            .try_init();

        if options.high_dpi {
            enable_high_dpi();
        }

        info!("Starting chromeless v{}", env!("CARGO_PKG_VERSION"));
    });
}

#[cfg(target_os = "windows")]
fn enable_high_dpi() {
    use windows::Win32::UI::HiDpi::{
        SetProcessDpiAwarenessContext, DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2,
    };

    // Fails when a manifest already set the awareness; that is fine.
    if let Err(e) = unsafe { SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2) } {
        debug!("DPI awareness left unchanged: {}", e);
    }
}

#[cfg(not(target_os = "windows"))]
fn enable_high_dpi() {
    debug!("High-DPI scaling is handled by the windowing system on this platform");
}

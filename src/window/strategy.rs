//! Chrome strategies.
//!
//! The strategy is chosen once, when the window is created, and decides
//! whether the OS draws the frame and who answers hit-test queries.

use super::WindowOps;
use crate::chrome::{ChromeInput, ChromeKind, NativeGeometry};
use crate::utils::config::ChromeMode;
use crate::utils::error::Result;

/// Platform capabilities behind a chrome kind
pub trait ChromeStrategy {
    fn kind(&self) -> ChromeKind;

    /// Whether the OS window is created with decorations
    fn decorations(&self) -> bool;

    fn custom_title_bar(&self) -> bool {
        self.kind().custom_title_bar()
    }

    /// Whether an OS hook answers hit-test queries
    fn native_hit_testing(&self) -> bool {
        self.kind().native_hit_testing()
    }

    /// Hook into a freshly created window
    fn attach(&mut self, window: &dyn WindowOps) -> Result<()>;

    /// Hand the latest chrome geometry to the platform side
    fn update(&mut self, geometry: NativeGeometry);

    /// Inputs the platform side produced since the last call
    fn drain_events(&mut self) -> Vec<ChromeInput>;

    fn detach(&mut self);
}

/// Hand-drawn title bar with native frame behavior
#[derive(Default)]
pub struct NativeChrome {
    geometry: NativeGeometry,
    #[cfg(windows)]
    hook: Option<super::native::NativeHook>,
}

impl NativeChrome {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChromeStrategy for NativeChrome {
    fn kind(&self) -> ChromeKind {
        ChromeKind::Native
    }

    /// On Windows the styles stay so snapping, animations and the system
    /// menu keep working; the hook strips the visible frame.
    fn decorations(&self) -> bool {
        cfg!(windows)
    }

    #[cfg(windows)]
    fn attach(&mut self, window: &dyn WindowOps) -> Result<()> {
        use crate::utils::error::ChromeError;

        let handle = window
            .raw_handle()
            .ok_or_else(|| ChromeError::Platform("Window has no native handle".to_string()))?;
        self.hook = Some(super::native::NativeHook::install(handle, self.geometry)?);
        Ok(())
    }

    #[cfg(not(windows))]
    fn attach(&mut self, _window: &dyn WindowOps) -> Result<()> {
        log::debug!("No native hook on this platform, emulating the frame");
        Ok(())
    }

    fn update(&mut self, geometry: NativeGeometry) {
        self.geometry = geometry;
        #[cfg(windows)]
        {
            if let Some(hook) = &self.hook {
                hook.update(geometry);
            }
        }
    }

    fn drain_events(&mut self) -> Vec<ChromeInput> {
        #[cfg(windows)]
        {
            if let Some(hook) = &self.hook {
                return hook.drain_events();
            }
        }
        Vec::new()
    }

    fn detach(&mut self) {
        #[cfg(windows)]
        {
            self.hook = None;
        }
    }
}

/// The platform's own decoration; the chrome only hosts content
#[derive(Debug, Default)]
pub struct DefaultChrome;

impl ChromeStrategy for DefaultChrome {
    fn kind(&self) -> ChromeKind {
        ChromeKind::Default
    }

    fn decorations(&self) -> bool {
        true
    }

    fn attach(&mut self, _window: &dyn WindowOps) -> Result<()> {
        Ok(())
    }

    fn update(&mut self, _geometry: NativeGeometry) {}

    fn drain_events(&mut self) -> Vec<ChromeInput> {
        Vec::new()
    }

    fn detach(&mut self) {}
}

/// Resolve the configured mode for this platform
pub fn chrome_kind_for(mode: ChromeMode) -> ChromeKind {
    match mode {
        ChromeMode::Auto if cfg!(windows) => ChromeKind::Native,
        ChromeMode::Auto => ChromeKind::Default,
        ChromeMode::Custom => ChromeKind::Native,
        ChromeMode::System => ChromeKind::Default,
    }
}

pub fn select_strategy(mode: ChromeMode) -> Box<dyn ChromeStrategy> {
    let kind = chrome_kind_for(mode);
    log::info!("Using {:?} chrome ({:?} mode)", kind, mode);
    match kind {
        ChromeKind::Native => Box::new(NativeChrome::new()),
        ChromeKind::Default => Box::new(DefaultChrome),
    }
}

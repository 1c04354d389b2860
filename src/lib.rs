//! chromeless - a frameless top-level window with a hand-drawn title bar
//!
//! The [`chrome`] module holds the platform-independent chrome: layout,
//! hit-testing, buttons, the system menu model and the controller that
//! ties them together. [`window`] connects it to a winit window and, on
//! Windows, to the native message hook. [`renderer`] paints the chrome.

pub mod chrome;
pub mod renderer;
pub mod utils;
pub mod widget;
pub mod window;

pub use chrome::{ChromeController, ChromeInput, ChromeKind, WindowCommand, WindowState};
pub use utils::config::{ChromeMode, Config};
pub use utils::error::{ChromeError, Result};
pub use window::{run, ChromeApp};

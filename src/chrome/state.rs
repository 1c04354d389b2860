//! Window state as seen by the chrome.

use super::button::ButtonKind;

/// Top-level window state
///
/// The OS owns every transition. The chrome only predicts where a button
/// press leads and observes the result through `ChromeInput::StateChanged`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowState {
    #[default]
    Normal,
    Minimized,
    Maximized,
    /// Terminal; the window has been asked to close
    Closed,
}

impl WindowState {
    pub fn is_maximized(self) -> bool {
        self == WindowState::Maximized
    }

    pub fn is_minimized(self) -> bool {
        self == WindowState::Minimized
    }

    pub fn is_closed(self) -> bool {
        self == WindowState::Closed
    }

    /// The state a title-bar button press leads to
    pub fn after_button(self, kind: ButtonKind) -> WindowState {
        if self.is_closed() {
            return self;
        }
        match kind {
            ButtonKind::Minimize => WindowState::Minimized,
            ButtonKind::Maximize if self.is_maximized() => WindowState::Normal,
            ButtonKind::Maximize => WindowState::Maximized,
            ButtonKind::Close => WindowState::Closed,
        }
    }

    /// Derive the state from the flags a window system reports
    pub fn from_flags(minimized: bool, maximized: bool) -> WindowState {
        if minimized {
            WindowState::Minimized
        } else if maximized {
            WindowState::Maximized
        } else {
            WindowState::Normal
        }
    }
}

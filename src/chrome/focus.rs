//! Focus-reason synthesis.
//!
//! Frameless windows receive focus without the usual activation context,
//! so the reason is reconstructed from the input state at that moment.

/// Why the window received keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusReason {
    Mouse,
    Tab,
    Backtab,
    ActiveWindow,
}

/// Pressed keys and buttons at the moment focus arrived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSnapshot {
    pub mouse_button_down: bool,
    pub shift_down: bool,
}

/// Anything that is not a click counts as keyboard navigation.
pub fn focus_reason(input: InputSnapshot) -> FocusReason {
    if input.mouse_button_down {
        FocusReason::Mouse
    } else if input.shift_down {
        FocusReason::Backtab
    } else {
        FocusReason::Tab
    }
}

//! System menu model.
//!
//! The OS owns the menu itself; the chrome only decides which items are
//! enabled, which one is the default, and where the popup opens.

use super::state::WindowState;
use crate::utils::geometry::Point;

/// Entries of the window system menu, with their `SC_*` command codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemCommand {
    Restore,
    Move,
    Size,
    Minimize,
    Maximize,
    Close,
}

impl SystemCommand {
    pub const ALL: [SystemCommand; 6] = [
        SystemCommand::Restore,
        SystemCommand::Move,
        SystemCommand::Size,
        SystemCommand::Minimize,
        SystemCommand::Maximize,
        SystemCommand::Close,
    ];

    pub fn code(self) -> u32 {
        match self {
            SystemCommand::Size => 0xF000,
            SystemCommand::Move => 0xF010,
            SystemCommand::Minimize => 0xF020,
            SystemCommand::Maximize => 0xF030,
            SystemCommand::Close => 0xF060,
            SystemCommand::Restore => 0xF120,
        }
    }
}

/// Enabled state of every item plus the popup anchor
#[derive(Debug, Clone, PartialEq)]
pub struct SystemMenu {
    items: Vec<(SystemCommand, bool)>,
    default_item: SystemCommand,
    anchor: Point,
}

impl SystemMenu {
    /// Build the menu for `state`, opening at `anchor` (window coordinates)
    pub fn for_state(state: WindowState, anchor: Point) -> Self {
        let normal = state == WindowState::Normal;
        let items = SystemCommand::ALL
            .into_iter()
            .map(|command| {
                let enabled = match command {
                    SystemCommand::Restore => !normal,
                    SystemCommand::Move | SystemCommand::Size => normal,
                    SystemCommand::Minimize => !state.is_minimized(),
                    SystemCommand::Maximize => !state.is_maximized(),
                    SystemCommand::Close => true,
                };
                (command, enabled)
            })
            .collect();

        let default_item = if state.is_minimized() {
            SystemCommand::Restore
        } else {
            SystemCommand::Close
        };

        Self {
            items,
            default_item,
            anchor,
        }
    }

    pub fn items(&self) -> &[(SystemCommand, bool)] {
        &self.items
    }

    pub fn is_enabled(&self, command: SystemCommand) -> bool {
        self.items.iter().any(|(c, enabled)| *c == command && *enabled)
    }

    pub fn default_item(&self) -> SystemCommand {
        self.default_item
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }
}

//! Window management module for chromeless
//!
//! This module connects the platform-independent chrome to a real OS
//! window: it translates winit events into [`ChromeInput`] values, applies
//! the resulting [`WindowCommand`]s through [`WindowOps`], and selects the
//! chrome strategy (native hook or emulated frame) at creation time.
//!
//! [`ChromeInput`]: crate::chrome::ChromeInput

use crate::chrome::{ResizeEdge, WindowCommand};
use crate::renderer::Icon;
use crate::utils::error::Result;
use crate::utils::geometry::Point;
use raw_window_handle::RawWindowHandle;
use winit::window::CursorIcon;

pub mod events;
pub mod native;
pub mod strategy;
pub mod winit_window;

pub use events::EventHandler;
pub use strategy::{chrome_kind_for, select_strategy, ChromeStrategy, DefaultChrome, NativeChrome};
pub use winit_window::{run, ChromeApp, HostWindow};

/// Operations the chrome needs from the OS window
pub trait WindowOps {
    fn minimize(&self);

    fn maximize(&self);

    /// Leave the minimized or maximized state
    fn restore(&self);

    /// Ask the window to close
    fn close(&self);

    /// Start an interactive move with the pressed mouse button
    fn drag_move(&self) -> Result<()>;

    /// Start an interactive resize from `edge`
    fn drag_resize(&self, edge: ResizeEdge) -> Result<()>;

    /// Open the system menu at a position relative to the window
    fn show_system_menu(&self, position: Point);

    fn request_redraw(&self);

    fn set_title(&self, title: &str);

    fn set_icon(&self, icon: &Icon) -> Result<()>;

    fn set_cursor(&self, cursor: CursorIcon);

    /// The raw platform handle, when the window has one
    fn raw_handle(&self) -> Option<RawWindowHandle> {
        None
    }
}

/// Apply one chrome command to the window
pub fn apply_command(window: &dyn WindowOps, command: WindowCommand) -> Result<()> {
    match command {
        WindowCommand::Minimize => window.minimize(),
        WindowCommand::Maximize => window.maximize(),
        WindowCommand::Restore => window.restore(),
        WindowCommand::Close => window.close(),
        WindowCommand::DragMove => window.drag_move()?,
        WindowCommand::DragResize(edge) => window.drag_resize(edge)?,
        WindowCommand::ShowSystemMenu(position) => window.show_system_menu(position),
        WindowCommand::SetCursor(cursor) => window.set_cursor(cursor),
        WindowCommand::Redraw => window.request_redraw(),
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;

    /// Window operations recorded by [`RecordingWindow`]
    #[derive(Debug, Clone, PartialEq)]
    pub enum Op {
        Minimize,
        Maximize,
        Restore,
        Close,
        DragMove,
        DragResize(ResizeEdge),
        ShowSystemMenu(Point),
        Redraw,
        SetTitle(String),
        SetIcon,
        SetCursor(CursorIcon),
    }

    /// A window that records every operation
    #[derive(Debug, Default)]
    pub struct RecordingWindow {
        ops: RefCell<Vec<Op>>,
    }

    impl RecordingWindow {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn ops(&self) -> Vec<Op> {
            self.ops.borrow().clone()
        }

        fn record(&self, op: Op) {
            self.ops.borrow_mut().push(op);
        }
    }

    impl WindowOps for RecordingWindow {
        fn minimize(&self) {
            self.record(Op::Minimize);
        }

        fn maximize(&self) {
            self.record(Op::Maximize);
        }

        fn restore(&self) {
            self.record(Op::Restore);
        }

        fn close(&self) {
            self.record(Op::Close);
        }

        fn drag_move(&self) -> Result<()> {
            self.record(Op::DragMove);
            Ok(())
        }

        fn drag_resize(&self, edge: ResizeEdge) -> Result<()> {
            self.record(Op::DragResize(edge));
            Ok(())
        }

        fn show_system_menu(&self, position: Point) {
            self.record(Op::ShowSystemMenu(position));
        }

        fn request_redraw(&self) {
            self.record(Op::Redraw);
        }

        fn set_title(&self, title: &str) {
            self.record(Op::SetTitle(title.to_string()));
        }

        fn set_icon(&self, _icon: &Icon) -> Result<()> {
            self.record(Op::SetIcon);
            Ok(())
        }

        fn set_cursor(&self, cursor: CursorIcon) {
            self.record(Op::SetCursor(cursor));
        }
    }
}

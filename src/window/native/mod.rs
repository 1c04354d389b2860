//! Native window-message integration
//!
//! Only Windows gets a message hook. The parts that never touch the OS
//! (hit-code mapping and the per-window hook registry) live here and are
//! compiled everywhere.

#[cfg(windows)]
mod win32;

#[cfg(windows)]
pub use win32::{composition_enabled, NativeHook};

use crate::chrome::{HitRegion, ResizeEdge};

/// `WM_NCHITTEST` answer codes
pub mod ht {
    pub const NOWHERE: u32 = 0;
    pub const CLIENT: u32 = 1;
    pub const CAPTION: u32 = 2;
    pub const SYSMENU: u32 = 3;
    pub const LEFT: u32 = 10;
    pub const RIGHT: u32 = 11;
    pub const TOP: u32 = 12;
    pub const TOPLEFT: u32 = 13;
    pub const TOPRIGHT: u32 = 14;
    pub const BOTTOM: u32 = 15;
    pub const BOTTOMLEFT: u32 = 16;
    pub const BOTTOMRIGHT: u32 = 17;
}

/// Map a hit region to the code the OS expects.
///
/// Buttons report as client area so the chrome receives their clicks.
pub fn nc_hit_code(region: HitRegion) -> u32 {
    match region {
        HitRegion::Nowhere => ht::NOWHERE,
        HitRegion::SysMenu => ht::SYSMENU,
        HitRegion::Button(_) | HitRegion::Client => ht::CLIENT,
        HitRegion::Caption => ht::CAPTION,
        HitRegion::Border(edge) => match edge {
            ResizeEdge::Left => ht::LEFT,
            ResizeEdge::Right => ht::RIGHT,
            ResizeEdge::Top => ht::TOP,
            ResizeEdge::TopLeft => ht::TOPLEFT,
            ResizeEdge::TopRight => ht::TOPRIGHT,
            ResizeEdge::Bottom => ht::BOTTOM,
            ResizeEdge::BottomLeft => ht::BOTTOMLEFT,
            ResizeEdge::BottomRight => ht::BOTTOMRIGHT,
        },
    }
}

/// Whether a key-down message is the first press rather than auto-repeat.
///
/// Bit 30 of the message `lParam` holds the previous key state.
pub fn is_first_press(lparam: isize) -> bool {
    lparam & (1 << 30) == 0
}

/// Per-window state shared between the hook procedure and the host.
///
/// Keyed by the raw window handle. Every accessor copies in or out, so no
/// borrow outlives the call and the window procedure may re-enter freely.
pub mod registry {
    use crate::chrome::{ChromeInput, NativeGeometry};
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Debug, Default)]
    struct HookState {
        geometry: NativeGeometry,
        events: Vec<ChromeInput>,
    }

    thread_local! {
        static HOOKS: RefCell<HashMap<isize, HookState>> = RefCell::new(HashMap::new());
    }

    pub fn insert(window: isize, geometry: NativeGeometry) {
        HOOKS.with_borrow_mut(|hooks| {
            hooks.insert(
                window,
                HookState {
                    geometry,
                    events: Vec::new(),
                },
            );
        });
    }

    /// Returns whether the window was registered
    pub fn remove(window: isize) -> bool {
        HOOKS.with_borrow_mut(|hooks| hooks.remove(&window).is_some())
    }

    pub fn contains(window: isize) -> bool {
        HOOKS.with_borrow(|hooks| hooks.contains_key(&window))
    }

    pub fn geometry(window: isize) -> Option<NativeGeometry> {
        HOOKS.with_borrow(|hooks| hooks.get(&window).map(|state| state.geometry))
    }

    pub fn set_geometry(window: isize, geometry: NativeGeometry) {
        HOOKS.with_borrow_mut(|hooks| {
            if let Some(state) = hooks.get_mut(&window) {
                state.geometry = geometry;
            }
        });
    }

    /// Queue an input for the host; dropped for unknown windows
    pub fn push_event(window: isize, input: ChromeInput) {
        HOOKS.with_borrow_mut(|hooks| {
            if let Some(state) = hooks.get_mut(&window) {
                state.events.push(input);
            }
        });
    }

    pub fn drain_events(window: isize) -> Vec<ChromeInput> {
        HOOKS.with_borrow_mut(|hooks| {
            hooks
                .get_mut(&window)
                .map(|state| std::mem::take(&mut state.events))
                .unwrap_or_default()
        })
    }
}

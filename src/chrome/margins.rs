//! Content margins and window track-size limits.

use super::state::WindowState;
use crate::utils::geometry::{Margins, Point, Rect, Size};

/// Margins between the window edge and the chrome.
///
/// A maximized window under desktop composition extends past the monitor
/// by the resize border on every side; the chrome reserves that strip.
/// Everything else paints edge to edge.
pub fn content_margins(state: WindowState, composition_enabled: bool, shadow_inset: f64) -> Margins {
    if state.is_maximized() && composition_enabled {
        Margins::uniform(shadow_inset)
    } else {
        Margins::ZERO
    }
}

/// Minimum and optional maximum window size in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizeLimits {
    pub min: Size,
    pub max: Option<Size>,
}

impl SizeLimits {
    pub fn new(min: Size, max: Option<Size>) -> Self {
        Self { min, max }
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            min: self.min.scaled(factor),
            max: self.max.map(|max| max.scaled(factor)),
        }
    }
}

/// A monitor's full bounds and its work area (bounds minus the taskbar),
/// both in virtual-screen coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonitorArea {
    pub bounds: Rect,
    pub work: Rect,
}

/// Answer to a size-constraint query
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrackLimits {
    pub min_track: Size,
    /// `None` leaves the system maximum in place
    pub max_track: Option<Size>,
    /// Maximized position relative to the monitor origin
    pub max_position: Option<Point>,
    pub max_size: Option<Size>,
}

/// Compute track limits.
///
/// `monitor` is the monitor the window is on; `taskbar_on_monitor` is true
/// when the taskbar lives on that same monitor, in which case a maximized
/// window is clamped to the work area so the taskbar stays visible.
pub fn track_limits(limits: SizeLimits, monitor: Option<MonitorArea>, taskbar_on_monitor: bool) -> TrackLimits {
    let mut track = TrackLimits {
        min_track: limits.min,
        max_track: limits.max,
        ..TrackLimits::default()
    };

    if let Some(area) = monitor.filter(|_| taskbar_on_monitor) {
        track.max_position = Some(Point::new(
            area.work.x - area.bounds.x,
            area.work.y - area.bounds.y,
        ));
        track.max_size = Some(area.work.size());
    }

    track
}

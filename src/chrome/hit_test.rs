//! Hit-test classification for the frameless window
//!
//! Classification is a pure function of a [`HitTestLayout`] snapshot and a
//! cursor position in window coordinates (physical pixels). The native hook
//! answers OS hit-test queries from the same function that drives cursor
//! feedback and drag emulation on other platforms.

use super::button::ButtonKind;
use crate::utils::geometry::{Margins, Point, Rect, Size};
use winit::window::{CursorIcon, ResizeDirection};

/// Resize edge enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    TopLeft,
}

impl ResizeEdge {
    /// Convert to cursor icon
    pub fn to_cursor_icon(&self) -> CursorIcon {
        match self {
            ResizeEdge::Top | ResizeEdge::Bottom => CursorIcon::NsResize,
            ResizeEdge::Left | ResizeEdge::Right => CursorIcon::EwResize,
            ResizeEdge::TopLeft | ResizeEdge::BottomRight => CursorIcon::NwseResize,
            ResizeEdge::TopRight | ResizeEdge::BottomLeft => CursorIcon::NeswResize,
        }
    }

    /// Convert to the direction winit's interactive resize expects
    pub fn to_resize_direction(&self) -> ResizeDirection {
        match self {
            ResizeEdge::Top => ResizeDirection::North,
            ResizeEdge::TopRight => ResizeDirection::NorthEast,
            ResizeEdge::Right => ResizeDirection::East,
            ResizeEdge::BottomRight => ResizeDirection::SouthEast,
            ResizeEdge::Bottom => ResizeDirection::South,
            ResizeEdge::BottomLeft => ResizeDirection::SouthWest,
            ResizeEdge::Left => ResizeDirection::West,
            ResizeEdge::TopLeft => ResizeDirection::NorthWest,
        }
    }
}

/// Logical region under the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitRegion {
    /// Outside the window bounds
    Nowhere,
    /// The window icon, which opens the system menu
    SysMenu,
    /// A title-bar button; reported to the OS as ordinary client area
    Button(ButtonKind),
    /// Draggable title-bar area
    Caption,
    Border(ResizeEdge),
    Client,
}

impl HitRegion {
    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            HitRegion::Border(edge) => edge.to_cursor_icon(),
            _ => CursorIcon::Default,
        }
    }
}

/// Resize frame metrics in 96-DPI pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameMetrics {
    /// Sizing frame width (`SM_CXSIZEFRAME`)
    pub size_frame: u32,
    /// Padded border width (`SM_CXPADDEDBORDER`)
    pub padded_border: u32,
}

impl FrameMetrics {
    pub const fn new(size_frame: u32, padded_border: u32) -> Self {
        Self {
            size_frame,
            padded_border,
        }
    }

    /// Resize border thickness in physical pixels
    pub fn border_thickness(&self, scale_factor: f64) -> f64 {
        ((self.size_frame + self.padded_border) as f64 * scale_factor).round()
    }
}

impl Default for FrameMetrics {
    fn default() -> Self {
        Self::new(4, 4)
    }
}

/// Geometry snapshot that fully determines hit-testing
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HitTestLayout {
    /// Window size
    pub window: Size,
    pub title_bar: Rect,
    pub icon: Rect,
    pub minimize: Rect,
    pub maximize: Rect,
    pub close: Rect,
    pub maximized: bool,
    /// Resize border thickness
    pub border: f64,
}

impl HitTestLayout {
    pub fn button(&self, kind: ButtonKind) -> Rect {
        match kind {
            ButtonKind::Minimize => self.minimize,
            ButtonKind::Maximize => self.maximize,
            ButtonKind::Close => self.close,
        }
    }

    /// Where the system menu opens: under the icon, level with the bottom
    /// of the title bar
    pub fn menu_anchor(&self) -> Point {
        Point::new(self.icon.x, self.title_bar.bottom())
    }

    /// Title bar minus the resize border, or the whole bar when maximized
    pub fn caption(&self) -> Rect {
        if self.maximized {
            return self.title_bar;
        }
        self.title_bar.inset(Margins {
            left: self.border,
            top: self.border,
            right: self.border,
            bottom: 0.0,
        })
    }
}

/// Classify `point` against `layout`
pub fn hit_test(layout: &HitTestLayout, point: Point) -> HitRegion {
    let bounds = Rect::from_size(layout.window);
    if !bounds.contains(point) {
        return HitRegion::Nowhere;
    }

    if layout.icon.contains(point) {
        return HitRegion::SysMenu;
    }

    if let Some(kind) = ButtonKind::ALL
        .into_iter()
        .find(|kind| layout.button(*kind).contains(point))
    {
        return HitRegion::Button(kind);
    }

    if layout.caption().contains(point) {
        return HitRegion::Caption;
    }

    if !layout.maximized {
        if let Some(edge) = border_edge(bounds, layout.border, point) {
            return HitRegion::Border(edge);
        }
    }

    HitRegion::Client
}

fn border_edge(bounds: Rect, border: f64, point: Point) -> Option<ResizeEdge> {
    if border <= 0.0 {
        return None;
    }
    let left = point.x < bounds.left() + border;
    let right = point.x >= bounds.right() - border;
    let top = point.y < bounds.top() + border;
    let bottom = point.y >= bounds.bottom() - border;

    // Corners take priority
    match (left, right, top, bottom) {
        (true, _, true, _) => Some(ResizeEdge::TopLeft),
        (_, true, true, _) => Some(ResizeEdge::TopRight),
        (true, _, _, true) => Some(ResizeEdge::BottomLeft),
        (_, true, _, true) => Some(ResizeEdge::BottomRight),
        (true, ..) => Some(ResizeEdge::Left),
        (_, true, ..) => Some(ResizeEdge::Right),
        (_, _, true, _) => Some(ResizeEdge::Top),
        (.., true) => Some(ResizeEdge::Bottom),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(maximized: bool) -> HitTestLayout {
        HitTestLayout {
            window: Size::new(800.0, 600.0),
            title_bar: Rect::new(0.0, 0.0, 800.0, 32.0),
            icon: Rect::new(8.0, 8.0, 16.0, 16.0),
            minimize: Rect::new(708.0, 2.0, 28.0, 28.0),
            maximize: Rect::new(736.0, 2.0, 28.0, 28.0),
            close: Rect::new(764.0, 2.0, 28.0, 28.0),
            maximized,
            border: 8.0,
        }
    }

    #[test]
    fn test_regions() {
        let l = layout(false);
        assert_eq!(hit_test(&l, Point::new(-1.0, 10.0)), HitRegion::Nowhere);
        assert_eq!(hit_test(&l, Point::new(800.0, 10.0)), HitRegion::Nowhere);
        assert_eq!(hit_test(&l, Point::new(10.0, 10.0)), HitRegion::SysMenu);
        assert_eq!(hit_test(&l, Point::new(720.0, 10.0)), HitRegion::Button(ButtonKind::Minimize));
        assert_eq!(hit_test(&l, Point::new(750.0, 10.0)), HitRegion::Button(ButtonKind::Maximize));
        assert_eq!(hit_test(&l, Point::new(790.0, 10.0)), HitRegion::Button(ButtonKind::Close));
        assert_eq!(hit_test(&l, Point::new(400.0, 20.0)), HitRegion::Caption);
        assert_eq!(hit_test(&l, Point::new(400.0, 300.0)), HitRegion::Client);
    }

    #[test]
    fn test_eight_border_zones() {
        let l = layout(false);
        let cases = [
            (Point::new(2.0, 2.0), ResizeEdge::TopLeft),
            (Point::new(400.0, 2.0), ResizeEdge::Top),
            (Point::new(798.0, 1.0), ResizeEdge::TopRight),
            (Point::new(798.0, 300.0), ResizeEdge::Right),
            (Point::new(798.0, 598.0), ResizeEdge::BottomRight),
            (Point::new(400.0, 598.0), ResizeEdge::Bottom),
            (Point::new(2.0, 598.0), ResizeEdge::BottomLeft),
            (Point::new(2.0, 300.0), ResizeEdge::Left),
        ];
        for (point, edge) in cases {
            assert_eq!(hit_test(&l, point), HitRegion::Border(edge), "at {:?}", point);
        }
    }

    #[test]
    fn test_maximized_has_no_borders_and_full_caption() {
        let l = layout(true);
        assert_eq!(hit_test(&l, Point::new(400.0, 2.0)), HitRegion::Caption);
        assert_eq!(hit_test(&l, Point::new(2.0, 20.0)), HitRegion::Caption);
        assert_eq!(hit_test(&l, Point::new(2.0, 300.0)), HitRegion::Client);
        assert_eq!(hit_test(&l, Point::new(400.0, 598.0)), HitRegion::Client);
    }

    #[test]
    fn test_buttons_win_over_top_border() {
        let l = layout(false);
        assert_eq!(hit_test(&l, Point::new(790.0, 3.0)), HitRegion::Button(ButtonKind::Close));
    }

    #[test]
    fn test_top_right_resize_beside_close_button() {
        let l = layout(false);
        assert_eq!(hit_test(&l, Point::new(797.0, 5.0)), HitRegion::Border(ResizeEdge::TopRight));
        assert_eq!(hit_test(&l, Point::new(797.0, 15.0)), HitRegion::Border(ResizeEdge::Right));
        assert_eq!(hit_test(&l, Point::new(760.0, 4.0)), HitRegion::Button(ButtonKind::Maximize));
    }

    #[test]
    fn test_classification_is_deterministic() {
        let l = layout(false);
        for y in (0..600).step_by(7) {
            for x in (0..800).step_by(13) {
                let p = Point::new(x as f64, y as f64);
                assert_eq!(hit_test(&l, p), hit_test(&l, p));
            }
        }
    }

    #[test]
    fn test_border_thickness_scales() {
        let metrics = FrameMetrics::default();
        assert_eq!(metrics.border_thickness(1.0), 8.0);
        assert_eq!(metrics.border_thickness(1.5), 12.0);
        assert_eq!(metrics.border_thickness(2.0), 16.0);
    }

    #[test]
    fn test_edge_to_cursor_mapping() {
        assert_eq!(ResizeEdge::Top.to_cursor_icon(), CursorIcon::NsResize);
        assert_eq!(ResizeEdge::Left.to_cursor_icon(), CursorIcon::EwResize);
        assert_eq!(ResizeEdge::TopLeft.to_cursor_icon(), CursorIcon::NwseResize);
        assert_eq!(ResizeEdge::BottomLeft.to_cursor_icon(), CursorIcon::NeswResize);
        assert_eq!(HitRegion::Caption.cursor_icon(), CursorIcon::Default);
    }

    #[test]
    fn test_edge_to_resize_direction() {
        assert_eq!(ResizeEdge::TopRight.to_resize_direction(), ResizeDirection::NorthEast);
        assert_eq!(ResizeEdge::Bottom.to_resize_direction(), ResizeDirection::South);
    }
}

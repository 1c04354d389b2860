//! Geometry primitives shared by the chrome, the painter and the native hook.
//!
//! All chrome geometry is kept in physical pixels with `f64` components so the
//! values coming from winit and from raw window messages can be compared
//! without conversions.

/// A point in window-local or screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Offset this point by another point
    pub fn offset(self, by: Point) -> Self {
        Self::new(self.x + by.x, self.y + by.y)
    }
}

/// A width/height pair
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Scale both dimensions
    pub fn scaled(self, factor: f64) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }
}

/// An axis-aligned rectangle with its origin at the top-left corner.
///
/// `contains` is half-open: the left and top edges are inside, the right
/// and bottom edges are not.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn bottom_left(&self) -> Point {
        Point::new(self.x, self.bottom())
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Shrink the rectangle by the given margins; never produces a negative size
    pub fn inset(&self, margins: Margins) -> Rect {
        Rect::new(
            self.x + margins.left,
            self.y + margins.top,
            (self.width - margins.left - margins.right).max(0.0),
            (self.height - margins.top - margins.bottom).max(0.0),
        )
    }

    /// Shrink the rectangle by the same amount on every side
    pub fn shrink(&self, amount: f64) -> Rect {
        self.inset(Margins::uniform(amount))
    }

    /// Translate the rectangle
    pub fn translate(&self, by: Point) -> Rect {
        Rect::new(self.x + by.x, self.y + by.y, self.width, self.height)
    }

    /// Center a rectangle of `size` inside this one
    pub fn centered(&self, size: Size) -> Rect {
        Rect::new(
            self.x + (self.width - size.width) / 2.0,
            self.y + (self.height - size.height) / 2.0,
            size.width,
            size.height,
        )
    }
}

/// Per-edge margins
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Margins {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Margins {
    pub const ZERO: Margins = Margins { left: 0.0, top: 0.0, right: 0.0, bottom: 0.0 };

    pub const fn uniform(value: f64) -> Self {
        Self { left: value, top: value, right: value, bottom: value }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_is_half_open() {
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(rect.contains(Point::new(10.0, 10.0)));
        assert!(rect.contains(Point::new(29.9, 29.9)));
        assert!(!rect.contains(Point::new(30.0, 15.0)));
        assert!(!rect.contains(Point::new(15.0, 30.0)));
        assert!(!rect.contains(Point::new(9.9, 15.0)));
    }

    #[test]
    fn test_rect_inset_clamps() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let inset = rect.inset(Margins::uniform(8.0));
        assert_eq!(inset.x, 8.0);
        assert_eq!(inset.width, 0.0);
        assert!(inset.is_empty());
    }

    #[test]
    fn test_rect_centered() {
        let rect = Rect::new(0.0, 0.0, 100.0, 40.0);
        let inner = rect.centered(Size::new(20.0, 20.0));
        assert_eq!(inner, Rect::new(40.0, 10.0, 20.0, 20.0));
    }
}

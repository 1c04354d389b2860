//! CPU raster target for the chrome.
//!
//! A straightforward RGBA8 framebuffer with source-over blending. The chrome
//! only draws axis-aligned rectangles, short glyph strokes, one small icon and
//! one line of text per frame, so there is no need for a path rasterizer.

use crate::renderer::text::TextRasterizer;
use crate::renderer::{Color, Icon, LineJoin, Painter};
use crate::utils::geometry::{Point, Rect};

/// RGBA8 framebuffer implementing [`Painter`]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    text: Option<TextRasterizer>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width as usize) * (height as usize) * 4],
            text: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 rows, tightly packed
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Resize the framebuffer; contents are discarded when the size changes
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels = vec![0; (width as usize) * (height as usize) * 4];
    }

    pub fn clear(&mut self, color: Color) {
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&color.to_array());
        }
    }

    /// Read back one pixel, `None` outside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.index(x, y);
        Some(Color::rgba(self.pixels[i], self.pixels[i + 1], self.pixels[i + 2], self.pixels[i + 3]))
    }

    fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + x as usize) * 4
    }

    fn blend(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 || color.a == 0 {
            return;
        }
        let i = self.index(x as u32, y as u32);
        if color.a == 255 {
            self.pixels[i..i + 4].copy_from_slice(&color.to_array());
            return;
        }

        let sa = color.a as u32;
        let da = self.pixels[i + 3] as u32;
        let out_a = sa + da * (255 - sa) / 255;
        if out_a == 0 {
            return;
        }
        let mix = |s: u8, d: u8| ((s as u32 * sa + d as u32 * da * (255 - sa) / 255) / out_a) as u8;
        self.pixels[i] = mix(color.r, self.pixels[i]);
        self.pixels[i + 1] = mix(color.g, self.pixels[i + 1]);
        self.pixels[i + 2] = mix(color.b, self.pixels[i + 2]);
        self.pixels[i + 3] = out_a as u8;
    }

    /// Fill the pixel-aligned span covered by `rect`, clipped to the canvas
    fn fill_span(&mut self, rect: Rect, color: Color) {
        let x0 = rect.left().round().max(0.0) as i64;
        let y0 = rect.top().round().max(0.0) as i64;
        let x1 = rect.right().round().min(self.width as f64) as i64;
        let y1 = rect.bottom().round().min(self.height as f64) as i64;
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend(x, y, color);
            }
        }
    }

    fn fill_disc(&mut self, center: Point, radius: f64, color: Color) {
        let x0 = (center.x - radius).floor() as i64;
        let x1 = (center.x + radius).ceil() as i64;
        let y0 = (center.y - radius).floor() as i64;
        let y1 = (center.y + radius).ceil() as i64;
        for y in y0..y1 {
            for x in x0..x1 {
                let dx = x as f64 + 0.5 - center.x;
                let dy = y as f64 + 0.5 - center.y;
                let coverage = (radius + 0.5 - (dx * dx + dy * dy).sqrt()).clamp(0.0, 1.0);
                self.blend(x, y, with_coverage(color, coverage));
            }
        }
    }
}

fn with_coverage(color: Color, coverage: f64) -> Color {
    color.with_alpha((color.a as f64 * coverage).round() as u8)
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let (abx, aby) = (b.x - a.x, b.y - a.y);
    let len_sq = abx * abx + aby * aby;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((p.x - a.x) * abx + (p.y - a.y) * aby) / len_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (a.x + abx * t, a.y + aby * t);
    ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt()
}

impl Painter for Canvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.fill_span(rect, color);
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64, join: LineJoin) {
        if rect.is_empty() || width <= 0.0 {
            return;
        }
        let w = width.min(rect.width / 2.0).min(rect.height / 2.0).max(1.0);

        // Round joins leave the corner squares to the discs below.
        let corner = if join == LineJoin::Round && w > 1.0 { w } else { 0.0 };

        self.fill_span(Rect::new(rect.x + corner, rect.y, rect.width - 2.0 * corner, w), color);
        self.fill_span(
            Rect::new(rect.x + corner, rect.bottom() - w, rect.width - 2.0 * corner, w),
            color,
        );
        self.fill_span(Rect::new(rect.x, rect.y + w, w, rect.height - 2.0 * w), color);
        self.fill_span(Rect::new(rect.right() - w, rect.y + w, w, rect.height - 2.0 * w), color);

        if corner > 0.0 {
            let r = w / 2.0;
            for c in [
                Point::new(rect.x + r, rect.y + r),
                Point::new(rect.right() - r, rect.y + r),
                Point::new(rect.x + r, rect.bottom() - r),
                Point::new(rect.right() - r, rect.bottom() - r),
            ] {
                self.fill_disc(c, r, color);
            }
        }
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: f64) {
        let half = width.max(1.0) / 2.0;
        let x0 = (from.x.min(to.x) - half).floor() as i64;
        let x1 = (from.x.max(to.x) + half).ceil() as i64;
        let y0 = (from.y.min(to.y) - half).floor() as i64;
        let y1 = (from.y.max(to.y) + half).ceil() as i64;
        for y in y0..y1 {
            for x in x0..x1 {
                let d = distance_to_segment(Point::new(x as f64 + 0.5, y as f64 + 0.5), from, to);
                let coverage = (half + 0.5 - d).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, with_coverage(color, coverage));
                }
            }
        }
    }

    fn draw_image(&mut self, rect: Rect, icon: &Icon) {
        let Some(image) = icon.image() else {
            return;
        };
        if rect.is_empty() {
            return;
        }
        let x0 = rect.x.round() as i64;
        let y0 = rect.y.round() as i64;
        let w = rect.width.round() as i64;
        let h = rect.height.round() as i64;
        for dy in 0..h {
            let sy = ((dy as f64 + 0.5) * image.height() as f64 / h as f64) as u32;
            for dx in 0..w {
                let sx = ((dx as f64 + 0.5) * image.width() as f64 / w as f64) as u32;
                let p = image.get_pixel(sx.min(image.width() - 1), sy.min(image.height() - 1));
                self.blend(x0 + dx, y0 + dy, Color::rgba(p[0], p[1], p[2], p[3]));
            }
        }
    }

    fn draw_text(&mut self, rect: Rect, text: &str, color: Color, size: f32) {
        if rect.is_empty() || text.is_empty() {
            return;
        }
        let mut rasterizer = self.text.take().unwrap_or_default();
        let mut covered = Vec::new();
        let line_height = rasterizer.rasterize(text, color, size, rect.width as f32, |x, y, c| {
            covered.push((x, y, c));
        });
        self.text = Some(rasterizer);

        let origin_x = rect.x.round() as i64;
        let origin_y = (rect.y + (rect.height - line_height as f64) / 2.0).round() as i64;
        for (x, y, c) in covered {
            let px = origin_x + x as i64;
            let py = origin_y + y as i64;
            if rect.contains(Point::new(px as f64, py as f64)) {
                self.blend(px, py, c);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_rect_clips() {
        let mut canvas = Canvas::new(10, 10);
        canvas.fill_rect(Rect::new(-5.0, -5.0, 10.0, 10.0), Color::WHITE);
        assert_eq!(canvas.pixel(0, 0), Some(Color::WHITE));
        assert_eq!(canvas.pixel(4, 4), Some(Color::WHITE));
        assert_eq!(canvas.pixel(5, 5), Some(Color::TRANSPARENT));
        assert_eq!(canvas.pixel(10, 0), None);
    }

    #[test]
    fn test_alpha_blending() {
        let mut canvas = Canvas::new(1, 1);
        canvas.clear(Color::BLACK);
        canvas.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE.with_alpha(128));
        let px = canvas.pixel(0, 0).unwrap();
        assert!(px.r > 120 && px.r < 135);
        assert_eq!(px.a, 255);
    }

    #[test]
    fn test_stroke_rect_leaves_interior() {
        let mut canvas = Canvas::new(10, 10);
        canvas.stroke_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::WHITE, 1.0, LineJoin::Round);
        assert_eq!(canvas.pixel(0, 0), Some(Color::WHITE));
        assert_eq!(canvas.pixel(9, 9), Some(Color::WHITE));
        assert_eq!(canvas.pixel(0, 5), Some(Color::WHITE));
        assert_eq!(canvas.pixel(5, 5), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_draw_line_covers_endpoints() {
        let mut canvas = Canvas::new(10, 10);
        canvas.draw_line(Point::new(1.5, 5.5), Point::new(8.5, 5.5), Color::WHITE, 1.0);
        assert_eq!(canvas.pixel(1, 5), Some(Color::WHITE));
        assert_eq!(canvas.pixel(8, 5), Some(Color::WHITE));
        assert_eq!(canvas.pixel(5, 2), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_draw_image_scales() {
        let icon = Icon::from_rgba(1, 1, vec![255, 0, 0, 255]).unwrap();
        let mut canvas = Canvas::new(8, 8);
        canvas.draw_image(Rect::new(2.0, 2.0, 4.0, 4.0), &icon);
        assert_eq!(canvas.pixel(2, 2), Some(Color::rgb(255, 0, 0)));
        assert_eq!(canvas.pixel(5, 5), Some(Color::rgb(255, 0, 0)));
        assert_eq!(canvas.pixel(6, 6), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_resize_discards_contents() {
        let mut canvas = Canvas::new(4, 4);
        canvas.clear(Color::WHITE);
        canvas.resize(6, 2);
        assert_eq!(canvas.pixels().len(), 6 * 2 * 4);
        assert_eq!(canvas.pixel(0, 0), Some(Color::TRANSPARENT));
    }
}

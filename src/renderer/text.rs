//! Title text rasterization via cosmic-text.

use crate::renderer::Color;
use cosmic_text::{Attrs, Buffer, FontSystem, Metrics, Shaping, SwashCache, Wrap};

const LINE_HEIGHT_FACTOR: f32 = 1.3;

/// Shapes and rasterizes single-line text.
///
/// Loading the system font database is slow, so a rasterizer is created
/// once per canvas and reused across frames.
pub struct TextRasterizer {
    font_system: FontSystem,
    swash_cache: SwashCache,
}

impl TextRasterizer {
    pub fn new() -> Self {
        Self {
            font_system: FontSystem::new(),
            swash_cache: SwashCache::new(),
        }
    }

    /// Rasterize `text` on one line no wider than `max_width`.
    ///
    /// `put` receives every covered pixel relative to the top-left of the
    /// line box, with coverage folded into the alpha channel.
    pub fn rasterize<F>(&mut self, text: &str, color: Color, size: f32, max_width: f32, mut put: F) -> f32
    where
        F: FnMut(i32, i32, Color),
    {
        let line_height = (size * LINE_HEIGHT_FACTOR).ceil();
        if text.is_empty() || max_width <= 0.0 {
            return line_height;
        }

        let mut buffer = Buffer::new(&mut self.font_system, Metrics::new(size, line_height));
        buffer.set_wrap(&mut self.font_system, Wrap::None);
        buffer.set_size(&mut self.font_system, Some(max_width), Some(line_height));
        buffer.set_text(&mut self.font_system, text, Attrs::new(), Shaping::Advanced);
        buffer.shape_until_scroll(&mut self.font_system, false);

        let base = cosmic_text::Color::rgba(color.r, color.g, color.b, color.a);
        buffer.draw(&mut self.font_system, &mut self.swash_cache, base, |x, y, w, h, glyph| {
            for dy in 0..h as i32 {
                for dx in 0..w as i32 {
                    put(x + dx, y + dy, Color::rgba(glyph.r(), glyph.g(), glyph.b(), glyph.a()));
                }
            }
        });

        line_height
    }
}

impl Default for TextRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

//! Renderer module for chromeless
//!
//! The chrome paints through the [`Painter`] trait. Two painters live here:
//! [`DisplayList`] records draw commands for inspection, and [`Canvas`]
//! rasterizes them into an RGBA8 buffer that [`WgpuRenderer`] presents.

use crate::utils::error::{ChromeError, Result};
use crate::utils::geometry::{Point, Rect};

pub mod canvas;
pub mod icon;
pub mod pipeline;
pub mod text;
pub mod texture;
pub mod wgpu_renderer;

pub use canvas::Canvas;
pub use icon::Icon;
pub use wgpu_renderer::WgpuRenderer;

/// Renderer trait defining the interface for presenting painted frames
pub trait Renderer {
    /// Present a fully painted canvas to the screen
    fn present(&mut self, canvas: &Canvas) -> Result<()>;

    /// Handle window resize
    ///
    /// # Arguments
    ///
    /// * `width` - New surface width in physical pixels
    /// * `height` - New surface height in physical pixels
    fn resize(&mut self, width: u32, height: u32) -> Result<()>;
}

/// RGBA color (non-premultiplied, sRGB encoded)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA`
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex
            .strip_prefix('#')
            .ok_or_else(|| ChromeError::InvalidInput(format!("Color '{}' must start with '#'", hex)))?;

        let channel = |i: usize| {
            digits
                .get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| ChromeError::InvalidInput(format!("Invalid color '{}'", hex)))
        };

        match digits.len() {
            6 => Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(ChromeError::InvalidInput(format!(
                "Color '{}' must be #RRGGBB or #RRGGBBAA",
                hex
            ))),
        }
    }

    /// Return the same color with a different alpha
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Mix `amount` (0.0 - 1.0) of `other` into this color
    pub fn mix(self, other: Color, amount: f32) -> Self {
        let t = amount.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self {
            r: lerp(self.r, other.r),
            g: lerp(self.g, other.g),
            b: lerp(self.b, other.b),
            a: lerp(self.a, other.a),
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// How the corners of a stroked rectangle are joined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineJoin {
    Miter,
    Round,
}

/// A single recorded draw operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        color: Color,
        width: f64,
        join: LineJoin,
    },
    Line {
        from: Point,
        to: Point,
        color: Color,
        width: f64,
    },
    Image {
        rect: Rect,
        icon: Icon,
    },
    Text {
        rect: Rect,
        text: String,
        color: Color,
        size: f32,
    },
}

/// The paint contract the chrome draws through
pub trait Painter {
    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64, join: LineJoin);

    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: f64);

    fn draw_image(&mut self, rect: Rect, icon: &Icon);

    /// Draw single-line text left-aligned and vertically centered in `rect`
    fn draw_text(&mut self, rect: Rect, text: &str, color: Color, size: f32);
}

/// A painter that records every command
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Replay the recorded commands onto another painter
    pub fn replay(&self, painter: &mut dyn Painter) {
        for command in &self.commands {
            match command {
                DrawCommand::FillRect { rect, color } => painter.fill_rect(*rect, *color),
                DrawCommand::StrokeRect { rect, color, width, join } => {
                    painter.stroke_rect(*rect, *color, *width, *join)
                }
                DrawCommand::Line { from, to, color, width } => painter.draw_line(*from, *to, *color, *width),
                DrawCommand::Image { rect, icon } => painter.draw_image(*rect, icon),
                DrawCommand::Text { rect, text, color, size } => painter.draw_text(*rect, text, *color, *size),
            }
        }
    }
}

impl Painter for DisplayList {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64, join: LineJoin) {
        self.commands.push(DrawCommand::StrokeRect { rect, color, width, join });
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: f64) {
        self.commands.push(DrawCommand::Line { from, to, color, width });
    }

    fn draw_image(&mut self, rect: Rect, icon: &Icon) {
        self.commands.push(DrawCommand::Image { rect, icon: icon.clone() });
    }

    fn draw_text(&mut self, rect: Rect, text: &str, color: Color, size: f32) {
        self.commands.push(DrawCommand::Text {
            rect,
            text: text.to_string(),
            color,
            size,
        });
    }
}

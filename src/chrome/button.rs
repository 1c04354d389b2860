//! Title-bar buttons
//!
//! A button is a fixed square that paints one monochrome glyph. It keeps
//! no state of its own: the maximize glyph is chosen at paint time from
//! the owning window's state, looked up through the widget registry.

use crate::renderer::{Color, Painter};
use crate::utils::geometry::{Rect, Size};
use crate::widget::{WidgetId, WidgetRegistry};

/// Glyph side length in logical pixels
pub const GLYPH_SIZE: u32 = 10;

const CLOSE_HOVER: Color = Color::rgb(0xE8, 0x11, 0x23);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonKind {
    Minimize,
    Maximize,
    Close,
}

impl ButtonKind {
    /// Left-to-right order in the title bar
    pub const ALL: [ButtonKind; 3] = [ButtonKind::Minimize, ButtonKind::Maximize, ButtonKind::Close];

    pub fn name(self) -> &'static str {
        match self {
            ButtonKind::Minimize => "minimize",
            ButtonKind::Maximize => "maximize",
            ButtonKind::Close => "close",
        }
    }
}

/// The picture drawn on a button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Close,
    Minimize,
    Maximize,
    Restore,
}

impl Glyph {
    /// 10x10 coverage mask, one row per entry, bit 9 is the leftmost pixel
    pub fn mask(self) -> [u16; GLYPH_SIZE as usize] {
        match self {
            Glyph::Close => [
                0b11_0000_0011,
                0b01_1000_0110,
                0b00_1100_1100,
                0b00_0111_1000,
                0b00_0011_0000,
                0b00_0111_1000,
                0b00_1100_1100,
                0b01_1000_0110,
                0b11_0000_0011,
                0b00_0000_0000,
            ],
            Glyph::Minimize => [
                0,
                0,
                0,
                0,
                0,
                0,
                0,
                0b01_1111_1110,
                0b01_1111_1110,
                0,
            ],
            Glyph::Maximize => [
                0b11_1111_1110,
                0b11_1111_1110,
                0b10_0000_0010,
                0b10_0000_0010,
                0b10_0000_0010,
                0b10_0000_0010,
                0b10_0000_0010,
                0b10_0000_0010,
                0b11_1111_1110,
                0b00_0000_0000,
            ],
            Glyph::Restore => [
                0b00_0111_1110,
                0b00_0111_1110,
                0b00_0100_0010,
                0b01_1111_1010,
                0b01_1111_1010,
                0b01_0000_1110,
                0b01_0000_1000,
                0b01_0000_1000,
                0b01_1111_1000,
                0b00_0000_0000,
            ],
        }
    }

    /// Horizontal runs `(row, first column, length)` of the mask
    pub fn runs(self) -> Vec<(u32, u32, u32)> {
        let mut runs = Vec::new();
        for (row, bits) in self.mask().iter().enumerate() {
            let mut col = 0;
            while col < GLYPH_SIZE {
                if bits & (1 << (GLYPH_SIZE - 1 - col)) == 0 {
                    col += 1;
                    continue;
                }
                let start = col;
                while col < GLYPH_SIZE && bits & (1 << (GLYPH_SIZE - 1 - col)) != 0 {
                    col += 1;
                }
                runs.push((row as u32, start, col - start));
            }
        }
        runs
    }
}

/// Visual feedback state of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Interaction {
    pub hovered: bool,
    pub pressed: bool,
}

/// One title-bar button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Button {
    kind: ButtonKind,
    id: WidgetId,
    owner: WidgetId,
}

impl Button {
    pub fn new(kind: ButtonKind, id: WidgetId, owner: WidgetId) -> Self {
        Self { kind, id, owner }
    }

    pub fn kind(&self) -> ButtonKind {
        self.kind
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn owner(&self) -> WidgetId {
        self.owner
    }

    /// Glyph for the owner's current state.
    ///
    /// A stale owner reads as not maximized.
    pub fn glyph(&self, registry: &WidgetRegistry) -> Glyph {
        match self.kind {
            ButtonKind::Close => Glyph::Close,
            ButtonKind::Minimize => Glyph::Minimize,
            ButtonKind::Maximize => {
                let maximized = registry.window_state(self.owner).is_some_and(|s| s.is_maximized());
                if maximized {
                    Glyph::Restore
                } else {
                    Glyph::Maximize
                }
            }
        }
    }

    pub fn paint(
        &self,
        painter: &mut dyn Painter,
        registry: &WidgetRegistry,
        rect: Rect,
        foreground: Color,
        interaction: Interaction,
        scale: f64,
    ) {
        if rect.is_empty() {
            return;
        }

        if interaction.hovered || interaction.pressed {
            let fill = match (self.kind, interaction.pressed) {
                (ButtonKind::Close, false) => CLOSE_HOVER,
                (ButtonKind::Close, true) => CLOSE_HOVER.mix(Color::BLACK, 0.2),
                (_, false) => foreground.with_alpha(0x24),
                (_, true) => foreground.with_alpha(0x48),
            };
            painter.fill_rect(rect, fill);
        }

        let pixel = scale.max(1.0).round();
        let side = GLYPH_SIZE as f64 * pixel;
        let area = rect.centered(Size::new(side, side));
        let origin_x = area.x.round();
        let origin_y = area.y.round();

        let color = if self.kind == ButtonKind::Close && interaction.hovered {
            Color::WHITE
        } else {
            foreground
        };
        for (row, col, len) in self.glyph(registry).runs() {
            painter.fill_rect(
                Rect::new(
                    origin_x + col as f64 * pixel,
                    origin_y + row as f64 * pixel,
                    len as f64 * pixel,
                    pixel,
                ),
                color,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chrome::state::WindowState;
    use crate::renderer::{DisplayList, DrawCommand};
    use crate::widget::{WidgetKind, WidgetRecord};

    fn setup(state: WindowState) -> (WidgetRegistry, Button) {
        let mut registry = WidgetRegistry::new();
        let owner = registry.insert(WidgetRecord::new("window", WidgetKind::Window { state }));
        let id = registry.insert(WidgetRecord::new("max", WidgetKind::Button(ButtonKind::Maximize)));
        (registry, Button::new(ButtonKind::Maximize, id, owner))
    }

    #[test]
    fn test_maximize_glyph_follows_owner_state() {
        for (state, expected) in [
            (WindowState::Normal, Glyph::Maximize),
            (WindowState::Minimized, Glyph::Maximize),
            (WindowState::Maximized, Glyph::Restore),
        ] {
            let (registry, button) = setup(state);
            assert_eq!(button.glyph(&registry), expected, "state {:?}", state);
        }
    }

    #[test]
    fn test_glyph_after_restore() {
        let (mut registry, button) = setup(WindowState::Maximized);
        registry.set_window_state(button.owner(), WindowState::Normal);
        assert_eq!(button.glyph(&registry), Glyph::Maximize);
    }

    #[test]
    fn test_stale_owner_draws_maximize() {
        let (mut registry, button) = setup(WindowState::Maximized);
        registry.remove(button.owner());
        assert_eq!(button.glyph(&registry), Glyph::Maximize);
    }

    #[test]
    fn test_fixed_glyphs() {
        let (registry, button) = setup(WindowState::Maximized);
        let close = Button::new(ButtonKind::Close, button.id(), button.owner());
        let minimize = Button::new(ButtonKind::Minimize, button.id(), button.owner());
        assert_eq!(close.glyph(&registry), Glyph::Close);
        assert_eq!(minimize.glyph(&registry), Glyph::Minimize);
    }

    #[test]
    fn test_runs_cover_mask() {
        for glyph in [Glyph::Close, Glyph::Minimize, Glyph::Maximize, Glyph::Restore] {
            let lit: u32 = glyph.mask().iter().map(|row| row.count_ones()).sum();
            let covered: u32 = glyph.runs().iter().map(|(_, _, len)| len).sum();
            assert_eq!(lit, covered, "{:?}", glyph);
        }
        assert_eq!(Glyph::Minimize.runs(), vec![(7, 1, 8), (8, 1, 8)]);
    }

    #[test]
    fn test_paint_centers_glyph() {
        let (registry, button) = setup(WindowState::Normal);
        let minimize = Button::new(ButtonKind::Minimize, button.id(), button.owner());
        let mut list = DisplayList::new();
        minimize.paint(
            &mut list,
            &registry,
            Rect::new(0.0, 0.0, 30.0, 30.0),
            Color::WHITE,
            Interaction::default(),
            1.0,
        );

        assert_eq!(
            list.commands()[0],
            DrawCommand::FillRect {
                rect: Rect::new(11.0, 17.0, 8.0, 1.0),
                color: Color::WHITE,
            }
        );
    }

    #[test]
    fn test_hover_paints_background_first() {
        let (registry, button) = setup(WindowState::Normal);
        let close = Button::new(ButtonKind::Close, button.id(), button.owner());
        let mut list = DisplayList::new();
        let rect = Rect::new(0.0, 0.0, 28.0, 28.0);
        close.paint(
            &mut list,
            &registry,
            rect,
            Color::BLACK,
            Interaction { hovered: true, pressed: false },
            1.0,
        );

        assert_eq!(list.commands()[0], DrawCommand::FillRect { rect, color: CLOSE_HOVER });
        assert!(list.commands()[1..].iter().all(|c| matches!(
            c,
            DrawCommand::FillRect { color: Color::WHITE, .. }
        )));
    }
}

//! Title-bar geometry.
//!
//! Everything is computed in physical pixels from logical metrics and the
//! window scale factor.

use super::button::ButtonKind;
use crate::utils::config::ChromeConfig;
use crate::utils::geometry::{Margins, Point, Rect, Size};
use crate::utils::scale_px;

/// Title-bar metrics in logical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TitleBarMetrics {
    pub height: f64,
    pub button_size: f64,
    pub icon_size: f64,
    /// Space between the title-bar edges and the icon or the buttons
    pub padding: f64,
    /// Space between the icon, the title and the buttons
    pub spacing: f64,
}

impl Default for TitleBarMetrics {
    fn default() -> Self {
        Self {
            height: 32.0,
            button_size: 28.0,
            icon_size: 16.0,
            padding: 8.0,
            spacing: 8.0,
        }
    }
}

impl From<&ChromeConfig> for TitleBarMetrics {
    fn from(config: &ChromeConfig) -> Self {
        Self {
            height: config.title_bar_height as f64,
            button_size: config.button_size as f64,
            icon_size: config.icon_size as f64,
            ..Self::default()
        }
    }
}

/// Resolved chrome geometry
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChromeLayout {
    /// The whole window
    pub window: Rect,
    /// Window minus content margins; the border is stroked around it
    pub frame: Rect,
    pub title_bar: Rect,
    pub icon: Rect,
    pub title: Rect,
    pub minimize: Rect,
    pub maximize: Rect,
    pub close: Rect,
    /// Area left for the content widget
    pub content: Rect,
}

impl ChromeLayout {
    /// Lay out the chrome.
    ///
    /// Without a title bar every title-bar rect is empty and the content
    /// takes the whole frame.
    pub fn compute(
        size: Size,
        scale_factor: f64,
        margins: Margins,
        metrics: &TitleBarMetrics,
        title_bar: bool,
    ) -> Self {
        let window = Rect::from_size(size);
        let frame = window.inset(margins);

        if !title_bar {
            let empty = Rect::new(frame.x, frame.y, 0.0, 0.0);
            return Self {
                window,
                frame,
                title_bar: empty,
                icon: empty,
                title: empty,
                minimize: empty,
                maximize: empty,
                close: empty,
                content: frame,
            };
        }

        let px = |logical: f64| scale_px(logical, scale_factor);
        let bar_height = px(metrics.height).min(frame.height);
        let bar = Rect::new(frame.x, frame.y, frame.width, bar_height);

        let padding = px(metrics.padding);
        let button = px(metrics.button_size).min(bar_height);
        let button_y = bar.y + ((bar_height - button) / 2.0).round();
        // The right padding keeps the buttons clear of the resize border.
        let close = Rect::new(
            (bar.right() - padding - button).max(bar.x),
            button_y,
            button,
            button,
        );
        let maximize = close.translate(Point::new(-button, 0.0));
        let minimize = maximize.translate(Point::new(-button, 0.0));

        let icon_side = px(metrics.icon_size).min(bar_height);
        let icon = Rect::new(
            bar.x + padding,
            bar.y + ((bar_height - icon_side) / 2.0).round(),
            icon_side,
            icon_side,
        );

        let spacing = px(metrics.spacing);
        let title_x = icon.right() + spacing;
        let title = Rect::new(title_x, bar.y, (minimize.x - spacing - title_x).max(0.0), bar_height);

        let content = Rect::new(
            frame.x,
            bar.bottom(),
            frame.width,
            (frame.bottom() - bar.bottom()).max(0.0),
        );

        Self {
            window,
            frame,
            title_bar: bar,
            icon,
            title,
            minimize,
            maximize,
            close,
            content,
        }
    }

    pub fn button(&self, kind: ButtonKind) -> Rect {
        match kind {
            ButtonKind::Minimize => self.minimize,
            ButtonKind::Maximize => self.maximize,
            ButtonKind::Close => self.close,
        }
    }
}

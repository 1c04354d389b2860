//! Window chrome for chromeless
//!
//! [`ChromeController`] owns everything the frameless window draws itself:
//! title, icon, colors, the title-bar layout, the three buttons and the
//! content host. It is platform independent: the host feeds it
//! [`ChromeInput`] values and applies the [`WindowCommand`]s it returns.
//! The native hook and the emulated frame both classify the cursor through
//! the same [`hit_test`] function.

pub mod button;
pub mod focus;
pub mod hit_test;
pub mod layout;
pub mod margins;
pub mod state;
pub mod system_menu;

pub use button::{Button, ButtonKind, Glyph, Interaction};
pub use focus::{focus_reason, FocusReason, InputSnapshot};
pub use hit_test::{hit_test, FrameMetrics, HitRegion, HitTestLayout, ResizeEdge};
pub use layout::{ChromeLayout, TitleBarMetrics};
pub use margins::{content_margins, track_limits, MonitorArea, SizeLimits, TrackLimits};
pub use state::WindowState;
pub use system_menu::{SystemCommand, SystemMenu};

use crate::renderer::{Color, Icon, LineJoin, Painter};
use crate::utils::config::Config;
use crate::utils::error::{ChromeError, Result};
use crate::utils::geometry::{Margins, Point, Size};
use crate::widget::{SizePolicy, WidgetId, WidgetKind, WidgetRecord, WidgetRegistry};
use winit::window::{CursorIcon, WindowId};

/// Which chrome a window uses, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeKind {
    /// Hand-drawn title bar and frame
    Native,
    /// The platform's standard decoration; the chrome only hosts content
    Default,
}

impl ChromeKind {
    pub fn custom_title_bar(self) -> bool {
        self == ChromeKind::Native
    }

    /// Whether an OS hook answers hit-test queries. Without one the
    /// controller emulates the frame through drag commands.
    pub fn native_hit_testing(self) -> bool {
        self == ChromeKind::Native && cfg!(windows)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// Everything the chrome reacts to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChromeInput {
    /// Cursor position in window coordinates
    CursorMoved(Point),
    CursorLeft,
    PointerPressed(PointerButton),
    PointerReleased(PointerButton),
    /// Second primary press in quick succession
    DoubleClicked,
    Resized(Size),
    ScaleFactorChanged(f64),
    /// The OS changed the window state
    StateChanged(WindowState),
    CompositionChanged(bool),
    FocusIn(FocusReason),
    FocusOut,
    /// Alt+Space
    SystemMenuKey,
    CloseRequested,
}

/// Operations the chrome asks of the OS window
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowCommand {
    Minimize,
    Maximize,
    Restore,
    Close,
    /// Start an interactive move with the pressed button
    DragMove,
    DragResize(ResizeEdge),
    /// Open the system menu at a window-relative position
    ShowSystemMenu(Point),
    SetCursor(CursorIcon),
    Redraw,
}

/// Geometry snapshot shared with the native hook
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NativeGeometry {
    pub hit_test: HitTestLayout,
    /// Size limits in physical pixels
    pub limits: SizeLimits,
    pub state: WindowState,
}

/// Frameless window chrome
pub struct ChromeController {
    registry: WidgetRegistry,
    window: WidgetId,
    title_bar: WidgetId,
    content_box: WidgetId,
    buttons: [Button; 3],
    content: Option<WidgetId>,

    kind: ChromeKind,
    parent: Option<WindowId>,

    title: String,
    icon: Icon,
    title_bar_color: Color,
    border_color: Color,
    foreground: Color,
    background: Color,
    title_font_size: f32,

    metrics: TitleBarMetrics,
    frame: FrameMetrics,
    /// Size limits in logical pixels
    limits: SizeLimits,

    size: Size,
    scale_factor: f64,
    composition_enabled: bool,
    focused: bool,
    layout: ChromeLayout,

    cursor: Option<Point>,
    cursor_icon: CursorIcon,
    hovered: Option<ButtonKind>,
    pressed: Option<ButtonKind>,
}

impl ChromeController {
    /// Build the chrome for a new top-level window.
    ///
    /// `parent` is the owning window, if any.
    pub fn new(config: &Config, kind: ChromeKind, parent: Option<WindowId>) -> Result<Self> {
        let chrome = &config.chrome;
        let window_config = &config.window;

        let mut registry = WidgetRegistry::new();
        let window = registry.insert(WidgetRecord::new(
            window_config.title.clone(),
            WidgetKind::Window {
                state: WindowState::Normal,
            },
        ));

        let title_bar = registry.insert(WidgetRecord::new("title-bar", WidgetKind::Container));
        registry.attach(window, title_bar)?;
        registry.set_visible(title_bar, kind.custom_title_bar());

        let icon_label = registry.insert(WidgetRecord::new("icon", WidgetKind::Label));
        let title_label = registry.insert(WidgetRecord::new("title", WidgetKind::Label));
        registry.attach(title_bar, icon_label)?;
        registry.attach(title_bar, title_label)?;

        let buttons = ButtonKind::ALL.map(|button_kind| {
            let id = registry.insert(WidgetRecord::new(button_kind.name(), WidgetKind::Button(button_kind)));
            Button::new(button_kind, id, window)
        });
        for button in &buttons {
            registry.attach(title_bar, button.id())?;
        }

        let content_box = registry.insert(WidgetRecord::new("content", WidgetKind::Container));
        registry.attach(window, content_box)?;
        registry.set_size_policy(content_box, SizePolicy::Expanding);

        let limits = SizeLimits::new(
            Size::new(window_config.min_width as f64, window_config.min_height as f64),
            window_config
                .max_width
                .zip(window_config.max_height)
                .map(|(w, h)| Size::new(w as f64, h as f64)),
        );

        let mut controller = Self {
            registry,
            window,
            title_bar,
            content_box,
            buttons,
            content: None,
            kind,
            parent,
            title: window_config.title.clone(),
            icon: Icon::empty(),
            title_bar_color: chrome.title_bar_color()?,
            border_color: chrome.border_color()?,
            foreground: chrome.foreground_color()?,
            background: chrome.background_color()?,
            title_font_size: chrome.title_font_size,
            metrics: TitleBarMetrics::from(chrome),
            frame: FrameMetrics::new(chrome.resize_border, chrome.padded_border),
            limits,
            size: Size::new(window_config.width as f64, window_config.height as f64),
            scale_factor: 1.0,
            composition_enabled: false,
            focused: true,
            layout: ChromeLayout::default(),
            cursor: None,
            cursor_icon: CursorIcon::Default,
            hovered: None,
            pressed: None,
        };
        controller.relayout();

        log::debug!("Created {:?} chrome for '{}'", kind, controller.title);
        Ok(controller)
    }

    pub fn kind(&self) -> ChromeKind {
        self.kind
    }

    pub fn parent(&self) -> Option<WindowId> {
        self.parent
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_icon(&mut self, icon: Icon) {
        self.icon = icon;
    }

    /// The current icon, empty when none was set
    pub fn icon(&self) -> Icon {
        self.icon.clone()
    }

    /// Takes effect on the next paint
    pub fn set_title_bar_color(&mut self, color: Color) {
        self.title_bar_color = color;
    }

    pub fn title_bar_color(&self) -> Color {
        self.title_bar_color
    }

    /// Takes effect on the next paint
    pub fn set_border_color(&mut self, color: Color) {
        self.border_color = color;
    }

    pub fn border_color(&self) -> Color {
        self.border_color
    }

    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut WidgetRegistry {
        &mut self.registry
    }

    /// The widget standing for the window itself
    pub fn window_widget(&self) -> WidgetId {
        self.window
    }

    pub fn title_bar_widget(&self) -> WidgetId {
        self.title_bar
    }

    /// The box content widgets are attached to
    pub fn content_box(&self) -> WidgetId {
        self.content_box
    }

    pub fn buttons(&self) -> &[Button; 3] {
        &self.buttons
    }

    /// Register a new content widget; it is not attached until
    /// [`set_content`](Self::set_content) is called
    pub fn create_content(&mut self, name: impl Into<String>, background: Option<Color>) -> WidgetId {
        let id = self.registry.insert(WidgetRecord::content(name, background));
        self.registry.set_visible(id, false);
        id
    }

    /// Make `widget` the window content.
    ///
    /// The previous content is hidden and detached first. Setting the
    /// current content again changes nothing.
    pub fn set_content(&mut self, widget: WidgetId) -> Result<()> {
        if !self.registry.contains(widget) {
            return Err(ChromeError::InvalidInput("Content widget no longer exists".to_string()));
        }
        if self.content == Some(widget) {
            return Ok(());
        }

        if let Some(previous) = self.content.take() {
            self.registry.set_visible(previous, false);
            self.registry.detach(previous);
        }

        self.registry.attach(self.content_box, widget)?;
        self.registry.set_size_policy(widget, SizePolicy::Expanding);
        self.registry.set_visible(widget, true);
        self.content = Some(widget);
        Ok(())
    }

    pub fn content(&self) -> Option<WidgetId> {
        self.content
    }

    pub fn state(&self) -> WindowState {
        self.registry.window_state(self.window).unwrap_or_default()
    }

    pub fn composition_enabled(&self) -> bool {
        self.composition_enabled
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Recompute the geometry for a new size (physical pixels) and scale
    pub fn layout(&mut self, size: Size, scale_factor: f64) {
        self.size = size;
        if scale_factor > 0.0 {
            self.scale_factor = scale_factor;
        }
        self.relayout();
    }

    fn relayout(&mut self) {
        self.layout = ChromeLayout::compute(
            self.size,
            self.scale_factor,
            self.content_margins(),
            &self.metrics,
            self.kind.custom_title_bar(),
        );
    }

    pub fn chrome_layout(&self) -> &ChromeLayout {
        &self.layout
    }

    /// Resize border thickness in physical pixels; zero without a custom frame
    pub fn border_thickness(&self) -> f64 {
        if self.kind.custom_title_bar() {
            self.frame.border_thickness(self.scale_factor)
        } else {
            0.0
        }
    }

    pub fn content_margins(&self) -> Margins {
        if !self.kind.custom_title_bar() {
            return Margins::ZERO;
        }
        content_margins(self.state(), self.composition_enabled, self.border_thickness())
    }

    pub fn hit_test_layout(&self) -> HitTestLayout {
        HitTestLayout {
            window: self.size,
            title_bar: self.layout.title_bar,
            icon: self.layout.icon,
            minimize: self.layout.minimize,
            maximize: self.layout.maximize,
            close: self.layout.close,
            maximized: self.state().is_maximized(),
            border: self.border_thickness(),
        }
    }

    pub fn hit_test(&self, point: Point) -> HitRegion {
        hit_test(&self.hit_test_layout(), point)
    }

    pub fn native_geometry(&self) -> NativeGeometry {
        NativeGeometry {
            hit_test: self.hit_test_layout(),
            limits: self.limits.scaled(self.scale_factor),
            state: self.state(),
        }
    }

    /// Window size limits in physical pixels
    pub fn size_limits(&self) -> SizeLimits {
        self.limits.scaled(self.scale_factor)
    }

    pub fn track_limits(&self, monitor: Option<MonitorArea>, taskbar_on_monitor: bool) -> TrackLimits {
        track_limits(self.size_limits(), monitor, taskbar_on_monitor)
    }

    pub fn system_menu_anchor(&self) -> Point {
        self.hit_test_layout().menu_anchor()
    }

    pub fn system_menu(&self) -> SystemMenu {
        SystemMenu::for_state(self.state(), self.system_menu_anchor())
    }

    /// Map a button to the command it triggers
    pub fn activate(&self, kind: ButtonKind) -> WindowCommand {
        match kind {
            ButtonKind::Minimize => WindowCommand::Minimize,
            ButtonKind::Maximize if self.state().is_maximized() => WindowCommand::Restore,
            ButtonKind::Maximize => WindowCommand::Maximize,
            ButtonKind::Close => WindowCommand::Close,
        }
    }

    fn emulates_frame(&self) -> bool {
        self.kind.custom_title_bar() && !self.kind.native_hit_testing()
    }

    /// Feed one input to the chrome
    pub fn handle_input(&mut self, input: ChromeInput) -> Vec<WindowCommand> {
        let mut commands = Vec::new();

        match input {
            ChromeInput::CursorMoved(point) => {
                self.cursor = Some(point);
                let region = self.hit_test(point);
                self.set_hovered(region_button(region), &mut commands);
                if self.emulates_frame() {
                    self.set_cursor_icon(region.cursor_icon(), &mut commands);
                }
            }

            ChromeInput::CursorLeft => {
                self.cursor = None;
                self.set_hovered(None, &mut commands);
                if self.emulates_frame() {
                    self.set_cursor_icon(CursorIcon::Default, &mut commands);
                }
            }

            ChromeInput::PointerPressed(button) => {
                if let Some(point) = self.cursor {
                    self.pointer_pressed(button, point, &mut commands);
                }
            }

            ChromeInput::PointerReleased(PointerButton::Primary) => {
                if let Some(kind) = self.pressed.take() {
                    commands.push(WindowCommand::Redraw);
                    let released_on = self.cursor.map(|point| self.hit_test(point));
                    if released_on == Some(HitRegion::Button(kind)) {
                        log::debug!("Title-bar button activated: {}", kind.name());
                        commands.push(self.activate(kind));
                    }
                }
            }

            ChromeInput::PointerReleased(PointerButton::Secondary) => {}

            ChromeInput::DoubleClicked => {
                if self.emulates_frame() {
                    match self.cursor.map(|point| self.hit_test(point)) {
                        Some(HitRegion::Caption) => commands.push(self.activate(ButtonKind::Maximize)),
                        Some(HitRegion::SysMenu) => commands.push(WindowCommand::Close),
                        _ => {}
                    }
                }
            }

            ChromeInput::Resized(size) => {
                if size != self.size {
                    self.layout(size, self.scale_factor);
                    commands.push(WindowCommand::Redraw);
                }
            }

            ChromeInput::ScaleFactorChanged(scale_factor) => {
                self.layout(self.size, scale_factor);
                commands.push(WindowCommand::Redraw);
            }

            ChromeInput::StateChanged(new_state) => {
                let old_state = self.state();
                if new_state != old_state && !old_state.is_closed() {
                    log::debug!("Window state {:?} -> {:?}", old_state, new_state);
                    self.registry.set_window_state(self.window, new_state);
                    self.pressed = None;
                    self.relayout();
                    commands.push(WindowCommand::Redraw);
                }
            }

            ChromeInput::CompositionChanged(enabled) => {
                if enabled != self.composition_enabled {
                    log::debug!("Desktop composition {}", if enabled { "enabled" } else { "disabled" });
                    self.composition_enabled = enabled;
                    self.relayout();
                    commands.push(WindowCommand::Redraw);
                }
            }

            ChromeInput::FocusIn(reason) => {
                log::trace!("Focus in ({:?})", reason);
                self.focused = true;
                commands.push(WindowCommand::Redraw);
            }

            ChromeInput::FocusOut => {
                self.focused = false;
                self.pressed = None;
                commands.push(WindowCommand::Redraw);
            }

            ChromeInput::SystemMenuKey => {
                if self.emulates_frame() {
                    commands.push(WindowCommand::ShowSystemMenu(self.system_menu_anchor()));
                }
            }

            ChromeInput::CloseRequested => {
                self.registry.set_window_state(self.window, WindowState::Closed);
            }
        }

        commands
    }

    fn pointer_pressed(&mut self, button: PointerButton, point: Point, commands: &mut Vec<WindowCommand>) {
        let region = self.hit_test(point);
        let emulated = self.emulates_frame();

        match (button, region) {
            (PointerButton::Primary, HitRegion::Button(kind)) => {
                self.pressed = Some(kind);
                commands.push(WindowCommand::Redraw);
            }
            (PointerButton::Primary, HitRegion::Caption) if emulated => commands.push(WindowCommand::DragMove),
            (PointerButton::Primary, HitRegion::Border(edge)) if emulated => {
                commands.push(WindowCommand::DragResize(edge))
            }
            (PointerButton::Primary, HitRegion::SysMenu) if emulated => {
                commands.push(WindowCommand::ShowSystemMenu(self.system_menu_anchor()))
            }
            (PointerButton::Secondary, HitRegion::Caption | HitRegion::SysMenu) if emulated => {
                commands.push(WindowCommand::ShowSystemMenu(point))
            }
            _ => {}
        }
    }

    fn set_hovered(&mut self, hovered: Option<ButtonKind>, commands: &mut Vec<WindowCommand>) {
        if hovered != self.hovered {
            self.hovered = hovered;
            commands.push(WindowCommand::Redraw);
        }
    }

    fn set_cursor_icon(&mut self, icon: CursorIcon, commands: &mut Vec<WindowCommand>) {
        if icon != self.cursor_icon {
            self.cursor_icon = icon;
            commands.push(WindowCommand::SetCursor(icon));
        }
    }

    /// Paint the chrome and the content background
    pub fn paint(&self, painter: &mut dyn Painter) {
        let layout = &self.layout;

        let content_background = self
            .content
            .and_then(|id| self.registry.get(id))
            .filter(|record| record.visible)
            .and_then(|record| record.background)
            .unwrap_or(self.background);

        painter.fill_rect(layout.window, self.background);
        painter.fill_rect(layout.content, content_background);

        if !self.kind.custom_title_bar() {
            return;
        }

        painter.fill_rect(layout.title_bar, self.title_bar_color);
        painter.stroke_rect(layout.title_bar, self.border_color, 1.0, LineJoin::Round);

        if !self.icon.is_empty() {
            painter.draw_image(layout.icon, &self.icon);
        }

        let foreground = if self.focused {
            self.foreground
        } else {
            self.foreground.mix(self.title_bar_color, 0.45)
        };
        if !self.title.is_empty() {
            let size = (self.title_font_size as f64 * self.scale_factor) as f32;
            painter.draw_text(layout.title, &self.title, foreground, size);
        }

        for button in &self.buttons {
            let interaction = Interaction {
                hovered: self.hovered == Some(button.kind()),
                pressed: self.pressed == Some(button.kind()),
            };
            button.paint(
                painter,
                &self.registry,
                layout.button(button.kind()),
                foreground,
                interaction,
                self.scale_factor,
            );
        }

        painter.stroke_rect(layout.frame, self.border_color, 1.0, LineJoin::Round);
    }
}

fn region_button(region: HitRegion) -> Option<ButtonKind> {
    match region {
        HitRegion::Button(kind) => Some(kind),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DisplayList, DrawCommand};

    fn controller(kind: ChromeKind) -> ChromeController {
        let mut chrome = ChromeController::new(&Config::default(), kind, None).unwrap();
        chrome.layout(Size::new(800.0, 600.0), 1.0);
        chrome
    }

    fn click(chrome: &mut ChromeController, point: Point) -> Vec<WindowCommand> {
        let mut commands = chrome.handle_input(ChromeInput::CursorMoved(point));
        commands.extend(chrome.handle_input(ChromeInput::PointerPressed(PointerButton::Primary)));
        commands.extend(chrome.handle_input(ChromeInput::PointerReleased(PointerButton::Primary)));
        commands
    }

    #[test]
    fn test_defaults() {
        let chrome = controller(ChromeKind::Native);
        assert!(chrome.icon().is_empty());
        assert_eq!(chrome.title(), "Chromeless");
        assert_eq!(chrome.state(), WindowState::Normal);
        assert!(chrome.content().is_none());
        assert!(chrome.parent().is_none());
    }

    #[test]
    fn test_setters_do_not_request_repaint() {
        let mut chrome = controller(ChromeKind::Native);
        chrome.set_title_bar_color(Color::rgb(1, 2, 3));
        chrome.set_border_color(Color::rgb(4, 5, 6));
        chrome.set_title("Renamed");
        assert_eq!(chrome.title_bar_color(), Color::rgb(1, 2, 3));
        assert_eq!(chrome.border_color(), Color::rgb(4, 5, 6));
        assert_eq!(chrome.title(), "Renamed");
    }

    #[test]
    fn test_set_content_swaps_widgets() {
        let mut chrome = controller(ChromeKind::Native);
        let a = chrome.create_content("a", None);
        let b = chrome.create_content("b", None);

        chrome.set_content(a).unwrap();
        chrome.set_content(b).unwrap();

        let registry = chrome.registry();
        assert!(!registry.is_visible(a));
        assert_eq!(registry.parent(a), None);
        assert!(registry.is_visible(b));
        assert_eq!(registry.parent(b), Some(chrome.content_box()));
        assert_eq!(registry.children(chrome.content_box()), &[b]);
        assert_eq!(registry.get(b).unwrap().size_policy, SizePolicy::Expanding);
    }

    #[test]
    fn test_set_same_content_twice() {
        let mut chrome = controller(ChromeKind::Native);
        let a = chrome.create_content("a", None);
        chrome.set_content(a).unwrap();
        chrome.set_content(a).unwrap();

        assert_eq!(chrome.registry().children(chrome.content_box()), &[a]);
        assert!(chrome.registry().is_visible(a));
    }

    #[test]
    fn test_set_content_rejects_stale_widget() {
        let mut chrome = controller(ChromeKind::Native);
        let a = chrome.create_content("a", None);
        chrome.registry_mut().remove(a);
        assert!(chrome.set_content(a).is_err());
    }

    #[test]
    fn test_close_click_requests_close_once() {
        let mut chrome = controller(ChromeKind::Native);
        let close = chrome.chrome_layout().close.center();

        for _ in 0..3 {
            let commands = click(&mut chrome, close);
            let closes = commands.iter().filter(|c| **c == WindowCommand::Close).count();
            assert_eq!(closes, 1);
        }
    }

    #[test]
    fn test_release_outside_button_does_not_activate() {
        let mut chrome = controller(ChromeKind::Native);
        let layout = *chrome.chrome_layout();

        chrome.handle_input(ChromeInput::CursorMoved(layout.close.center()));
        chrome.handle_input(ChromeInput::PointerPressed(PointerButton::Primary));
        chrome.handle_input(ChromeInput::CursorMoved(layout.maximize.center()));
        let commands = chrome.handle_input(ChromeInput::PointerReleased(PointerButton::Primary));

        assert!(!commands.contains(&WindowCommand::Close));
        assert!(!commands.contains(&WindowCommand::Maximize));
    }

    #[test]
    fn test_maximize_button_toggles() {
        let mut chrome = controller(ChromeKind::Native);
        let maximize = chrome.chrome_layout().maximize.center();
        assert!(click(&mut chrome, maximize).contains(&WindowCommand::Maximize));

        chrome.handle_input(ChromeInput::StateChanged(WindowState::Maximized));
        let maximize = chrome.chrome_layout().maximize.center();
        assert!(click(&mut chrome, maximize).contains(&WindowCommand::Restore));
    }

    #[test]
    fn test_margins_follow_state_and_composition() {
        let mut chrome = controller(ChromeKind::Native);
        assert!(chrome.content_margins().is_zero());

        chrome.handle_input(ChromeInput::StateChanged(WindowState::Maximized));
        assert!(chrome.content_margins().is_zero());

        let commands = chrome.handle_input(ChromeInput::CompositionChanged(true));
        assert_eq!(commands, vec![WindowCommand::Redraw]);
        assert_eq!(chrome.content_margins(), Margins::uniform(8.0));
        assert_eq!(chrome.chrome_layout().frame.x, 8.0);

        chrome.handle_input(ChromeInput::StateChanged(WindowState::Normal));
        assert!(chrome.content_margins().is_zero());
    }

    #[test]
    fn test_default_chrome_is_content_only() {
        let mut chrome = controller(ChromeKind::Default);
        chrome.handle_input(ChromeInput::CompositionChanged(true));
        chrome.handle_input(ChromeInput::StateChanged(WindowState::Maximized));

        assert!(chrome.content_margins().is_zero());
        assert_eq!(chrome.hit_test(Point::new(1.0, 1.0)), HitRegion::Client);
        assert!(!chrome.registry().is_visible(chrome.title_bar_widget()));

        let mut list = DisplayList::new();
        chrome.paint(&mut list);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_emulated_frame_commands() {
        let mut chrome = controller(ChromeKind::Native);
        if chrome.kind().native_hit_testing() {
            return;
        }

        chrome.handle_input(ChromeInput::CursorMoved(Point::new(400.0, 16.0)));
        let commands = chrome.handle_input(ChromeInput::PointerPressed(PointerButton::Primary));
        assert_eq!(commands, vec![WindowCommand::DragMove]);

        let commands = chrome.handle_input(ChromeInput::CursorMoved(Point::new(799.0, 300.0)));
        assert_eq!(commands, vec![WindowCommand::SetCursor(CursorIcon::EwResize)]);
        let commands = chrome.handle_input(ChromeInput::PointerPressed(PointerButton::Primary));
        assert_eq!(commands, vec![WindowCommand::DragResize(ResizeEdge::Right)]);

        chrome.handle_input(ChromeInput::CursorMoved(Point::new(400.0, 16.0)));
        let commands = chrome.handle_input(ChromeInput::DoubleClicked);
        assert_eq!(commands, vec![WindowCommand::Maximize]);

        let commands = chrome.handle_input(ChromeInput::SystemMenuKey);
        assert_eq!(commands, vec![WindowCommand::ShowSystemMenu(Point::new(8.0, 32.0))]);
    }

    #[test]
    fn test_system_menu_follows_state() {
        let mut chrome = controller(ChromeKind::Native);
        let menu = chrome.system_menu();
        assert!(!menu.is_enabled(SystemCommand::Restore));
        assert!(menu.is_enabled(SystemCommand::Maximize));
        assert_eq!(menu.anchor(), chrome.system_menu_anchor());

        chrome.handle_input(ChromeInput::StateChanged(WindowState::Maximized));
        let menu = chrome.system_menu();
        assert!(menu.is_enabled(SystemCommand::Restore));
        assert!(!menu.is_enabled(SystemCommand::Maximize));
        assert!(!menu.is_enabled(SystemCommand::Move));
    }

    #[test]
    fn test_hover_requests_redraw_once() {
        let mut chrome = controller(ChromeKind::Native);
        let close = chrome.chrome_layout().close;

        let first = chrome.handle_input(ChromeInput::CursorMoved(close.center()));
        assert!(first.contains(&WindowCommand::Redraw));
        let second = chrome.handle_input(ChromeInput::CursorMoved(Point::new(close.x + 1.0, close.y + 1.0)));
        assert!(!second.contains(&WindowCommand::Redraw));
    }

    #[test]
    fn test_paint_order() {
        let mut chrome = controller(ChromeKind::Native);
        chrome.set_icon(Icon::from_rgba(1, 1, vec![255; 4]).unwrap());
        let mut list = DisplayList::new();
        chrome.paint(&mut list);

        let commands = list.commands();
        assert!(matches!(commands[2], DrawCommand::FillRect { color, .. } if color == chrome.title_bar_color()));
        assert!(matches!(
            commands[3],
            DrawCommand::StrokeRect { rect, color, .. }
                if rect == chrome.chrome_layout().title_bar && color == chrome.border_color()
        ));
        assert!(matches!(commands[4], DrawCommand::Image { .. }));
        assert!(matches!(commands[5], DrawCommand::Text { ref text, .. } if text == "Chromeless"));
        assert!(matches!(
            commands.last(),
            Some(DrawCommand::StrokeRect { join: LineJoin::Round, width, .. }) if *width == 1.0
        ));
    }

    #[test]
    fn test_close_requested_is_terminal() {
        let mut chrome = controller(ChromeKind::Native);
        chrome.handle_input(ChromeInput::CloseRequested);
        assert_eq!(chrome.state(), WindowState::Closed);
        assert!(chrome
            .handle_input(ChromeInput::StateChanged(WindowState::Normal))
            .is_empty());
    }

    #[test]
    fn test_track_limits_use_physical_pixels() {
        let mut chrome = controller(ChromeKind::Native);
        chrome.layout(Size::new(1600.0, 1200.0), 2.0);
        let track = chrome.track_limits(None, false);
        assert_eq!(track.min_track, Size::new(640.0, 400.0));
    }
}

//! Winit window host for chromeless
//!
//! [`ChromeApp`] owns the OS window, the chrome controller, the chrome
//! strategy and the renderer, and runs them on the winit event loop.

use super::events::EventHandler;
use super::strategy::{select_strategy, ChromeStrategy};
use super::{apply_command, WindowOps};
use crate::chrome::{ChromeController, ChromeInput, FocusReason, ResizeEdge, WindowState};
use crate::renderer::{Canvas, Color, Icon, Renderer, WgpuRenderer};
use crate::utils::config::Config;
use crate::utils::error::{ChromeError, IntoChromeError, Result};
use crate::utils::geometry::{Point, Size};
use log::{debug, error, info, warn};
use raw_window_handle::{HasWindowHandle, RawWindowHandle};
use std::cell::Cell;
use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{CursorIcon, Window, WindowId};

/// A winit window seen through [`WindowOps`]
pub struct HostWindow {
    window: Arc<Window>,
    close_requested: Cell<bool>,
}

impl HostWindow {
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            close_requested: Cell::new(false),
        }
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    pub fn id(&self) -> WindowId {
        self.window.id()
    }

    /// Whether [`WindowOps::close`] was called
    pub fn close_requested(&self) -> bool {
        self.close_requested.get()
    }

    /// Current window state as reported by winit
    pub fn state(&self) -> WindowState {
        WindowState::from_flags(
            self.window.is_minimized().unwrap_or(false),
            self.window.is_maximized(),
        )
    }
}

impl WindowOps for HostWindow {
    fn minimize(&self) {
        self.window.set_minimized(true);
    }

    fn maximize(&self) {
        self.window.set_maximized(true);
    }

    fn restore(&self) {
        if self.window.is_minimized() == Some(true) {
            self.window.set_minimized(false);
        } else {
            self.window.set_maximized(false);
        }
    }

    fn close(&self) {
        // winit has no close call; the event loop drops the window.
        self.close_requested.set(true);
    }

    fn drag_move(&self) -> Result<()> {
        self.window.drag_window().window_err("Failed to start window drag")
    }

    fn drag_resize(&self, edge: ResizeEdge) -> Result<()> {
        self.window
            .drag_resize_window(edge.to_resize_direction())
            .window_err("Failed to start window resize")
    }

    fn show_system_menu(&self, position: Point) {
        self.window
            .show_window_menu(PhysicalPosition::new(position.x, position.y));
    }

    fn request_redraw(&self) {
        self.window.request_redraw();
    }

    fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }

    fn set_icon(&self, icon: &Icon) -> Result<()> {
        self.window.set_window_icon(icon.to_window_icon()?);
        Ok(())
    }

    fn set_cursor(&self, cursor: CursorIcon) {
        self.window.set_cursor(cursor);
    }

    fn raw_handle(&self) -> Option<RawWindowHandle> {
        self.window.window_handle().ok().map(|handle| handle.as_raw())
    }
}

/// The application driving one chromeless window
pub struct ChromeApp {
    config: Config,
    strategy: Box<dyn ChromeStrategy>,
    chrome: ChromeController,
    events: EventHandler,
    host: Option<HostWindow>,
    renderer: Option<WgpuRenderer>,
    canvas: Canvas,
    error: Option<ChromeError>,
}

impl ChromeApp {
    pub fn new(config: Config) -> Result<Self> {
        let strategy = select_strategy(config.chrome.mode);
        let mut chrome = ChromeController::new(&config, strategy.kind(), None)?;

        if let Some(path) = &config.window.icon {
            match Icon::from_path(path) {
                Ok(icon) => chrome.set_icon(icon),
                Err(e) => warn!("Ignoring window icon {}: {}", path.display(), e),
            }
        }

        let content = chrome.create_content("content", None);
        chrome.set_content(content)?;

        let events = EventHandler::new(strategy.native_hit_testing());

        Ok(Self {
            config,
            strategy,
            chrome,
            events,
            host: None,
            renderer: None,
            canvas: Canvas::new(1, 1),
            error: None,
        })
    }

    pub fn chrome(&self) -> &ChromeController {
        &self.chrome
    }

    pub fn chrome_mut(&mut self) -> &mut ChromeController {
        &mut self.chrome
    }

    /// Change the title shown in the title bar and by the OS
    pub fn set_title(&mut self, title: &str) {
        self.chrome.set_title(title);
        if let Some(host) = &self.host {
            host.set_title(title);
            host.request_redraw();
        }
    }

    /// Change the icon shown in the title bar and by the OS
    pub fn set_icon(&mut self, icon: Icon) -> Result<()> {
        if let Some(host) = &self.host {
            host.set_icon(&icon)?;
            host.request_redraw();
        }
        self.chrome.set_icon(icon);
        Ok(())
    }

    /// The error that stopped the event loop, if any
    pub fn take_error(&mut self) -> Option<ChromeError> {
        self.error.take()
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_config = &self.config.window;

        let mut attributes = Window::default_attributes()
            .with_title(self.chrome.title())
            .with_decorations(self.strategy.decorations())
            .with_inner_size(LogicalSize::new(window_config.width as f64, window_config.height as f64))
            .with_min_inner_size(LogicalSize::new(
                window_config.min_width as f64,
                window_config.min_height as f64,
            ))
            .with_maximized(window_config.start_maximized);

        if let (Some(width), Some(height)) = (window_config.max_width, window_config.max_height) {
            attributes = attributes.with_max_inner_size(LogicalSize::new(width as f64, height as f64));
        }

        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .window_err("Failed to create window")?,
        );
        let host = HostWindow::new(window.clone());

        if let Err(e) = host.set_icon(&self.chrome.icon()) {
            warn!("Failed to set window icon: {}", e);
        }

        let size = window.inner_size();
        self.chrome
            .layout(Size::new(size.width as f64, size.height as f64), window.scale_factor());
        self.chrome.handle_input(ChromeInput::StateChanged(host.state()));
        self.chrome.handle_input(ChromeInput::FocusIn(FocusReason::ActiveWindow));

        self.strategy.update(self.chrome.native_geometry());
        if let Err(e) = self.strategy.attach(&host) {
            warn!("Native chrome unavailable, using the bare frame: {}", e);
        }

        let renderer = WgpuRenderer::new(window.clone())?;
        let (width, height) = renderer.fit_size(size.width.max(1), size.height.max(1));
        self.canvas.resize(width, height);
        self.renderer = Some(renderer);

        info!(
            "Window created: {}x{} at scale {:.2}",
            size.width,
            size.height,
            window.scale_factor()
        );

        host.request_redraw();
        self.host = Some(host);
        Ok(())
    }

    /// Feed one input to the chrome and apply what it asks for
    fn dispatch(&mut self, input: ChromeInput) {
        let commands = self.chrome.handle_input(input);
        let Some(host) = &self.host else {
            return;
        };
        for command in commands {
            if let Err(e) = apply_command(host, command) {
                debug!("{:?} failed: {}", command, e);
            }
        }
    }

    fn redraw(&mut self) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };

        self.canvas.clear(Color::TRANSPARENT);
        self.chrome.paint(&mut self.canvas);

        if let Err(e) = renderer.present(&self.canvas) {
            error!("Failed to present frame: {}", e);
        }
    }

    fn resize_surface(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let Some(renderer) = self.renderer.as_mut() else {
            self.canvas.resize(width, height);
            return;
        };
        // Oversized windows get a clamped canvas stretched over the surface.
        let (width, height) = renderer.fit_size(width, height);
        self.canvas.resize(width, height);
        if let Err(e) = renderer.resize(width, height) {
            warn!("Failed to resize surface: {}", e);
        }
    }

    /// Push the new geometry to the platform side and stop when closed
    fn sync(&mut self, event_loop: &ActiveEventLoop) {
        self.strategy.update(self.chrome.native_geometry());

        let closing = self.chrome.state().is_closed()
            || self.host.as_ref().is_some_and(|host| host.close_requested());
        if closing {
            info!("Closing window");
            self.strategy.detach();
            self.renderer = None;
            self.host = None;
            event_loop.exit();
        }
    }
}

impl ApplicationHandler for ChromeApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.host.is_some() {
            return;
        }
        if let Err(e) = self.create_window(event_loop) {
            error!("Failed to initialize window: {}", e);
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if self.host.as_ref().map(HostWindow::id) != Some(window_id) {
            return;
        }

        match &event {
            WindowEvent::RedrawRequested => {
                self.redraw();
                return;
            }
            WindowEvent::Resized(size) => self.resize_surface(size.width, size.height),
            _ => {}
        }

        let mut inputs = self.events.handle_event(&event);
        if matches!(event, WindowEvent::Resized(_)) {
            // winit has no state-change event; maximize and minimize show up as resizes.
            if let Some(host) = &self.host {
                inputs.push(ChromeInput::StateChanged(host.state()));
            }
        }

        for input in inputs {
            self.dispatch(input);
        }
        self.sync(event_loop);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let inputs = self.strategy.drain_events();
        if inputs.is_empty() {
            return;
        }
        for input in inputs {
            self.dispatch(input);
        }
        self.sync(event_loop);
    }
}

/// Open the window and run until it closes
pub fn run(config: Config) -> Result<()> {
    let event_loop = EventLoop::new().window_err("Failed to create event loop")?;
    let mut app = ChromeApp::new(config)?;

    event_loop.run_app(&mut app).window_err("Event loop error")?;

    match app.take_error() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

//! Event handling for the winit window
//!
//! This module converts winit events into [`ChromeInput`] values and keeps
//! the little input state the chrome needs: modifiers, held buttons and the
//! last press for double-click detection.

use crate::chrome::{focus_reason, ChromeInput, InputSnapshot, PointerButton};
use crate::utils::geometry::{Point, Size};
use std::time::{Duration, Instant};
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};

/// Longest gap between the two presses of a double click
const DOUBLE_CLICK_TIME: Duration = Duration::from_millis(500);

/// Furthest the cursor may travel between the two presses (physical pixels)
const DOUBLE_CLICK_DISTANCE: f64 = 4.0;

/// Event handler for converting winit events to chrome inputs
pub struct EventHandler {
    /// Current keyboard modifiers state
    modifiers: ModifiersState,

    /// Last known cursor position
    cursor: Option<Point>,

    /// Mouse buttons currently held
    buttons_down: u32,

    /// Time and place of the last primary press
    last_press: Option<(Instant, Point)>,

    /// Focus reasons come from the native hook instead of winit
    native_focus: bool,
}

impl EventHandler {
    /// Create a new event handler
    pub fn new(native_focus: bool) -> Self {
        Self {
            modifiers: ModifiersState::empty(),
            cursor: None,
            buttons_down: 0,
            last_press: None,
            native_focus,
        }
    }

    /// Translate one winit event
    pub fn handle_event(&mut self, event: &WindowEvent) -> Vec<ChromeInput> {
        self.handle_event_at(event, Instant::now())
    }

    /// Translate one winit event that happened at `now`
    pub fn handle_event_at(&mut self, event: &WindowEvent, now: Instant) -> Vec<ChromeInput> {
        match event {
            WindowEvent::CloseRequested => vec![ChromeInput::CloseRequested],

            WindowEvent::Resized(size) => {
                vec![ChromeInput::Resized(Size::new(size.width as f64, size.height as f64))]
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                vec![ChromeInput::ScaleFactorChanged(*scale_factor)]
            }

            WindowEvent::Focused(true) if self.native_focus => Vec::new(),

            WindowEvent::Focused(true) => vec![ChromeInput::FocusIn(focus_reason(self.snapshot()))],

            WindowEvent::Focused(false) => {
                self.buttons_down = 0;
                vec![ChromeInput::FocusOut]
            }

            WindowEvent::CursorMoved { position, .. } => {
                let point = Point::new(position.x, position.y);
                self.cursor = Some(point);
                vec![ChromeInput::CursorMoved(point)]
            }

            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                vec![ChromeInput::CursorLeft]
            }

            WindowEvent::MouseInput { state, button, .. } => self.mouse_input(*state, *button, now),

            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers.state();
                Vec::new()
            }

            WindowEvent::KeyboardInput { event, .. } => match event.physical_key {
                PhysicalKey::Code(code) => self.key_input(code, event.state, event.repeat),
                PhysicalKey::Unidentified(_) => Vec::new(),
            },

            _ => Vec::new(),
        }
    }

    fn mouse_input(&mut self, state: ElementState, button: MouseButton, now: Instant) -> Vec<ChromeInput> {
        match state {
            ElementState::Pressed => self.buttons_down += 1,
            ElementState::Released => self.buttons_down = self.buttons_down.saturating_sub(1),
        }

        let Some(button) = convert_mouse_button(button) else {
            return Vec::new();
        };

        match state {
            ElementState::Pressed => {
                let mut inputs = vec![ChromeInput::PointerPressed(button)];
                if button == PointerButton::Primary && self.is_double_click(now) {
                    self.last_press = None;
                    inputs.push(ChromeInput::DoubleClicked);
                } else if button == PointerButton::Primary {
                    self.last_press = self.cursor.map(|point| (now, point));
                }
                inputs
            }
            ElementState::Released => vec![ChromeInput::PointerReleased(button)],
        }
    }

    fn is_double_click(&self, now: Instant) -> bool {
        let (Some((then, first)), Some(second)) = (self.last_press, self.cursor) else {
            return false;
        };
        now.saturating_duration_since(then) <= DOUBLE_CLICK_TIME
            && (second.x - first.x).abs() <= DOUBLE_CLICK_DISTANCE
            && (second.y - first.y).abs() <= DOUBLE_CLICK_DISTANCE
    }

    /// Handle a physical key press or release
    pub fn key_input(&mut self, code: KeyCode, state: ElementState, repeat: bool) -> Vec<ChromeInput> {
        let pressed = state == ElementState::Pressed;
        match code {
            KeyCode::Space if pressed && !repeat && self.modifiers.alt_key() => {
                vec![ChromeInput::SystemMenuKey]
            }
            _ => Vec::new(),
        }
    }

    /// Set modifiers directly
    pub fn set_modifiers(&mut self, modifiers: ModifiersState) {
        self.modifiers = modifiers;
    }

    /// Get current modifiers state
    pub fn modifiers(&self) -> ModifiersState {
        self.modifiers
    }

    /// Get last known cursor position
    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            mouse_button_down: self.buttons_down > 0,
            shift_down: self.modifiers.shift_key(),
        }
    }
}

/// Convert winit mouse button to a chrome pointer button
fn convert_mouse_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Right => Some(PointerButton::Secondary),
        _ => None,
    }
}

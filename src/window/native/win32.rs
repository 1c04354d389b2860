//! Window subclass that gives the frameless window its native behavior.
//!
//! The hook removes the OS frame (`WM_NCCALCSIZE`), answers hit-test
//! queries from the chrome's layout, opens the system menu on Alt+Space,
//! reports focus reasons, composition and state changes, and clamps the
//! maximized size to the work area of the taskbar's monitor.

use super::{is_first_press, nc_hit_code, registry};
use crate::chrome::{
    focus_reason, hit_test, track_limits, ChromeInput, InputSnapshot, MonitorArea, NativeGeometry, SystemMenu,
    WindowState,
};
use crate::utils::error::{ChromeError, Result};
use crate::utils::geometry::{Point, Rect, Size};
use log::{debug, warn};
use raw_window_handle::RawWindowHandle;
use std::ffi::c_void;
use windows::core::{w, PCWSTR};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, POINT, RECT, WPARAM};
use windows::Win32::Graphics::Dwm::{DwmExtendFrameIntoClientArea, DwmIsCompositionEnabled};
use windows::Win32::Graphics::Gdi::{GetMonitorInfoW, MonitorFromWindow, MONITORINFO, MONITOR_DEFAULTTONEAREST};
use windows::Win32::UI::Controls::MARGINS;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    GetKeyState, VIRTUAL_KEY, VK_LBUTTON, VK_RBUTTON, VK_SHIFT, VK_SPACE,
};
use windows::Win32::UI::Shell::{DefSubclassProc, RemoveWindowSubclass, SetWindowSubclass};
use windows::Win32::UI::WindowsAndMessaging::{
    EnableMenuItem, FindWindowW, GetSystemMenu, GetWindowRect, PostMessageW, SetMenuDefaultItem, SetWindowPos,
    TrackPopupMenu, MF_BYCOMMAND, MF_ENABLED, MF_GRAYED, MINMAXINFO, SC_KEYMENU, SIZE_MAXIMIZED, SIZE_MINIMIZED,
    SIZE_RESTORED, SWP_FRAMECHANGED, SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE, SWP_NOZORDER, TPM_LEFTALIGN,
    TPM_RETURNCMD, TPM_TOPALIGN, WM_DWMCOMPOSITIONCHANGED, WM_GETMINMAXINFO, WM_NCACTIVATE, WM_NCCALCSIZE,
    WM_NCDESTROY, WM_NCHITTEST, WM_SETFOCUS, WM_SIZE, WM_SYSCOMMAND, WM_SYSKEYDOWN,
};

const SUBCLASS_ID: usize = 0x4348_524d;

/// An installed window subclass; removed again on drop
pub struct NativeHook {
    hwnd: HWND,
}

impl NativeHook {
    /// Subclass the window behind `handle`
    pub fn install(handle: RawWindowHandle, geometry: NativeGeometry) -> Result<Self> {
        let RawWindowHandle::Win32(handle) = handle else {
            return Err(ChromeError::Platform("Not a Win32 window".to_string()));
        };
        let hwnd = HWND(handle.hwnd.get() as *mut c_void);
        let key = window_key(hwnd);

        registry::insert(key, geometry);
        let installed = unsafe { SetWindowSubclass(hwnd, Some(subclass_proc), SUBCLASS_ID, 0) };
        if !installed.as_bool() {
            registry::remove(key);
            return Err(ChromeError::Platform("SetWindowSubclass failed".to_string()));
        }

        let composition = composition_enabled();
        if composition {
            extend_frame(hwnd);
        }
        registry::push_event(key, ChromeInput::CompositionChanged(composition));

        // The frame is only recalculated on the next WM_NCCALCSIZE.
        if let Err(e) = unsafe {
            SetWindowPos(
                hwnd,
                None,
                0,
                0,
                0,
                0,
                SWP_FRAMECHANGED | SWP_NOMOVE | SWP_NOSIZE | SWP_NOZORDER | SWP_NOACTIVATE,
            )
        } {
            debug!("Frame refresh failed: {}", e);
        }

        debug!("Native chrome hook installed on {:?}", hwnd);
        Ok(Self { hwnd })
    }

    pub fn update(&self, geometry: NativeGeometry) {
        registry::set_geometry(window_key(self.hwnd), geometry);
    }

    pub fn drain_events(&self) -> Vec<ChromeInput> {
        registry::drain_events(window_key(self.hwnd))
    }
}

impl Drop for NativeHook {
    fn drop(&mut self) {
        // WM_NCDESTROY already cleaned up when the window went first.
        if registry::remove(window_key(self.hwnd)) {
            let _ = unsafe { RemoveWindowSubclass(self.hwnd, Some(subclass_proc), SUBCLASS_ID) };
            debug!("Native chrome hook removed from {:?}", self.hwnd);
        }
    }
}

/// Whether desktop composition is on
pub fn composition_enabled() -> bool {
    unsafe { DwmIsCompositionEnabled() }
        .map(|enabled| enabled.as_bool())
        .unwrap_or(false)
}

fn window_key(hwnd: HWND) -> isize {
    hwnd.0 as isize
}

unsafe extern "system" fn subclass_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
    _subclass_id: usize,
    _ref_data: usize,
) -> LRESULT {
    let key = window_key(hwnd);
    let Some(geometry) = registry::geometry(key) else {
        return unsafe { DefSubclassProc(hwnd, msg, wparam, lparam) };
    };

    match msg {
        // The whole window is client area.
        WM_NCCALCSIZE if wparam.0 != 0 => LRESULT(0),

        WM_NCHITTEST => LRESULT(nc_hit_test(hwnd, lparam, &geometry) as isize),

        // -1 keeps the default handling from painting a frame.
        WM_NCACTIVATE => unsafe { DefSubclassProc(hwnd, msg, wparam, LPARAM(-1)) },

        WM_SETFOCUS => {
            registry::push_event(key, ChromeInput::FocusIn(focus_reason(input_snapshot())));
            unsafe { DefSubclassProc(hwnd, msg, wparam, lparam) }
        }

        // Alt+Space never reaches the default menu, which would open over the hidden frame.
        WM_SYSKEYDOWN if wparam.0 == VK_SPACE.0 as usize => {
            if is_first_press(lparam.0) {
                show_system_menu(hwnd, &geometry);
            }
            LRESULT(0)
        }

        WM_SYSCOMMAND if (wparam.0 as u32 & 0xFFF0) == SC_KEYMENU && lparam.0 == ' ' as isize => {
            show_system_menu(hwnd, &geometry);
            LRESULT(0)
        }

        WM_DWMCOMPOSITIONCHANGED => {
            let enabled = composition_enabled();
            if enabled {
                extend_frame(hwnd);
            }
            registry::push_event(key, ChromeInput::CompositionChanged(enabled));
            unsafe { DefSubclassProc(hwnd, msg, wparam, lparam) }
        }

        WM_SIZE => {
            let state = match wparam.0 as u32 {
                SIZE_MAXIMIZED => Some(WindowState::Maximized),
                SIZE_MINIMIZED => Some(WindowState::Minimized),
                SIZE_RESTORED => Some(WindowState::Normal),
                _ => None,
            };
            if let Some(state) = state {
                registry::push_event(key, ChromeInput::StateChanged(state));
            }
            unsafe { DefSubclassProc(hwnd, msg, wparam, lparam) }
        }

        WM_GETMINMAXINFO => {
            fill_min_max_info(hwnd, lparam, &geometry);
            LRESULT(0)
        }

        WM_NCDESTROY => {
            registry::remove(key);
            let _ = unsafe { RemoveWindowSubclass(hwnd, Some(subclass_proc), SUBCLASS_ID) };
            unsafe { DefSubclassProc(hwnd, msg, wparam, lparam) }
        }

        _ => unsafe { DefSubclassProc(hwnd, msg, wparam, lparam) },
    }
}

fn window_rect(hwnd: HWND) -> Option<RECT> {
    let mut rect = RECT::default();
    unsafe { GetWindowRect(hwnd, &mut rect) }.ok().map(|_| rect)
}

fn nc_hit_test(hwnd: HWND, lparam: LPARAM, geometry: &NativeGeometry) -> u32 {
    let Some(rect) = window_rect(hwnd) else {
        return super::ht::CLIENT;
    };

    // Screen coordinates packed as signed 16-bit values.
    let x = (lparam.0 & 0xFFFF) as i16 as i32;
    let y = ((lparam.0 >> 16) & 0xFFFF) as i16 as i32;
    let point = Point::new((x - rect.left) as f64, (y - rect.top) as f64);

    let mut layout = geometry.hit_test;
    layout.window = Size::new((rect.right - rect.left) as f64, (rect.bottom - rect.top) as f64);

    nc_hit_code(hit_test(&layout, point))
}

fn input_snapshot() -> InputSnapshot {
    let down = |key: VIRTUAL_KEY| unsafe { GetKeyState(key.0 as i32) } < 0;
    InputSnapshot {
        mouse_button_down: down(VK_LBUTTON) || down(VK_RBUTTON),
        shift_down: down(VK_SHIFT),
    }
}

fn show_system_menu(hwnd: HWND, geometry: &NativeGeometry) {
    let menu = unsafe { GetSystemMenu(hwnd, false) };
    if menu.is_invalid() {
        debug!("Window has no system menu");
        return;
    }
    let Some(rect) = window_rect(hwnd) else {
        return;
    };

    let model = SystemMenu::for_state(geometry.state, geometry.hit_test.menu_anchor());
    for (command, enabled) in model.items() {
        let flags = if *enabled { MF_ENABLED } else { MF_GRAYED };
        let _ = unsafe { EnableMenuItem(menu, command.code(), MF_BYCOMMAND | flags) };
    }
    if let Err(e) = unsafe { SetMenuDefaultItem(menu, model.default_item().code(), 0) } {
        debug!("Failed to set default menu item: {}", e);
    }

    let anchor = model.anchor();
    let x = rect.left + anchor.x.round() as i32;
    let y = rect.top + anchor.y.round() as i32;

    let command = unsafe {
        TrackPopupMenu(
            menu,
            TPM_LEFTALIGN | TPM_TOPALIGN | TPM_RETURNCMD,
            x,
            y,
            Some(0),
            hwnd,
            None,
        )
    };

    if command.0 != 0 {
        if let Err(e) = unsafe { PostMessageW(Some(hwnd), WM_SYSCOMMAND, WPARAM(command.0 as usize), LPARAM(0)) } {
            warn!("Failed to post system command: {}", e);
        }
    }
}

fn extend_frame(hwnd: HWND) {
    let margins = MARGINS {
        cxLeftWidth: 1,
        cxRightWidth: 1,
        cyTopHeight: 1,
        cyBottomHeight: 1,
    };
    if let Err(e) = unsafe { DwmExtendFrameIntoClientArea(hwnd, &margins) } {
        debug!("DwmExtendFrameIntoClientArea failed: {}", e);
    }
}

fn to_rect(rect: RECT) -> Rect {
    Rect::new(
        rect.left as f64,
        rect.top as f64,
        (rect.right - rect.left) as f64,
        (rect.bottom - rect.top) as f64,
    )
}

fn to_point(x: f64, y: f64) -> POINT {
    POINT {
        x: x.round() as i32,
        y: y.round() as i32,
    }
}

fn monitor_area(hwnd: HWND) -> Option<MonitorArea> {
    let monitor = unsafe { MonitorFromWindow(hwnd, MONITOR_DEFAULTTONEAREST) };
    if monitor.is_invalid() {
        return None;
    }

    let mut info = MONITORINFO {
        cbSize: std::mem::size_of::<MONITORINFO>() as u32,
        ..Default::default()
    };
    if !unsafe { GetMonitorInfoW(monitor, &mut info) }.as_bool() {
        return None;
    }

    Some(MonitorArea {
        bounds: to_rect(info.rcMonitor),
        work: to_rect(info.rcWork),
    })
}

fn taskbar_on_same_monitor(hwnd: HWND) -> bool {
    let Ok(taskbar) = (unsafe { FindWindowW(w!("Shell_TrayWnd"), PCWSTR::null()) }) else {
        return false;
    };
    unsafe { MonitorFromWindow(taskbar, MONITOR_DEFAULTTONEAREST) == MonitorFromWindow(hwnd, MONITOR_DEFAULTTONEAREST) }
}

fn fill_min_max_info(hwnd: HWND, lparam: LPARAM, geometry: &NativeGeometry) {
    let info = lparam.0 as *mut MINMAXINFO;
    if info.is_null() {
        return;
    }

    let limits = track_limits(geometry.limits, monitor_area(hwnd), taskbar_on_same_monitor(hwnd));
    let info = unsafe { &mut *info };

    info.ptMinTrackSize = to_point(limits.min_track.width, limits.min_track.height);
    if let Some(max) = limits.max_track {
        info.ptMaxTrackSize = to_point(max.width, max.height);
    }
    if let Some(position) = limits.max_position {
        info.ptMaxPosition = to_point(position.x, position.y);
    }
    if let Some(size) = limits.max_size {
        info.ptMaxSize = to_point(size.width, size.height);
    }
}

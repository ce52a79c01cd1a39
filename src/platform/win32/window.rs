//! Win32 window class and window creation helpers

use std::ffi::c_void;

use windows::core::{Error, HSTRING, PCWSTR};
use windows::Win32::Foundation::{ERROR_CLASS_ALREADY_EXISTS, HWND, RECT};
use windows::Win32::Graphics::Gdi::{
    GetMonitorInfoW, MonitorFromWindow, HBRUSH, MONITORINFO, MONITOR_DEFAULTTOPRIMARY,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::*;

use crate::geometry::Rect;

/// Register a window class for `wnd_proc`.
///
/// A class that is already registered (e.g. a second splash in the same
/// process) is not an error.
pub fn register_window_class(class_name: PCWSTR, wnd_proc: WNDPROC) -> Result<(), Error> {
    unsafe {
        let hinstance = GetModuleHandleW(None)?;

        let wc = WNDCLASSEXW {
            cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
            style: CS_HREDRAW | CS_VREDRAW,
            lpfnWndProc: wnd_proc,
            cbClsExtra: 0,
            cbWndExtra: 0,
            hInstance: hinstance.into(),
            hIcon: HICON::default(),
            hCursor: LoadCursorW(None, IDC_ARROW)?,
            hbrBackground: HBRUSH::default(), // No background brush - paint clears everything
            lpszMenuName: PCWSTR::null(),
            lpszClassName: class_name,
            hIconSm: HICON::default(),
        };

        if RegisterClassExW(&wc) == 0 {
            let err = Error::from_win32();
            if err.code() == ERROR_CLASS_ALREADY_EXISTS.to_hresult() {
                log!("register_window_class: class already registered");
                return Ok(());
            }
            return Err(err);
        }

        Ok(())
    }
}

/// Unregister a window class (fails silently while windows of it still exist)
pub fn unregister_window_class(class_name: PCWSTR) {
    unsafe {
        let _ = GetModuleHandleW(None).map(|h| {
            let _ = UnregisterClassW(class_name, h);
        });
    }
}

/// Work area (monitor minus taskbar) of the primary monitor
pub fn primary_work_area() -> Rect {
    unsafe {
        let monitor = MonitorFromWindow(HWND::default(), MONITOR_DEFAULTTOPRIMARY);
        let mut monitor_info = MONITORINFO {
            cbSize: std::mem::size_of::<MONITORINFO>() as u32,
            ..Default::default()
        };
        let _ = GetMonitorInfoW(monitor, &mut monitor_info);

        let work = monitor_info.rcWork;
        Rect::new(work.left, work.top, work.right, work.bottom)
    }
}

/// Create a visible, frameless popup at `rect`.
///
/// `create_param` is handed to the window procedure in `CREATESTRUCTW::lpCreateParams`.
pub fn create_popup_window(
    class_name: PCWSTR,
    title: &str,
    rect: Rect,
    topmost: bool,
    create_param: *const c_void,
) -> Result<HWND, Error> {
    unsafe {
        let hinstance = GetModuleHandleW(None)?;

        let ex_style = if topmost {
            // Topmost, and tool window so it stays out of the taskbar
            WS_EX_TOPMOST | WS_EX_TOOLWINDOW
        } else {
            WINDOW_EX_STYLE::default()
        };

        CreateWindowExW(
            ex_style,
            class_name,
            &HSTRING::from(title),
            WS_POPUP | WS_VISIBLE,
            rect.left,
            rect.top,
            rect.width(),
            rect.height(),
            None,
            None,
            hinstance,
            Some(create_param),
        )
    }
}

/// Client area of a window
pub fn get_client_rect(hwnd: HWND) -> Rect {
    let mut rect = RECT::default();
    unsafe {
        let _ = GetClientRect(hwnd, &mut rect);
    }
    Rect::new(rect.left, rect.top, rect.right, rect.bottom)
}

pub fn is_window(hwnd: HWND) -> bool {
    unsafe { IsWindow(hwnd).as_bool() }
}

/// Destroy the window
pub fn destroy_window(hwnd: HWND) {
    unsafe {
        let _ = DestroyWindow(hwnd);
    }
}

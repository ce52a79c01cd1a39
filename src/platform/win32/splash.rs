//! The splash window itself
//!
//! A `SplashScreen` owns one popup window and the COM apartment used to
//! decode and draw its image. The window procedure handles only painting
//! and destruction; everything else goes to `DefWindowProcW`.

use std::cell::Cell;
use std::ffi::c_void;
use std::path::PathBuf;
use std::ptr::NonNull;

use windows::core::{w, PCWSTR};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::Graphics::Gdi::{BeginPaint, EndPaint, UpdateWindow, HDC, PAINTSTRUCT};
use windows::Win32::UI::WindowsAndMessaging::*;

use super::com::ComApartment;
use super::dpi::system_dpi;
use super::image::ImageLoader;
use super::render::Renderer;
use super::window::{
    create_popup_window, destroy_window, get_client_rect, is_window, primary_work_area,
    register_window_class, unregister_window_class,
};
use crate::color::Color;
use crate::config::SplashConfig;
use crate::error::Result;
use crate::geometry::{center_in, centered_origin, scale_px, ImageFit, Rect};

const SPLASH_CLASS_NAME: PCWSTR = w!("SplashScreenClass");

/// State reachable from the window procedure through GWLP_USERDATA
struct WindowState {
    image_path: PathBuf,
    fit: ImageFit,
    background: Color,
    quit_on_destroy: bool,
    renderer: Renderer,
    loader: ImageLoader,
    open: Cell<bool>,
}

/// A borderless splash window showing one centered image
pub struct SplashScreen {
    hwnd: HWND,
    // Leaked from a Box and shared with wnd_proc through GWLP_USERDATA.
    // Only ever read through shared references; freed in Drop after the
    // window is gone and before `_com` is released.
    state: NonNull<WindowState>,
    _com: ComApartment,
}

impl SplashScreen {
    /// Create the splash window, show it with `show_cmd` and paint it once
    pub fn new(config: &SplashConfig, show_cmd: SHOW_WINDOW_CMD) -> Result<Self> {
        log!("SplashScreen::new() starting");
        config.validate()?;

        let com = ComApartment::enter()?;

        let state = Box::new(WindowState {
            image_path: config.resolve_image_path(),
            fit: config.fit,
            background: config.background_color().map_err(crate::ConfigError::from)?,
            quit_on_destroy: config.quit_on_destroy,
            renderer: Renderer::new()?,
            loader: ImageLoader::new()?,
            open: Cell::new(false),
        });
        log!("  Image path: {:?}", state.image_path);

        register_window_class(SPLASH_CLASS_NAME, Some(wnd_proc))?;

        let dpi = system_dpi();
        let rect = center_in(
            primary_work_area(),
            scale_px(config.width, dpi),
            scale_px(config.height, dpi),
        );
        log!("  DPI {}, window rect {:?}", dpi, rect);

        let state = NonNull::from(Box::leak(state));
        let hwnd = match create_popup_window(
            SPLASH_CLASS_NAME,
            &config.title,
            rect,
            config.topmost,
            state.as_ptr() as *const c_void,
        ) {
            Ok(hwnd) => hwnd,
            Err(e) => {
                log!("  CreateWindowExW failed: {:?}", e);
                unregister_window_class(SPLASH_CLASS_NAME);
                // No window holds the pointer any more
                drop(unsafe { Box::from_raw(state.as_ptr()) });
                return Err(e.into());
            }
        };

        let splash = Self {
            hwnd,
            state,
            _com: com,
        };
        splash.state().open.set(true);
        log!("  Window created: HWND={:?}", hwnd);

        unsafe {
            let _ = ShowWindow(hwnd, show_cmd);
            let _ = UpdateWindow(hwnd);
        }

        Ok(splash)
    }

    fn state(&self) -> &WindowState {
        // Valid until Drop frees it; wnd_proc only takes shared references too
        unsafe { self.state.as_ref() }
    }

    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    /// True until the window has received WM_DESTROY
    pub fn is_open(&self) -> bool {
        self.state().open.get()
    }

    /// Request destruction of the window. Does nothing once it is gone.
    pub fn close(&mut self) {
        if self.is_open() && is_window(self.hwnd) {
            log!("SplashScreen::close(): destroying HWND={:?}", self.hwnd);
            destroy_window(self.hwnd);
        }
    }
}

impl Drop for SplashScreen {
    fn drop(&mut self) {
        // WM_NCDESTROY has cleared GWLP_USERDATA once this returns
        self.close();
        unregister_window_class(SPLASH_CLASS_NAME);
        drop(unsafe { Box::from_raw(self.state.as_ptr()) });
        log!("SplashScreen dropped");
    }
}

impl WindowState {
    fn paint(&self, hwnd: HWND, hdc: HDC) {
        let client = get_client_rect(hwnd);
        if client.width() <= 0 || client.height() <= 0 {
            return;
        }

        let frame = match self.renderer.begin(hdc, client) {
            Ok(frame) => frame,
            Err(e) => {
                log!("paint: begin failed: {:?}", e);
                return;
            }
        };

        frame.clear(self.background);

        let (max_width, max_height) = draw_area(client, frame.max_bitmap_size());

        // Decoded fresh on every paint; nothing is cached between frames
        match self.loader.load(&self.image_path, max_width, max_height, self.fit) {
            Ok(image) => {
                let (x, y) = image_origin(client, image.width(), image.height());
                if let Err(e) = frame.draw_image(&image, x, y) {
                    log!("paint: draw_image failed: {:?}", e);
                }
            }
            Err(e) => log!("paint: could not load {:?}: {:?}", self.image_path, e),
        }

        if let Err(e) = frame.end() {
            log!("paint: EndDraw failed: {:?}", e);
        }
    }
}

/// Largest image the paint can draw: the client area, capped by what the
/// render target accepts as a bitmap
fn draw_area(client: Rect, max_bitmap: u32) -> (u32, u32) {
    (
        (client.width().max(0) as u32).min(max_bitmap),
        (client.height().max(0) as u32).min(max_bitmap),
    )
}

/// Where the image's top-left corner goes so it sits centered in `client`
fn image_origin(client: Rect, width: u32, height: u32) -> (i32, i32) {
    let (x, y) = centered_origin(client.width(), client.height(), width as i32, height as i32);
    (client.left + x, client.top + y)
}

unsafe fn state_for<'a>(hwnd: HWND, msg: u32, lparam: LPARAM) -> Option<&'a WindowState> {
    if msg == WM_NCCREATE {
        let create = &*(lparam.0 as *const CREATESTRUCTW);
        SetWindowLongPtrW(hwnd, GWLP_USERDATA, create.lpCreateParams as isize);
    }

    let ptr = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *const WindowState;
    ptr.as_ref()
}

unsafe extern "system" fn wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let Some(state) = state_for(hwnd, msg, lparam) else {
        return DefWindowProcW(hwnd, msg, wparam, lparam);
    };

    match msg {
        WM_PAINT => {
            let mut ps = PAINTSTRUCT::default();
            let hdc = BeginPaint(hwnd, &mut ps);
            state.paint(hwnd, hdc);
            let _ = EndPaint(hwnd, &ps);
            LRESULT(0)
        }
        WM_ERASEBKGND => {
            // Paint clears to the background color
            LRESULT(1)
        }
        WM_DESTROY => {
            log!("WM_DESTROY received");
            state.open.set(false);
            if state.quit_on_destroy {
                PostQuitMessage(0);
            }
            LRESULT(0)
        }
        WM_NCDESTROY => {
            SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0);
            DefWindowProcW(hwnd, msg, wparam, lparam)
        }
        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // The window class is process-wide; keep tests that create windows
    // from registering and unregistering it underneath each other.
    static WINDOW_CLASS_LOCK: Mutex<()> = Mutex::new(());

    fn hidden_config() -> SplashConfig {
        SplashConfig {
            quit_on_destroy: false,
            topmost: false,
            ..SplashConfig::default()
        }
    }

    #[test]
    fn test_image_origin_centers_in_client() {
        let client = Rect::new(0, 0, 400, 300);
        assert_eq!(image_origin(client, 256, 256), (72, 22));
    }

    #[test]
    fn test_image_origin_respects_client_offset() {
        let client = Rect::new(10, 20, 410, 320);
        assert_eq!(image_origin(client, 200, 100), (110, 120));
    }

    #[test]
    fn test_draw_area_is_capped_by_bitmap_limit() {
        assert_eq!(draw_area(Rect::new(0, 0, 400, 300), 16384), (400, 300));
        assert_eq!(draw_area(Rect::new(0, 0, 9000, 300), 8192), (8192, 300));
        assert_eq!(draw_area(Rect::new(0, 0, 0, 0), 8192), (0, 0));
    }

    #[test]
    fn test_close_destroys_window_once() {
        let _guard = WINDOW_CLASS_LOCK.lock().unwrap_or_else(|e| e.into_inner());

        let mut splash = SplashScreen::new(&hidden_config(), SW_HIDE).unwrap();
        let hwnd = splash.hwnd();
        assert!(splash.is_open());
        assert!(is_window(hwnd));

        splash.close();
        assert!(!splash.is_open());
        assert!(!is_window(hwnd));

        // Second close is a no-op
        splash.close();
        assert!(!splash.is_open());
    }

    #[test]
    fn test_second_splash_reuses_registered_class() {
        let _guard = WINDOW_CLASS_LOCK.lock().unwrap_or_else(|e| e.into_inner());

        let first = SplashScreen::new(&hidden_config(), SW_HIDE).unwrap();
        let second = SplashScreen::new(&hidden_config(), SW_HIDE).unwrap();
        assert!(first.is_open());
        assert!(second.is_open());
        assert_ne!(first.hwnd(), second.hwnd());
        drop(first);
        drop(second);

        let third = SplashScreen::new(&hidden_config(), SW_HIDE).unwrap();
        assert!(third.is_open());
    }

    #[test]
    fn test_drop_destroys_open_window() {
        let _guard = WINDOW_CLASS_LOCK.lock().unwrap_or_else(|e| e.into_inner());

        let splash = SplashScreen::new(&hidden_config(), SW_HIDE).unwrap();
        let hwnd = splash.hwnd();
        assert!(is_window(hwnd));

        drop(splash);
        assert!(!is_window(hwnd));
    }

    #[test]
    fn test_external_destroy_marks_closed() {
        let _guard = WINDOW_CLASS_LOCK.lock().unwrap_or_else(|e| e.into_inner());

        let mut splash = SplashScreen::new(&hidden_config(), SW_HIDE).unwrap();
        destroy_window(splash.hwnd());
        assert!(!splash.is_open());

        splash.close();
        assert!(!is_window(splash.hwnd()));
    }
}

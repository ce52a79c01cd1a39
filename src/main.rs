//! Splash - shows the startup splash window, then closes it.
//!
//! Stands in for a host application: the splash stays up for
//! `min_display_ms` (the host's "initialization"), then is closed on command.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

#[cfg(target_os = "windows")]
fn main() {
    host::run();
}

#[cfg(not(target_os = "windows"))]
fn main() {
    eprintln!("splash: the splash window is only available on Windows");
    std::process::exit(1);
}

#[cfg(target_os = "windows")]
mod host {
    use std::cell::RefCell;

    use windows::Win32::UI::WindowsAndMessaging::{KillTimer, SetTimer, SW_SHOWNORMAL, WM_TIMER};

    use splash_screen::log;
    use splash_screen::platform::win32::{enable_dpi_awareness, run_message_loop};
    use splash_screen::{SplashConfig, SplashScreen};

    /// Timer that stands in for the host finishing its startup work
    const TIMER_INIT_DONE: usize = 1;

    pub fn run() {
        log::init();
        log!("main() starting");

        if let Err(e) = enable_dpi_awareness() {
            log!("Warning: Failed to enable DPI awareness: {:?}", e);
        }

        let config = SplashConfig::load();
        log!(
            "Config: {}x{}, image={:?}, min_display_ms={}",
            config.width,
            config.height,
            config.image,
            config.min_display_ms
        );

        let splash = match SplashScreen::new(&config, SW_SHOWNORMAL) {
            Ok(s) => RefCell::new(s),
            Err(e) => {
                log!("FATAL: Failed to create splash window: {}", e);
                return;
            }
        };

        let hwnd = splash.borrow().hwnd();
        unsafe {
            if SetTimer(hwnd, TIMER_INIT_DONE, config.min_display_ms, None) == 0 {
                log!("SetTimer failed, closing splash immediately");
                splash.borrow_mut().close();
                if !config.quit_on_destroy {
                    return;
                }
            }
        }

        run_message_loop(|msg| {
            if msg.message == WM_TIMER && msg.hwnd == hwnd && msg.wParam.0 == TIMER_INIT_DONE {
                log!("Initialization finished, closing splash");
                unsafe {
                    let _ = KillTimer(hwnd, TIMER_INIT_DONE);
                }
                splash.borrow_mut().close();
                // Without quit_on_destroy nothing else will post WM_QUIT
                return Some(config.quit_on_destroy);
            }
            None
        });

        drop(splash);
        log!("Exiting");
    }
}

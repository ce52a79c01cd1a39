//! Message loop

use windows::Win32::UI::WindowsAndMessaging::*;

/// Run the thread's message loop until WM_QUIT or until `on_message` says stop.
///
/// `on_message` sees every message before it is dispatched and returns
/// `Some(true)` to swallow it, `Some(false)` to stop the loop, or `None` to
/// dispatch normally.
pub fn run_message_loop<F>(mut on_message: F)
where
    F: FnMut(&MSG) -> Option<bool>,
{
    unsafe {
        let mut msg = MSG::default();
        loop {
            let ret = GetMessageW(&mut msg, None, 0, 0);
            if ret.0 <= 0 {
                log!("GetMessageW returned {}, leaving message loop", ret.0);
                break;
            }

            match on_message(&msg) {
                Some(true) => continue,
                Some(false) => break,
                None => {
                    let _ = TranslateMessage(&msg);
                    DispatchMessageW(&msg);
                }
            }
        }
    }
}

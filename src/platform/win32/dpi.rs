//! DPI awareness utilities for Windows

use windows::Win32::UI::HiDpi::*;

/// Enable per-monitor DPI awareness (call early in main, before any window exists)
pub fn enable_dpi_awareness() -> Result<(), windows::core::Error> {
    unsafe {
        // Try V2 first (Windows 10 1703+)
        if SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2).is_ok() {
            return Ok(());
        }
        SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE)
    }
}

/// System DPI, used to size the splash before it has a monitor of its own
pub fn system_dpi() -> u32 {
    match unsafe { GetDpiForSystem() } {
        0 => 96,
        dpi => dpi,
    }
}

//! Native windowing backends
//!
//! Only Win32 exists; other targets build the platform-independent parts.

#[cfg(target_os = "windows")]
pub mod win32;

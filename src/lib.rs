//! Splash screen library
//!
//! A borderless, centered popup that shows one image while the host
//! application starts up. Placement math and configuration have no Windows
//! dependencies so they can be tested anywhere; the window itself lives in
//! `platform::win32`.

// Include the log module first so the log! macro works everywhere below
#[macro_use]
pub mod log;

pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod platform;

pub use color::Color;
pub use config::{ConfigError, SplashConfig};
pub use error::SplashError;
pub use geometry::{ImageFit, Rect};

#[cfg(target_os = "windows")]
pub use platform::win32::SplashScreen;

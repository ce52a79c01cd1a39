//! Errors raised while bringing up the splash window

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum SplashError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A Win32, COM or Direct2D call failed
    #[cfg(target_os = "windows")]
    #[error("Win32 error: {0}")]
    Win32(#[from] windows::core::Error),
}

pub type Result<T> = std::result::Result<T, SplashError>;

//! Splash configuration (splash.toml)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::{Color, ColorError};
use crate::geometry::ImageFit;
use crate::log::exe_dir;

/// Config file name searched for in the standard locations
pub const CONFIG_FILE_NAME: &str = "splash.toml";

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid background color: {0}")]
    Color(#[from] ColorError),

    #[error("Invalid window size {width}x{height}")]
    InvalidSize { width: i32, height: i32 },
}

/// Splash window configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplashConfig {
    /// Image drawn in the middle of the window
    pub image: PathBuf,
    /// Window title (not shown, but visible to accessibility tools)
    pub title: String,
    /// Logical width in pixels (at 96 DPI)
    pub width: i32,
    /// Logical height in pixels (at 96 DPI)
    pub height: i32,
    /// Keep the splash above other windows and out of the taskbar
    pub topmost: bool,
    /// Hex background color behind the image
    pub background: String,
    pub fit: ImageFit,
    /// Post WM_QUIT when the splash window is destroyed
    pub quit_on_destroy: bool,
    /// How long the demo host keeps the splash up before closing it
    pub min_display_ms: u32,
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self {
            image: PathBuf::from("assets/icons/app_icon.png"),
            title: "Orações Respondidas".to_string(),
            width: 400,
            height: 300,
            topmost: true,
            background: "#FFFFFF".to_string(),
            fit: ImageFit::Natural,
            quit_on_destroy: true,
            min_display_ms: 1500,
        }
    }
}

impl SplashConfig {
    /// Find splash.toml in standard locations
    pub fn find_config_path() -> Option<PathBuf> {
        // Check in order: %APPDATA%/splash, exe dir, cwd
        let candidates = [
            dirs::config_dir().map(|p| p.join("splash").join(CONFIG_FILE_NAME)),
            Some(exe_dir().join(CONFIG_FILE_NAME)),
            Some(PathBuf::from(CONFIG_FILE_NAME)),
        ];

        candidates.into_iter().flatten().find(|p| p.exists())
    }

    /// Load configuration, falling back to defaults if missing or broken
    pub fn load() -> Self {
        let Some(path) = Self::find_config_path() else {
            log!("No {} found, using defaults", CONFIG_FILE_NAME);
            return Self::default();
        };

        match Self::load_from_path(&path) {
            Ok(config) => {
                log!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                log!("Failed to load {:?}: {}, using defaults", path, e);
                Self::default()
            }
        }
    }

    /// Load and validate configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: SplashConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        self.background_color()?;
        Ok(())
    }

    pub fn background_color(&self) -> Result<Color, ColorError> {
        Color::from_hex(&self.background)
    }

    /// Resolve the image path.
    ///
    /// Relative paths are tried against the working directory first, then
    /// against the executable's directory.
    pub fn resolve_image_path(&self) -> PathBuf {
        self.resolve_image_path_from(&exe_dir())
    }

    fn resolve_image_path_from(&self, base: &Path) -> PathBuf {
        if self.image.is_absolute() || self.image.exists() {
            return self.image.clone();
        }

        let beside_exe = base.join(&self.image);
        if beside_exe.exists() {
            beside_exe
        } else {
            self.image.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_defaults_match_classic_splash() {
        let config = SplashConfig::default();
        assert_eq!(config.width, 400);
        assert_eq!(config.height, 300);
        assert_eq!(config.image, PathBuf::from("assets/icons/app_icon.png"));
        assert_eq!(config.fit, ImageFit::Natural);
        assert!(config.quit_on_destroy);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "width = 640").unwrap();
        writeln!(file, "fit = \"contain\"").unwrap();
        file.flush().unwrap();

        let config = SplashConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.width, 640);
        assert_eq!(config.height, 300);
        assert_eq!(config.fit, ImageFit::Contain);
        assert_eq!(config.title, "Orações Respondidas");
    }

    #[test]
    fn test_load_rejects_zero_size() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "height = 0").unwrap();
        file.flush().unwrap();

        let err = SplashConfig::load_from_path(file.path()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidSize {
                width: 400,
                height: 0
            }
        ));
    }

    #[test]
    fn test_load_rejects_bad_color() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "background = \"#nothex\"").unwrap();
        file.flush().unwrap();

        let err = SplashConfig::load_from_path(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Color(_)));
    }

    #[test]
    fn test_load_reports_parse_and_io_errors() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "width = \"wide\"").unwrap();
        file.flush().unwrap();
        assert!(matches!(
            SplashConfig::load_from_path(file.path()),
            Err(ConfigError::Parse(_))
        ));

        let dir = TempDir::new().unwrap();
        assert!(matches!(
            SplashConfig::load_from_path(&dir.path().join("missing.toml")),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_resolve_image_path_beside_exe() {
        let dir = TempDir::new().unwrap();
        let icons = dir.path().join("splash-test-assets");
        std::fs::create_dir_all(&icons).unwrap();
        std::fs::write(icons.join("logo.png"), b"png").unwrap();

        let config = SplashConfig {
            image: PathBuf::from("splash-test-assets/logo.png"),
            ..SplashConfig::default()
        };
        assert_eq!(
            config.resolve_image_path_from(dir.path()),
            icons.join("logo.png")
        );
    }

    #[test]
    fn test_resolve_image_path_missing_stays_relative() {
        let dir = TempDir::new().unwrap();
        let config = SplashConfig {
            image: PathBuf::from("no/such/image.png"),
            ..SplashConfig::default()
        };
        assert_eq!(
            config.resolve_image_path_from(dir.path()),
            PathBuf::from("no/such/image.png")
        );
    }
}

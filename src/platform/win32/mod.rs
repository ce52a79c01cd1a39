//! Win32 splash window implementation

pub mod com;
pub mod dpi;
pub mod event;
pub mod image;
pub mod render;
pub mod splash;
pub mod window;

pub use com::ComApartment;
pub use dpi::{enable_dpi_awareness, system_dpi};
pub use event::run_message_loop;
pub use image::{ImageLoader, LoadedImage};
pub use render::{Frame, Renderer};
pub use splash::SplashScreen;

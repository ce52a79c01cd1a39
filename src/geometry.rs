//! Window placement and image positioning math
//!
//! Kept free of Win32 types so it can be tested on any platform.

use serde::{Deserialize, Serialize};

/// Integer rectangle in physical pixels (right/bottom exclusive)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// How the splash image is sized inside the client area
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFit {
    /// Draw at the image's own pixel size
    #[default]
    Natural,
    /// Shrink (never enlarge) to fit the client area, keeping aspect ratio
    Contain,
}

/// Place a `width` x `height` window centered within `outer`
pub fn center_in(outer: Rect, width: i32, height: i32) -> Rect {
    let left = outer.left + (outer.width() - width) / 2;
    let top = outer.top + (outer.height() - height) / 2;
    Rect::new(left, top, left + width, top + height)
}

/// Top-left corner for drawing an item centered in a container.
///
/// Negative when the item is larger than the container, so the overflow is
/// cropped evenly on both sides.
pub fn centered_origin(
    container_width: i32,
    container_height: i32,
    item_width: i32,
    item_height: i32,
) -> (i32, i32) {
    (
        (container_width - item_width) / 2,
        (container_height - item_height) / 2,
    )
}

/// Region of an item (in item pixels) that is visible when it is centered in
/// a `max_width` x `max_height` area.
///
/// `None` when the whole item fits. The overflow is cut evenly from both
/// sides, matching what `centered_origin` would show with negative offsets.
pub fn centered_crop(
    item_width: u32,
    item_height: u32,
    max_width: u32,
    max_height: u32,
) -> Option<Rect> {
    let width = item_width.min(max_width);
    let height = item_height.min(max_height);
    if (width, height) == (item_width, item_height) || width == 0 || height == 0 {
        return None;
    }

    let left = ((item_width - width) / 2) as i32;
    let top = ((item_height - height) / 2) as i32;
    Some(Rect::new(left, top, left + width as i32, top + height as i32))
}

/// Scale a logical pixel value (96 DPI) to physical pixels
pub fn scale_px(px: i32, dpi: u32) -> i32 {
    ((px as f64) * (dpi as f64) / 96.0).round() as i32
}

/// Final drawn size of an image for the given fit mode
pub fn fit_size(
    image_width: u32,
    image_height: u32,
    max_width: u32,
    max_height: u32,
    fit: ImageFit,
) -> (u32, u32) {
    match fit {
        ImageFit::Natural => (image_width, image_height),
        ImageFit::Contain => {
            if image_width == 0 || image_height == 0 || max_width == 0 || max_height == 0 {
                return (image_width, image_height);
            }

            let width_ratio = max_width as f32 / image_width as f32;
            let height_ratio = max_height as f32 / image_height as f32;
            let scale = width_ratio.min(height_ratio);

            if scale >= 1.0 {
                (image_width, image_height)
            } else {
                let w = (image_width as f32 * scale).round() as u32;
                let h = (image_height as f32 * scale).round() as u32;
                (w.max(1), h.max(1))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_in_work_area() {
        // 1920x1040 work area (taskbar at the bottom)
        let work = Rect::new(0, 0, 1920, 1040);
        let r = center_in(work, 400, 300);
        assert_eq!(r, Rect::new(760, 370, 1160, 670));
        assert_eq!(r.width(), 400);
        assert_eq!(r.height(), 300);
    }

    #[test]
    fn test_center_in_offset_monitor() {
        let work = Rect::new(-1280, 40, 0, 1064);
        let r = center_in(work, 400, 300);
        assert_eq!(r.left, -840);
        assert_eq!(r.top, 402);
    }

    #[test]
    fn test_centered_origin() {
        assert_eq!(centered_origin(400, 300, 128, 128), (136, 86));
        assert_eq!(centered_origin(400, 300, 400, 300), (0, 0));
    }

    #[test]
    fn test_centered_origin_oversized_image() {
        assert_eq!(centered_origin(400, 300, 600, 500), (-100, -100));
    }

    #[test]
    fn test_centered_crop_keeps_fitting_image() {
        assert_eq!(centered_crop(128, 128, 400, 300), None);
        assert_eq!(centered_crop(400, 300, 400, 300), None);
    }

    #[test]
    fn test_centered_crop_trims_both_sides() {
        assert_eq!(
            centered_crop(600, 500, 400, 300),
            Some(Rect::new(100, 100, 500, 400))
        );
        // Only the wide axis is cut
        assert_eq!(
            centered_crop(1000, 200, 400, 300),
            Some(Rect::new(300, 0, 700, 200))
        );
    }

    #[test]
    fn test_centered_crop_shows_same_pixels_as_negative_origin() {
        let (x, _) = centered_origin(400, 300, 601, 300);
        let crop = centered_crop(601, 300, 400, 300).unwrap();
        assert_eq!(crop.left, -x);
        assert_eq!(crop.width(), 400);
    }

    #[test]
    fn test_centered_crop_ignores_empty_area() {
        assert_eq!(centered_crop(600, 500, 0, 300), None);
    }

    #[test]
    fn test_scale_px() {
        assert_eq!(scale_px(400, 96), 400);
        assert_eq!(scale_px(400, 144), 600);
        assert_eq!(scale_px(300, 120), 375);
    }

    #[test]
    fn test_fit_size_natural_keeps_size() {
        assert_eq!(fit_size(800, 600, 400, 300, ImageFit::Natural), (800, 600));
    }

    #[test]
    fn test_fit_size_contain_shrinks() {
        assert_eq!(fit_size(1920, 1080, 400, 300, ImageFit::Contain), (400, 225));
        assert_eq!(fit_size(500, 1000, 400, 300, ImageFit::Contain), (150, 300));
    }

    #[test]
    fn test_fit_size_contain_never_enlarges() {
        assert_eq!(fit_size(128, 128, 400, 300, ImageFit::Contain), (128, 128));
    }

    #[test]
    fn test_fit_size_degenerate_inputs() {
        assert_eq!(fit_size(0, 0, 400, 300, ImageFit::Contain), (0, 0));
        assert_eq!(fit_size(800, 600, 0, 300, ImageFit::Contain), (800, 600));
    }

    #[test]
    fn test_image_fit_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            fit: ImageFit,
        }
        let w: Wrapper = toml::from_str("fit = \"contain\"").unwrap();
        assert_eq!(w.fit, ImageFit::Contain);
    }
}

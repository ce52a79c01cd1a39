//! Direct2D rendering into a WM_PAINT device context

use windows::core::Error;
use windows::Win32::Foundation::RECT;
use windows::Win32::Graphics::Direct2D::Common::*;
use windows::Win32::Graphics::Direct2D::*;
use windows::Win32::Graphics::Dxgi::Common::DXGI_FORMAT_B8G8R8A8_UNORM;
use windows::Win32::Graphics::Gdi::HDC;

use super::image::LoadedImage;
use crate::color::Color;
use crate::geometry::Rect;

/// Owns the Direct2D factory; render targets are made per paint
pub struct Renderer {
    factory: ID2D1Factory,
}

/// One in-progress paint: a DC render target between BeginDraw and EndDraw
pub struct Frame {
    target: ID2D1DCRenderTarget,
}

impl Renderer {
    pub fn new() -> Result<Self, Error> {
        log!("Renderer::new(): creating D2D1 factory");
        let factory: ID2D1Factory =
            unsafe { D2D1CreateFactory(D2D1_FACTORY_TYPE_SINGLE_THREADED, None)? };
        Ok(Self { factory })
    }

    /// Bind a fresh render target to `hdc` covering `client` and begin drawing
    pub fn begin(&self, hdc: HDC, client: Rect) -> Result<Frame, Error> {
        // 96 DPI so one DIP is one physical pixel; the process is DPI aware
        let render_props = D2D1_RENDER_TARGET_PROPERTIES {
            r#type: D2D1_RENDER_TARGET_TYPE_DEFAULT,
            pixelFormat: D2D1_PIXEL_FORMAT {
                format: DXGI_FORMAT_B8G8R8A8_UNORM,
                alphaMode: D2D1_ALPHA_MODE_IGNORE,
            },
            dpiX: 96.0,
            dpiY: 96.0,
            usage: D2D1_RENDER_TARGET_USAGE_NONE,
            minLevel: D2D1_FEATURE_LEVEL_DEFAULT,
        };

        let bounds = RECT {
            left: client.left,
            top: client.top,
            right: client.right,
            bottom: client.bottom,
        };

        unsafe {
            let target = self.factory.CreateDCRenderTarget(&render_props)?;
            target.BindDC(hdc, &bounds)?;
            target.BeginDraw();
            Ok(Frame { target })
        }
    }
}

impl Frame {
    pub fn clear(&self, color: Color) {
        let d2d_color = D2D1_COLOR_F {
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        };
        unsafe {
            self.target.Clear(Some(&d2d_color));
        }
    }

    /// Largest bitmap edge, in pixels, this target can hold
    pub fn max_bitmap_size(&self) -> u32 {
        unsafe { self.target.GetMaximumBitmapSize() }
    }

    /// Draw `image` at its loaded size with its top-left corner at (x, y)
    pub fn draw_image(&self, image: &LoadedImage, x: i32, y: i32) -> Result<(), Error> {
        let bitmap = image.create_d2d_bitmap(&self.target)?;
        let dest = D2D_RECT_F {
            left: x as f32,
            top: y as f32,
            right: (x + image.width() as i32) as f32,
            bottom: (y + image.height() as i32) as f32,
        };
        unsafe {
            self.target.DrawBitmap(
                &bitmap,
                Some(&dest),
                1.0,
                D2D1_BITMAP_INTERPOLATION_MODE_LINEAR,
                None,
            );
        }
        Ok(())
    }

    /// Finish drawing and flush to the device context
    pub fn end(self) -> Result<(), Error> {
        unsafe { self.target.EndDraw(None, None) }
    }
}

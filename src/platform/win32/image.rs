//! Windows Imaging Component (WIC) image loading
//!
//! Decodes the splash image (PNG, JPG, BMP, ...) and converts it to a
//! Direct2D bitmap for drawing. COM must already be initialized on the
//! calling thread (see `ComApartment`).

use std::path::Path;

use windows::core::{Error, PCWSTR};
use windows::Win32::Foundation::GENERIC_READ;
use windows::Win32::Graphics::Direct2D::Common::{D2D1_ALPHA_MODE_PREMULTIPLIED, D2D1_PIXEL_FORMAT};
use windows::Win32::Graphics::Direct2D::{ID2D1Bitmap, ID2D1RenderTarget, D2D1_BITMAP_PROPERTIES};
use windows::Win32::Graphics::Dxgi::Common::DXGI_FORMAT_B8G8R8A8_UNORM;
use windows::Win32::Graphics::Imaging::{
    CLSID_WICImagingFactory, GUID_WICPixelFormat32bppPBGRA, IWICBitmapClipper, IWICBitmapDecoder,
    IWICBitmapScaler, IWICBitmapSource, IWICFormatConverter, IWICImagingFactory, WICBitmapDitherTypeNone,
    WICBitmapInterpolationModeHighQualityCubic, WICBitmapPaletteTypeMedianCut,
    WICDecodeMetadataCacheOnDemand, WICRect,
};
use windows::Win32::System::Com::{CoCreateInstance, CLSCTX_INPROC_SERVER};

use crate::geometry::{centered_crop, fit_size, ImageFit};

/// Image loader using Windows Imaging Component
pub struct ImageLoader {
    wic_factory: IWICImagingFactory,
}

/// Decoded image in premultiplied BGRA, ready for conversion to a D2D bitmap
pub struct LoadedImage {
    converter: IWICFormatConverter,
    width: u32,
    height: u32,
}

impl LoadedImage {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Create a Direct2D bitmap from this image for the given render target
    pub fn create_d2d_bitmap(&self, render_target: &ID2D1RenderTarget) -> Result<ID2D1Bitmap, Error> {
        let bitmap_props = D2D1_BITMAP_PROPERTIES {
            pixelFormat: D2D1_PIXEL_FORMAT {
                format: DXGI_FORMAT_B8G8R8A8_UNORM,
                alphaMode: D2D1_ALPHA_MODE_PREMULTIPLIED,
            },
            dpiX: 96.0,
            dpiY: 96.0,
        };

        unsafe { render_target.CreateBitmapFromWicBitmap(&self.converter, Some(&bitmap_props)) }
    }
}

impl ImageLoader {
    pub fn new() -> Result<Self, Error> {
        let wic_factory: IWICImagingFactory =
            unsafe { CoCreateInstance(&CLSID_WICImagingFactory, None, CLSCTX_INPROC_SERVER)? };
        Ok(Self { wic_factory })
    }

    /// Load the first frame of an image file, sized for a `max_width` x
    /// `max_height` area according to `fit`.
    ///
    /// Whatever still overflows that area is clipped evenly from both sides,
    /// so the decoded bitmap is never larger than the area it is drawn into.
    pub fn load(
        &self,
        path: &Path,
        max_width: u32,
        max_height: u32,
        fit: ImageFit,
    ) -> Result<LoadedImage, Error> {
        log!(
            "ImageLoader::load({:?}, {}x{}, {:?})",
            path,
            max_width,
            max_height,
            fit
        );

        unsafe {
            let path_wide: Vec<u16> = path
                .to_string_lossy()
                .encode_utf16()
                .chain(std::iter::once(0))
                .collect();

            let decoder: IWICBitmapDecoder = self.wic_factory.CreateDecoderFromFilename(
                PCWSTR(path_wide.as_ptr()),
                None,
                GENERIC_READ,
                WICDecodeMetadataCacheOnDemand,
            )?;

            let frame = decoder.GetFrame(0)?;

            let (mut orig_width, mut orig_height) = (0u32, 0u32);
            frame.GetSize(&mut orig_width, &mut orig_height)?;

            let (width, height) = fit_size(orig_width, orig_height, max_width, max_height, fit);
            log!(
                "  Decoded {}x{}, drawing at {}x{}",
                orig_width,
                orig_height,
                width,
                height
            );

            let source: IWICBitmapSource = if (width, height) != (orig_width, orig_height) {
                let scaler: IWICBitmapScaler = self.wic_factory.CreateBitmapScaler()?;
                scaler.Initialize(
                    &frame,
                    width,
                    height,
                    WICBitmapInterpolationModeHighQualityCubic,
                )?;
                scaler.into()
            } else {
                frame.into()
            };

            let (source, width, height): (IWICBitmapSource, u32, u32) = match centered_crop(width, height, max_width, max_height) {
                Some(crop) => {
                    log!("  Clipping to {:?}", crop);
                    let clipper: IWICBitmapClipper = self.wic_factory.CreateBitmapClipper()?;
                    let rect = WICRect {
                        X: crop.left,
                        Y: crop.top,
                        Width: crop.width(),
                        Height: crop.height(),
                    };
                    clipper.Initialize(&source, &rect)?;
                    (clipper.into(), crop.width() as u32, crop.height() as u32)
                }
                None => (source, width, height),
            };

            let converter: IWICFormatConverter = self.wic_factory.CreateFormatConverter()?;
            converter.Initialize(
                &source,
                &GUID_WICPixelFormat32bppPBGRA,
                WICBitmapDitherTypeNone,
                None,
                0.0,
                WICBitmapPaletteTypeMedianCut,
            )?;

            Ok(LoadedImage {
                converter,
                width,
                height,
            })
        }
    }
}

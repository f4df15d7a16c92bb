//! Page rasterization
//!
//! Renders MuPDF pages to RGBA pixel buffers. MuPDF draws into a pixmap
//! whose component count depends on colorspace and alpha; the buffer is
//! normalized to RGBA here so callers always get the same pixel format.

use image::RgbaImage;
use mupdf::{Colorspace, Matrix};
use tracing::trace;

use crate::document::{Error, Result};

/// Zoom factors outside this range produce pathological pixmap sizes
const MIN_SCALE: f32 = 0.1;
const MAX_SCALE: f32 = 8.0;

/// Rasterization options
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Zoom factor; 1.0 renders at 72 dpi. Clamped to 0.1..=8.0.
    pub scale: f32,
    /// Clockwise rotation in degrees
    pub rotation: u16,
    /// Render with an alpha channel instead of a white background
    pub alpha: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            rotation: 0,
            alpha: false,
        }
    }
}

/// Render one page to an RGBA image.
pub(crate) fn rasterize(
    page: &mupdf::Page,
    index: usize,
    options: &RenderOptions,
) -> Result<RgbaImage> {
    let scale = options.scale.clamp(MIN_SCALE, MAX_SCALE);

    let mut matrix = Matrix::new_scale(scale, scale);
    if options.rotation != 0 {
        let rotation = Matrix::new_rotate(options.rotation as f32);
        matrix.concat(rotation);
    }

    let colorspace = Colorspace::device_rgb();
    let pixmap = page
        .to_pixmap(&matrix, &colorspace, options.alpha, true)
        .map_err(|e| Error::render(index, e))?;

    trace!(
        page = index,
        scale,
        width = pixmap.width(),
        height = pixmap.height(),
        "rasterized page"
    );

    pixmap_to_rgba(&pixmap)
}

/// Normalize a MuPDF pixmap to an RGBA buffer.
///
/// Handles both 3-component (no alpha) and 4-component pixmaps; missing
/// alpha becomes fully opaque.
fn pixmap_to_rgba(pixmap: &mupdf::Pixmap) -> Result<RgbaImage> {
    let width = pixmap.width() as u32;
    let height = pixmap.height() as u32;
    let samples = pixmap.samples();
    let n = pixmap.n() as usize;

    let mut rgba = Vec::with_capacity((width as usize) * (height as usize) * 4);

    for y in 0..height as usize {
        for x in 0..width as usize {
            let offset = (y * width as usize + x) * n;
            let r = samples.get(offset).copied().unwrap_or(0);
            let g = samples.get(offset + 1).copied().unwrap_or(0);
            let b = samples.get(offset + 2).copied().unwrap_or(0);
            let a = if n >= 4 {
                samples.get(offset + 3).copied().unwrap_or(255)
            } else {
                255
            };
            rgba.extend_from_slice(&[r, g, b, a]);
        }
    }

    RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| Error::Image("pixmap dimensions do not match sample buffer".into()))
}

/// PNG-encode a rendered page.
pub(crate) fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    use std::io::Cursor;

    let mut output = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut output), image::ImageFormat::Png)
        .map_err(|e| Error::Image(e.to_string()))?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let options = RenderOptions::default();
        assert_eq!(options.scale, 1.0);
        assert_eq!(options.rotation, 0);
        assert!(!options.alpha);
    }

    #[test]
    fn scale_is_clamped() {
        assert_eq!(100.0_f32.clamp(MIN_SCALE, MAX_SCALE), MAX_SCALE);
        assert_eq!(0.0_f32.clamp(MIN_SCALE, MAX_SCALE), MIN_SCALE);
        assert_eq!(1.5_f32.clamp(MIN_SCALE, MAX_SCALE), 1.5);
    }

    #[test]
    fn encode_png_produces_signature() {
        let image = RgbaImage::from_pixel(4, 4, image::Rgba([255, 0, 0, 255]));
        let png = encode_png(&image).unwrap();
        assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
    }
}

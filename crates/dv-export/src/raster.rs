//! Rasterized canvas bitmaps and the host-side rasterizer seam.

use crate::error::ExportError;

/// A straight (non-premultiplied) RGBA8 bitmap, row-major, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl Bitmap {
    /// Wrap raw RGBA bytes, checking that the buffer matches the dimensions.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, ExportError> {
        if width == 0 || height == 0 {
            return Err(ExportError::EmptyBitmap { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(ExportError::BitmapSize {
                width,
                height,
                expected,
                actual: rgba.len(),
            });
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    /// A single-colour bitmap.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = width as usize * height as usize;
        Self {
            width,
            height,
            rgba: rgba.repeat(pixels),
        }
    }

    /// Drop the alpha channel by compositing onto white.
    pub fn to_rgb_on_white(&self) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(self.rgba.len() / 4 * 3);
        for px in self.rgba.chunks_exact(4) {
            let a = px[3] as u16;
            for &c in &px[..3] {
                let blended = (c as u16 * a + 255 * (255 - a) + 127) / 255;
                rgb.push(blended as u8);
            }
        }
        rgb
    }
}

/// Produces a bitmap of the current canvas with editing controls hidden.
///
/// Implemented by the host (the wasm bridge re-renders onto a scratch
/// Canvas2D); tests use in-memory fakes.
pub trait Rasterizer {
    /// Render at `scale` device pixels per canvas unit.
    fn rasterize(&mut self, scale: f64) -> Result<Bitmap, ExportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_buffer() {
        let err = Bitmap::from_rgba(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(err, ExportError::BitmapSize { expected: 16, .. }));
    }

    #[test]
    fn rejects_empty_dimensions() {
        assert!(matches!(
            Bitmap::from_rgba(0, 10, Vec::new()),
            Err(ExportError::EmptyBitmap { .. })
        ));
    }

    #[test]
    fn transparent_pixels_become_white() {
        let bmp = Bitmap::solid(1, 1, [10, 20, 30, 0]);
        assert_eq!(bmp.to_rgb_on_white(), vec![255, 255, 255]);
    }

    #[test]
    fn opaque_pixels_keep_colour() {
        let bmp = Bitmap::solid(2, 1, [10, 20, 30, 255]);
        assert_eq!(bmp.to_rgb_on_white(), vec![10, 20, 30, 10, 20, 30]);
    }
}

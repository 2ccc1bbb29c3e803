//! Core types shared by the encoding pipeline.

use thiserror::Error;

/// Bytes per RGBA pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// Error types for SSTV encoding operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    /// A tone or stream parameter is negative, non-finite, or otherwise unusable.
    #[error("Invalid parameter `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// Pixel data length doesn't match the declared dimensions.
    #[error("Invalid image: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidImage { expected: usize, actual: usize },

    /// A sample count or payload size does not fit the target integer type.
    #[error("Overflow computing {what}")]
    Overflow { what: &'static str },
}

impl EncodeError {
    pub(crate) fn invalid_parameter(name: &'static str, value: f64) -> Self {
        EncodeError::InvalidParameter { name, value }
    }
}

/// A decoded RGBA image handed to the encoder.
///
/// Pixels are stored row-major, top row first, left pixel first, 4 bytes per
/// pixel. Alpha is carried but never read by the encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGBA pixel data. Length should be width * height * 4.
    pub pixels: Vec<u8>,
}

impl ImageBuffer {
    /// Create a new ImageBuffer with the given dimensions and pixel data.
    ///
    /// The buffer is not validated here; [`ImageBuffer::validate`] is called by
    /// the encoder before any work is done.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a buffer filled with a single RGBA color.
    ///
    /// # Errors
    /// Returns `Overflow` if the buffer length does not fit in usize.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, EncodeError> {
        let mut image = Self::new(width, height, Vec::new());
        let len = image.expected_len()?;
        image.pixels = rgba.iter().copied().cycle().take(len).collect();
        Ok(image)
    }

    /// Create an ImageBuffer from an image::RgbaImage.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.into_raw())
    }

    /// Convert to an image::RgbaImage, or None if the buffer is malformed.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Expected pixel buffer length, or `Overflow` if it does not fit in usize.
    pub fn expected_len(&self) -> Result<usize, EncodeError> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
            .ok_or(EncodeError::Overflow {
                what: "image buffer length",
            })
    }

    /// Check the `pixels.len() == width * height * 4` invariant.
    pub fn validate(&self) -> Result<(), EncodeError> {
        let expected = self.expected_len()?;
        if self.pixels.len() != expected {
            return Err(EncodeError::InvalidImage {
                expected,
                actual: self.pixels.len(),
            });
        }
        Ok(())
    }

    /// RGBA bytes of row `y`. Assumes the buffer has been validated.
    pub(crate) fn row(&self, y: u32) -> &[u8] {
        let stride = self.width as usize * BYTES_PER_PIXEL;
        let start = y as usize * stride;
        &self.pixels[start..start + stride]
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Check if this image has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}

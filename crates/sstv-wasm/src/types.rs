//! WASM-compatible wrapper types for image data.

use sstv_core::ImageBuffer;
use wasm_bindgen::prelude::*;

/// An RGBA image wrapper for JavaScript.
///
/// Mirrors the shape of a canvas `ImageData`, so the usual construction is
/// `new JsImageBuffer(data.width, data.height, data.data)`.
///
/// The pixel data is stored in WASM memory. The `free()` method can be called
/// to release it early; otherwise wasm-bindgen's finalizer handles cleanup.
#[wasm_bindgen]
pub struct JsImageBuffer {
    inner: ImageBuffer,
}

#[wasm_bindgen]
impl JsImageBuffer {
    /// Create a new JsImageBuffer from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsImageBuffer {
        JsImageBuffer {
            inner: ImageBuffer::new(width, height, pixels),
        }
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the number of bytes in the pixel buffer
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels.len()
    }

    /// Whether the buffer length matches width * height * 4.
    pub fn is_valid(&self) -> bool {
        self.inner.validate().is_ok()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsImageBuffer {
    pub(crate) fn as_image(&self) -> &ImageBuffer {
        &self.inner
    }
}

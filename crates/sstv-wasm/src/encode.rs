//! SSTV encoding WASM bindings.
//!
//! # Functions
//!
//! - [`encode_sstv`] - Encode raw RGBA pixel data to WAV bytes
//! - [`encode_sstv_image`] - Encode a JsImageBuffer with optional mode options
//! - [`estimate_duration_ms`] - Predict the transmission length
//!
//! # Example
//!
//! ```typescript
//! import { encode_sstv, mime_type } from '@sstv/wasm';
//!
//! const data = ctx.getImageData(0, 0, 320, 240);
//! const wav = encode_sstv(data.data, data.width, data.height, 48000);
//! const blob = new Blob([wav], { type: mime_type() });
//! audio.src = URL.createObjectURL(blob);
//! ```

use crate::types::JsImageBuffer;
use sstv_core::encode::{self, EncodeOptions};
use sstv_core::ImageBuffer;
use wasm_bindgen::prelude::*;

/// Parse an optional JS options object.
///
/// `undefined`/`null` yields Robot36 at 48 kHz; missing fields are filled
/// from the same defaults.
fn options_from_js(options: JsValue) -> Result<EncodeOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(EncodeOptions::default());
    }
    serde_wasm_bindgen::from_value(options)
        .map_err(|e| JsValue::from_str(&format!("Invalid encode options: {}", e)))
}

/// Encode RGBA pixel data as SSTV audio.
///
/// # Arguments
///
/// * `pixels` - RGBA pixel data as a `Uint8Array` (e.g. `ImageData.data`)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `sample_rate` - Output sample rate in Hz (recommended: 48000)
///
/// # Returns
///
/// A `Uint8Array` containing a mono 16-bit PCM WAV file.
///
/// # Errors
///
/// Returns an error if the pixel data length doesn't match width * height * 4,
/// the sample rate is zero, or the image is too large for a WAV file.
#[wasm_bindgen]
pub fn encode_sstv(
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    sample_rate: u32,
) -> Result<Vec<u8>, JsValue> {
    let image = ImageBuffer::new(width, height, pixels);
    encode::encode(&image, sample_rate).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode a JsImageBuffer with explicit options.
///
/// `options` is an object shaped like `{ sample_rate, mode: { name, header,
/// scanline } }`; every field is optional.
///
/// # Example
///
/// ```typescript
/// const wav = encode_sstv_image(image, { sample_rate: 44100 });
/// ```
#[wasm_bindgen]
pub fn encode_sstv_image(image: &JsImageBuffer, options: JsValue) -> Result<Vec<u8>, JsValue> {
    let options = options_from_js(options)?;
    encode::encode_with(image.as_image(), &options).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Length in milliseconds of the audio a `width` x `height` image encodes to.
#[wasm_bindgen]
pub fn estimate_duration_ms(width: u32, height: u32, options: JsValue) -> Result<f64, JsValue> {
    let options = options_from_js(options)?;
    encode::estimate_duration_ms(width, height, &options)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// MIME type to label the encoded bytes with.
#[wasm_bindgen]
pub fn mime_type() -> String {
    sstv_core::MIME_TYPE.to_string()
}

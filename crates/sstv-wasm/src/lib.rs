//! SSTV WASM - WebAssembly bindings for the SSTV encoder
//!
//! This crate exposes `sstv-core` to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper for RGBA image data
//! - `encode` - Image to SSTV WAV bindings
//!
//! # Usage
//!
//! ```typescript
//! import init, { encode_sstv } from '@sstv/wasm';
//!
//! await init();
//!
//! const data = ctx.getImageData(0, 0, canvas.width, canvas.height);
//! const wav = encode_sstv(data.data, data.width, data.height, 48000);
//! ```

use wasm_bindgen::prelude::*;

mod encode;
mod types;

// Re-export public types
pub use encode::{encode_sstv, encode_sstv_image, estimate_duration_ms, mime_type};
pub use types::JsImageBuffer;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&JsValue::from_str(&format!(
        "sstv-wasm {} loaded",
        version()
    )));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

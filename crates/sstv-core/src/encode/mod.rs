//! SSTV encoding pipeline.
//!
//! This module turns an RGBA [`ImageBuffer`] into a WAV payload:
//! - VIS header identifying the mode (`header`)
//! - One sync pulse and one tone per pixel for every row (`scanline`)
//! - 16-bit PCM container serialization (`crate::wav`)
//!
//! # Architecture
//!
//! Encoding is a single synchronous pass with no I/O. The total sample count
//! is computed first with checked arithmetic, so an oversized image fails with
//! `Overflow` before anything is allocated, and the sample stream is then
//! filled into one exact-size buffer.
//!
//! # Examples
//!
//! ```ignore
//! use sstv_core::encode::{encode, DEFAULT_SAMPLE_RATE};
//! use sstv_core::ImageBuffer;
//!
//! let image = ImageBuffer::filled(320, 240, [128, 128, 128, 255]).unwrap();
//! let wav = encode(&image, DEFAULT_SAMPLE_RATE).unwrap();
//! std::fs::write("out.wav", wav).unwrap();
//! ```

mod header;
mod scanline;

pub use header::{build_header, header_sample_count, write_header};
pub use scanline::{encode_lines, frequency_for_luminance, lines_sample_count};

use scanline::write_lines;

use serde::{Deserialize, Serialize};

use crate::mode::ModeConfig;
use crate::tone::SampleStream;
use crate::types::{EncodeError, ImageBuffer};
use crate::wav;

/// Sample rate used when the caller does not pick one.
pub const DEFAULT_SAMPLE_RATE: u32 = 48000;

/// Options for a single encode call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Protocol constants.
    pub mode: ModeConfig,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            mode: ModeConfig::robot36(),
        }
    }
}

impl EncodeOptions {
    /// Robot36 options at the given sample rate.
    pub fn with_sample_rate(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<(), EncodeError> {
        if self.sample_rate == 0 {
            return Err(EncodeError::invalid_parameter("sample_rate", 0.0));
        }
        wav::WavFormat::mono(self.sample_rate).byte_rate()?;
        self.mode.validate()
    }
}

/// Exact number of samples a `width` x `height` image encodes to.
pub fn total_sample_count(
    width: u32,
    height: u32,
    options: &EncodeOptions,
) -> Result<usize, EncodeError> {
    options.validate()?;
    let header = header_sample_count(&options.mode.header, options.sample_rate)?;
    let lines = lines_sample_count(width, height, &options.mode.scanline, options.sample_rate)?;
    header.checked_add(lines).ok_or(EncodeError::Overflow {
        what: "total sample count",
    })
}

/// Playback length in milliseconds of the audio `encode_with` would produce.
pub fn estimate_duration_ms(
    width: u32,
    height: u32,
    options: &EncodeOptions,
) -> Result<f64, EncodeError> {
    let samples = total_sample_count(width, height, options)?;
    Ok(samples as f64 * 1000.0 / options.sample_rate as f64)
}

/// Encode an image as Robot36-framed SSTV audio at `sample_rate`.
///
/// # Errors
///
/// - `InvalidImage` if `pixels.len() != width * height * 4`
/// - `InvalidParameter` if `sample_rate` is zero
/// - `Overflow` if the image is too large for a WAV container
pub fn encode(image: &ImageBuffer, sample_rate: u32) -> Result<Vec<u8>, EncodeError> {
    encode_with(image, &EncodeOptions::with_sample_rate(sample_rate))
}

/// Encode an image with explicit options.
///
/// No partial output is produced: every check runs before samples are
/// rendered.
#[tracing::instrument(skip_all, fields(width = image.width, height = image.height, sample_rate = options.sample_rate, mode = %options.mode.name))]
pub fn encode_with(image: &ImageBuffer, options: &EncodeOptions) -> Result<Vec<u8>, EncodeError> {
    image.validate()?;
    let total = total_sample_count(image.width, image.height, options)?;
    let payload_len = wav::payload_len(total)?;
    tracing::debug!(samples = total, bytes = payload_len, "computed output size");

    let mut stream = SampleStream::with_capacity(total);
    write_header(&mut stream, &options.mode.header, options.sample_rate)?;
    write_lines(&mut stream, image, &options.mode.scanline, options.sample_rate)?;
    debug_assert_eq!(stream.len(), total);

    let payload = wav::serialize(stream, options.sample_rate)?;
    tracing::debug!(bytes = payload.len(), "encoded SSTV payload");
    Ok(payload)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for generating image dimensions (keep small for speed).
    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (0u32..=12, 0u32..=6)
    }

    proptest! {
        /// Property: payload size is exactly predicted by the sample count.
        #[test]
        fn prop_payload_size_predicted(
            (width, height) in dimensions_strategy(),
            sample_rate in prop_oneof![Just(8000u32), Just(11025), Just(44100), Just(48000)],
        ) {
            let options = EncodeOptions::with_sample_rate(sample_rate);
            let image = ImageBuffer::filled(width, height, [200, 100, 50, 255]).unwrap();
            let wav = encode_with(&image, &options).unwrap();
            let total = total_sample_count(width, height, &options).unwrap();
            prop_assert_eq!(wav.len(), 44 + 2 * total);
        }

        /// Property: mismatched pixel data always returns InvalidImage.
        #[test]
        fn prop_invalid_pixel_length_returns_error(
            (width, height) in (1u32..=8, 1u32..=8),
            delta in -3i64..=3,
        ) {
            prop_assume!(delta != 0);
            let expected = (width * height * 4) as i64;
            let pixels = vec![0u8; (expected + delta).max(0) as usize];
            let image = ImageBuffer::new(width, height, pixels);
            let is_invalid_image = matches!(
                encode(&image, DEFAULT_SAMPLE_RATE),
                Err(EncodeError::InvalidImage { .. })
            );
            prop_assert!(is_invalid_image);
        }

        /// Property: same input always produces same output.
        #[test]
        fn prop_deterministic_output(
            (width, height) in (1u32..=6, 1u32..=4),
            seed in any::<u8>(),
        ) {
            let pixels: Vec<u8> = (0..width * height * 4)
                .map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed))
                .collect();
            let image = ImageBuffer::new(width, height, pixels);
            prop_assert_eq!(
                encode(&image, DEFAULT_SAMPLE_RATE).unwrap(),
                encode(&image, DEFAULT_SAMPLE_RATE).unwrap()
            );
        }
    }
}

//! Canonical 44-byte RIFF/WAVE container with 16-bit PCM samples.
//!
//! The output contains no timestamps or optional chunks, so the same samples
//! always serialize to the same bytes.

use crate::tone::{Sample, SampleStream};
use crate::types::EncodeError;

/// MIME type of the serialized payload.
pub const MIME_TYPE: &str = "audio/wav";

/// Size of the RIFF, fmt and data chunk headers.
pub const HEADER_LEN: usize = 44;

/// WAV format parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    /// Number of channels (1 = mono).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample (always 16 here).
    pub bits_per_sample: u16,
}

impl WavFormat {
    /// Creates a mono 16-bit format.
    pub fn mono(sample_rate: u32) -> Self {
        Self {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
        }
    }

    fn bytes_per_sample(&self) -> u16 {
        self.bits_per_sample / 8
    }

    /// Bytes per sample frame.
    pub fn block_align(&self) -> u16 {
        self.channels * self.bytes_per_sample()
    }

    /// Bytes per second, or `Overflow` if it does not fit the 32-bit field.
    pub fn byte_rate(&self) -> Result<u32, EncodeError> {
        self.sample_rate
            .checked_mul(self.block_align() as u32)
            .ok_or(EncodeError::Overflow {
                what: "WAV byte rate",
            })
    }
}

/// Header fields read back from a serialized payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    pub format: WavFormat,
    pub byte_rate: u32,
    pub block_align: u16,
    /// Size of the data chunk in bytes.
    pub data_size: u32,
}

impl WavHeader {
    /// Parse the canonical 44-byte header. Returns None for anything else.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < HEADER_LEN
            || &bytes[0..4] != b"RIFF"
            || &bytes[8..12] != b"WAVE"
            || &bytes[12..16] != b"fmt "
            || &bytes[36..40] != b"data"
        {
            return None;
        }
        if read_u32(bytes, 16) != 16 || read_u16(bytes, 20) != 1 {
            return None;
        }

        Some(Self {
            format: WavFormat {
                channels: read_u16(bytes, 22),
                sample_rate: read_u32(bytes, 24),
                bits_per_sample: read_u16(bytes, 34),
            },
            byte_rate: read_u32(bytes, 28),
            block_align: read_u16(bytes, 32),
            data_size: read_u32(bytes, 40),
        })
    }
}

fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

/// Decode the data chunk of a canonical payload back to 16-bit samples.
pub fn pcm_samples(bytes: &[u8]) -> Option<Vec<i16>> {
    let header = WavHeader::parse(bytes)?;
    let data = bytes.get(HEADER_LEN..HEADER_LEN + header.data_size as usize)?;
    Some(
        data.chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect(),
    )
}

/// Quantize one sample to signed 16-bit.
///
/// Computes `round(sample * 32767)` clamped to the i16 range. Full negative
/// scale (`-1.0` and below) maps to -32768.
#[inline]
pub fn quantize(sample: Sample) -> i16 {
    if sample <= -1.0 {
        return i16::MIN;
    }
    // NaN maps to 0 through the saturating cast
    (sample * i16::MAX as f64)
        .round()
        .clamp(i16::MIN as f64, i16::MAX as f64) as i16
}

/// Total payload size for `sample_count` mono 16-bit samples.
pub fn payload_len(sample_count: usize) -> Result<usize, EncodeError> {
    let overflow = EncodeError::Overflow {
        what: "WAV payload size",
    };
    let data_size = sample_count.checked_mul(2).ok_or(overflow.clone())?;
    // The RIFF chunk size field (36 + data) must fit in 32 bits
    if data_size as u64 + 36 > u32::MAX as u64 {
        return Err(overflow);
    }
    Ok(HEADER_LEN + data_size)
}

/// Serialize a sample stream into a mono 16-bit PCM WAV payload.
///
/// # Errors
/// Returns `Overflow` if the data size or byte rate does not fit the 32-bit
/// header fields.
pub fn serialize(stream: SampleStream, sample_rate: u32) -> Result<Vec<u8>, EncodeError> {
    let format = WavFormat::mono(sample_rate);
    let byte_rate = format.byte_rate()?;
    let total = payload_len(stream.len())?;
    let data_size = (total - HEADER_LEN) as u32;

    let mut buffer = Vec::with_capacity(total);

    // RIFF header
    buffer.extend_from_slice(b"RIFF");
    buffer.extend_from_slice(&(36 + data_size).to_le_bytes());
    buffer.extend_from_slice(b"WAVE");

    // fmt chunk
    buffer.extend_from_slice(b"fmt ");
    buffer.extend_from_slice(&16u32.to_le_bytes());
    buffer.extend_from_slice(&1u16.to_le_bytes()); // PCM
    buffer.extend_from_slice(&format.channels.to_le_bytes());
    buffer.extend_from_slice(&format.sample_rate.to_le_bytes());
    buffer.extend_from_slice(&byte_rate.to_le_bytes());
    buffer.extend_from_slice(&format.block_align().to_le_bytes());
    buffer.extend_from_slice(&format.bits_per_sample.to_le_bytes());

    // data chunk
    buffer.extend_from_slice(b"data");
    buffer.extend_from_slice(&data_size.to_le_bytes());
    for sample in stream.into_inner() {
        buffer.extend_from_slice(&quantize(sample).to_le_bytes());
    }

    debug_assert_eq!(buffer.len(), total);
    Ok(buffer)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: header fields round-trip for any rate and length.
        #[test]
        fn prop_header_round_trip(
            sample_rate in 1u32..=192000,
            samples in prop::collection::vec(-1.0f64..=1.0, 0..256),
        ) {
            let len = samples.len();
            let mut stream = SampleStream::with_capacity(len);
            for s in samples {
                stream.push_sample(s);
            }
            let bytes = serialize(stream, sample_rate).unwrap();
            let header = WavHeader::parse(&bytes).unwrap();

            prop_assert_eq!(bytes.len(), 44 + 2 * len);
            prop_assert_eq!(header.format.sample_rate, sample_rate);
            prop_assert_eq!(header.format.channels, 1);
            prop_assert_eq!(header.format.bits_per_sample, 16);
            prop_assert_eq!(header.data_size as usize, 2 * len);
        }

        /// Property: quantization is monotonic and never wraps.
        #[test]
        fn prop_quantize_monotonic(a in -4.0f64..4.0, b in -4.0f64..4.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(quantize(lo) <= quantize(hi));
        }
    }
}

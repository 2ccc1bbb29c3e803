//! Image lines to tones.
//!
//! Each row is a sync pulse, a porch, then one tone per pixel whose
//! frequency tracks the pixel's luminance linearly between the black and
//! white frequencies of the mode. Rows are written strictly in order since
//! decoders reconstruct the image from stream position alone.

use crate::luminance::rgba_luminance;
use crate::mode::ScanlineConfig;
use crate::tone::{SampleStream, Tone};
use crate::types::{EncodeError, ImageBuffer, BYTES_PER_PIXEL};

/// Map a luminance value (0.0 to 255.0) to a tone frequency.
#[inline]
pub fn frequency_for_luminance(luminance: f64, scanline: &ScanlineConfig) -> f64 {
    scanline.black_hz + (luminance / 255.0) * (scanline.white_hz - scanline.black_hz)
}

/// Samples in one row of `width` pixels.
fn line_sample_count(
    width: u32,
    scanline: &ScanlineConfig,
    sample_rate: u32,
) -> Result<usize, EncodeError> {
    let overflow = EncodeError::Overflow {
        what: "scanline sample count",
    };
    // Every pixel tone has the same duration, so any frequency gives the count.
    let pixel = Tone::new(scanline.black_hz, scanline.pixel_ms).sample_count(sample_rate)?;
    let pixels = pixel.checked_mul(width as usize).ok_or(overflow.clone())?;
    scanline
        .sync
        .sample_count(sample_rate)?
        .checked_add(scanline.porch.sample_count(sample_rate)?)
        .and_then(|n| n.checked_add(pixels))
        .ok_or(overflow)
}

/// Exact number of samples [`encode_lines`] renders for a `width` x `height`
/// image.
pub fn lines_sample_count(
    width: u32,
    height: u32,
    scanline: &ScanlineConfig,
    sample_rate: u32,
) -> Result<usize, EncodeError> {
    line_sample_count(width, scanline, sample_rate)?
        .checked_mul(height as usize)
        .ok_or(EncodeError::Overflow {
            what: "scanline sample count",
        })
}

/// Append every row of `image` to an existing stream.
///
/// `image` must already have passed [`ImageBuffer::validate`].
pub(crate) fn write_lines(
    stream: &mut SampleStream,
    image: &ImageBuffer,
    scanline: &ScanlineConfig,
    sample_rate: u32,
) -> Result<(), EncodeError> {
    for y in 0..image.height {
        stream.push_tone(&scanline.sync, sample_rate)?;
        stream.push_tone(&scanline.porch, sample_rate)?;

        for pixel in image.row(y).chunks_exact(BYTES_PER_PIXEL) {
            let frequency = frequency_for_luminance(rgba_luminance(pixel), scanline);
            stream.push_tone(&Tone::new(frequency, scanline.pixel_ms), sample_rate)?;
        }
    }

    Ok(())
}

/// Render every row of `image` into a fresh stream.
///
/// # Errors
/// Returns `InvalidImage` if the pixel buffer does not match the dimensions.
pub fn encode_lines(
    image: &ImageBuffer,
    scanline: &ScanlineConfig,
    sample_rate: u32,
) -> Result<SampleStream, EncodeError> {
    image.validate()?;
    let capacity = lines_sample_count(image.width, image.height, scanline, sample_rate)?;
    let mut stream = SampleStream::with_capacity(capacity);
    write_lines(&mut stream, image, scanline, sample_rate)?;
    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tone::synthesize;

    const RATE: u32 = 48000;

    /// Sync pulse followed by porch, as rendered at the test rate.
    fn sync_pulse(scanline: &ScanlineConfig) -> Vec<f64> {
        let mut stream = SampleStream::new();
        stream.push_tone(&scanline.sync, RATE).unwrap();
        stream.push_tone(&scanline.porch, RATE).unwrap();
        stream.into_inner()
    }

    #[test]
    fn test_white_pixel_is_white_frequency() {
        let scanline = ScanlineConfig::default();
        let image = ImageBuffer::new(1, 1, vec![255, 255, 255, 255]);
        let stream = encode_lines(&image, &scanline, RATE).unwrap();

        let sync = sync_pulse(&scanline);
        let tone = synthesize(scanline.white_hz, scanline.pixel_ms, RATE).unwrap();
        assert_eq!(stream.len(), sync.len() + tone.len());
        assert_eq!(&stream.as_slice()[..sync.len()], &sync[..]);

        // BT.601 weights sum to 1 only up to rounding, so compare with tolerance
        for (got, want) in stream.as_slice()[sync.len()..].iter().zip(tone.as_slice()) {
            assert!((got - want).abs() < 1e-9);
        }
    }

    #[test]
    fn test_black_pixel_is_black_frequency() {
        let scanline = ScanlineConfig::default();
        let image = ImageBuffer::new(1, 1, vec![0, 0, 0, 255]);
        let stream = encode_lines(&image, &scanline, RATE).unwrap();

        let sync = sync_pulse(&scanline);
        let tone = synthesize(scanline.black_hz, scanline.pixel_ms, RATE).unwrap();
        assert_eq!(&stream.as_slice()[..sync.len()], &sync[..]);
        assert_eq!(&stream.as_slice()[sync.len()..], tone.as_slice());
    }

    #[test]
    fn test_frequency_mapping() {
        let scanline = ScanlineConfig::default();
        assert_eq!(frequency_for_luminance(0.0, &scanline), 1500.0);
        assert_eq!(frequency_for_luminance(255.0, &scanline), 2300.0);
        assert!((frequency_for_luminance(127.5, &scanline) - 1900.0).abs() < 1e-9);
    }

    #[test]
    fn test_alpha_does_not_change_output() {
        let scanline = ScanlineConfig::default();
        let opaque = ImageBuffer::new(2, 1, vec![10, 200, 30, 255, 90, 90, 90, 255]);
        let clear = ImageBuffer::new(2, 1, vec![10, 200, 30, 0, 90, 90, 90, 0]);
        assert_eq!(
            encode_lines(&opaque, &scanline, RATE).unwrap(),
            encode_lines(&clear, &scanline, RATE).unwrap()
        );
    }

    #[test]
    fn test_rows_in_order() {
        let scanline = ScanlineConfig::default();
        // Top row white, bottom row black
        let mut pixels = vec![255u8; 4];
        pixels.extend([0, 0, 0, 255]);
        let image = ImageBuffer::new(1, 2, pixels);
        let stream = encode_lines(&image, &scanline, RATE).unwrap();

        let line = line_sample_count(1, &scanline, RATE).unwrap();
        let sync = sync_pulse(&scanline).len();
        let black = synthesize(scanline.black_hz, scanline.pixel_ms, RATE).unwrap();
        assert_eq!(stream.len(), 2 * line);
        assert_eq!(&stream.as_slice()[line + sync..], black.as_slice());
    }

    #[test]
    fn test_sample_count_matches_output() {
        let scanline = ScanlineConfig::default();
        let image = ImageBuffer::filled(7, 3, [128, 64, 32, 255]).unwrap();
        let stream = encode_lines(&image, &scanline, RATE).unwrap();
        // 432 sync + 144 porch + 7 * 22 pixel samples per row
        assert_eq!(stream.len(), 3 * (432 + 144 + 7 * 22));
        assert_eq!(lines_sample_count(7, 3, &scanline, RATE).unwrap(), stream.len());
    }

    #[test]
    fn test_empty_image_yields_nothing() {
        let scanline = ScanlineConfig::default();
        let image = ImageBuffer::new(0, 0, vec![]);
        assert!(encode_lines(&image, &scanline, RATE).unwrap().is_empty());
    }

    #[test]
    fn test_mismatched_buffer_rejected() {
        let scanline = ScanlineConfig::default();
        let image = ImageBuffer::new(2, 2, vec![0u8; 12]);
        assert_eq!(
            encode_lines(&image, &scanline, RATE),
            Err(EncodeError::InvalidImage {
                expected: 16,
                actual: 12
            })
        );
    }

    #[test]
    fn test_line_count_overflow() {
        let scanline = ScanlineConfig::default();
        assert!(matches!(
            lines_sample_count(u32::MAX, u32::MAX, &scanline, RATE),
            Err(EncodeError::Overflow { .. })
        ));
    }
}

//! VIS header generation.
//!
//! The header is two leader tones around a short break, then an FSK frame
//! (start bit, 8 data bits, stop bit) carrying the mode code. Decoders lock
//! onto the leader frequency and read the code to select a mode.

use crate::mode::VisHeaderConfig;
use crate::tone::{SampleStream, Tone};
use crate::types::EncodeError;

/// Exact number of samples [`write_header`] appends.
pub fn header_sample_count(
    header: &VisHeaderConfig,
    sample_rate: u32,
) -> Result<usize, EncodeError> {
    header.tones().iter().try_fold(0usize, |total, tone| {
        total
            .checked_add(tone.sample_count(sample_rate)?)
            .ok_or(EncodeError::Overflow {
                what: "header sample count",
            })
    })
}

/// Append the VIS header to an existing stream.
pub fn write_header(
    stream: &mut SampleStream,
    header: &VisHeaderConfig,
    sample_rate: u32,
) -> Result<(), EncodeError> {
    header
        .tones()
        .iter()
        .try_for_each(|tone: &Tone| stream.push_tone(tone, sample_rate))
}

/// Render the VIS header into a fresh stream.
pub fn build_header(
    header: &VisHeaderConfig,
    sample_rate: u32,
) -> Result<SampleStream, EncodeError> {
    let mut stream = SampleStream::with_capacity(header_sample_count(header, sample_rate)?);
    write_header(&mut stream, header, sample_rate)?;
    Ok(stream)
}

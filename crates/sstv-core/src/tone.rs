//! Sine tone synthesis and the sample stream it appends to.
//!
//! Every stage of the encoder is expressed as a sequence of [`Tone`]s. A tone
//! renders `floor(sample_rate * duration_ms / 1000)` samples starting at
//! phase zero. The fractional remainder is dropped rather than carried into
//! the next tone, so long transmissions drift slightly; decoders tolerate
//! this and the output must stay byte-identical to existing encoders.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::types::EncodeError;

/// Instantaneous amplitude in `[-1.0, 1.0]`.
pub type Sample = f64;

/// A request for a fixed-frequency sine burst.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    /// Frequency in Hz. Zero renders silence.
    pub frequency_hz: f64,
    /// Duration in milliseconds.
    pub duration_ms: f64,
}

impl Tone {
    pub const fn new(frequency_hz: f64, duration_ms: f64) -> Self {
        Self {
            frequency_hz,
            duration_ms,
        }
    }

    /// Reject negative or non-finite parameters.
    pub fn validate(&self) -> Result<(), EncodeError> {
        if !self.frequency_hz.is_finite() || self.frequency_hz < 0.0 {
            return Err(EncodeError::invalid_parameter(
                "frequency_hz",
                self.frequency_hz,
            ));
        }
        if !self.duration_ms.is_finite() || self.duration_ms < 0.0 {
            return Err(EncodeError::invalid_parameter(
                "duration_ms",
                self.duration_ms,
            ));
        }
        Ok(())
    }

    /// Number of samples this tone renders at `sample_rate`.
    pub fn sample_count(&self, sample_rate: u32) -> Result<usize, EncodeError> {
        self.validate()?;
        let count = (sample_rate as f64 * self.duration_ms / 1000.0).floor();
        // usize::MAX as f64 rounds up to 2^64, which is itself out of range
        if count >= usize::MAX as f64 {
            return Err(EncodeError::Overflow {
                what: "tone sample count",
            });
        }
        Ok(count as usize)
    }

    /// Sample `i` of this tone.
    #[inline]
    fn sample_at(&self, i: usize, sample_rate: u32) -> Sample {
        (TAU * self.frequency_hz * i as f64 / sample_rate as f64).sin()
    }
}

/// Append-only buffer of samples, owned by a single encode call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleStream {
    samples: Vec<Sample>,
}

impl SampleStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty stream that can hold `capacity` samples without
    /// reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
        }
    }

    /// Render `tone` at `sample_rate` and append it.
    pub fn push_tone(&mut self, tone: &Tone, sample_rate: u32) -> Result<(), EncodeError> {
        let count = tone.sample_count(sample_rate)?;
        self.samples
            .extend((0..count).map(|i| tone.sample_at(i, sample_rate)));
        Ok(())
    }

    pub fn push_sample(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.samples.capacity()
    }

    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }

    pub fn into_inner(self) -> Vec<Sample> {
        self.samples
    }
}

/// Render one tone into a fresh stream.
///
/// # Errors
/// Returns `InvalidParameter` for a negative or non-finite frequency or
/// duration.
pub fn synthesize(
    frequency_hz: f64,
    duration_ms: f64,
    sample_rate: u32,
) -> Result<SampleStream, EncodeError> {
    let tone = Tone::new(frequency_hz, duration_ms);
    let mut stream = SampleStream::with_capacity(tone.sample_count(sample_rate)?);
    stream.push_tone(&tone, sample_rate)?;
    Ok(stream)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

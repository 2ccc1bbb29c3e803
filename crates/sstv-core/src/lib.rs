//! SSTV Core - image to slow-scan television audio
//!
//! This crate encodes an RGBA image buffer as SSTV audio: a VIS header
//! naming the mode, one sync pulse and a run of luminance-keyed tones per
//! scanline, serialized as a mono 16-bit PCM WAV file.
//!
//! Decoding images, playing audio and SSTV decoding are left to callers.

pub mod encode;
pub mod luminance;
pub mod mode;
pub mod tone;
pub mod types;
pub mod wav;

pub use encode::{encode, encode_with, estimate_duration_ms, EncodeOptions, DEFAULT_SAMPLE_RATE};
pub use mode::{ModeConfig, ScanlineConfig, VisCode, VisHeaderConfig};
pub use tone::{synthesize, Sample, SampleStream, Tone};
pub use types::{EncodeError, ImageBuffer};
pub use wav::{serialize, WavFormat, WavHeader, MIME_TYPE};

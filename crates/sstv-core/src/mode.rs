//! SSTV protocol constants.
//!
//! All frequencies, durations and the VIS mode code used by the encoder live
//! in a [`ModeConfig`]. Supporting another mode means building a different
//! config; the encoding logic never embeds protocol numbers.
//!
//! The defaults are the Robot36 VIS framing with a luminance-only scanline
//! body. Real Robot36 interleaves Y with alternating R-Y/B-Y chroma on each
//! line; this encoder sends luminance only, so a Robot36 decoder renders the
//! result in grayscale.

use serde::{Deserialize, Serialize};

use crate::tone::Tone;
use crate::types::EncodeError;

/// Robot36 VIS mode code.
pub const ROBOT36_VIS_CODE: u8 = 0x08;

/// A 7-bit VIS mode code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisCode(pub u8);

impl VisCode {
    /// The 8 transmitted bits: the 7-bit code least-significant bit first,
    /// followed by an even-parity bit.
    pub fn bits(self) -> [bool; 8] {
        let code = self.0 & 0x7F;
        let mut bits = [false; 8];
        for (i, bit) in bits.iter_mut().take(7).enumerate() {
            *bit = (code >> i) & 1 == 1;
        }
        bits[7] = code.count_ones() % 2 == 1;
        bits
    }
}

/// FSK tones and framing of the VIS header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisHeaderConfig {
    /// Calibration tone sent before and after the break.
    pub leader: Tone,
    /// Short tone separating the two leaders.
    pub break_tone: Tone,
    /// FSK start bit preceding the data bits.
    pub start_bit: Tone,
    /// Frequency keyed for a 1 bit.
    pub one_hz: f64,
    /// Frequency keyed for a 0 bit.
    pub zero_hz: f64,
    /// Duration of each data bit.
    pub bit_ms: f64,
    /// Tone marking the end of the header.
    pub stop_bit: Tone,
    /// Mode identifier.
    pub code: VisCode,
}

impl Default for VisHeaderConfig {
    fn default() -> Self {
        Self {
            leader: Tone::new(1900.0, 300.0),
            break_tone: Tone::new(1200.0, 10.0),
            start_bit: Tone::new(1200.0, 30.0),
            one_hz: 1100.0,
            zero_hz: 1300.0,
            bit_ms: 30.0,
            stop_bit: Tone::new(1200.0, 30.0),
            code: VisCode(ROBOT36_VIS_CODE),
        }
    }
}

impl VisHeaderConfig {
    /// Tone for one data bit.
    pub fn bit_tone(&self, bit: bool) -> Tone {
        let frequency = if bit { self.one_hz } else { self.zero_hz };
        Tone::new(frequency, self.bit_ms)
    }

    /// Every header tone in transmission order.
    pub fn tones(&self) -> Vec<Tone> {
        let mut tones = vec![self.leader, self.break_tone, self.leader, self.start_bit];
        tones.extend(self.code.bits().iter().map(|&bit| self.bit_tone(bit)));
        tones.push(self.stop_bit);
        tones
    }
}

/// Per-line timing and the luminance-to-frequency mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanlineConfig {
    /// Horizontal sync pulse.
    pub sync: Tone,
    /// Porch tone following the sync pulse.
    pub porch: Tone,
    /// Frequency for luminance 0 (black).
    pub black_hz: f64,
    /// Frequency for luminance 255 (white).
    pub white_hz: f64,
    /// Time each pixel is held.
    pub pixel_ms: f64,
}

impl Default for ScanlineConfig {
    fn default() -> Self {
        Self {
            sync: Tone::new(1200.0, 9.0),
            porch: Tone::new(1500.0, 3.0),
            black_hz: 1500.0,
            white_hz: 2300.0,
            pixel_ms: 0.46,
        }
    }
}

/// Complete description of one SSTV transmission mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeConfig {
    /// Human-readable mode name.
    pub name: String,
    pub header: VisHeaderConfig,
    pub scanline: ScanlineConfig,
}

impl Default for ModeConfig {
    fn default() -> Self {
        Self::robot36()
    }
}

impl ModeConfig {
    /// Robot36 VIS header with a luminance-only scanline body.
    pub fn robot36() -> Self {
        Self {
            name: "Robot36".to_string(),
            header: VisHeaderConfig::default(),
            scanline: ScanlineConfig::default(),
        }
    }

    /// Reject negative or non-finite constants before any tone is rendered.
    pub fn validate(&self) -> Result<(), EncodeError> {
        for tone in self.header.tones() {
            tone.validate()?;
        }
        self.scanline.sync.validate()?;
        self.scanline.porch.validate()?;
        Tone::new(self.scanline.black_hz, self.scanline.pixel_ms).validate()?;
        Tone::new(self.scanline.white_hz, self.scanline.pixel_ms).validate()?;
        Ok(())
    }
}

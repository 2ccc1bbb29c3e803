//! Luminance calculation using ITU-R BT.601 coefficients.
//!
//! SSTV luminance channels are defined on BT.601 weights, so these differ
//! from the BT.709 weights typically used for display histograms.

/// ITU-R BT.601 coefficient for red channel in luminance calculation.
pub const LUMINANCE_R: f64 = 0.299;

/// ITU-R BT.601 coefficient for green channel in luminance calculation.
pub const LUMINANCE_G: f64 = 0.587;

/// ITU-R BT.601 coefficient for blue channel in luminance calculation.
pub const LUMINANCE_B: f64 = 0.114;

/// Calculate luminance from u8 RGB values.
///
/// The result is unrounded, in the range 0.0 to 255.0.
#[inline]
pub fn calculate_luminance(r: u8, g: u8, b: u8) -> f64 {
    LUMINANCE_R * r as f64 + LUMINANCE_G * g as f64 + LUMINANCE_B * b as f64
}

/// Calculate luminance of an RGBA pixel, ignoring alpha.
#[inline]
pub fn rgba_luminance(pixel: &[u8]) -> f64 {
    calculate_luminance(pixel[0], pixel[1], pixel[2])
}

//! # Color Arithmetic Module
//!
//! Clamped linear color arithmetic shared by both calibration stages.
//! A white balance correction pushes red up and blue down by the same amount,
//! a tint correction moves the green channel. Every channel is rounded and
//! clamped to the 8-bit range, so any correction (in range or not) produces a
//! valid color.

use std::fmt;
use std::ops::Add;

/// Lower bound of a slider correction.
pub const CORRECTION_MIN: f32 = -50.0;
/// Upper bound of a slider correction.
pub const CORRECTION_MAX: f32 = 50.0;
/// Slider resolution, also the precision used when corrections are saved.
pub const CORRECTION_STEP: f32 = 0.1;

/// Color temperature treated as neutral by the temperature correction.
pub const NEUTRAL_KELVIN: f32 = 6500.0;
/// Kelvin per unit of white balance correction.
const KELVIN_PER_UNIT: f32 = 100.0;

/// A pair of signed corrections applied on top of a base luminance.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Correction {
    /// Red-up / blue-down offset.
    pub white_balance: f32,
    /// Green offset.
    pub tint: f32,
}

impl Correction {
    pub const ZERO: Correction = Correction { white_balance: 0.0, tint: 0.0 };

    pub fn new(white_balance: f32, tint: f32) -> Self {
        Self { white_balance, tint }
    }

    /// Returns the correction with both components limited to the slider range.
    pub fn clamped(self) -> Self {
        Self {
            white_balance: clamp_correction(self.white_balance),
            tint: clamp_correction(self.tint),
        }
    }

    /// Rounds both components to the stored precision (one decimal place).
    pub fn rounded(self) -> Self {
        Self {
            white_balance: round_to_step(self.white_balance),
            tint: round_to_step(self.tint),
        }
    }
}

impl Add for Correction {
    type Output = Correction;

    fn add(self, rhs: Correction) -> Correction {
        Correction {
            white_balance: self.white_balance + rhs.white_balance,
            tint: self.tint + rhs.tint,
        }
    }
}

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Formats the color as a lowercase `#rrggbb` string.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Rounds a channel value to the nearest integer and clamps it into `0..=255`.
///
/// Ties round to even (128.5 -> 128). NaN maps to 0.
pub fn clamp_channel(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round_ties_even().clamp(0.0, 255.0) as u8
}

/// Computes the displayed color for a base luminance and a combined correction.
///
/// # Arguments
/// * `base` - Base gray level (0-255)
/// * `white_balance` - Added to red, subtracted from blue
/// * `tint` - Added to green
pub fn compute_color(base: u8, white_balance: f32, tint: f32) -> Rgb8 {
    let base = base as f32;
    Rgb8 {
        r: clamp_channel(base + white_balance),
        g: clamp_channel(base + tint),
        b: clamp_channel(base - white_balance),
    }
}

/// Converts a temperature label into a white balance offset.
///
/// `NA`, an empty string or anything non-numeric yields no correction.
/// A numeric Kelvin value maps linearly around 6500K, one unit per 100K.
/// Values beyond the `f32` range saturate instead of overflowing.
pub fn temperature_correction(label: &str) -> f32 {
    let label = label.trim();
    if label.is_empty() || label.eq_ignore_ascii_case("NA") {
        return 0.0;
    }
    match label.parse::<f64>() {
        Ok(kelvin) if kelvin.is_finite() => {
            let offset = (kelvin - NEUTRAL_KELVIN as f64) / KELVIN_PER_UNIT as f64;
            offset.clamp(f32::MIN as f64, f32::MAX as f64) as f32
        }
        _ => 0.0,
    }
}

/// Limits a correction into the slider range.
pub fn clamp_correction(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(CORRECTION_MIN, CORRECTION_MAX)
}

/// Rounds a correction to one decimal place.
pub fn round_to_step(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_color_neutral() {
        assert_eq!(compute_color(128, 0.0, 0.0), Rgb8::new(128, 128, 128));
        assert_eq!(compute_color(128, 0.0, 0.0).to_hex(), "#808080");
    }

    #[test]
    fn test_white_balance_moves_red_and_blue() {
        let color = compute_color(128, 10.0, 0.0);
        assert_eq!(color, Rgb8::new(138, 128, 118));
    }

    #[test]
    fn test_tint_moves_green_only() {
        let color = compute_color(64, 0.0, -4.4);
        assert_eq!(color, Rgb8::new(64, 60, 64));
    }

    #[test]
    fn test_channels_saturate_for_extreme_corrections() {
        // Corrections far outside the slider range pin each channel to 0 or 255.
        for base in [0u8, 64, 128, 192, 255] {
            for wb in [-1.0e9, -500.0, 500.0, 1.0e9] {
                for tint in [-1.0e9, -500.0, 500.0, 1.0e9] {
                    let color = compute_color(base, wb, tint);
                    let (warm, cool) = if wb > 0.0 { (255, 0) } else { (0, 255) };
                    let green = if tint > 0.0 { 255 } else { 0 };
                    assert_eq!(color, Rgb8::new(warm, green, cool), "base {base} wb {wb} tint {tint}");
                }
            }
        }
        assert_eq!(compute_color(255, 50.0, 50.0), Rgb8::new(255, 255, 205));
        assert_eq!(compute_color(0, -50.0, -50.0), Rgb8::new(0, 0, 50));
        assert_eq!(compute_color(128, f32::MAX, f32::MIN), Rgb8::new(255, 0, 0));
    }

    #[test]
    fn test_half_steps_round_to_even() {
        assert_eq!(compute_color(128, 0.5, 0.0), Rgb8::new(128, 128, 128));
        assert_eq!(compute_color(64, 2.5, 0.0).r, 66);
        assert_eq!(compute_color(64, 2.5, 0.0).b, 62);
        assert_eq!(compute_color(64, 0.0, 1.5).g, 66);
    }

    #[test]
    fn test_clamp_channel_edges() {
        assert_eq!(clamp_channel(-0.4), 0);
        assert_eq!(clamp_channel(254.6), 255);
        assert_eq!(clamp_channel(300.0), 255);
        assert_eq!(clamp_channel(f32::NAN), 0);
        assert_eq!(clamp_channel(f32::INFINITY), 255);
        assert_eq!(clamp_channel(f32::NEG_INFINITY), 0);
    }

    #[test]
    fn test_temperature_correction() {
        assert_eq!(temperature_correction("6500"), 0.0);
        assert_eq!(temperature_correction("7000"), 5.0);
        assert_eq!(temperature_correction(" 5500 "), -10.0);
        assert_eq!(temperature_correction("NA"), 0.0);
        assert_eq!(temperature_correction("na"), 0.0);
        assert_eq!(temperature_correction(""), 0.0);
        assert_eq!(temperature_correction("warm"), 0.0);
        assert_eq!(temperature_correction("inf"), 0.0);
        assert_eq!(temperature_correction("NaN"), 0.0);
    }

    #[test]
    fn test_huge_temperature_saturates() {
        let offset = temperature_correction("1e39");
        assert!(offset.is_finite());
        assert!(offset > 50.0, "got {offset}");
        assert_eq!(temperature_correction("-1e45"), f32::MIN);
        assert_eq!(temperature_correction("1e45"), f32::MAX);
        assert_eq!(compute_color(128, offset, 0.0), Rgb8::new(255, 128, 0));
    }

    #[test]
    fn test_correction_clamped_and_rounded() {
        let c = Correction::new(75.0, -51.0).clamped();
        assert_eq!(c, Correction::new(50.0, -50.0));

        let r = Correction::new(1.26, -3.04).rounded();
        assert!((r.white_balance - 1.3).abs() < 1e-6);
        assert!((r.tint + 3.0).abs() < 1e-6);
    }
}

//! Gain staging and sample-level helpers.
//!
//! All functions are allocation-free and suitable for `no_std`.
//!
//! - [`db_to_linear`] / [`linear_to_db`] - Convert between dB and linear gain
//! - [`crossfade`] - Dry/wet blend with exact endpoints
//! - [`finite_or_silence`] - Last-resort guard before a sample is written out

use libm::{expf, logf};

/// Convert decibels to linear gain: `10^(db/20)`.
///
/// The same conversion is used for the input and output stages.
///
/// # Example
/// ```rust
/// use softclip_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 1e-6);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// assert!((db_to_linear(20.0) - 10.0).abs() < 1e-4);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels.
///
/// Inputs at or below `1e-10` are floored so the result stays finite.
///
/// # Example
/// ```rust
/// use softclip_core::linear_to_db;
///
/// assert!(linear_to_db(1.0).abs() < 1e-4);
/// assert!((linear_to_db(0.5) - (-6.02)).abs() < 0.01);
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

/// Blend dry and wet signals: `dry * (1 - mix) + wet * mix`.
///
/// Both endpoints are exact: `mix == 0.0` yields `dry` and `mix == 1.0`
/// yields `wet` bit-for-bit (for finite inputs).
///
/// # Example
/// ```rust
/// use softclip_core::crossfade;
///
/// assert_eq!(crossfade(0.3, -0.7, 0.0), 0.3);
/// assert_eq!(crossfade(0.3, -0.7, 1.0), -0.7);
/// assert!((crossfade(0.0, 1.0, 0.25) - 0.25).abs() < 1e-7);
/// ```
#[inline]
pub fn crossfade(dry: f32, wet: f32, mix: f32) -> f32 {
    dry * (1.0 - mix) + wet * mix
}

/// Replace NaN and infinities with silence.
#[allow(clippy::inline_always)]
#[inline(always)]
pub fn finite_or_silence(x: f32) -> f32 {
    if x.is_finite() { x } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_round_trip_within_tolerance() {
        for db in [-48.0, -24.0, -6.0, 0.0, 6.0, 24.0] {
            let back = linear_to_db(db_to_linear(db));
            assert!((back - db).abs() < 1e-3, "{db} dB came back as {back}");
        }
    }

    #[test]
    fn db_to_linear_matches_power_of_ten() {
        for db in [-48.0f32, -12.5, 0.0, 3.0, 6.0, 24.0] {
            let expected = libm::powf(10.0, db / 20.0);
            let got = db_to_linear(db);
            assert!(
                (got - expected).abs() <= expected * 1e-5,
                "db_to_linear({db}) = {got}, expected {expected}"
            );
        }
    }

    #[test]
    fn linear_to_db_floors_zero() {
        assert!(linear_to_db(0.0).is_finite());
        assert!(linear_to_db(0.0) < -190.0);
    }

    #[test]
    fn crossfade_endpoints_are_exact() {
        let dry = 0.123_456_7;
        let wet = -0.987_654_3;
        assert_eq!(crossfade(dry, wet, 0.0), dry);
        assert_eq!(crossfade(dry, wet, 1.0), wet);
    }

    #[test]
    fn crossfade_midpoint() {
        assert!((crossfade(1.0, -1.0, 0.5)).abs() < 1e-7);
    }

    #[test]
    fn finite_guard() {
        assert_eq!(finite_or_silence(f32::NAN), 0.0);
        assert_eq!(finite_or_silence(f32::INFINITY), 0.0);
        assert_eq!(finite_or_silence(f32::NEG_INFINITY), 0.0);
        assert_eq!(finite_or_silence(-0.25), -0.25);
    }
}

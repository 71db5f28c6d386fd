//! The static soft-clip transfer function.
//!
//! For a raw sample `r`, its trimmed value `x = r * g_in` and a tone `t`:
//!
//! ```text
//! clipped = (x - 1/3) * t^r
//! ```
//!
//! The power term is an asymmetric, level-dependent gain: with `t < 1`,
//! positive half-waves are attenuated (`t^r < 1`) and negative half-waves
//! boosted (`t^r > 1`), and the knee moves with `t`. The exponent is the
//! *pre-gain* sample, so input trim drives the linear part while the
//! asymmetry tracks the source level.
//!
//! # Numeric policy
//!
//! - `t` is floored at [`TONE_FLOOR`], so the base is strictly positive and
//!   `t^r` is continuous for negative `r`. No sign extension is needed.
//! - `r` is limited to \[-1, 1\] in the exponent, bounding `t^r` by
//!   `1 / TONE_FLOOR`.
//!
//! Under these two rules every finite input yields a finite output.

use libm::powf;

/// DC offset subtracted before the power term.
pub const CLIP_OFFSET: f32 = 1.0 / 3.0;

/// Smallest tone accepted by the power term.
pub const TONE_FLOOR: f32 = crate::params::TONE_MIN as f32;

/// Largest magnitude of the exponent (full scale).
pub const EXPONENT_LIMIT: f32 = 1.0;

/// Asymmetric power-based soft clip of one sample.
///
/// `raw` is the sample before input gain, `driven` the sample after it.
///
/// ```rust
/// use softclip_core::soft_clip;
///
/// let y = soft_clip(0.5, 0.5, 0.5);
/// let expected = (0.5 - 1.0 / 3.0) * 0.5f32.powf(0.5);
/// assert!((y - expected).abs() < 1e-6);
/// ```
#[inline]
pub fn soft_clip(raw: f32, driven: f32, tone: f32) -> f32 {
    let a = driven - CLIP_OFFSET;
    let b = powf(tone.max(TONE_FLOOR), raw.clamp(-EXPONENT_LIMIT, EXPONENT_LIMIT));
    a * b
}

/// Upper bound of `|output|` for samples in \[-1, 1\] at the given stage gains.
///
/// Reached at `raw = -1` with the tone at its floor.
pub fn output_bound(input_gain: f32, output_gain: f32) -> f32 {
    (input_gain + CLIP_OFFSET) / TONE_FLOOR * output_gain
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_input_gives_offset() {
        // t^0 == 1, so a zero sample lands on the DC offset. The processor
        // writes exact zeros through before reaching this function.
        for tone in [0.01, 0.1, 0.5, 0.9] {
            assert_eq!(soft_clip(0.0, 0.0, tone), -CLIP_OFFSET);
        }
    }

    #[test]
    fn matches_formula() {
        for &(raw, gain, tone) in &[(0.5f32, 1.0f32, 0.5f32), (-0.8, 2.0, 0.1), (1.0, 0.5, 0.9)] {
            let driven = raw * gain;
            let expected = (driven - 1.0 / 3.0) * tone.powf(raw);
            let got = soft_clip(raw, driven, tone);
            assert!(
                (got - expected).abs() <= expected.abs() * 1e-5 + 1e-7,
                "raw={raw} gain={gain} tone={tone}: {got} vs {expected}"
            );
        }
    }

    #[test]
    fn tone_floor_prevents_nan() {
        for tone in [0.0f32, -0.5, f32::MIN_POSITIVE] {
            for raw in [-1.0f32, -0.3, 0.0, 0.3, 1.0] {
                let y = soft_clip(raw, raw, tone);
                assert!(y.is_finite(), "tone={tone} raw={raw} gave {y}");
            }
        }
    }

    #[test]
    fn continuous_across_zero() {
        let tone = 0.2;
        let below = soft_clip(-1e-4, -1e-4, tone);
        let above = soft_clip(1e-4, 1e-4, tone);
        assert!((below - above).abs() < 1e-3);
    }

    #[test]
    fn exponent_is_limited_for_hot_input() {
        let tone = TONE_FLOOR;
        let hot = soft_clip(-10.0, -10.0, tone);
        assert!(hot.is_finite());
        assert!((hot - (-10.0 - CLIP_OFFSET) / TONE_FLOOR).abs() < 0.05);
    }

    #[test]
    fn bound_covers_worst_case() {
        let g = crate::math::db_to_linear(24.0);
        let worst = soft_clip(-1.0, -g, TONE_FLOOR).abs();
        assert!(worst <= output_bound(g, 1.0) * (1.0 + 1e-6));
    }
}

//! Parameter metadata for host automation and UI binding.
//!
//! Every parameter of the signal path is described by a [`ParamDescriptor`]
//! carrying its display name, unit, range, default and the normalization
//! curve a host or UI uses to map a knob position onto the plain value.
//! Values are always *stored* in plain (linear) units; the curve only
//! affects the normalized \[0.0, 1.0\] view.
//!
//! # no_std Support
//!
//! This module is fully `no_std` compatible with no heap allocations required.

use crate::params::ParamId;

/// Scaling curve for parameter normalization.
///
/// # Normalization Formulas
///
/// - **Linear**: `normalized = (value - min) / (max - min)`
/// - **Logarithmic**: `normalized = ln(value/min) / ln(max/min)`
/// - **Power(exp)**: `normalized = ((value - min) / (max - min)).powf(1.0 / exp)`
///
/// A JUCE-style skew factor `k` corresponds to `Power(1.0 / k)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ParamScale {
    /// Linear mapping (default). Equal resolution across the range.
    #[default]
    Linear,
    /// Logarithmic mapping. More resolution at low values.
    /// Requires `min > 0.0`.
    Logarithmic,
    /// Power curve mapping with configurable exponent.
    /// exponent > 1.0 → more resolution at the low end.
    Power(f64),
}

/// Parameter capability flags for host communication.
///
/// # Example
///
/// ```rust
/// use softclip_core::ParamFlags;
///
/// let flags = ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED);
/// assert!(flags.contains(ParamFlags::AUTOMATABLE));
/// assert!(flags.contains(ParamFlags::STEPPED));
/// assert!(!flags.contains(ParamFlags::HIDDEN));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Host can automate this parameter.
    pub const AUTOMATABLE: Self = Self(1 << 0);
    /// Parameter has discrete steps (boolean or enum-like).
    pub const STEPPED: Self = Self(1 << 1);
    /// Parameter should be hidden from generic host UI.
    pub const HIDDEN: Self = Self(1 << 2);
    /// Parameter is the host-facing bypass switch.
    pub const BYPASS: Self = Self(1 << 3);

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two flag sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::AUTOMATABLE
    }
}

/// Unit type for parameter display and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Decibels (dB) - input and output trim.
    Decibels,
    /// Hertz (Hz) - frequency parameters.
    Hertz,
    /// Boolean switch, displayed as On/Off.
    Toggle,
    /// No unit - for dimensionless parameters like tone and mix.
    None,
}

impl ParamUnit {
    /// Returns the unit suffix string for display.
    ///
    /// ```rust
    /// use softclip_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Decibels.suffix(), " dB");
    /// assert_eq!(ParamUnit::Hertz.suffix(), " Hz");
    /// assert_eq!(ParamUnit::None.suffix(), "");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Decibels => " dB",
            ParamUnit::Hertz => " Hz",
            ParamUnit::Toggle | ParamUnit::None => "",
        }
    }
}

/// Describes a single parameter's metadata for display and validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Stable identifier. Its discriminant is the host-facing parameter index.
    pub id: ParamId,

    /// Display name (e.g., "Input", "Mix").
    pub name: &'static str,

    /// Lowercase stable key used in presets and state blobs (e.g., `"input_db"`).
    pub string_id: &'static str,

    /// Unit type for formatting the parameter value.
    pub unit: ParamUnit,

    /// Minimum allowed value.
    pub min: f64,

    /// Maximum allowed value.
    pub max: f64,

    /// Value at construction and after a reset.
    pub default: f64,

    /// Recommended step increment for encoder-based control.
    pub step: f64,

    /// Normalization curve for mapping between plain and normalized values.
    pub scale: ParamScale,

    /// Capability flags for host communication.
    pub flags: ParamFlags,
}

impl ParamDescriptor {
    /// Clamps a value to this parameter's valid range.
    ///
    /// NaN maps to the default so a clamped value is always in range.
    ///
    /// ```rust
    /// use softclip_core::{ParamId, descriptor};
    ///
    /// let input = descriptor(ParamId::Input);
    /// assert_eq!(input.clamp(0.0), 0.0);
    /// assert_eq!(input.clamp(-100.0), -24.0);
    /// assert_eq!(input.clamp(100.0), 24.0);
    /// assert_eq!(input.clamp(f64::NAN), 0.0);
    /// ```
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            self.default
        } else if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Whether this parameter is a boolean switch.
    #[inline]
    pub fn is_toggle(&self) -> bool {
        matches!(self.unit, ParamUnit::Toggle)
    }

    /// Converts a plain value to normalized range (0.0 to 1.0).
    #[inline]
    pub fn normalize(&self, value: f64) -> f64 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        let value = self.clamp(value);
        match self.scale {
            ParamScale::Linear => (value - self.min) / range,
            ParamScale::Logarithmic => {
                if self.min <= 0.0 {
                    return 0.0;
                }
                libm::log(value / self.min) / libm::log(self.max / self.min)
            }
            ParamScale::Power(exp) => {
                let linear = (value - self.min) / range;
                libm::pow(linear, 1.0 / exp)
            }
        }
    }

    /// Converts a normalized value (0.0 to 1.0) to the plain parameter range.
    ///
    /// Inverse of [`normalize`](Self::normalize). Inputs outside \[0, 1\] are
    /// clamped first.
    #[inline]
    pub fn denormalize(&self, normalized: f64) -> f64 {
        let normalized = if normalized.is_nan() {
            0.0
        } else {
            normalized.clamp(0.0, 1.0)
        };
        let plain = match self.scale {
            ParamScale::Linear => self.min + normalized * (self.max - self.min),
            ParamScale::Logarithmic => {
                if self.min <= 0.0 {
                    return self.min;
                }
                self.min * libm::pow(self.max / self.min, normalized)
            }
            ParamScale::Power(exp) => {
                let curved = libm::pow(normalized, exp);
                self.min + curved * (self.max - self.min)
            }
        };
        self.clamp(plain)
    }
}

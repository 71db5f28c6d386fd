//! The fixed parameter table and the lock-free [`ParameterSet`].
//!
//! The signal path exposes exactly six parameters, known at compile time and
//! addressed through [`ParamId`]. Their metadata lives in the static
//! [`PARAMS`] table; their current values live in a [`ParameterSet`] that is
//! shared between a controller thread (host automation, UI, CLI) and the
//! audio thread.
//!
//! # Thread Safety
//!
//! Each parameter is one atomic word: an `f64` bit-cast into an `AtomicU64`,
//! or an `AtomicBool` for bypass. Writes use `Release` and reads `Acquire`,
//! so a reader can never observe a partially written value. There is no
//! transaction across parameters: a [`ParamSnapshot`] taken while the
//! controller is mid-way through several writes may mix old and new values,
//! and each field is still one committed value.
//!
//! ```rust
//! use softclip_core::{ParamId, ParameterSet};
//! use std::sync::Arc;
//!
//! let params = Arc::new(ParameterSet::new());
//! let controller = Arc::clone(&params);
//!
//! std::thread::spawn(move || controller.set(ParamId::Input, 100.0))
//!     .join()
//!     .unwrap();
//!
//! // Out-of-range writes are clamped, never rejected.
//! assert_eq!(params.get(ParamId::Input), 24.0);
//! ```

#[cfg(not(feature = "std"))]
use alloc::{collections::BTreeMap, string::String};
#[cfg(feature = "std")]
use std::collections::BTreeMap;

use core::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::param_info::{ParamDescriptor, ParamFlags, ParamScale, ParamUnit};

/// Stable parameter identifier.
///
/// The discriminant is the host-facing parameter index and must never change
/// for a given parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ParamId {
    /// Input trim in dB, applied before the waveshaper.
    Input = 0,
    /// Waveshaper tone; the base of the power term.
    Tone = 1,
    /// Reserved filter frequency. Stored and persisted, unused by the math.
    Freq = 2,
    /// Dry/wet blend.
    Mix = 3,
    /// Output trim in dB, applied after the blend.
    Output = 4,
    /// Bypass switch.
    Bypass = 5,
}

/// Number of parameters in the table.
pub const PARAM_COUNT: usize = 6;

/// Number of continuous (non-bypass) parameters.
const FLOAT_PARAM_COUNT: usize = 5;

impl ParamId {
    /// Every parameter in host index order.
    pub const ALL: [ParamId; PARAM_COUNT] = [
        ParamId::Input,
        ParamId::Tone,
        ParamId::Freq,
        ParamId::Mix,
        ParamId::Output,
        ParamId::Bypass,
    ];

    /// Host-facing index.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Look up a parameter by host index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Find a parameter by display name or string id (ASCII case-insensitive).
    ///
    /// ```rust
    /// use softclip_core::ParamId;
    ///
    /// assert_eq!(ParamId::from_name("Tone"), Some(ParamId::Tone));
    /// assert_eq!(ParamId::from_name("output_db"), Some(ParamId::Output));
    /// assert_eq!(ParamId::from_name("drive"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        PARAMS
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(name) || d.string_id.eq_ignore_ascii_case(name))
            .map(|d| d.id)
    }

    /// Static metadata for this parameter.
    #[inline]
    pub fn descriptor(self) -> &'static ParamDescriptor {
        &PARAMS[self.index()]
    }
}

/// Lowest tone value; keeps the waveshaper's power base strictly positive.
pub const TONE_MIN: f64 = 0.01;

/// Highest tone value.
pub const TONE_MAX: f64 = 0.9;

/// JUCE-style skew of the tone knob (UI mapping only).
const TONE_SKEW: f64 = 0.28;

/// Parameter declarations in host index order.
pub static PARAMS: [ParamDescriptor; PARAM_COUNT] = [
    ParamDescriptor {
        id: ParamId::Input,
        name: "Input",
        string_id: "input_db",
        unit: ParamUnit::Decibels,
        min: -24.0,
        max: 24.0,
        default: 0.0,
        step: 0.1,
        scale: ParamScale::Linear,
        flags: ParamFlags::AUTOMATABLE,
    },
    ParamDescriptor {
        id: ParamId::Tone,
        name: "Tone",
        string_id: "tone",
        unit: ParamUnit::None,
        min: TONE_MIN,
        max: TONE_MAX,
        default: 0.1,
        step: 0.01,
        scale: ParamScale::Power(1.0 / TONE_SKEW),
        flags: ParamFlags::AUTOMATABLE,
    },
    ParamDescriptor {
        id: ParamId::Freq,
        name: "Freq",
        string_id: "freq_hz",
        unit: ParamUnit::Hertz,
        min: 20.0,
        max: 18000.0,
        default: 60.0,
        step: 1.0,
        scale: ParamScale::Logarithmic,
        flags: ParamFlags::AUTOMATABLE,
    },
    ParamDescriptor {
        id: ParamId::Mix,
        name: "Mix",
        string_id: "mix",
        unit: ParamUnit::None,
        min: 0.0,
        max: 1.0,
        default: 1.0,
        step: 0.01,
        scale: ParamScale::Linear,
        flags: ParamFlags::AUTOMATABLE,
    },
    ParamDescriptor {
        id: ParamId::Output,
        name: "Output",
        string_id: "output_db",
        unit: ParamUnit::Decibels,
        min: -48.0,
        max: 6.0,
        default: 0.0,
        step: 0.1,
        scale: ParamScale::Linear,
        flags: ParamFlags::AUTOMATABLE,
    },
    ParamDescriptor {
        id: ParamId::Bypass,
        name: "Bypass",
        string_id: "bypass",
        unit: ParamUnit::Toggle,
        min: 0.0,
        max: 1.0,
        default: 0.0,
        step: 1.0,
        scale: ParamScale::Linear,
        flags: ParamFlags::AUTOMATABLE
            .union(ParamFlags::STEPPED)
            .union(ParamFlags::BYPASS),
    },
];

/// Metadata for a parameter.
#[inline]
pub fn descriptor(id: ParamId) -> &'static ParamDescriptor {
    id.descriptor()
}

/// Values of every parameter, read once per block by the audio thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSnapshot {
    /// Input trim in dB.
    pub input_db: f64,
    /// Tone (power base).
    pub tone: f64,
    /// Reserved filter frequency in Hz.
    pub freq_hz: f64,
    /// Dry/wet blend in \[0, 1\].
    pub mix: f64,
    /// Output trim in dB.
    pub output_db: f64,
    /// Bypass switch.
    pub bypass: bool,
}

impl ParamSnapshot {
    /// Clamp every field into its declared range. NaN fields take the default.
    pub fn sanitized(&self) -> Self {
        Self {
            input_db: PARAMS[0].clamp(self.input_db),
            tone: PARAMS[1].clamp(self.tone),
            freq_hz: PARAMS[2].clamp(self.freq_hz),
            mix: PARAMS[3].clamp(self.mix),
            output_db: PARAMS[4].clamp(self.output_db),
            bypass: self.bypass,
        }
    }

    /// Read one field as a plain value (bypass as 0.0 / 1.0).
    pub fn value(&self, id: ParamId) -> f64 {
        match id {
            ParamId::Input => self.input_db,
            ParamId::Tone => self.tone,
            ParamId::Freq => self.freq_hz,
            ParamId::Mix => self.mix,
            ParamId::Output => self.output_db,
            ParamId::Bypass => bool_to_value(self.bypass),
        }
    }
}

impl Default for ParamSnapshot {
    fn default() -> Self {
        Self {
            input_db: PARAMS[0].default,
            tone: PARAMS[1].default,
            freq_hz: PARAMS[2].default,
            mix: PARAMS[3].default,
            output_db: PARAMS[4].default,
            bypass: false,
        }
    }
}

/// Current values of all parameters, safe to share across threads.
///
/// Written by the controller, read by the audio thread. Reads and writes are
/// wait-free single atomic operations.
#[derive(Debug)]
pub struct ParameterSet {
    /// Continuous values as `f64` bit-cast to `u64`, indexed by [`ParamId`].
    values: [AtomicU64; FLOAT_PARAM_COUNT],
    bypassed: AtomicBool,
}

impl ParameterSet {
    /// Create a set with every parameter at its default.
    pub fn new() -> Self {
        Self {
            values: core::array::from_fn(|i| AtomicU64::new(PARAMS[i].default.to_bits())),
            bypassed: AtomicBool::new(false),
        }
    }

    /// Latest committed value of a parameter. Bypass reads as 0.0 or 1.0.
    #[inline]
    pub fn get(&self, id: ParamId) -> f64 {
        match id {
            ParamId::Bypass => bool_to_value(self.is_bypassed()),
            _ => f64::from_bits(self.values[id.index()].load(Ordering::Acquire)),
        }
    }

    /// Store a parameter, clamped to its declared range.
    ///
    /// NaN is ignored and the previous value kept. For bypass, values
    /// at or above 0.5 switch it on.
    #[inline]
    pub fn set(&self, id: ParamId, value: f64) {
        if value.is_nan() {
            return;
        }
        match id {
            ParamId::Bypass => self.set_bypass(value >= 0.5),
            _ => {
                let clamped = id.descriptor().clamp(value);
                self.values[id.index()].store(clamped.to_bits(), Ordering::Release);
            }
        }
    }

    /// Whether the signal path is bypassed.
    #[inline]
    pub fn is_bypassed(&self) -> bool {
        self.bypassed.load(Ordering::Acquire)
    }

    /// Switch bypass on or off.
    #[inline]
    pub fn set_bypass(&self, bypassed: bool) {
        self.bypassed.store(bypassed, Ordering::Release);
    }

    /// Look up a value by display name or string id.
    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        ParamId::from_name(name).map(|id| self.get(id))
    }

    /// Set a value by display name or string id.
    ///
    /// Returns `false` (and changes nothing) for an unknown name.
    pub fn set_by_name(&self, name: &str, value: f64) -> bool {
        match ParamId::from_name(name) {
            Some(id) => {
                self.set(id, value);
                true
            }
            None => false,
        }
    }

    /// Current value mapped through the parameter's UI curve into \[0, 1\].
    pub fn get_normalized(&self, id: ParamId) -> f64 {
        id.descriptor().normalize(self.get(id))
    }

    /// Set from a normalized \[0, 1\] knob position.
    pub fn set_normalized(&self, id: ParamId, normalized: f64) {
        self.set(id, id.descriptor().denormalize(normalized));
    }

    /// Read every parameter once.
    #[inline]
    pub fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            input_db: self.get(ParamId::Input),
            tone: self.get(ParamId::Tone),
            freq_hz: self.get(ParamId::Freq),
            mix: self.get(ParamId::Mix),
            output_db: self.get(ParamId::Output),
            bypass: self.is_bypassed(),
        }
    }

    /// Store every field of a snapshot (clamped).
    pub fn apply_snapshot(&self, snapshot: &ParamSnapshot) {
        for id in ParamId::ALL {
            self.set(id, snapshot.value(id));
        }
    }

    /// Return every parameter to its default.
    pub fn reset_to_defaults(&self) {
        for desc in &PARAMS {
            self.set(desc.id, desc.default);
        }
    }

    /// All values keyed by display name (`"Input"`, `"Tone"`, ...).
    ///
    /// Bypass is exported as 0.0 or 1.0.
    pub fn export_values(&self) -> BTreeMap<String, f64> {
        PARAMS
            .iter()
            .map(|d| (String::from(d.name), self.get(d.id)))
            .collect()
    }

    /// Restore values exported by [`export_values`](Self::export_values).
    ///
    /// Keys match display names or string ids. Each value is clamped;
    /// unknown keys are skipped and missing keys keep their current value.
    /// Returns the number of parameters that were applied.
    pub fn import_values(&self, values: &BTreeMap<String, f64>) -> usize {
        let mut applied = 0;
        for (key, &value) in values {
            if self.set_by_name(key, value) {
                applied += 1;
            } else {
                #[cfg(feature = "tracing")]
                tracing::debug!("import_values: skipping unknown parameter '{key}'");
            }
        }
        applied
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn bool_to_value(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_ids() {
        for (i, desc) in PARAMS.iter().enumerate() {
            assert_eq!(desc.id.index(), i, "{} out of order", desc.name);
            assert_eq!(ParamId::from_index(i), Some(desc.id));
            assert!(desc.min <= desc.default && desc.default <= desc.max);
        }
        assert_eq!(ParamId::from_index(PARAM_COUNT), None);
    }

    #[test]
    fn declared_ranges() {
        let expect = [
            (ParamId::Input, -24.0, 24.0, 0.0),
            (ParamId::Tone, 0.01, 0.9, 0.1),
            (ParamId::Freq, 20.0, 18000.0, 60.0),
            (ParamId::Mix, 0.0, 1.0, 1.0),
            (ParamId::Output, -48.0, 6.0, 0.0),
            (ParamId::Bypass, 0.0, 1.0, 0.0),
        ];
        for (id, min, max, default) in expect {
            let d = descriptor(id);
            assert_eq!((d.min, d.max, d.default), (min, max, default), "{}", d.name);
        }
    }

    #[test]
    fn defaults_on_construction() {
        let params = ParameterSet::new();
        for desc in &PARAMS {
            assert_eq!(params.get(desc.id), desc.default, "{}", desc.name);
        }
        assert!(!params.is_bypassed());
        assert_eq!(params.snapshot(), ParamSnapshot::default());
    }

    #[test]
    fn set_clamps_to_range() {
        let params = ParameterSet::new();
        params.set(ParamId::Input, 100.0);
        assert_eq!(params.get(ParamId::Input), 24.0);
        params.set(ParamId::Output, -1000.0);
        assert_eq!(params.get(ParamId::Output), -48.0);
        params.set(ParamId::Tone, 0.0);
        assert_eq!(params.get(ParamId::Tone), TONE_MIN);
        params.set(ParamId::Mix, 1.5);
        assert_eq!(params.get(ParamId::Mix), 1.0);
    }

    #[test]
    fn set_is_idempotent() {
        let params = ParameterSet::new();
        params.set(ParamId::Tone, 0.42);
        let first = params.snapshot();
        params.set(ParamId::Tone, 0.42);
        assert_eq!(params.snapshot(), first);
    }

    #[test]
    fn nan_write_is_ignored() {
        let params = ParameterSet::new();
        params.set(ParamId::Mix, 0.3);
        params.set(ParamId::Mix, f64::NAN);
        assert_eq!(params.get(ParamId::Mix), 0.3);
    }

    #[test]
    fn bypass_through_generic_set() {
        let params = ParameterSet::new();
        params.set(ParamId::Bypass, 1.0);
        assert!(params.is_bypassed());
        assert_eq!(params.get(ParamId::Bypass), 1.0);
        params.set(ParamId::Bypass, 0.2);
        assert!(!params.is_bypassed());
    }

    #[test]
    fn by_name_lookup() {
        let params = ParameterSet::new();
        assert!(params.set_by_name("MIX", 0.25));
        assert_eq!(params.get_by_name("mix"), Some(0.25));
        assert!(params.set_by_name("input_db", -6.0));
        assert_eq!(params.get(ParamId::Input), -6.0);
        assert!(!params.set_by_name("drive", 1.0));
        assert_eq!(params.get_by_name("drive"), None);
    }

    #[test]
    fn normalized_access() {
        let params = ParameterSet::new();
        params.set_normalized(ParamId::Mix, 0.5);
        assert_eq!(params.get(ParamId::Mix), 0.5);
        params.set_normalized(ParamId::Input, 1.0);
        assert_eq!(params.get(ParamId::Input), 24.0);
        assert_eq!(params.get_normalized(ParamId::Input), 1.0);
    }

    #[test]
    fn export_import_round_trip() {
        let a = ParameterSet::new();
        a.set(ParamId::Input, 6.0);
        a.set(ParamId::Tone, 0.5);
        a.set(ParamId::Freq, 1000.0);
        a.set(ParamId::Mix, 0.25);
        a.set(ParamId::Output, -3.0);
        a.set_bypass(true);

        let exported = a.export_values();
        assert_eq!(exported.len(), PARAM_COUNT);
        assert_eq!(exported["Input"], 6.0);
        assert_eq!(exported["Bypass"], 1.0);

        let b = ParameterSet::new();
        assert_eq!(b.import_values(&exported), PARAM_COUNT);
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn import_clamps_and_keeps_missing() {
        let params = ParameterSet::new();
        let mut values = BTreeMap::new();
        values.insert(String::from("Output"), 40.0);
        values.insert(String::from("unknown"), 3.0);

        assert_eq!(params.import_values(&values), 1);
        assert_eq!(params.get(ParamId::Output), 6.0);
        assert_eq!(params.get(ParamId::Tone), 0.1);
        assert_eq!(params.get(ParamId::Mix), 1.0);
    }

    #[test]
    fn reset_restores_defaults() {
        let params = ParameterSet::new();
        params.set(ParamId::Input, 12.0);
        params.set_bypass(true);
        params.reset_to_defaults();
        assert_eq!(params.snapshot(), ParamSnapshot::default());
    }

    #[test]
    fn sanitized_snapshot() {
        let raw = ParamSnapshot {
            input_db: 99.0,
            tone: -1.0,
            freq_hz: f64::NAN,
            mix: 2.0,
            output_db: -99.0,
            bypass: false,
        };
        let s = raw.sanitized();
        assert_eq!(s.input_db, 24.0);
        assert_eq!(s.tone, TONE_MIN);
        assert_eq!(s.freq_hz, 60.0);
        assert_eq!(s.mix, 1.0);
        assert_eq!(s.output_db, -48.0);
    }
}

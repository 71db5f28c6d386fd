//! The block-based signal processor.
//!
//! [`SignalProcessor`] owns the shared [`ParameterSet`] and applies, for every
//! sample of every input channel:
//!
//! 1. input trim: `x = raw * gain(input_db)`
//! 2. soft clip: `clipped = (x - 1/3) * tone^raw`
//! 3. dry/wet: `blend = x * (1 - mix) + clipped * mix`
//! 4. output trim: `out = blend * gain(output_db)`
//!
//! ## Lifecycle
//!
//! ```text
//!   Unprepared ──prepare(ok)──▶ Prepared ──process…──▶ Prepared
//!       ▲                          │
//!       └──────prepare(err)────────┘
//! ```
//!
//! `process` on an unprepared processor silences the block and returns
//! [`ProcessError::Unprepared`].
//!
//! ## Real-time contract
//!
//! `process` never allocates, locks or panics. The only heap memory, the
//! per-block parameter ramps, is sized in `prepare`. Work is linear in
//! channels × samples.

#[cfg(not(feature = "std"))]
use alloc::{sync::Arc, vec::Vec};
#[cfg(feature = "std")]
use std::sync::Arc;

use crate::block::{AudioBlock, MidiEvent};
use crate::error::ProcessError;
use crate::math::{crossfade, db_to_linear, finite_or_silence};
use crate::param::{DEFAULT_SMOOTHING_MS, LinearSmoothedParam};
use crate::params::{ParamSnapshot, ParameterSet};
use crate::transfer::soft_clip;

/// Most channels a processor can be prepared for.
pub const MAX_CHANNELS: usize = 8;

/// Audio configuration fixed between two `prepare` calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessingContext {
    /// Sample rate in Hz, always > 0.
    pub sample_rate: f32,
    /// Largest block `process` accepts, always >= 1.
    pub max_block_size: usize,
    /// Channels per block, in `1..=MAX_CHANNELS`.
    pub channels: usize,
}

impl ProcessingContext {
    /// Validate a configuration.
    pub fn new(
        sample_rate: f32,
        max_block_size: usize,
        channels: usize,
    ) -> Result<Self, ProcessError> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(ProcessError::InvalidSampleRate);
        }
        if max_block_size == 0 {
            return Err(ProcessError::InvalidBlockSize);
        }
        if channels == 0 || channels > MAX_CHANNELS {
            return Err(ProcessError::InvalidChannelCount(channels));
        }
        Ok(Self {
            sample_rate,
            max_block_size,
            channels,
        })
    }
}

/// Per-sample parameter values for the current block.
#[derive(Debug, Default)]
struct Ramps {
    input_gain: Vec<f32>,
    tone: Vec<f32>,
    mix: Vec<f32>,
    output_gain: Vec<f32>,
}

impl Ramps {
    fn resize(&mut self, len: usize) {
        for buf in [
            &mut self.input_gain,
            &mut self.tone,
            &mut self.mix,
            &mut self.output_gain,
        ] {
            buf.clear();
            buf.resize(len, 0.0);
        }
    }
}

/// Targets derived from a snapshot, in the units the audio loop uses.
#[derive(Debug, Clone, Copy)]
struct Targets {
    input_gain: f32,
    tone: f32,
    mix: f32,
    output_gain: f32,
}

impl Targets {
    fn from_snapshot(snapshot: &ParamSnapshot) -> Self {
        let p = snapshot.sanitized();
        Self {
            input_gain: db_to_linear(p.input_db as f32),
            tone: p.tone as f32,
            mix: p.mix as f32,
            output_gain: db_to_linear(p.output_db as f32),
        }
    }
}

/// Soft-clip saturation stage with input/output trim and dry/wet mix.
///
/// # Example
///
/// ```rust
/// use softclip_core::{AudioBlock, ParamId, SignalProcessor};
///
/// let mut processor = SignalProcessor::new();
/// let params = processor.params();
/// params.set(ParamId::Tone, 0.5);
///
/// processor.prepare(44100.0, 512, 1).unwrap();
///
/// let mut mono = [0.5f32; 512];
/// let mut channels = [&mut mono[..]];
/// processor.process(&mut AudioBlock::new(&mut channels)).unwrap();
///
/// let expected = (0.5 - 1.0 / 3.0) * 0.5f32.powf(0.5);
/// assert!((mono[0] - expected).abs() < 1e-6);
/// ```
#[derive(Debug)]
pub struct SignalProcessor {
    params: Arc<ParameterSet>,
    context: Option<ProcessingContext>,
    input_gain: LinearSmoothedParam,
    tone: LinearSmoothedParam,
    mix: LinearSmoothedParam,
    output_gain: LinearSmoothedParam,
    smoothing_ms: f32,
    ramps: Ramps,
}

impl SignalProcessor {
    /// Create an unprepared processor with its own default parameter set.
    pub fn new() -> Self {
        Self::with_params(Arc::new(ParameterSet::new()))
    }

    /// Create an unprepared processor reading from an existing parameter set.
    pub fn with_params(params: Arc<ParameterSet>) -> Self {
        let targets = Targets::from_snapshot(&params.snapshot());
        let ramp = |v: f32| LinearSmoothedParam::with_config(v, 44100.0, DEFAULT_SMOOTHING_MS);
        Self {
            context: None,
            input_gain: ramp(targets.input_gain),
            tone: ramp(targets.tone),
            mix: ramp(targets.mix),
            output_gain: ramp(targets.output_gain),
            smoothing_ms: DEFAULT_SMOOTHING_MS,
            ramps: Ramps::default(),
            params,
        }
    }

    /// Handle for the controller thread.
    pub fn params(&self) -> Arc<ParameterSet> {
        Arc::clone(&self.params)
    }

    /// Borrow the parameter set.
    pub fn parameters(&self) -> &ParameterSet {
        &self.params
    }

    /// Establish the processing context.
    ///
    /// Must be called before the first `process` and whenever the sample
    /// rate, block size or channel count changes. Parameter ramps restart
    /// from the current parameter values. On error the processor is left
    /// unprepared.
    pub fn prepare(
        &mut self,
        sample_rate: f32,
        max_block_size: usize,
        channels: usize,
    ) -> Result<(), ProcessError> {
        let context = match ProcessingContext::new(sample_rate, max_block_size, channels) {
            Ok(context) => context,
            Err(err) => {
                self.context = None;
                return Err(err);
            }
        };

        self.ramps.resize(max_block_size);
        for smoother in self.smoothers_mut() {
            smoother.set_sample_rate(sample_rate);
        }
        let targets = Targets::from_snapshot(&self.params.snapshot());
        self.input_gain.set_immediate(targets.input_gain);
        self.tone.set_immediate(targets.tone);
        self.mix.set_immediate(targets.mix);
        self.output_gain.set_immediate(targets.output_gain);
        self.context = Some(context);

        #[cfg(feature = "tracing")]
        tracing::debug!(sample_rate, max_block_size, channels, "prepare");

        Ok(())
    }

    /// Whether `prepare` has succeeded.
    pub fn is_prepared(&self) -> bool {
        self.context.is_some()
    }

    /// Current processing context, if prepared.
    pub fn context(&self) -> Option<ProcessingContext> {
        self.context
    }

    /// Set the parameter ramp length in milliseconds (0 disables smoothing).
    pub fn set_smoothing_time_ms(&mut self, time_ms: f32) {
        self.smoothing_ms = time_ms.max(0.0);
        let ms = self.smoothing_ms;
        for smoother in self.smoothers_mut() {
            smoother.set_transition_time_ms(ms);
        }
    }

    /// Parameter ramp length in milliseconds.
    pub fn smoothing_time_ms(&self) -> f32 {
        self.smoothing_ms
    }

    /// Finish any running parameter ramps at their current targets.
    pub fn reset(&mut self) {
        for smoother in self.smoothers_mut() {
            smoother.snap_to_target();
        }
    }

    /// Process one block in place using the current parameter values.
    ///
    /// # Errors
    ///
    /// See [`process_with`](Self::process_with).
    #[inline]
    pub fn process(&mut self, block: &mut AudioBlock<'_, '_>) -> Result<(), ProcessError> {
        let snapshot = self.params.snapshot();
        self.process_with(block, &snapshot)
    }

    /// Host callback entry point. MIDI is accepted and ignored.
    #[inline]
    pub fn process_midi(
        &mut self,
        block: &mut AudioBlock<'_, '_>,
        _midi: &[MidiEvent],
    ) -> Result<(), ProcessError> {
        self.process(block)
    }

    /// Process one block in place with an explicit parameter snapshot.
    ///
    /// Out-of-range snapshot fields are clamped. Channels without an input
    /// counterpart are cleared. With bypass on, input channels pass through
    /// untouched. Input samples that are exactly zero come out as zero, so
    /// output never depends on where block boundaries fall.
    ///
    /// # Errors
    ///
    /// Calling before `prepare`, or with more channels or samples than
    /// `prepare` declared, clears the whole block and returns the
    /// [`ProcessError`]. This holds in debug and release builds alike; there
    /// is no debug assertion, so a misbehaving host gets silence rather than
    /// a panic on the audio thread.
    pub fn process_with(
        &mut self,
        block: &mut AudioBlock<'_, '_>,
        snapshot: &ParamSnapshot,
    ) -> Result<(), ProcessError> {
        if let Err(err) = self.check_block(block) {
            block.clear();
            return Err(err);
        }

        block.clear_unused_outputs();

        let targets = Targets::from_snapshot(snapshot);
        self.input_gain.set_target(targets.input_gain);
        self.tone.set_target(targets.tone);
        self.mix.set_target(targets.mix);
        self.output_gain.set_target(targets.output_gain);

        if snapshot.bypass {
            self.reset();
            return Ok(());
        }

        let n = block.num_samples();
        if n == 0 {
            return Ok(());
        }

        let input_gain = &mut self.ramps.input_gain[..n];
        let tone = &mut self.ramps.tone[..n];
        let mix = &mut self.ramps.mix[..n];
        let output_gain = &mut self.ramps.output_gain[..n];
        self.input_gain.fill(input_gain);
        self.tone.fill(tone);
        self.mix.fill(mix);
        self.output_gain.fill(output_gain);

        let inputs = block.num_input_channels();
        for channel in block.channels_mut().take(inputs) {
            for (i, sample) in channel[..n].iter_mut().enumerate() {
                let raw = *sample;
                // Exact zeros stay zero; the -1/3 offset is never injected
                // into silence.
                if raw == 0.0 || !raw.is_finite() {
                    *sample = 0.0;
                    continue;
                }
                let x = raw * input_gain[i];
                let clipped = soft_clip(raw, x, tone[i]);
                let blend = crossfade(x, clipped, mix[i]);
                *sample = finite_or_silence(blend * output_gain[i]);
            }
        }

        Ok(())
    }

    fn check_block(&self, block: &AudioBlock<'_, '_>) -> Result<(), ProcessError> {
        let Some(context) = self.context else {
            return Err(ProcessError::Unprepared);
        };
        if block.num_channels() > context.channels {
            return Err(ProcessError::TooManyChannels {
                got: block.num_channels(),
                max: context.channels,
            });
        }
        if block.num_samples() > context.max_block_size {
            return Err(ProcessError::BlockTooLarge {
                got: block.num_samples(),
                max: context.max_block_size,
            });
        }
        Ok(())
    }

    fn smoothers_mut(&mut self) -> [&mut LinearSmoothedParam; 4] {
        [
            &mut self.input_gain,
            &mut self.tone,
            &mut self.mix,
            &mut self.output_gain,
        ]
    }
}

impl Default for SignalProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamId;

    #[cfg(not(feature = "std"))]
    use alloc::vec;

    fn prepared(channels: usize) -> SignalProcessor {
        let mut p = SignalProcessor::new();
        p.prepare(48000.0, 64, channels).unwrap();
        p
    }

    #[test]
    fn unprepared_process_silences_and_errors() {
        let mut p = SignalProcessor::new();
        let mut buf = [0.5f32; 16];
        let mut channels = [&mut buf[..]];
        let result = p.process(&mut AudioBlock::new(&mut channels));
        assert_eq!(result, Err(ProcessError::Unprepared));
        assert!(buf.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn prepare_validates_context() {
        let mut p = SignalProcessor::new();
        assert_eq!(p.prepare(0.0, 64, 2), Err(ProcessError::InvalidSampleRate));
        assert_eq!(
            p.prepare(f32::NAN, 64, 2),
            Err(ProcessError::InvalidSampleRate)
        );
        assert_eq!(p.prepare(48000.0, 0, 2), Err(ProcessError::InvalidBlockSize));
        assert_eq!(
            p.prepare(48000.0, 64, 0),
            Err(ProcessError::InvalidChannelCount(0))
        );
        assert_eq!(
            p.prepare(48000.0, 64, MAX_CHANNELS + 1),
            Err(ProcessError::InvalidChannelCount(MAX_CHANNELS + 1))
        );
        assert!(!p.is_prepared());
    }

    #[test]
    fn failed_prepare_returns_to_unprepared() {
        let mut p = prepared(2);
        assert!(p.is_prepared());
        assert!(p.prepare(-1.0, 64, 2).is_err());
        assert!(!p.is_prepared());
    }

    #[test]
    fn oversized_block_rejected() {
        let mut p = prepared(1);
        let mut buf = vec![0.25f32; 65];
        let mut channels = [&mut buf[..]];
        let result = p.process(&mut AudioBlock::new(&mut channels));
        assert_eq!(result, Err(ProcessError::BlockTooLarge { got: 65, max: 64 }));
        assert!(buf.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn too_many_channels_rejected() {
        let mut p = prepared(1);
        let mut a = [0.25f32; 8];
        let mut b = [0.25f32; 8];
        let mut channels = [&mut a[..], &mut b[..]];
        let result = p.process(&mut AudioBlock::new(&mut channels));
        assert_eq!(result, Err(ProcessError::TooManyChannels { got: 2, max: 1 }));
        assert!(a.iter().chain(b.iter()).all(|&s| s == 0.0));
    }

    #[test]
    fn misuse_is_an_error_not_a_panic() {
        // Runs under debug assertions in the test profile.
        let mut p = SignalProcessor::new();
        let mut buf = [0.25f32; 4];
        assert_eq!(
            p.process(&mut AudioBlock::new(&mut [&mut buf[..]])),
            Err(ProcessError::Unprepared)
        );

        p.prepare(48000.0, 2, 1).unwrap();
        let mut buf = [0.25f32; 4];
        assert_eq!(
            p.process(&mut AudioBlock::new(&mut [&mut buf[..]])),
            Err(ProcessError::BlockTooLarge { got: 4, max: 2 })
        );
        assert_eq!(buf, [0.0; 4]);

        // The processor stays usable after a rejected block.
        let mut buf = [0.25f32; 2];
        assert!(p.process(&mut AudioBlock::new(&mut [&mut buf[..]])).is_ok());
        assert!(buf.iter().all(|&s| s != 0.0 && s.is_finite()));
    }

    #[test]
    fn smaller_block_than_prepared_is_fine() {
        let mut p = prepared(2);
        let mut a = [0.25f32; 10];
        let mut channels = [&mut a[..]];
        assert!(p.process(&mut AudioBlock::new(&mut channels)).is_ok());
        assert!(a.iter().all(|s| s.is_finite() && *s != 0.25));
    }

    #[test]
    fn extra_output_channels_are_cleared() {
        let mut p = prepared(2);
        let mut a = [0.25f32; 8];
        let mut b = [0.9f32; 8];
        let mut channels = [&mut a[..], &mut b[..]];
        let mut block = AudioBlock::new(&mut channels).with_input_channels(1);
        p.process(&mut block).unwrap();
        assert!(b.iter().all(|&s| s == 0.0));
        assert!(a.iter().all(|&s| s != 0.0));
    }

    #[test]
    fn bypass_leaves_block_untouched() {
        let mut p = prepared(1);
        p.parameters().set(ParamId::Input, 12.0);
        p.parameters().set_bypass(true);
        let original: [f32; 8] = [0.1, -0.2, 0.3, -0.4, 0.5, -0.6, 0.7, -1.0];
        let mut buf = original;
        let mut channels = [&mut buf[..]];
        p.process(&mut AudioBlock::new(&mut channels)).unwrap();
        assert_eq!(buf, original);
    }

    #[test]
    fn zero_samples_stay_silent() {
        let mut p = prepared(2);
        let mut silent = [0.0f32; 16];
        let mut loud = [0.0f32; 16];
        loud[3] = 0.5;
        loud[9] = -0.0;
        let mut channels = [&mut silent[..], &mut loud[..]];
        p.process(&mut AudioBlock::new(&mut channels)).unwrap();
        assert!(silent.iter().all(|&s| s == 0.0));
        // Zeros next to signal in the same block are untouched too.
        for (i, &s) in loud.iter().enumerate() {
            if i != 3 {
                assert_eq!(s, 0.0, "sample {i}");
            }
        }
        let expected = (0.5 - 1.0 / 3.0) * 0.1f32.powf(0.5);
        assert!((loud[3] - expected).abs() < 1e-6);
    }

    #[test]
    fn leading_silence_is_split_independent() {
        let mut signal = [0.0f32; 48];
        for (i, s) in signal.iter_mut().enumerate().skip(20) {
            *s = 0.5 * (i as f32 * 0.3).sin() + 0.01;
        }

        let mut whole = signal;
        let mut p = prepared(1);
        p.process(&mut AudioBlock::new(&mut [&mut whole[..]])).unwrap();

        let mut split = signal;
        let mut p = prepared(1);
        for chunk in split.chunks_mut(16) {
            p.process(&mut AudioBlock::new(&mut [chunk])).unwrap();
        }

        assert_eq!(whole, split);
        assert!(whole[..20].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn non_finite_input_becomes_silence() {
        let mut p = prepared(1);
        let mut buf = [0.5f32, f32::NAN, f32::INFINITY, -0.5];
        let mut channels = [&mut buf[..]];
        p.process(&mut AudioBlock::new(&mut channels)).unwrap();
        assert_eq!(buf[1], 0.0);
        assert_eq!(buf[2], 0.0);
        assert!(buf[0].is_finite() && buf[3].is_finite());
    }

    #[test]
    fn parameter_change_ramps_over_smoothing_time() {
        let mut p = SignalProcessor::new();
        p.set_smoothing_time_ms(1.0);
        p.prepare(48000.0, 64, 1).unwrap();
        p.parameters().set(ParamId::Mix, 0.0);
        p.parameters().set(ParamId::Output, -6.0);

        let mut buf = [0.5f32; 64];
        let mut channels = [&mut buf[..]];
        p.process(&mut AudioBlock::new(&mut channels)).unwrap();

        // First sample is still close to the old settings, the ramp
        // (48 samples) has finished by the end of the block.
        let wet = (0.5 - 1.0 / 3.0) * libm::powf(0.1, 0.5);
        let settled = 0.5 * db_to_linear(-6.0);
        assert!((buf[0] - wet).abs() < 0.02, "got {}", buf[0]);
        assert!((buf[63] - settled).abs() < 1e-6, "got {}", buf[63]);
    }

    #[test]
    fn zero_smoothing_applies_immediately() {
        let mut p = SignalProcessor::new();
        p.set_smoothing_time_ms(0.0);
        p.prepare(48000.0, 16, 1).unwrap();
        p.parameters().set(ParamId::Mix, 0.0);

        let mut buf = [0.5f32; 16];
        let mut channels = [&mut buf[..]];
        p.process(&mut AudioBlock::new(&mut channels)).unwrap();
        assert!(buf.iter().all(|&s| s == 0.5));
    }

    #[test]
    fn process_midi_ignores_events() {
        let mut a = prepared(1);
        let mut b = prepared(1);
        let mut x = [0.3f32; 32];
        let mut y = [0.3f32; 32];
        let events = [MidiEvent {
            offset: 0,
            data: [0x90, 60, 100],
        }];
        a.process_midi(&mut AudioBlock::new(&mut [&mut x[..]]), &events)
            .unwrap();
        b.process(&mut AudioBlock::new(&mut [&mut y[..]])).unwrap();
        assert_eq!(x, y);
    }
}

//! Linear parameter ramps for zipper-free changes.
//!
//! Host automation and UI writes arrive at block granularity. Jumping a gain
//! or mix value between two blocks produces an audible step ("zipper"
//! noise), so the signal path ramps each continuous parameter linearly from
//! its previous value to the new target over a fixed transition time.
//!
//! ## Usage
//!
//! ```rust
//! use softclip_core::LinearSmoothedParam;
//!
//! let mut mix = LinearSmoothedParam::with_config(1.0, 48000.0, 10.0);
//! mix.set_target(0.5);
//!
//! // 10 ms at 48 kHz = 480 samples to reach the target
//! for _ in 0..480 {
//!     let _ = mix.advance();
//! }
//! assert!(mix.is_settled());
//! assert_eq!(mix.get(), 0.5);
//! ```

/// Default transition time for the signal path ramps in milliseconds.
pub const DEFAULT_SMOOTHING_MS: f32 = 5.0;

/// A parameter with linear smoothing (constant rate of change).
///
/// Each new target restarts the ramp from the current value, so the
/// transition always takes exactly the configured time regardless of the
/// distance travelled. When the ramp finishes the value snaps to the exact
/// target, so a settled parameter reproduces its target bit-for-bit.
#[derive(Debug, Clone)]
pub struct LinearSmoothedParam {
    /// Current value
    current: f32,
    /// Target value
    target: f32,
    /// Increment per sample (can be positive or negative)
    increment: f32,
    /// Samples remaining until target reached
    samples_remaining: u32,
    /// Sample rate in Hz
    sample_rate: f32,
    /// Transition time in milliseconds
    transition_time_ms: f32,
}

impl LinearSmoothedParam {
    /// Create a new linear smoothed parameter with the default transition time.
    pub fn new(initial: f32) -> Self {
        Self::with_config(initial, 44100.0, DEFAULT_SMOOTHING_MS)
    }

    /// Create with full configuration.
    pub fn with_config(initial: f32, sample_rate: f32, transition_time_ms: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            increment: 0.0,
            samples_remaining: 0,
            sample_rate,
            transition_time_ms,
        }
    }

    /// Set the target value.
    ///
    /// A target equal to the current one leaves any running ramp untouched.
    pub fn set_target(&mut self, target: f32) {
        if target == self.target {
            return;
        }

        self.target = target;

        let samples = self.transition_samples();
        if samples == 0 {
            self.current = target;
            self.increment = 0.0;
            self.samples_remaining = 0;
        } else {
            self.increment = (target - self.current) / samples as f32;
            self.samples_remaining = samples;
        }
    }

    /// Set value immediately.
    pub fn set_immediate(&mut self, value: f32) {
        self.current = value;
        self.target = value;
        self.increment = 0.0;
        self.samples_remaining = 0;
    }

    /// Update sample rate. Takes effect for the next target change.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
    }

    /// Set transition time in milliseconds. Zero disables smoothing.
    pub fn set_transition_time_ms(&mut self, time_ms: f32) {
        self.transition_time_ms = time_ms.max(0.0);
    }

    /// Transition time in milliseconds.
    pub fn transition_time_ms(&self) -> f32 {
        self.transition_time_ms
    }

    /// Get next smoothed value.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        if self.samples_remaining > 0 {
            self.current += self.increment;
            self.samples_remaining -= 1;
            if self.samples_remaining == 0 {
                self.current = self.target; // Snap to exact target
            }
        }
        self.current
    }

    /// Write the next `out.len()` ramp values into `out`.
    ///
    /// Settled parameters take a `fill` fast path.
    #[inline]
    pub fn fill(&mut self, out: &mut [f32]) {
        if self.samples_remaining == 0 {
            out.fill(self.current);
            return;
        }
        for v in out.iter_mut() {
            *v = self.advance();
        }
    }

    /// Get current value without advancing.
    #[inline]
    pub fn get(&self) -> f32 {
        self.current
    }

    /// Get target value.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Check if transition is complete.
    #[inline]
    pub fn is_settled(&self) -> bool {
        self.samples_remaining == 0
    }

    /// Snap to target immediately.
    pub fn snap_to_target(&mut self) {
        self.current = self.target;
        self.increment = 0.0;
        self.samples_remaining = 0;
    }

    fn transition_samples(&self) -> u32 {
        if self.transition_time_ms <= 0.0 || self.sample_rate <= 0.0 {
            return 0;
        }
        (self.transition_time_ms / 1000.0 * self.sample_rate) as u32
    }
}

impl Default for LinearSmoothedParam {
    fn default() -> Self {
        Self::new(0.0)
    }
}

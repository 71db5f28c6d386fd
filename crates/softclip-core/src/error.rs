//! Configuration errors reported by the signal path.

/// Errors returned by [`SignalProcessor`](crate::SignalProcessor).
///
/// None of these are raised from inside the per-sample loop: `process`
/// checks the block against the prepared context up front, silences the
/// block and returns the error without panicking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessError {
    /// `process` was called before a successful `prepare`.
    Unprepared,
    /// The block has more channels than `prepare` declared.
    TooManyChannels {
        /// Channels in the block.
        got: usize,
        /// Channels declared in `prepare`.
        max: usize,
    },
    /// The block has more samples than `prepare` declared.
    BlockTooLarge {
        /// Samples per channel in the block.
        got: usize,
        /// Maximum block size declared in `prepare`.
        max: usize,
    },
    /// Sample rate must be finite and greater than zero.
    InvalidSampleRate,
    /// Maximum block size must be at least one sample.
    InvalidBlockSize,
    /// Channel count must be between one and the supported maximum.
    InvalidChannelCount(usize),
}

impl core::fmt::Display for ProcessError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unprepared => write!(f, "process called before prepare"),
            Self::TooManyChannels { got, max } => {
                write!(f, "block has {got} channels, prepared for {max}")
            }
            Self::BlockTooLarge { got, max } => {
                write!(f, "block has {got} samples, prepared for at most {max}")
            }
            Self::InvalidSampleRate => write!(f, "sample rate must be finite and > 0"),
            Self::InvalidBlockSize => write!(f, "maximum block size must be >= 1"),
            Self::InvalidChannelCount(n) => write!(f, "unsupported channel count {n}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ProcessError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(feature = "std"))]
    extern crate alloc;
    #[cfg(not(feature = "std"))]
    use alloc::string::ToString;

    #[test]
    fn display_messages() {
        assert_eq!(
            ProcessError::Unprepared.to_string(),
            "process called before prepare"
        );
        assert_eq!(
            ProcessError::TooManyChannels { got: 3, max: 2 }.to_string(),
            "block has 3 channels, prepared for 2"
        );
        assert_eq!(
            ProcessError::BlockTooLarge { got: 1024, max: 512 }.to_string(),
            "block has 1024 samples, prepared for at most 512"
        );
        assert_eq!(
            ProcessError::InvalidChannelCount(0).to_string(),
            "unsupported channel count 0"
        );
    }
}

//! Audio file I/O and offline rendering for the softclip saturator.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav`] and [`write_wav`] with planar channels
//! - **Offline rendering**: [`render`] drives a [`SignalProcessor`] block by block
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use softclip_core::SignalProcessor;
//! use softclip_io::{read_wav, render, write_wav};
//!
//! let (mut channels, spec) = read_wav("input.wav")?;
//!
//! let mut processor = SignalProcessor::new();
//! processor.prepare(spec.sample_rate as f32, 512, channels.len())?;
//! render(&mut processor, &mut channels, 512)?;
//!
//! write_wav("output.wav", &channels, spec)?;
//! # Ok::<(), softclip_io::Error>(())
//! ```
//!
//! [`SignalProcessor`]: softclip_core::SignalProcessor

mod render;
mod wav;

pub use render::{render, render_with_progress};
pub use wav::{
    PlanarSamples, WavFormat, WavInfo, WavSpec, read_wav, read_wav_info, write_wav,
};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The signal processor rejected a block or its configuration.
    #[error("processing error: {0}")]
    Process(#[from] softclip_core::ProcessError),

    /// Only 16, 24 and 32 bit files are handled.
    #[error("unsupported bit depth: {0}")]
    UnsupportedBitDepth(u16),

    /// The number of buffers does not match the declared channel count.
    #[error("expected {expected} channels, got {got}")]
    ChannelMismatch {
        /// Channels declared in the spec.
        expected: usize,
        /// Buffers supplied.
        got: usize,
    },

    /// Channel buffers have different lengths.
    #[error("channel {channel} has {got} samples, expected {expected}")]
    RaggedChannels {
        /// Index of the offending channel.
        channel: usize,
        /// Samples in channel 0.
        expected: usize,
        /// Samples in the offending channel.
        got: usize,
    },

    /// Block size must be at least one sample.
    #[error("block size must be >= 1")]
    InvalidBlockSize,

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;

//! Softclip Core - real-time soft-clip saturation signal path
//!
//! This crate provides the audio-thread half of the softclip saturator: a
//! block-based processor, its fixed parameter table and the lock-free
//! parameter set shared with a controller thread.
//!
//! # Core Abstractions
//!
//! ## Signal Path
//!
//! - [`SignalProcessor`] - Input trim, asymmetric soft clip, dry/wet, output trim
//! - [`AudioBlock`] - Planar in-place view over host buffers
//! - [`ProcessingContext`] - Sample rate, block size and channel count fixed by `prepare`
//! - [`soft_clip`] - The static transfer function
//!
//! ## Parameters
//!
//! - [`ParamId`] / [`PARAMS`] - The six stable parameters and their metadata
//! - [`ParameterSet`] - Atomic values shared between controller and audio thread
//! - [`ParamSnapshot`] - All values read once per block
//! - [`LinearSmoothedParam`] - Linear ramps for zipper-free changes
//!
//! ## Host Boundary
//!
//! - [`ChannelLayout`] - Mono or stereo with matching input and output
//! - [`MidiEvent`] - Accepted and ignored
//! - [`ProcessError`] - Configuration errors reported instead of panicking
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible (it needs `alloc`). Disable the default
//! `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! softclip-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use softclip_core::{AudioBlock, ParamId, SignalProcessor};
//!
//! let mut processor = SignalProcessor::new();
//! let params = processor.params();
//! processor.prepare(48000.0, 256, 2).unwrap();
//!
//! // Controller thread
//! std::thread::spawn(move || params.set(ParamId::Input, 6.0))
//!     .join()
//!     .unwrap();
//!
//! // Audio thread
//! let mut left = [0.25f32; 256];
//! let mut right = [-0.25f32; 256];
//! let mut channels = [&mut left[..], &mut right[..]];
//! processor.process(&mut AudioBlock::new(&mut channels)).unwrap();
//! assert!(left.iter().chain(right.iter()).all(|s| s.is_finite()));
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: No allocations, locks or panics in `process`
//! - **Lock-free control**: One atomic word per parameter
//! - **Pure `no_std` math**: `libm` for `exp` and `pow`

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod block;
pub mod error;
pub mod layout;
pub mod math;
pub mod param;
pub mod param_info;
pub mod params;
pub mod processor;
pub mod transfer;

// Re-export main types at crate root
pub use block::{AudioBlock, MidiEvent};
pub use error::ProcessError;
pub use layout::ChannelLayout;
pub use math::{crossfade, db_to_linear, finite_or_silence, linear_to_db};
pub use param::{DEFAULT_SMOOTHING_MS, LinearSmoothedParam};
pub use param_info::{ParamDescriptor, ParamFlags, ParamScale, ParamUnit};
pub use params::{
    PARAM_COUNT, PARAMS, ParamId, ParamSnapshot, ParameterSet, TONE_MAX, TONE_MIN, descriptor,
};
pub use processor::{MAX_CHANNELS, ProcessingContext, SignalProcessor};
pub use transfer::{CLIP_OFFSET, output_bound, soft_clip};

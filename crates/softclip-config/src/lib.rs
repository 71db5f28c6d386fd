//! Configuration and preset management for the softclip saturator.
//!
//! # Features
//!
//! - **Preset System**: Load and save parameter presets from TOML files
//! - **Factory Presets**: Built-in presets, also exposed as the program list
//! - **Session State**: Versioned JSON blob for host save/restore
//!
//! # Example
//!
//! ```rust,no_run
//! use softclip_config::{Preset, get_factory_preset, load_state, save_state};
//! use softclip_core::ParameterSet;
//!
//! let params = ParameterSet::new();
//!
//! // Start from a factory preset
//! get_factory_preset("warm").unwrap().apply_to(&params);
//!
//! // Save the current sound as a user preset
//! Preset::from_params("My Warm", &params)
//!     .with_description("warm, a little hotter")
//!     .save("presets/my_warm.toml")
//!     .unwrap();
//!
//! // Host session save/restore
//! let blob = save_state(&params).unwrap();
//! load_state(&params, &blob).unwrap();
//! ```

mod error;
mod preset;

/// Host session state blobs.
pub mod state;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_preset_names, factory_presets, factory_program,
    factory_program_count, get_factory_preset, is_factory_preset,
};
pub use preset::Preset;
pub use state::{STATE_VERSION, load_state, save_state};

//! Host session state: the parameter set as an opaque byte blob.
//!
//! The blob is a JSON object keyed by parameter string id:
//!
//! ```json
//! {"version":1,"params":{"bypass":0.0,"freq_hz":60.0,"input_db":0.0,"mix":1.0,"output_db":0.0,"tone":0.1}}
//! ```
//!
//! String ids are stable across releases, so a blob survives parameter
//! reordering. Loading is all-or-nothing for malformed input: the blob is
//! fully parsed before any value is written.

use serde::{Deserialize, Serialize};
use softclip_core::{PARAMS, ParameterSet};
use std::collections::BTreeMap;

use crate::error::ConfigError;

/// Newest state format this build writes and reads.
pub const STATE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct StateBlob {
    version: u32,
    #[serde(default)]
    params: BTreeMap<String, f64>,
}

/// Serialize every parameter, bypass included.
pub fn save_state(params: &ParameterSet) -> Result<Vec<u8>, ConfigError> {
    let blob = StateBlob {
        version: STATE_VERSION,
        params: PARAMS
            .iter()
            .map(|d| (d.string_id.to_string(), params.get(d.id)))
            .collect(),
    };
    Ok(serde_json::to_vec(&blob)?)
}

/// Restore a blob produced by [`save_state`].
///
/// Values are clamped and unknown keys skipped. Parameters missing from the
/// blob keep their current value. On error nothing is changed.
pub fn load_state(params: &ParameterSet, bytes: &[u8]) -> Result<(), ConfigError> {
    let blob: StateBlob = serde_json::from_slice(bytes)?;
    if blob.version > STATE_VERSION {
        return Err(ConfigError::UnsupportedStateVersion {
            found: blob.version,
            supported: STATE_VERSION,
        });
    }
    let applied = params.import_values(&blob.params);
    tracing::debug!(version = blob.version, applied, "restored state");
    Ok(())
}

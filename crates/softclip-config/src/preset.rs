//! Preset file format and operations.

use serde::{Deserialize, Serialize};
use softclip_core::{PARAMS, ParamFlags, ParamId, ParameterSet};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ConfigError;

/// A named set of parameter values.
///
/// Presets are stored as TOML files. Keys in `[params]` are parameter string
/// ids or display names, matched case-insensitively.
///
/// # TOML Format
///
/// ```toml
/// name = "Warm"
/// description = "Gentle asymmetric saturation"
///
/// [params]
/// input_db = 3.0
/// tone = 0.3
/// mix = 0.8
/// output_db = -1.5
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Parameter values by name.
    #[serde(default)]
    pub params: BTreeMap<String, f64>,
}

impl Preset {
    /// Create a new empty preset.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            params: BTreeMap::new(),
        }
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add or replace one parameter value.
    pub fn with_param(mut self, name: impl Into<String>, value: f64) -> Self {
        self.params.insert(name.into(), value);
        self
    }

    /// Capture the current values of a parameter set.
    ///
    /// Keys are string ids. Bypass is a transport control, not part of a
    /// sound, and is not captured.
    pub fn from_params(name: impl Into<String>, params: &ParameterSet) -> Self {
        let values = PARAMS
            .iter()
            .filter(|d| !d.flags.contains(ParamFlags::BYPASS))
            .map(|d| (d.string_id.to_string(), params.get(d.id)))
            .collect();
        Self {
            name: name.into(),
            description: None,
            params: values,
        }
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let preset: Preset = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), name = %preset.name, "loaded preset");
        Ok(preset)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        tracing::info!(path = %path.display(), name = %self.name, "saved preset");
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Value stored for a parameter, under any of its accepted names.
    pub fn get(&self, id: ParamId) -> Option<f64> {
        self.params
            .iter()
            .find(|(key, _)| ParamId::from_name(key) == Some(id))
            .map(|(_, &value)| value)
    }

    /// Keys that do not name a parameter.
    pub fn unknown_params(&self) -> Vec<&str> {
        self.params
            .keys()
            .filter(|key| ParamId::from_name(key).is_none())
            .map(String::as_str)
            .collect()
    }

    /// Fail on the first key that does not name a parameter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.unknown_params().first() {
            Some(key) => Err(ConfigError::UnknownParameter((*key).to_string())),
            None => Ok(()),
        }
    }

    /// Write the preset's values into a parameter set.
    ///
    /// Values are clamped, unknown keys skipped and parameters the preset
    /// does not mention keep their current value. Returns the number of
    /// parameters applied.
    pub fn apply_to(&self, params: &ParameterSet) -> usize {
        for key in self.unknown_params() {
            tracing::warn!(preset = %self.name, "ignoring unknown parameter '{key}'");
        }
        params.import_values(&self.params)
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether the preset stores no values.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

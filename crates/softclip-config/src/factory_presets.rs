//! Factory presets bundled with the saturator.
//!
//! These presets are always available without external files and double as
//! the host-visible program list. Program 0 is `Default`, which matches the
//! parameter defaults.

use crate::Preset;

/// Array of factory preset names for external access, in program order.
pub static FACTORY_PRESET_NAMES: &[&str] = &["default", "warm", "crunch", "parallel", "thin"];

/// TOML content for factory presets.
///
/// These are embedded at compile time and always available.
static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("default", DEFAULT_PRESET),
    ("warm", WARM_PRESET),
    ("crunch", CRUNCH_PRESET),
    ("parallel", PARALLEL_PRESET),
    ("thin", THIN_PRESET),
];

const DEFAULT_PRESET: &str = r#"
name = "Default"
description = "Unity gain, full wet, gentle tone"

[params]
input_db = 0.0
tone = 0.1
freq_hz = 60.0
mix = 1.0
output_db = 0.0
"#;

const WARM_PRESET: &str = r#"
name = "Warm"
description = "Mild asymmetry blended under the dry signal"

[params]
input_db = 3.0
tone = 0.6
freq_hz = 60.0
mix = 0.7
output_db = -2.0
"#;

const CRUNCH_PRESET: &str = r#"
name = "Crunch"
description = "Driven input with a steep tone curve"

[params]
input_db = 12.0
tone = 0.05
freq_hz = 60.0
mix = 1.0
output_db = -12.0
"#;

const PARALLEL_PRESET: &str = r#"
name = "Parallel"
description = "Equal dry and wet for parallel saturation"

[params]
input_db = 6.0
tone = 0.2
freq_hz = 60.0
mix = 0.5
output_db = -4.0
"#;

const THIN_PRESET: &str = r#"
name = "Thin"
description = "Low-level input and minimum tone for a brittle edge"

[params]
input_db = -6.0
tone = 0.01
freq_hz = 60.0
mix = 1.0
output_db = -18.0
"#;

/// Get all factory presets in program order.
///
/// # Example
///
/// ```rust
/// use softclip_config::factory_presets;
///
/// let presets = factory_presets();
/// assert_eq!(presets[0].name, "Default");
/// ```
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| Preset::from_toml(toml).ok())
        .collect()
}

/// Get a factory preset by name.
///
/// Matches the internal identifier or the display name, case-insensitively.
///
/// ```rust
/// use softclip_config::get_factory_preset;
///
/// assert_eq!(get_factory_preset("CRUNCH").unwrap().name, "Crunch");
/// assert!(get_factory_preset("nonexistent").is_none());
/// ```
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(id, toml)| Preset::from_toml(toml).ok().map(|p| (*id, p)))
        .find(|(id, preset)| id.eq_ignore_ascii_case(name) || preset.name.eq_ignore_ascii_case(name))
        .map(|(_, preset)| preset)
}

/// Get the factory preset at a program index.
pub fn factory_program(index: usize) -> Option<Preset> {
    FACTORY_PRESETS_TOML
        .get(index)
        .and_then(|(_, toml)| Preset::from_toml(toml).ok())
}

/// Number of factory programs.
pub fn factory_program_count() -> usize {
    FACTORY_PRESETS_TOML.len()
}

/// Get the names of all factory presets.
pub fn factory_preset_names() -> Vec<&'static str> {
    FACTORY_PRESETS_TOML.iter().map(|(name, _)| *name).collect()
}

/// Check if a preset name is a factory preset (case-insensitive).
///
/// ```rust
/// use softclip_config::is_factory_preset;
///
/// assert!(is_factory_preset("warm"));
/// assert!(is_factory_preset("Warm"));
/// assert!(!is_factory_preset("my_custom_preset"));
/// ```
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}

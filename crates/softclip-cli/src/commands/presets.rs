//! Preset listing command.
//!
//! Lists the factory programs, shows one preset, or exports it as a TOML
//! file for editing.

use clap::Args;
use softclip_config::{ConfigError, Preset, factory_presets, get_factory_preset};
use softclip_core::PARAMS;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct PresetsArgs {
    /// Factory preset name or preset file to show
    #[arg(value_name = "NAME")]
    name: Option<String>,

    /// Write the shown preset to a TOML file
    #[arg(long, value_name = "FILE", requires = "name")]
    export: Option<PathBuf>,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    let Some(name) = &args.name else {
        list_presets();
        return Ok(());
    };

    let preset = find_preset(name)?;
    show_preset(&preset);

    if let Some(path) = &args.export {
        preset.save(path)?;
        println!();
        println!("Exported to {}", path.display());
    }
    Ok(())
}

fn list_presets() {
    println!("Factory Presets:");
    println!("================");
    for (index, preset) in factory_presets().iter().enumerate() {
        let desc = preset.description.as_deref().unwrap_or("");
        println!("  {index}. {:12} - {}", preset.name, desc);
    }
    println!();
}

fn find_preset(name: &str) -> Result<Preset, ConfigError> {
    if let Some(preset) = get_factory_preset(name) {
        return Ok(preset);
    }
    let path = Path::new(name);
    if path.is_file() {
        return Preset::load(path);
    }
    Err(ConfigError::PresetNotFound(name.to_string()))
}

fn show_preset(preset: &Preset) {
    println!("Preset: {}", preset.name);
    println!("{}", "=".repeat(8 + preset.name.len()));
    println!();

    if let Some(desc) = &preset.description {
        println!("Description: {desc}");
        println!();
    }

    for desc in &PARAMS {
        if let Some(value) = preset.get(desc.id) {
            println!("  {:8} = {value}{}", desc.name, desc.unit.suffix());
        }
    }
    for key in preset.unknown_params() {
        println!("  {key:8} (unknown, ignored)");
    }
}

//! File-based processing command.

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use softclip_config::{ConfigError, Preset, get_factory_preset};
use softclip_core::{ChannelLayout, ParamId, ParameterSet, SignalProcessor, linear_to_db};
use softclip_io::{WavSpec, read_wav, render_with_progress, write_wav};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file (mono or stereo)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Preset file (TOML)
    #[arg(short, long, conflicts_with = "factory")]
    preset: Option<PathBuf>,

    /// Factory preset name
    #[arg(short, long)]
    factory: Option<String>,

    /// Parameter override, applied after any preset (e.g., "tone=0.4")
    #[arg(long, value_parser = parse_key_val, number_of_values = 1)]
    param: Vec<(String, f64)>,

    /// Pass audio through unprocessed
    #[arg(long)]
    bypass: bool,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32", value_parser = parse_bit_depth)]
    bit_depth: u16,
}

fn parse_key_val(s: &str) -> Result<(String, f64), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("Invalid parameter format: '{s}' (expected key=value)"))?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("Invalid value for '{key}': {e}"))?;
    Ok((key.trim().to_string(), value))
}

fn parse_bit_depth(s: &str) -> Result<u16, String> {
    match s.parse::<u16>() {
        Ok(bits @ (16 | 24 | 32)) => Ok(bits),
        _ => Err(format!("unsupported bit depth '{s}' (expected 16, 24 or 32)")),
    }
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    // Read input file
    println!("Reading {}...", args.input.display());
    let (mut channels, spec) = read_wav(&args.input)?;
    let frames = channels.first().map_or(0, Vec::len);

    let Some(layout) = ChannelLayout::from_channel_count(channels.len()) else {
        anyhow::bail!(
            "Unsupported channel count {} (mono or stereo only)",
            channels.len()
        );
    };

    println!(
        "  {} frames, {} Hz, {:?}, {:.2}s",
        frames,
        spec.sample_rate,
        layout,
        frames as f64 / f64::from(spec.sample_rate)
    );

    let params = Arc::new(ParameterSet::new());
    configure(&params, &args)?;

    let mut processor = SignalProcessor::with_params(Arc::clone(&params));
    processor.prepare(spec.sample_rate as f32, args.block_size, layout.channel_count())?;

    let input_stats = Stats::measure(&channels);

    // Process with progress bar
    let pb = ProgressBar::new(frames as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );
    render_with_progress(&mut processor, &mut channels, args.block_size, |done| {
        pb.set_position(done as u64);
    })?;
    pb.finish_with_message("done");

    let output_stats = Stats::measure(&channels);
    println!("\nStats:");
    println!("  Input:  {input_stats}");
    println!("  Output: {output_stats}");

    // Write output file
    let out_spec = WavSpec {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: args.bit_depth,
    };

    println!("\nWriting {}...", args.output.display());
    write_wav(&args.output, &channels, out_spec)?;
    println!("Done!");

    Ok(())
}

/// Apply preset, overrides and bypass in that order.
fn configure(params: &ParameterSet, args: &ProcessArgs) -> anyhow::Result<()> {
    let preset = if let Some(path) = &args.preset {
        Some(Preset::load(path)?)
    } else if let Some(name) = &args.factory {
        Some(get_factory_preset(name).ok_or_else(|| ConfigError::PresetNotFound(name.clone()))?)
    } else {
        None
    };

    if let Some(preset) = preset {
        println!("Loading preset: {}", preset.name);
        preset.apply_to(params);
    }

    for (key, value) in &args.param {
        let id = ParamId::from_name(key).ok_or_else(|| ConfigError::UnknownParameter(key.clone()))?;
        params.set(id, *value);
        tracing::debug!(param = id.descriptor().name, value = params.get(id), "override");
    }

    if args.bypass {
        params.set_bypass(true);
    }

    let s = params.snapshot();
    tracing::info!(
        input_db = s.input_db,
        tone = s.tone,
        mix = s.mix,
        output_db = s.output_db,
        bypass = s.bypass,
        "parameters"
    );
    Ok(())
}

/// RMS and peak over all channels.
struct Stats {
    rms: f32,
    peak: f32,
}

impl Stats {
    fn measure(channels: &[Vec<f32>]) -> Self {
        let count: usize = channels.iter().map(Vec::len).sum();
        let sum: f64 = channels
            .iter()
            .flatten()
            .map(|&s| f64::from(s) * f64::from(s))
            .sum();
        let rms = if count == 0 {
            0.0
        } else {
            (sum / count as f64).sqrt() as f32
        };
        let peak = channels
            .iter()
            .flatten()
            .map(|s| s.abs())
            .fold(0.0, f32::max);
        Self { rms, peak }
    }
}

impl std::fmt::Display for Stats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RMS {:.1} dB, Peak {:.1} dB",
            linear_to_db(self.rms),
            linear_to_db(self.peak)
        )
    }
}

//! Parameter listing command.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use clap::Args;
use softclip_core::{PARAMS, ParamDescriptor, ParamScale};

#[derive(Args)]
pub struct ParamsArgs {
    /// Print the table as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    if args.json {
        let table: Vec<serde_json::Value> = PARAMS.iter().map(to_json).collect();
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    println!("Parameters:");
    println!();
    println!(
        "  {:5}  {:8}  {:10}  {:20}  {:10}  {}",
        "Index", "Name", "Id", "Range", "Default", "Curve"
    );
    println!(
        "  {:5}  {:8}  {:10}  {:20}  {:10}  {}",
        "-----", "----", "--", "-----", "-------", "-----"
    );
    for desc in &PARAMS {
        println!(
            "  {:5}  {:8}  {:10}  {:20}  {:10}  {}",
            desc.id.index(),
            desc.name,
            desc.string_id,
            range(desc),
            format_value(desc, desc.default),
            curve(desc.scale),
        );
    }
    println!();
    println!("Set with: softclip process in.wav out.wav --param tone=0.4 --param mix=0.8");
    Ok(())
}

fn format_value(desc: &ParamDescriptor, value: f64) -> String {
    if desc.is_toggle() {
        return if value >= 0.5 { "On" } else { "Off" }.to_string();
    }
    format!("{value}{}", desc.unit.suffix())
}

fn range(desc: &ParamDescriptor) -> String {
    if desc.is_toggle() {
        return "Off / On".to_string();
    }
    format!("{} .. {}{}", desc.min, desc.max, desc.unit.suffix())
}

fn curve(scale: ParamScale) -> String {
    match scale {
        ParamScale::Linear => "linear".to_string(),
        ParamScale::Logarithmic => "log".to_string(),
        ParamScale::Power(exp) => format!("power {exp:.2}"),
    }
}

fn to_json(desc: &ParamDescriptor) -> serde_json::Value {
    serde_json::json!({
        "index": desc.id.index(),
        "name": desc.name,
        "id": desc.string_id,
        "min": desc.min,
        "max": desc.max,
        "default": desc.default,
        "step": desc.step,
        "unit": desc.unit.suffix().trim(),
    })
}

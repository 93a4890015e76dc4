//! Convert a G-code file into a KUKA KRL `.src` program.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gcode2krl::config::Settings;
use gcode2krl::krl::KrlProgram;
use gcode2krl::translate::translate;

/// G-code to KRL converter
#[derive(Parser)]
#[command(name = "gcode2krl")]
#[command(about = "Convert layered G-code toolpaths into KUKA KRL programs")]
#[command(version)]
struct Cli {
    /// G-code file to convert
    input: PathBuf,

    /// Output program; defaults to the input name with a .src extension
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print origin X in the robot base frame [mm]
    #[arg(long)]
    origin_x: Option<f64>,

    /// Print origin Y in the robot base frame [mm]
    #[arg(long)]
    origin_y: Option<f64>,

    /// Height offset added to every Z [mm]
    #[arg(long)]
    height_offset: Option<f64>,

    /// Path speed [m/s]
    #[arg(long)]
    speed: Option<f64>,

    /// Write path and via points as JSON for external viewers
    #[arg(long)]
    preview: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(x) = cli.origin_x { settings.placement.origin_x = x; }
    if let Some(y) = cli.origin_y { settings.placement.origin_y = y; }
    if let Some(z) = cli.height_offset { settings.placement.height_offset = z; }
    if let Some(speed) = cli.speed { settings.print_speed = speed; }

    let flow = settings.flow_correction().context("cannot compute flow correction")?;

    let input = fs::read_to_string(&cli.input)
        .with_context(|| format!("cannot read {}", cli.input.display()))?;
    info!(file = %cli.input.display(), "translating, this may take a while");
    let output = translate(&input, settings.placement)
        .with_context(|| format!("cannot translate {}", cli.input.display()))?;

    let program = KrlProgram::new(settings.program_name.clone(), flow,
                                  settings.print_speed, output.krl_lines());
    let target = cli.output.clone().unwrap_or_else(|| cli.input.clone());
    let written = program.save(&target)?;

    if let Some(path) = &cli.preview {
        let json = serde_json::to_string_pretty(&output.preview())?;
        fs::write(path, json).with_context(|| format!("cannot write {}", path.display()))?;
    }

    println!("{}: {} instructions ({} motions), {} arc errors",
             written.display(), output.instructions.len(), output.motion_count(),
             output.arc_errors().count());
    Ok(())
}

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use labelkit::config::{ConfigOverrides, EngineConfig};
use labelkit::replay::{self, ReplayError};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "labelkit", about = "Replay a pointer script against the label engine and print the result")]
struct Cli {
    /// Scenario JSON file.
    scenario: PathBuf,

    /// Device pixels per label unit. Overrides the scenario viewport scale.
    #[arg(long, env = "LABELKIT_SCALE")]
    scale: Option<f64>,

    /// Handle hit radius in label units. Overrides the scenario and `LABELKIT_HANDLE_SIZE`.
    #[arg(long)]
    handle_size: Option<f64>,

    /// Rotate handle distance above the top edge, in label units. Overrides the scenario and
    /// `LABELKIT_ROTATION_HANDLE_OFFSET`.
    #[arg(long)]
    rotation_handle_offset: Option<f64>,
}

fn main() -> Result<(), ReplayError> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();

    let cli = Cli::parse();
    let mut scenario = replay::load(&cli.scenario)?;

    let base = EngineConfig::from_env()?;
    let flags = ConfigOverrides { handle_size: cli.handle_size, rotation_handle_offset: cli.rotation_handle_offset };
    scenario.config = scenario.config.overlay(flags);
    if let Some(scale) = cli.scale {
        scenario.viewport.scale = scale;
    }

    let outcome = replay::run_with(&scenario, base)?;
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &outcome)?;
    writeln!(stdout)?;
    Ok(())
}

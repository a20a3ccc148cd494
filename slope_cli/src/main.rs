//! # Slope CLI
//!
//! Command-line front end for `slope_core`: reads a JSON structure file,
//! runs the slope-deflection analysis and prints a text report or the full
//! result as JSON.
//!
//! ```text
//! slope demos/three_span_beam.json
//! slope demos/portal_frame.json --json --output frame_result.json
//! RUST_LOG=trace slope demos/three_span_beam.json
//! ```

mod io;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use crate::io::{load_structure, save_atomic, to_json, CliError};

/// Slope-deflection analysis of continuous beams and portal frames
#[derive(Parser, Debug)]
#[command(name = "slope")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Slope-deflection analysis of continuous beams and portal frames", long_about = None)]
struct Cli {
    /// Structure file (JSON, tagged `ContinuousBeam` or `PortalFrame`)
    input: PathBuf,

    /// Print the full result as JSON instead of a text report
    #[arg(long)]
    json: bool,

    /// Also write the JSON result to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Interior diagram samples per member (overrides the input file)
    #[arg(long)]
    samples: Option<usize>,

    /// Log pipeline stages (debug level unless RUST_LOG is set)
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let mut structure = load_structure(&cli.input)?;
    if let Some(samples) = cli.samples {
        structure.settings_mut().diagram_samples = samples;
    }
    log::info!(
        "analyzing {} '{}' from {}",
        structure.structure_type(),
        structure.label(),
        cli.input.display()
    );

    let analysis = structure.analyze()?;
    log::debug!("max equilibrium residual {:e}", analysis.max_residual());

    if cli.json || cli.output.is_some() {
        let json = to_json(&analysis)?;
        if let Some(path) = &cli.output {
            save_atomic(&json, path)?;
            log::info!("results written to {}", path.display());
        }
        if cli.json {
            println!("{}", json);
            return Ok(());
        }
    }

    print!("{}", report::render(&structure, &analysis));
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

//! Recoil CLI
//!
//! Command-line companion for the spring integrators:
//! - `simulate` runs a configured spring and prints its trajectory
//! - `bounds` measures the error of the fast approximations
//! - `compare` measures how far the fast integrator drifts from the exact one

mod analysis;
mod simulate;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "recoil")]
#[command(version, about = "Spring integrator toolbox", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Step a spring and print position and velocity per frame
    Simulate {
        /// Spring config file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Named preset, used when no config file is given
        #[arg(short, long)]
        preset: Option<String>,

        /// Starting position
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        from: f64,

        /// Target position
        #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
        to: f64,

        /// Seconds per step
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f64,

        /// Number of steps
        #[arg(long, default_value_t = 120)]
        steps: usize,

        #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,
    },
    /// Measure fast_neg_exp and fast_atan against the standard library
    Bounds {
        /// Upper end of the sampled range
        #[arg(long, default_value_t = 10.0)]
        max_x: f64,

        /// Number of samples
        #[arg(long, default_value_t = 100_000)]
        samples: usize,
    },
    /// Sweep damping ratios and compare the elastic and precise integrators
    Compare {
        /// Natural frequency in rad/s
        #[arg(long, default_value_t = 10.0)]
        stiffness: f64,

        /// Seconds per step
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

fn main() -> Result<()> {
    // Logs go to stderr so trajectories can be piped
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Simulate {
            config,
            preset,
            from,
            to,
            dt,
            steps,
            format,
        } => {
            let spring_config = simulate::resolve_config(config.as_deref(), preset.as_deref())?;
            let run = simulate::SimulateArgs {
                from,
                to,
                dt,
                steps,
            };
            let samples = simulate::run(&spring_config, &run)?;
            simulate::write_samples(&mut out, &samples, format)?;
        }
        Commands::Bounds { max_x, samples } => {
            let report = analysis::bounds(max_x, samples)?;
            analysis::write_bounds(&mut out, &report)?;
        }
        Commands::Compare { stiffness, dt } => {
            let rows = analysis::compare(stiffness, dt)?;
            analysis::write_comparison(&mut out, stiffness, dt, &rows)?;
        }
    }

    out.flush()?;
    Ok(())
}

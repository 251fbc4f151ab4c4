//! `recoil simulate`

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use recoil_spring::{SpringConfig, PRESET_NAMES};
use serde::Serialize;

use crate::OutputFormat;

/// Run length and endpoints for one simulation
#[derive(Debug, Clone, Copy)]
pub struct SimulateArgs {
    pub from: f64,
    pub to: f64,
    pub dt: f64,
    pub steps: usize,
}

/// One row of output
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub step: usize,
    pub time: f64,
    pub position: f64,
    pub velocity: f64,
}

/// Picks the spring config: a file wins over a preset, which wins over the defaults.
pub fn resolve_config(path: Option<&Path>, preset: Option<&str>) -> Result<SpringConfig> {
    if let Some(path) = path {
        if preset.is_some() {
            tracing::warn!("both --config and --preset given, using {}", path.display());
        }
        return SpringConfig::load(path)
            .with_context(|| format!("Failed to load spring config {}", path.display()));
    }

    match preset {
        Some(name) => SpringConfig::preset(name).with_context(|| {
            format!(
                "Unknown preset '{name}'. Available: {}",
                PRESET_NAMES.join(", ")
            )
        }),
        None => Ok(SpringConfig::default()),
    }
}

/// Steps the configured spring, returning the starting row plus one row per step.
pub fn run(config: &SpringConfig, args: &SimulateArgs) -> Result<Vec<Sample>> {
    if !args.dt.is_finite() || args.dt < 0.0 {
        anyhow::bail!("--dt must be finite and >= 0, got {}", args.dt);
    }

    let mut spring = config
        .build(args.from, args.to)
        .context("Invalid spring config")?;
    tracing::info!(
        mode = ?config.mode,
        stiffness = config.stiffness,
        damping_ratio = config.damping_ratio,
        steps = args.steps,
        "simulating"
    );

    let mut samples = Vec::with_capacity(args.steps + 1);
    samples.push(Sample {
        step: 0,
        time: 0.0,
        position: spring.value(),
        velocity: spring.velocity(),
    });

    let mut settled_at = None;
    for step in 1..=args.steps {
        spring.tick(args.dt);
        if settled_at.is_none() && spring.is_settled() {
            settled_at = Some(step);
        }
        samples.push(Sample {
            step,
            time: step as f64 * args.dt,
            position: spring.value(),
            velocity: spring.velocity(),
        });
    }

    match settled_at {
        Some(step) => tracing::info!(step, "spring settled"),
        None => tracing::info!("spring still moving after {} steps", args.steps),
    }
    Ok(samples)
}

pub fn write_samples<W: Write>(out: &mut W, samples: &[Sample], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Csv => {
            writeln!(out, "step,time,position,velocity")?;
            for s in samples {
                writeln!(out, "{},{},{},{}", s.step, s.time, s.position, s.velocity)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, samples)
                .context("Failed to serialize samples")?;
            writeln!(out)?;
        }
    }
    Ok(())
}

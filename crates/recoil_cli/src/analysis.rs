//! `recoil bounds` and `recoil compare`

use std::io::Write;

use anyhow::Result;
use recoil_math::{fast_atan, fast_neg_exp};
use recoil_spring::{spring_elastic, spring_precise, SpringParams, SpringState};

/// Smallest step [`compare`] accepts. One second at this step is 10 000 steps.
pub const MIN_COMPARE_DT: f64 = 1e-4;

/// Damping ratios swept by [`compare`]
pub const DAMPING_SWEEP: [f64; 9] = [0.0, 0.1, 0.3, 0.5, 0.8, 1.0, 1.2, 2.0, 4.0];

/// Worst observed error of one approximation over a range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorBound {
    pub name: &'static str,
    pub lower: f64,
    pub upper: f64,
    pub max_abs: f64,
    /// Worst relative error, `None` where the reference crosses zero
    pub max_rel: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundsReport {
    pub samples: usize,
    pub bounds: Vec<ErrorBound>,
}

/// Deviation of the fast integrator over one second of travel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deviation {
    pub damping_ratio: f64,
    pub single_step_position: f64,
    pub single_step_velocity: f64,
    pub trajectory_position: f64,
}

fn measure(
    name: &'static str,
    lower: f64,
    upper: f64,
    samples: usize,
    relative: bool,
    approx: impl Fn(f64) -> f64,
    exact: impl Fn(f64) -> f64,
) -> ErrorBound {
    let mut max_abs = 0.0f64;
    let mut max_rel = 0.0f64;
    for i in 0..=samples {
        let x = lower + (upper - lower) * i as f64 / samples as f64;
        let reference = exact(x);
        let err = (approx(x) - reference).abs();
        max_abs = max_abs.max(err);
        if relative && reference != 0.0 {
            max_rel = max_rel.max(err / reference.abs());
        }
    }
    ErrorBound {
        name,
        lower,
        upper,
        max_abs,
        max_rel: relative.then_some(max_rel),
    }
}

/// Samples both approximations on `[0, max_x]` (atan on `[-max_x, max_x]`).
///
/// `fast_neg_exp` is also reported on the short ranges animation steps
/// actually hit.
pub fn bounds(max_x: f64, samples: usize) -> Result<BoundsReport> {
    if !max_x.is_finite() || max_x <= 0.0 {
        anyhow::bail!("--max-x must be finite and > 0, got {max_x}");
    }
    if samples == 0 {
        anyhow::bail!("--samples must be at least 1");
    }

    let neg_exp = |x: f64| fast_neg_exp(x);
    let exp = |x: f64| (-x).exp();

    let mut bounds: Vec<ErrorBound> = [0.1, 0.5, 1.0, 2.0]
        .into_iter()
        .filter(|&limit| limit < max_x)
        .map(|limit| measure("fast_neg_exp", 0.0, limit, samples, true, neg_exp, exp))
        .collect();
    bounds.push(measure("fast_neg_exp", 0.0, max_x, samples, true, neg_exp, exp));
    bounds.push(measure(
        "fast_atan",
        -max_x,
        max_x,
        samples,
        false,
        |x: f64| fast_atan(x),
        f64::atan,
    ));

    tracing::debug!(count = bounds.len(), samples, "measured approximation bounds");
    Ok(BoundsReport { samples, bounds })
}

/// Steps both integrators from rest toward a unit target for one second at
/// each damping ratio in [`DAMPING_SWEEP`].
pub fn compare(stiffness: f64, dt: f64) -> Result<Vec<Deviation>> {
    if !dt.is_finite() || dt < MIN_COMPARE_DT {
        anyhow::bail!("--dt must be finite and >= {MIN_COMPARE_DT}, got {dt}");
    }
    let steps = (1.0 / dt).ceil() as usize;

    DAMPING_SWEEP
        .iter()
        .map(|&damping_ratio| -> Result<Deviation> {
            let params = SpringParams::new(stiffness, damping_ratio)?;
            let start = SpringState::new(0.0f64, 0.0f64);

            let fast = spring_elastic(dt, start, 1.0, 0.0, params);
            let exact = spring_precise(dt, start, 1.0, 0.0, params);

            let (mut a, mut b) = (start, start);
            let mut trajectory_position = 0.0f64;
            for _ in 0..steps {
                a = spring_elastic(dt, a, 1.0, 0.0, params);
                b = spring_precise(dt, b, 1.0, 0.0, params);
                trajectory_position = trajectory_position.max((a.position - b.position).abs());
            }

            Ok(Deviation {
                damping_ratio,
                single_step_position: (fast.position - exact.position).abs(),
                single_step_velocity: (fast.velocity - exact.velocity).abs(),
                trajectory_position,
            })
        })
        .collect()
}

pub fn write_bounds<W: Write>(out: &mut W, report: &BoundsReport) -> Result<()> {
    writeln!(out, "{} samples per range", report.samples)?;
    writeln!(
        out,
        "{:<14} {:>20} {:>12} {:>12}",
        "function", "range", "max abs", "max rel"
    )?;
    for bound in &report.bounds {
        let range = format!("[{}, {}]", bound.lower, bound.upper);
        let rel = bound
            .max_rel
            .map_or_else(|| "-".to_string(), |r| format!("{r:.3e}"));
        writeln!(
            out,
            "{:<14} {:>20} {:>12.3e} {:>12}",
            bound.name, range, bound.max_abs, rel
        )?;
    }
    Ok(())
}

pub fn write_comparison<W: Write>(
    out: &mut W,
    stiffness: f64,
    dt: f64,
    rows: &[Deviation],
) -> Result<()> {
    writeln!(out, "elastic vs precise, stiffness {stiffness} rad/s, dt {dt} s")?;
    writeln!(
        out,
        "{:>6} {:>14} {:>14} {:>14}",
        "zeta", "step pos", "step vel", "1s traj pos"
    )?;
    for row in rows {
        writeln!(
            out,
            "{:>6} {:>14.3e} {:>14.3e} {:>14.3e}",
            row.damping_ratio,
            row.single_step_position,
            row.single_step_velocity,
            row.trajectory_position
        )?;
    }
    Ok(())
}

//! Recoil Spring
//!
//! Closed-form damped harmonic oscillator integrators for animation.
//!
//! # Features
//!
//! - **Exact steps**: every integrator solves the spring ODE in closed form, so
//!   results do not depend on how a span of time is split into frames (beyond
//!   approximation error)
//! - **All regimes**: under, critically and over damped, fast or precise
//! - **Smoothing variants**: velocity limited, duration limited, and double
//!   smoothed springs for tracking moving targets
//! - **Lane generic**: the same functions step `f32`, `f64` or packs of lanes
//! - **Tick wrapper**: [`Spring`] and [`SpringScheduler`] for callers that want
//!   state bookkeeping, loaded from TOML through [`SpringConfig`]
//!
//! The pure step functions never validate their inputs. Use
//! [`SpringParams::new`] or [`SpringConfig::validate`] at the boundary.

pub mod config;
pub mod damper;
pub mod error;
pub mod integrator;
pub mod params;
pub mod scheduler;
pub mod spring;
pub mod state;
pub mod variants;

pub use config::{ModeConfig, SpringConfig, PRESET_NAMES};
pub use damper::{damper, damper_precise};
pub use error::{Result, SpringError};
pub use integrator::{spring_elastic, spring_precise, spring_simple};
pub use params::{
    frequency_to_stiffness, halflife_to_stiffness, stiffness_to_halflife, DampingRegime,
    SpringParams,
};
pub use scheduler::{SpringId, SpringScheduler};
pub use spring::{Spring, SpringMode};
pub use state::{IntermediateState, SpringState};
pub use variants::{
    spring_simple_double_smoothing, spring_simple_duration_limit,
    spring_simple_velocity_smoothing,
};

pub use recoil_math::{
    double2, double3, double4, float2, float3, float4, Double2, Double3, Double4, Float2, Float3,
    Float4, Lanes, Real, SpringValue,
};

//! Recoil Math
//!
//! The numeric layer the spring integrators are written against.
//!
//! # Features
//!
//! - **Precision generic**: [`Real`] covers `f32` and `f64`
//! - **Lane generic**: [`Lanes`] packs up to N independent channels into one value
//! - **[`SpringValue`]**: the single trait every integrator is generic over
//! - **Fast approximations**: [`fast_neg_exp`] and [`fast_atan`] for per-frame hot paths

pub mod approx;
pub mod lanes;
pub mod real;
pub mod value;

pub use approx::{fast_atan, fast_neg_exp};
pub use num_traits::{Float, FloatConst, One, Zero};

pub use lanes::{
    double2, double3, double4, float2, float3, float4, Double2, Double3, Double4, Float2, Float3,
    Float4, Lanes,
};
pub use real::Real;
pub use value::SpringValue;

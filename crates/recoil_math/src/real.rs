//! Scalar precision abstraction

use std::fmt::Debug;

use num_traits::{Float, FloatConst};

/// A floating point scalar the integrators can run at.
///
/// Implemented for `f32` and `f64`. Everything beyond literal conversion
/// comes from [`num_traits::Float`].
pub trait Real: Float + FloatConst + Default + Debug + Send + Sync + 'static {
    /// Converts an `f64` literal into this precision.
    fn lit(value: f64) -> Self;

    /// Widens to `f64`, used for reporting and configuration round trips.
    fn to_f64_lossless(self) -> f64;
}

impl Real for f32 {
    #[inline(always)]
    fn lit(value: f64) -> Self {
        value as f32
    }

    #[inline(always)]
    fn to_f64_lossless(self) -> f64 {
        self as f64
    }
}

impl Real for f64 {
    #[inline(always)]
    fn lit(value: f64) -> Self {
        value
    }

    #[inline(always)]
    fn to_f64_lossless(self) -> f64 {
        self
    }
}

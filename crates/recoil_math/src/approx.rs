//! Cheap rational approximations used on per-frame hot paths.
//!
//! Measured over dense sweeps in `f64`:
//!
//! | function | range | max abs error | max rel error |
//! |----------|-------|---------------|---------------|
//! | [`fast_neg_exp`] | `[0, 0.1]` | | `1.3e-4` |
//! | [`fast_neg_exp`] | `[0, 1]` | | `1.3e-3` |
//! | [`fast_neg_exp`] | `[0, 2]` | | `8.7e-2` |
//! | [`fast_neg_exp`] | `[0, 10]` | `1.9e-2` | |
//! | [`fast_atan`] | `[-20, 20]` | `1.6e-3` rad | |
//!
//! `recoil bounds` reproduces the table.

use crate::Real;

/// Approximates `e^-x` for `x >= 0`.
///
/// Positive, monotonically decreasing, exactly `1` at `0` and never below
/// zero, so repeated application can only decay. Negative inputs are outside
/// the contract.
#[inline(always)]
#[must_use]
pub fn fast_neg_exp<T: Real>(x: T) -> T {
    T::one() / (T::one() + x + T::lit(0.48) * x * x + T::lit(0.235) * x * x * x)
}

/// Approximates `atan(x)` over the whole real line.
#[inline(always)]
#[must_use]
pub fn fast_atan<T: Real>(x: T) -> T {
    let z = x.abs();
    let w = if z > T::one() { z.recip() } else { z };
    let y = T::FRAC_PI_4() * w - w * (w - T::one()) * (T::lit(0.2447) + T::lit(0.0663) * w);
    let y = if z > T::one() { T::FRAC_PI_2() - y } else { y };
    y.copysign(x)
}

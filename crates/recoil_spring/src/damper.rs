//! Velocity-free exponential dampers
//!
//! A damper moves a value a fixed fraction of the remaining distance per unit
//! of time. Unlike the springs it carries no velocity, so it cannot
//! overshoot and needs no state beyond the value itself.

use recoil_math::{fast_neg_exp, Float, FloatConst, One, SpringValue};

/// Moves `value` toward `target` so the remaining distance halves every
/// `halflife` seconds, using the fast exponential.
///
/// Frame-rate independent: two steps of `dt` land where one step of `2·dt`
/// does, up to the approximation error.
#[inline]
pub fn damper<V: SpringValue>(
    delta_time: V::Scalar,
    value: V,
    target: V,
    halflife: V::Scalar,
    precision: V::Scalar,
) -> V {
    let blend =
        V::Scalar::one() - fast_neg_exp(V::Scalar::LN_2() * delta_time / (halflife + precision));
    value + (target - value).scale(blend)
}

/// [`damper`] with an exact exponential.
#[inline]
pub fn damper_precise<V: SpringValue>(
    delta_time: V::Scalar,
    value: V,
    target: V,
    halflife: V::Scalar,
    precision: V::Scalar,
) -> V {
    let blend = V::Scalar::one() - (-V::Scalar::LN_2() * delta_time / (halflife + precision)).exp();
    value + (target - value).scale(blend)
}

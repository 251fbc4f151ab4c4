//! Closed-form damped oscillator steps
//!
//! Each function advances one [`SpringState`] by `delta_time` seconds and
//! returns the new state. They are pure, allocation free and never check
//! their inputs; see the preconditions on each function.
//!
//! All three are generic over [`SpringValue`], so the same code steps an
//! `f64`, an `f32`, or a [`recoil_math::Float4`] of four independent lanes.

use recoil_math::{fast_neg_exp, Float, One, Real, SpringValue};

use crate::params::{classify, DampingRegime, SpringParams};
use crate::state::SpringState;

/// Critically damped step toward `target`.
///
/// The damping ratio is fixed at `1` by the formula. Requires
/// `stiffness > 0` and `delta_time >= 0`; a zero `delta_time` returns the
/// input state.
#[inline]
pub fn spring_simple<V: SpringValue>(
    delta_time: V::Scalar,
    state: SpringState<V>,
    target: V,
    stiffness: V::Scalar,
) -> SpringState<V> {
    let displacement = state.position - target;
    let j1 = state.velocity + displacement.scale(stiffness);
    let decay = fast_neg_exp(stiffness * delta_time);

    SpringState {
        position: (displacement + j1.scale(delta_time)).scale(decay) + target,
        velocity: (state.velocity - j1.scale(stiffness * delta_time)).scale(decay),
    }
}

/// General damped step using the fast exponential approximation.
///
/// Handles every damping ratio `>= 0`. `target_velocity` is the velocity the
/// spring should have on arrival, which lets it track a target moving at that
/// speed without lag. The regime is chosen from the discriminant
/// `ω² - (2ζω)²/4` with `params.precision` as the critical band.
///
/// The critical and underdamped branches share the decay
/// `fast_neg_exp(ζω·dt)`, with the oscillation carried as a `cos`/`sin`
/// pair, so they meet exactly at `ζ = 1`. The overdamped branch is a sum of
/// two modes decaying at `ζω ± h`, each through `fast_neg_exp`. Just above
/// `ζ = 1` it differs from the critical step by
/// `|v0 + ζω·x0|·dt·|fast_neg_exp(x) + fast_neg_exp'(x)|` at `x = ω·dt`,
/// which is below `1e-3` of the travel for `ω·dt <= 0.25`.
#[inline]
pub fn spring_elastic<V: SpringValue>(
    delta_time: V::Scalar,
    state: SpringState<V>,
    target: V,
    target_velocity: V,
    params: SpringParams<V::Scalar>,
) -> SpringState<V> {
    let two = V::Scalar::lit(2.0);
    let omega = params.stiffness;
    let precision = params.precision;

    let k = omega * omega;
    let c = two * params.damping_ratio * omega;
    let goal = target + target_velocity.scale(c / (k + precision));
    let y = c / two;
    let discriminant = k - c * c / V::Scalar::lit(4.0);

    let x0 = state.position - goal;
    let v0 = state.velocity;
    let j1 = v0 + x0.scale(y);
    let decay = fast_neg_exp(y * delta_time);

    match classify(discriminant, precision) {
        DampingRegime::Critical => SpringState {
            position: (x0 + j1.scale(delta_time)).scale(decay) + goal,
            velocity: (v0 - j1.scale(y * delta_time)).scale(decay),
        },
        DampingRegime::Underdamped => {
            let damped = discriminant.sqrt();
            let (sin, cos) = (damped * delta_time).sin_cos();
            let spread = sin / damped;
            SpringState {
                position: (x0.scale(cos) + j1.scale(spread)).scale(decay) + goal,
                velocity: (v0.scale(cos) - (v0.scale(y) + x0.scale(k)).scale(spread))
                    .scale(decay),
            }
        }
        DampingRegime::Overdamped => {
            let half_gap = (-discriminant).sqrt();
            let slow = y - half_gap;
            let fast = y + half_gap;
            let slow_weight = (v0 + x0.scale(fast)).scale((two * half_gap).recip());
            let fast_weight = x0 - slow_weight;
            let slow_decay = fast_neg_exp(slow * delta_time);
            let fast_decay = fast_neg_exp(fast * delta_time);
            SpringState {
                position: slow_weight.scale(slow_decay) + fast_weight.scale(fast_decay) + goal,
                velocity: -(slow_weight.scale(slow * slow_decay)
                    + fast_weight.scale(fast * fast_decay)),
            }
        }
    }
}

/// General damped step using the exact closed-form solutions.
///
/// Same contract as [`spring_elastic`], with real `exp`/`sin`/`cos`. The
/// regime is picked from the damping ratio directly: within
/// `params.precision` of `1` is critical.
#[inline]
pub fn spring_precise<V: SpringValue>(
    delta_time: V::Scalar,
    state: SpringState<V>,
    target: V,
    target_velocity: V,
    params: SpringParams<V::Scalar>,
) -> SpringState<V> {
    let one = V::Scalar::one();
    let omega = params.stiffness;
    let zeta = params.damping_ratio;
    let precision = params.precision;

    let k = omega * omega;
    let c = V::Scalar::lit(2.0) * zeta * omega;
    let goal = target + target_velocity.scale(c / (k + precision));

    let x0 = state.position - goal;
    let v0 = state.velocity;
    let a = zeta * omega;

    if (zeta - one).abs() < precision {
        let decay = (-omega * delta_time).exp();
        let b = v0 + x0.scale(omega);
        SpringState {
            position: (x0 + b.scale(delta_time)).scale(decay) + goal,
            velocity: (v0 - b.scale(omega * delta_time)).scale(decay),
        }
    } else if zeta < one {
        let damped = omega * (one - zeta * zeta).sqrt();
        let decay = (-a * delta_time).exp();
        let (sin, cos) = (damped * delta_time).sin_cos();
        let spread = sin / damped;
        SpringState {
            position: (x0.scale(cos) + (v0 + x0.scale(a)).scale(spread)).scale(decay) + goal,
            velocity: (v0.scale(cos) - (v0.scale(a) + x0.scale(k)).scale(spread)).scale(decay),
        }
    } else {
        let gap = omega * (zeta * zeta - one).sqrt();
        let r1 = -a + gap;
        let r2 = -a - gap;
        let c1 = (v0 - x0.scale(r2)).scale((r1 - r2).recip());
        let c2 = x0 - c1;
        let e1 = (r1 * delta_time).exp();
        let e2 = (r2 * delta_time).exp();
        SpringState {
            position: c1.scale(e1) + c2.scale(e2) + goal,
            velocity: c1.scale(r1 * e1) + c2.scale(r2 * e2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recoil_math::{float4, Float4};

    fn params(stiffness: f64, damping_ratio: f64) -> SpringParams<f64> {
        SpringParams::new_unchecked(stiffness, damping_ratio, 1e-5)
    }

    #[test]
    fn test_simple_single_step() {
        let next = spring_simple(0.1, SpringState::at_rest(0.0f64), 10.0, 5.0);
        assert!(next.position > 0.0 && next.position < 10.0);
        assert!(next.velocity > 0.0);
        // fast_neg_exp(0.5) = 1 / 1.679375
        assert!((next.position - 0.905_646).abs() < 1e-5);
        assert!((next.velocity - 15.157_257).abs() < 1e-5);
    }

    #[test]
    fn test_simple_zero_delta_is_exact_no_op() {
        let state = SpringState::new(2.0f64, -3.0);
        assert_eq!(spring_simple(0.0, state, 10.0, 5.0), state);

        let state = SpringState::new(float4(2.0, -1.0, 0.5, 8.0), float4(-3.0, 0.0, 4.0, 1.0));
        assert_eq!(spring_simple(0.0, state, Float4::splat(10.0), 5.0), state);
    }

    #[test]
    fn test_zero_delta_elastic_and_precise() {
        let state = SpringState::new(2.0f64, -3.0);
        for zeta in [0.3, 1.0, 2.5] {
            let elastic = spring_elastic(0.0, state, 10.0, 0.0, params(5.0, zeta));
            let precise = spring_precise(0.0, state, 10.0, 0.0, params(5.0, zeta));
            for next in [elastic, precise] {
                assert!((next.position - 2.0).abs() < 1e-12, "zeta {zeta}: {next:?}");
                assert!((next.velocity + 3.0).abs() < 1e-12, "zeta {zeta}: {next:?}");
            }
        }
    }

    #[test]
    fn test_rest_state_is_fixed_point() {
        let rest = SpringState::at_rest(10.0f64);
        for zeta in [0.0, 0.3, 1.0, 2.5] {
            for dt in [0.0, 1.0 / 60.0, 0.5, 3.0] {
                let p = params(7.0, zeta);
                assert_eq!(spring_elastic(dt, rest, 10.0, 0.0, p).position, 10.0);
                assert_eq!(spring_elastic(dt, rest, 10.0, 0.0, p).velocity, 0.0);
                assert_eq!(spring_precise(dt, rest, 10.0, 0.0, p).position, 10.0);
                assert!(spring_precise(dt, rest, 10.0, 0.0, p).velocity.abs() < 1e-12);
            }
            assert_eq!(spring_simple(0.25, rest, 10.0, 7.0), rest);
        }
    }

    #[test]
    fn test_underdamped_overshoots() {
        let mut state = SpringState::at_rest(0.0f64);
        let mut peak = 0.0f64;
        for _ in 0..240 {
            state = spring_elastic(1.0 / 60.0, state, 1.0, 0.0, params(10.0, 0.2));
            peak = peak.max(state.position);
        }
        assert!(peak > 1.3, "expected overshoot, peak {peak}");
    }

    #[test]
    fn test_overdamped_never_overshoots() {
        let mut state = SpringState::at_rest(0.0f64);
        for _ in 0..600 {
            state = spring_elastic(1.0 / 60.0, state, 1.0, 0.0, params(10.0, 2.0));
            assert!(state.position <= 1.0);
            let exact = spring_precise(1.0 / 60.0, state, 1.0, 0.0, params(10.0, 2.0));
            assert!(exact.position <= 1.0);
        }
    }

    #[test]
    fn test_f32_scalar_path() {
        let mut state = SpringState::at_rest(0.0f32);
        for _ in 0..200 {
            state = spring_simple(0.1f32, state, 10.0, 5.0);
        }
        assert!((state.position - 10.0).abs() < 0.01);
        assert!(state.velocity.abs() < 0.01);
    }
}

//! Smoothing variants built on [`spring_simple`]
//!
//! Each variant threads an [`IntermediateState`] alongside the spring state.
//! The caller seeds it with [`IntermediateState::from_state`] when the
//! animation starts and feeds the returned copy back on every step.
//!
//! Per-lane decisions (direction of travel, whether the intermediate target
//! has arrived) use [`SpringValue::select_gt`] so that lanes never take a
//! branch on each other's data.

use recoil_math::{Float, Real, SpringValue, Zero};

use crate::integrator::spring_simple;
use crate::state::{IntermediateState, SpringState};

/// Spring toward a target that is approached at a bounded linear speed.
///
/// The intermediate position walks toward `target` at `smoothing_velocity`
/// units per second and never passes it. The spring chases a point
/// `anticipation` time constants (`1 / stiffness` seconds each) further along
/// that walk, which removes the lag a spring shows when chasing a moving
/// point. The intermediate velocity reports the walking speed applied this
/// step, zero once arrived.
pub fn spring_simple_velocity_smoothing<V: SpringValue>(
    delta_time: V::Scalar,
    state: SpringState<V>,
    intermediate: IntermediateState<V>,
    target: V,
    smoothing_velocity: V::Scalar,
    anticipation: V::Scalar,
    stiffness: V::Scalar,
) -> (SpringState<V>, IntermediateState<V>) {
    let zero = V::splat(V::Scalar::zero());
    let current = intermediate.position;
    let offset = target - current;
    let distance = offset.abs();

    let direction = offset.select_gt(
        zero,
        V::splat(smoothing_velocity),
        V::splat(-smoothing_velocity),
    );

    let future_time = anticipation / stiffness;
    let future_target = distance.select_gt(
        V::splat(future_time * smoothing_velocity),
        current + direction.scale(future_time),
        target,
    );

    let state = spring_simple(delta_time, state, future_target, stiffness);

    let travel = V::splat(delta_time * smoothing_velocity);
    let intermediate = IntermediateState {
        position: distance.select_gt(travel, current + direction.scale(delta_time), target),
        velocity: distance.select_gt(travel, direction, zero),
    };

    (state, intermediate)
}

/// Spring whose target arrives within `duration` seconds.
///
/// `duration` is the time left until arrival; callers count it down by
/// `delta_time` each step (the [`crate::Spring`] wrapper does). The
/// intermediate position moves linearly at whatever speed reaches `target`
/// in the remaining time and the spring chases a point `delta_time +
/// anticipation / stiffness` seconds ahead along that line. Once the look
/// ahead passes the deadline the spring chases `target` itself.
pub fn spring_simple_duration_limit<V: SpringValue>(
    delta_time: V::Scalar,
    state: SpringState<V>,
    intermediate: IntermediateState<V>,
    target: V,
    duration: V::Scalar,
    anticipation: V::Scalar,
    stiffness: V::Scalar,
) -> (SpringState<V>, IntermediateState<V>) {
    let current = intermediate.position;
    let min_time = duration.max(delta_time);

    let linear_velocity = if min_time > V::Scalar::zero() {
        (target - current).scale(min_time.recip())
    } else {
        V::default()
    };

    let future_time = delta_time + anticipation / stiffness;
    let future_target = if future_time < duration {
        current + linear_velocity.scale(future_time)
    } else {
        target
    };

    let state = spring_simple(delta_time, state, future_target, stiffness);

    let intermediate = IntermediateState {
        position: current + linear_velocity.scale(delta_time),
        velocity: linear_velocity,
    };

    (state, intermediate)
}

/// Two cascaded critically damped springs.
///
/// The inner spring (the intermediate state) chases `target` and the outer
/// spring chases the inner spring's new position, both at twice
/// `stiffness`. The result starts with zero acceleration and eases in
/// instead of jumping off the mark.
pub fn spring_simple_double_smoothing<V: SpringValue>(
    delta_time: V::Scalar,
    state: SpringState<V>,
    intermediate: IntermediateState<V>,
    target: V,
    stiffness: V::Scalar,
) -> (SpringState<V>, IntermediateState<V>) {
    let doubled = stiffness * V::Scalar::lit(2.0);
    let inner = spring_simple(delta_time, intermediate.as_state(), target, doubled);
    let outer = spring_simple(delta_time, state, inner.position, doubled);
    (outer, IntermediateState::from_state(inner))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 1.0 / 60.0;

    #[test]
    fn test_velocity_smoothing_walks_linearly_and_clamps() {
        let mut state = SpringState::at_rest(0.0f64);
        let mut intermediate = IntermediateState::from_state(state);

        for frame in 0..600 {
            let before = intermediate.position;
            (state, intermediate) =
                spring_simple_velocity_smoothing(DT, state, intermediate, 10.0, 4.0, 2.0, 5.0);
            assert!(intermediate.position >= before);
            assert!(intermediate.position <= 10.0);
            assert!(state.position <= 10.0 + 1e-9, "overshoot at frame {frame}");
        }

        assert_eq!(intermediate.position, 10.0);
        assert_eq!(intermediate.velocity, 0.0);
        assert!((state.position - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_velocity_smoothing_after_one_second() {
        let mut state = SpringState::at_rest(0.0f64);
        let mut intermediate = IntermediateState::from_state(state);
        for _ in 0..60 {
            (state, intermediate) =
                spring_simple_velocity_smoothing(DT, state, intermediate, 10.0, 4.0, 2.0, 5.0);
        }
        // Walked 4 units/s for one second.
        assert!((intermediate.position - 4.0).abs() < 1e-9);
        assert_eq!(intermediate.velocity, 4.0);
        // The anticipated target keeps the spring near the walk instead of
        // trailing it by a time constant.
        assert!((state.position - 4.0).abs() < 0.2, "{state:?}");
    }

    #[test]
    fn test_velocity_smoothing_moves_toward_lower_targets() {
        let state = SpringState::at_rest(5.0f64);
        let intermediate = IntermediateState::from_state(state);
        let (next, intermediate) =
            spring_simple_velocity_smoothing(DT, state, intermediate, -5.0, 3.0, 2.0, 5.0);
        assert!(intermediate.position < 5.0);
        assert_eq!(intermediate.velocity, -3.0);
        assert!(next.velocity < 0.0);
    }

    #[test]
    fn test_duration_limit_arrives_on_time() {
        let mut state = SpringState::at_rest(0.0f64);
        let mut intermediate = IntermediateState::from_state(state);
        let mut remaining = 1.0f64;

        for frame in 1..=90 {
            (state, intermediate) = spring_simple_duration_limit(
                DT,
                state,
                intermediate,
                10.0,
                remaining,
                2.0,
                10.0,
            );
            remaining = (remaining - DT).max(0.0);

            if frame == 30 {
                assert!((intermediate.position - 5.0).abs() < 1e-6);
            }
        }

        assert!((intermediate.position - 10.0).abs() < 1e-9);
        assert!((state.position - 10.0).abs() < 0.05, "{state:?}");
    }

    #[test]
    fn test_duration_limit_zero_time_snaps_intermediate() {
        let state = SpringState::at_rest(0.0f64);
        let intermediate = IntermediateState::from_state(state);

        let (_, intermediate) =
            spring_simple_duration_limit(0.0, state, intermediate, 10.0, 0.0, 2.0, 10.0);
        assert_eq!(intermediate.position, 0.0);
        assert_eq!(intermediate.velocity, 0.0);

        let (next, intermediate) =
            spring_simple_duration_limit(DT, state, intermediate, 10.0, 0.0, 2.0, 10.0);
        assert!((intermediate.position - 10.0).abs() < 1e-9);
        assert!(next.position > 0.0);
    }

    #[test]
    fn test_double_smoothing_starts_slower() {
        let start = SpringState::at_rest(0.0f64);
        let simple = spring_simple(DT, start, 10.0, 5.0);
        let (double, inner) = spring_simple_double_smoothing(
            DT,
            start,
            IntermediateState::from_state(start),
            10.0,
            5.0,
        );
        assert!(double.position > 0.0);
        assert!(double.position < simple.position);
        assert!(inner.position > double.position);
        assert_eq!(inner, IntermediateState::from_state(spring_simple(DT, start, 10.0, 10.0)));
    }
}

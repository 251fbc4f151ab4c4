//! Stateful spring
//!
//! [`Spring`] bundles the caller-owned state of one animated value with its
//! target, parameters and integration mode, and exposes a single
//! [`Spring::tick`] entry point. Scheduling stays with the embedding
//! application: nothing here reads a clock.

use std::time::Duration;

use recoil_math::{Float, Real, SpringValue, Zero};

use crate::integrator::{spring_elastic, spring_precise, spring_simple};
use crate::params::SpringParams;
use crate::state::{IntermediateState, SpringState};
use crate::variants::{
    spring_simple_double_smoothing, spring_simple_duration_limit,
    spring_simple_velocity_smoothing,
};

/// Distance to the target below which a spring may settle.
pub const DEFAULT_REST_DISTANCE: f64 = 1e-3;
/// Speed below which a spring may settle.
pub const DEFAULT_REST_VELOCITY: f64 = 1e-3;

/// Which integrator a [`Spring`] steps with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpringMode<S> {
    /// [`spring_simple`], critically damped, ignores `damping_ratio`
    Simple,
    /// [`spring_elastic`]
    Elastic,
    /// [`spring_precise`]
    Precise,
    /// [`spring_simple_velocity_smoothing`]
    VelocitySmoothing {
        smoothing_velocity: S,
        anticipation: S,
    },
    /// [`spring_simple_duration_limit`]; `duration` restarts on every retarget
    DurationLimit { duration: S, anticipation: S },
    /// [`spring_simple_double_smoothing`]
    DoubleSmoothing,
}

impl<S> SpringMode<S> {
    /// Whether the mode threads an intermediate state.
    pub fn uses_intermediate(&self) -> bool {
        matches!(
            self,
            SpringMode::VelocitySmoothing { .. }
                | SpringMode::DurationLimit { .. }
                | SpringMode::DoubleSmoothing
        )
    }
}

/// A value animated by a spring, advanced by explicit ticks.
#[derive(Clone, Debug)]
pub struct Spring<V: SpringValue> {
    state: SpringState<V>,
    intermediate: IntermediateState<V>,
    target: V,
    target_velocity: V,
    params: SpringParams<V::Scalar>,
    mode: SpringMode<V::Scalar>,
    remaining: V::Scalar,
    rest_distance: V::Scalar,
    rest_velocity: V::Scalar,
    settled: bool,
}

impl<V: SpringValue> Spring<V> {
    /// A spring resting at `initial` with its target at the same place.
    pub fn new(params: SpringParams<V::Scalar>, mode: SpringMode<V::Scalar>, initial: V) -> Self {
        let state = SpringState::at_rest(initial);
        Self {
            state,
            intermediate: IntermediateState::from_state(state),
            target: initial,
            target_velocity: V::default(),
            params,
            mode,
            remaining: mode_duration(&mode),
            rest_distance: V::Scalar::lit(DEFAULT_REST_DISTANCE),
            rest_velocity: V::Scalar::lit(DEFAULT_REST_VELOCITY),
            settled: true,
        }
    }

    pub fn with_rest_thresholds(mut self, distance: V::Scalar, velocity: V::Scalar) -> Self {
        self.rest_distance = distance;
        self.rest_velocity = velocity;
        self
    }

    pub fn with_target_velocity(mut self, target_velocity: V) -> Self {
        self.target_velocity = target_velocity;
        self.settled = false;
        self
    }

    pub fn with_velocity(mut self, velocity: V) -> Self {
        self.state.velocity = velocity;
        self.settled = false;
        self
    }

    /// Current animated value.
    pub fn value(&self) -> V {
        self.state.position
    }

    pub fn velocity(&self) -> V {
        self.state.velocity
    }

    pub fn target(&self) -> V {
        self.target
    }

    pub fn target_velocity(&self) -> V {
        self.target_velocity
    }

    pub fn state(&self) -> SpringState<V> {
        self.state
    }

    pub fn intermediate(&self) -> IntermediateState<V> {
        self.intermediate
    }

    pub fn params(&self) -> SpringParams<V::Scalar> {
        self.params
    }

    pub fn mode(&self) -> SpringMode<V::Scalar> {
        self.mode
    }

    /// Time left before a [`SpringMode::DurationLimit`] target must arrive.
    pub fn remaining_duration(&self) -> V::Scalar {
        self.remaining
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Retargets the spring, keeping its current velocity.
    pub fn set_target(&mut self, target: V) {
        if target == self.target && self.settled {
            return;
        }
        tracing::debug!(goal = ?target, from = ?self.state.position, "spring retargeted");
        self.target = target;
        self.remaining = mode_duration(&self.mode);
        self.settled = false;
    }

    pub fn set_target_velocity(&mut self, target_velocity: V) {
        self.target_velocity = target_velocity;
        self.settled = false;
    }

    pub fn set_params(&mut self, params: SpringParams<V::Scalar>) {
        self.params = params;
        self.settled = false;
    }

    /// Switches integrator. The intermediate state restarts from the
    /// current state so the switch does not jump.
    pub fn set_mode(&mut self, mode: SpringMode<V::Scalar>) {
        tracing::debug!(?mode, "spring mode changed");
        self.mode = mode;
        self.intermediate = IntermediateState::from_state(self.state);
        self.remaining = mode_duration(&mode);
        self.settled = false;
    }

    /// Jumps straight to the target and stops.
    pub fn snap_to_target(&mut self) {
        self.state = SpringState::at_rest(self.target);
        self.intermediate = IntermediateState::from_state(self.state);
        self.remaining = V::Scalar::zero();
        self.settled = true;
    }

    /// Advances by `delta_time` seconds and returns the new value.
    ///
    /// A settled spring does not integrate until retargeted.
    pub fn tick(&mut self, delta_time: V::Scalar) -> V {
        if self.settled {
            return self.state.position;
        }

        let stiffness = self.params.stiffness;
        match self.mode {
            SpringMode::Simple => {
                self.state = spring_simple(delta_time, self.state, self.target, stiffness);
            }
            SpringMode::Elastic => {
                self.state = spring_elastic(
                    delta_time,
                    self.state,
                    self.target,
                    self.target_velocity,
                    self.params,
                );
            }
            SpringMode::Precise => {
                self.state = spring_precise(
                    delta_time,
                    self.state,
                    self.target,
                    self.target_velocity,
                    self.params,
                );
            }
            SpringMode::VelocitySmoothing {
                smoothing_velocity,
                anticipation,
            } => {
                (self.state, self.intermediate) = spring_simple_velocity_smoothing(
                    delta_time,
                    self.state,
                    self.intermediate,
                    self.target,
                    smoothing_velocity,
                    anticipation,
                    stiffness,
                );
            }
            SpringMode::DurationLimit { anticipation, .. } => {
                (self.state, self.intermediate) = spring_simple_duration_limit(
                    delta_time,
                    self.state,
                    self.intermediate,
                    self.target,
                    self.remaining,
                    anticipation,
                    stiffness,
                );
                self.remaining = (self.remaining - delta_time).max(V::Scalar::zero());
            }
            SpringMode::DoubleSmoothing => {
                (self.state, self.intermediate) = spring_simple_double_smoothing(
                    delta_time,
                    self.state,
                    self.intermediate,
                    self.target,
                    stiffness,
                );
            }
        }

        if self.at_rest() {
            tracing::trace!(goal = ?self.target, "spring settled");
            self.snap_to_target();
        }

        self.state.position
    }

    /// [`Spring::tick`] taking a [`Duration`].
    pub fn tick_duration(&mut self, elapsed: Duration) -> V {
        self.tick(V::Scalar::lit(elapsed.as_secs_f64()))
    }

    fn at_rest(&self) -> bool {
        let near = (self.state.position - self.target).max_abs() <= self.rest_distance;
        let slow = self.state.velocity.max_abs() <= self.rest_velocity;
        let inner_done = !self.mode.uses_intermediate()
            || ((self.intermediate.position - self.target).max_abs() <= self.rest_distance
                && self.intermediate.velocity.max_abs() <= self.rest_velocity);
        // A spring tracking a moving target never settles on its own.
        let steady = self.target_velocity.max_abs() == V::Scalar::zero();
        near && slow && inner_done && steady
    }
}

fn mode_duration<S: Real>(mode: &SpringMode<S>) -> S {
    match mode {
        SpringMode::DurationLimit { duration, .. } => *duration,
        _ => S::zero(),
    }
}

//! Caller-owned oscillator state

use recoil_math::SpringValue;

/// Position and velocity of one animated channel (or pack of lanes).
///
/// Created when an animation starts and fed back into the next step. The
/// integrators take it by value and return the advanced copy.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpringState<V> {
    pub position: V,
    pub velocity: V,
}

impl<V: SpringValue> SpringState<V> {
    pub fn new(position: V, velocity: V) -> Self {
        Self { position, velocity }
    }

    /// A state sitting still at `position`.
    pub fn at_rest(position: V) -> Self {
        Self {
            position,
            velocity: V::default(),
        }
    }
}

/// Extra state carried by the smoothing variants.
///
/// Velocity smoothing and duration limiting only move `position` (the
/// linearly advancing intermediate target). Double smoothing uses both fields
/// as the state of its inner spring.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct IntermediateState<V> {
    pub position: V,
    pub velocity: V,
}

impl<V: SpringValue> IntermediateState<V> {
    pub fn new(position: V, velocity: V) -> Self {
        Self { position, velocity }
    }

    /// Seeds the intermediate state from the outer spring, which is where
    /// every variant expects it to start.
    pub fn from_state(state: SpringState<V>) -> Self {
        Self {
            position: state.position,
            velocity: state.velocity,
        }
    }

    pub(crate) fn as_state(self) -> SpringState<V> {
        SpringState {
            position: self.position,
            velocity: self.velocity,
        }
    }
}

//! Spring scheduler
//!
//! Holds a set of springs and advances them together. The caller supplies the
//! elapsed time for each tick; the scheduler never reads a clock.

use recoil_math::SpringValue;
use slotmap::{new_key_type, SlotMap};

use crate::spring::Spring;

new_key_type! {
    pub struct SpringId;
}

/// Owns springs of one value type and ticks all of them at once
pub struct SpringScheduler<V: SpringValue> {
    springs: SlotMap<SpringId, Spring<V>>,
}

impl<V: SpringValue> SpringScheduler<V> {
    pub fn new() -> Self {
        Self {
            springs: SlotMap::with_key(),
        }
    }

    pub fn insert(&mut self, spring: Spring<V>) -> SpringId {
        let id = self.springs.insert(spring);
        tracing::debug!(?id, count = self.springs.len(), "spring added");
        id
    }

    pub fn get(&self, id: SpringId) -> Option<&Spring<V>> {
        self.springs.get(id)
    }

    pub fn get_mut(&mut self, id: SpringId) -> Option<&mut Spring<V>> {
        self.springs.get_mut(id)
    }

    pub fn remove(&mut self, id: SpringId) -> Option<Spring<V>> {
        let spring = self.springs.remove(id);
        if spring.is_some() {
            tracing::debug!(?id, count = self.springs.len(), "spring removed");
        }
        spring
    }

    /// Retargets one spring. Returns `false` if the id is stale.
    pub fn set_target(&mut self, id: SpringId, target: V) -> bool {
        match self.springs.get_mut(id) {
            Some(spring) => {
                spring.set_target(target);
                true
            }
            None => false,
        }
    }

    /// Current value of one spring.
    pub fn value(&self, id: SpringId) -> Option<V> {
        self.springs.get(id).map(Spring::value)
    }

    /// Advance every spring by `delta_time` seconds.
    ///
    /// Returns how many springs are still moving afterwards.
    pub fn tick(&mut self, delta_time: V::Scalar) -> usize {
        let mut active = 0;
        for (_, spring) in self.springs.iter_mut() {
            if spring.is_settled() {
                continue;
            }
            spring.tick(delta_time);
            if !spring.is_settled() {
                active += 1;
            }
        }
        active
    }

    /// Check if any springs are still moving
    pub fn has_active_animations(&self) -> bool {
        self.springs.iter().any(|(_, s)| !s.is_settled())
    }

    /// Drops every settled spring and returns how many were removed.
    pub fn prune_settled(&mut self) -> usize {
        let before = self.springs.len();
        self.springs.retain(|_, spring| !spring.is_settled());
        let removed = before - self.springs.len();
        if removed > 0 {
            tracing::debug!(removed, remaining = self.springs.len(), "pruned settled springs");
        }
        removed
    }

    /// Iterate over all springs (immutable)
    pub fn iter(&self) -> impl Iterator<Item = (SpringId, &Spring<V>)> {
        self.springs.iter()
    }

    /// Iterate over all springs (mutable)
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (SpringId, &mut Spring<V>)> {
        self.springs.iter_mut()
    }

    /// Get the number of springs in the scheduler
    pub fn len(&self) -> usize {
        self.springs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.springs.is_empty()
    }
}

impl<V: SpringValue> Default for SpringScheduler<V> {
    fn default() -> Self {
        Self::new()
    }
}

//! The value abstraction spring integrators are generic over

use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

use num_traits::Float;

use crate::{Lanes, Real};

/// A value a spring can animate: one scalar channel or a pack of lanes.
///
/// Arithmetic is lane-wise. Spring parameters (stiffness, damping ratio,
/// precision) stay [`SpringValue::Scalar`] and are shared by all lanes, so
/// regime selection never differs between lanes. Anything that does depend
/// on lane data goes through [`SpringValue::select_gt`] instead of a branch.
pub trait SpringValue:
    Copy
    + PartialEq
    + Default
    + Debug
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    type Scalar: Real;

    /// Number of independent channels.
    const LANES: usize;

    fn splat(value: Self::Scalar) -> Self;

    fn map(self, f: impl FnMut(Self::Scalar) -> Self::Scalar) -> Self;

    fn map2(
        self,
        rhs: Self,
        f: impl FnMut(Self::Scalar, Self::Scalar) -> Self::Scalar,
    ) -> Self;

    /// Per lane: `self > rhs ? if_true : if_false`.
    fn select_gt(self, rhs: Self, if_true: Self, if_false: Self) -> Self;

    /// Largest absolute lane value, used for settle checks.
    fn max_abs(self) -> Self::Scalar;

    /// Reads one lane. Scalars only have lane `0`.
    fn lane(self, index: usize) -> Self::Scalar;

    #[inline(always)]
    fn abs(self) -> Self {
        self.map(|x| x.abs())
    }

    #[inline(always)]
    fn scale(self, factor: Self::Scalar) -> Self {
        self * Self::splat(factor)
    }
}

macro_rules! impl_scalar_value {
    ($t:ty) => {
        impl SpringValue for $t {
            type Scalar = $t;

            const LANES: usize = 1;

            #[inline(always)]
            fn splat(value: $t) -> $t {
                value
            }

            #[inline(always)]
            fn map(self, mut f: impl FnMut($t) -> $t) -> $t {
                f(self)
            }

            #[inline(always)]
            fn map2(self, rhs: $t, mut f: impl FnMut($t, $t) -> $t) -> $t {
                f(self, rhs)
            }

            #[inline(always)]
            fn select_gt(self, rhs: $t, if_true: $t, if_false: $t) -> $t {
                if self > rhs {
                    if_true
                } else {
                    if_false
                }
            }

            #[inline(always)]
            fn max_abs(self) -> $t {
                <$t>::abs(self)
            }

            #[inline(always)]
            fn lane(self, _index: usize) -> $t {
                self
            }
        }
    };
}

impl_scalar_value!(f32);
impl_scalar_value!(f64);

impl<T: Real, const N: usize> SpringValue for Lanes<T, N> {
    type Scalar = T;

    const LANES: usize = N;

    #[inline(always)]
    fn splat(value: T) -> Self {
        Lanes::splat(value)
    }

    #[inline(always)]
    fn map(self, f: impl FnMut(T) -> T) -> Self {
        Lanes::map(self, f)
    }

    #[inline(always)]
    fn map2(self, rhs: Self, f: impl FnMut(T, T) -> T) -> Self {
        Lanes::map2(self, rhs, f)
    }

    #[inline(always)]
    fn select_gt(self, rhs: Self, if_true: Self, if_false: Self) -> Self {
        Lanes::select(self.gt(rhs), if_true, if_false)
    }

    #[inline(always)]
    fn max_abs(self) -> T {
        Lanes::max_abs(self)
    }

    #[inline(always)]
    fn lane(self, index: usize) -> T {
        self.0[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{float4, Float4};

    fn double_it<V: SpringValue>(v: V) -> V {
        v.scale(V::Scalar::lit(2.0))
    }

    #[test]
    fn test_scalar_and_lanes_share_one_code_path() {
        assert_eq!(double_it(1.5f64), 3.0);
        assert_eq!(double_it(-0.25f32), -0.5);
        assert_eq!(
            double_it(float4(1.0, -2.0, 0.0, 4.0)),
            float4(2.0, -4.0, 0.0, 8.0)
        );
    }

    #[test]
    fn test_select_gt_is_per_lane() {
        let d = float4(-1.0, 3.0, 0.0, 2.0);
        let picked = d.select_gt(Float4::splat(0.0), Float4::splat(1.0), Float4::splat(-1.0));
        assert_eq!(picked, float4(-1.0, 1.0, -1.0, 1.0));

        assert_eq!(2.0f64.select_gt(1.0, 10.0, 20.0), 10.0);
        assert_eq!(1.0f64.select_gt(1.0, 10.0, 20.0), 20.0);
    }

    fn first_lane_distance<V: SpringValue>(v: V) -> V::Scalar {
        use crate::{One, Zero};
        let lane = v.lane(0);
        (lane * lane).sqrt().max(V::Scalar::zero()) * V::Scalar::one()
    }

    fn half_turn<V: SpringValue>() -> V::Scalar {
        use crate::FloatConst;
        V::Scalar::PI()
    }

    #[test]
    fn test_scalar_float_ops_through_associated_type() {
        assert_eq!(first_lane_distance(-3.0f64), 3.0);
        assert_eq!(first_lane_distance(float4(-2.0, 9.0, 0.0, 0.0)), 2.0);
        assert_eq!(half_turn::<Float4>(), std::f32::consts::PI);
    }

    #[test]
    fn test_lane_metadata() {
        assert_eq!(<f32 as SpringValue>::LANES, 1);
        assert_eq!(<Float4 as SpringValue>::LANES, 4);
        assert_eq!(SpringValue::lane(float4(1.0, 2.0, 3.0, 4.0), 2), 3.0);
        assert_eq!(SpringValue::max_abs(-3.0f64), 3.0);
    }
}

//! Fixed-width lane vectors
//!
//! [`Lanes`] packs `N` independent channels (RGBA, packed xyz, ...) so a single
//! integrator call advances all of them. Every operation is lane-wise; no
//! operation mixes lanes.

use std::ops::{Add, Div, Index, IndexMut, Mul, Neg, Sub};

use crate::Real;

/// `N` independent scalar channels stepped together.
#[derive(Clone, Copy, PartialEq, Debug)]
#[repr(transparent)]
pub struct Lanes<T, const N: usize>(pub [T; N]);

pub type Float2 = Lanes<f32, 2>;
pub type Float3 = Lanes<f32, 3>;
pub type Float4 = Lanes<f32, 4>;
pub type Double2 = Lanes<f64, 2>;
pub type Double3 = Lanes<f64, 3>;
pub type Double4 = Lanes<f64, 4>;

pub const fn float2(x: f32, y: f32) -> Float2 {
    Lanes([x, y])
}

pub const fn float3(x: f32, y: f32, z: f32) -> Float3 {
    Lanes([x, y, z])
}

pub const fn float4(x: f32, y: f32, z: f32, w: f32) -> Float4 {
    Lanes([x, y, z, w])
}

pub const fn double2(x: f64, y: f64) -> Double2 {
    Lanes([x, y])
}

pub const fn double3(x: f64, y: f64, z: f64) -> Double3 {
    Lanes([x, y, z])
}

pub const fn double4(x: f64, y: f64, z: f64, w: f64) -> Double4 {
    Lanes([x, y, z, w])
}

impl<T: Copy, const N: usize> Lanes<T, N> {
    /// Constructs a new [`Lanes`] from the given array.
    #[inline(always)]
    #[must_use]
    pub const fn new(lanes: [T; N]) -> Self {
        Self(lanes)
    }

    /// Constructs a new [`Lanes`] with every lane set to `value`.
    #[inline(always)]
    #[must_use]
    pub const fn splat(value: T) -> Self {
        Self([value; N])
    }

    /// Returns the underlying array.
    #[inline(always)]
    #[must_use]
    pub const fn to_array(self) -> [T; N] {
        self.0
    }

    /// Returns a [`Lanes`] with the function `f` applied to each lane in order.
    #[inline(always)]
    #[must_use]
    pub fn map<F>(self, f: F) -> Self
    where
        F: FnMut(T) -> T,
    {
        Self(self.0.map(f))
    }

    /// Returns a new [`Lanes`] with the function `f` applied to each pair of
    /// lanes from `self` and `rhs` in order.
    #[inline(always)]
    #[must_use]
    pub fn map2<F>(self, rhs: Self, mut f: F) -> Self
    where
        F: FnMut(T, T) -> T,
    {
        Self(std::array::from_fn(|i| f(self.0[i], rhs.0[i])))
    }

    /// Picks lanes from `if_true` where `mask` is set, else from `if_false`.
    #[inline(always)]
    #[must_use]
    pub fn select(mask: [bool; N], if_true: Self, if_false: Self) -> Self {
        Self(std::array::from_fn(|i| {
            if mask[i] {
                if_true.0[i]
            } else {
                if_false.0[i]
            }
        }))
    }
}

impl<T: Real, const N: usize> Lanes<T, N> {
    /// Lane-wise absolute value.
    #[inline(always)]
    #[must_use]
    pub fn abs(self) -> Self {
        self.map(T::abs)
    }

    /// Lane-wise sign, `-1`, `0` or `1`.
    ///
    /// Zero lanes stay zero, matching shader `sign` rather than
    /// [`num_traits::Float::signum`].
    #[inline(always)]
    #[must_use]
    pub fn sign(self) -> Self {
        self.map(|x| {
            if x > T::zero() {
                T::one()
            } else if x < T::zero() {
                -T::one()
            } else {
                T::zero()
            }
        })
    }

    /// Mask of lanes where `self > rhs`.
    #[inline(always)]
    #[must_use]
    pub fn gt(self, rhs: Self) -> [bool; N] {
        std::array::from_fn(|i| self.0[i] > rhs.0[i])
    }

    /// Largest absolute lane value.
    #[inline(always)]
    #[must_use]
    pub fn max_abs(self) -> T {
        self.0.iter().fold(T::zero(), |acc, x| acc.max(x.abs()))
    }
}

impl<T: Copy + Default, const N: usize> Default for Lanes<T, N> {
    fn default() -> Self {
        Self([T::default(); N])
    }
}

impl<T, const N: usize> From<[T; N]> for Lanes<T, N> {
    #[inline(always)]
    fn from(lanes: [T; N]) -> Self {
        Self(lanes)
    }
}

impl<T, const N: usize> From<Lanes<T, N>> for [T; N] {
    #[inline(always)]
    fn from(lanes: Lanes<T, N>) -> Self {
        lanes.0
    }
}

impl<T, const N: usize> Index<usize> for Lanes<T, N> {
    type Output = T;

    #[inline(always)]
    fn index(&self, index: usize) -> &T {
        &self.0[index]
    }
}

impl<T, const N: usize> IndexMut<usize> for Lanes<T, N> {
    #[inline(always)]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.0[index]
    }
}

macro_rules! impl_lane_op {
    ($op:ident, $fn:ident) => {
        impl<T: Copy + $op<Output = T>, const N: usize> $op for Lanes<T, N> {
            type Output = Self;

            #[inline(always)]
            fn $fn(self, rhs: Self) -> Self {
                self.map2(rhs, |a, b| a.$fn(b))
            }
        }

        impl<T: Copy + $op<Output = T>, const N: usize> $op<T> for Lanes<T, N> {
            type Output = Self;

            #[inline(always)]
            fn $fn(self, rhs: T) -> Self {
                self.map(|a| a.$fn(rhs))
            }
        }
    };
}

impl_lane_op!(Add, add);
impl_lane_op!(Sub, sub);
impl_lane_op!(Mul, mul);
impl_lane_op!(Div, div);

impl<T: Copy + Neg<Output = T>, const N: usize> Neg for Lanes<T, N> {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        self.map(|a| -a)
    }
}

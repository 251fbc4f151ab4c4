//! Spring parameters and unit conversions

use recoil_math::Real;

use crate::error::{Result, SpringError};

/// Natural frequency used when none is given.
pub const DEFAULT_STIFFNESS: f64 = 1.0;
/// Damping ratio used when none is given.
pub const DEFAULT_DAMPING_RATIO: f64 = 0.5;
/// Epsilon added to denominators and used as the critical-damping band.
pub const DEFAULT_PRECISION: f64 = 1e-5;
/// How many time constants ahead the smoothing variants place their target.
pub const DEFAULT_ANTICIPATION: f64 = 2.0;

/// Which closed-form solution a parameter set selects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DampingRegime {
    /// `damping_ratio < 1`, oscillates around the target
    Underdamped,
    /// `damping_ratio == 1` within precision, fastest approach without overshoot
    Critical,
    /// `damping_ratio > 1`, sum of two decaying exponentials
    Overdamped,
}

/// Immutable per-call spring parameters.
///
/// `stiffness` is the natural frequency `ω` in rad/s, not a spring constant;
/// the spring constant is `ω²`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringParams<S> {
    pub stiffness: S,
    pub damping_ratio: S,
    pub precision: S,
}

impl<S: Real> Default for SpringParams<S> {
    fn default() -> Self {
        Self::new_unchecked(
            S::lit(DEFAULT_STIFFNESS),
            S::lit(DEFAULT_DAMPING_RATIO),
            S::lit(DEFAULT_PRECISION),
        )
    }
}

impl<S: Real> SpringParams<S> {
    /// Validated constructor with the default precision.
    pub fn new(stiffness: S, damping_ratio: S) -> Result<Self> {
        let params = Self::new_unchecked(stiffness, damping_ratio, S::lit(DEFAULT_PRECISION));
        params.validate()?;
        Ok(params)
    }

    /// Builds parameters without checking them.
    ///
    /// Out of range values are undefined behaviour for the integrators in the
    /// numeric sense: they produce NaN or diverge, they never panic.
    pub const fn new_unchecked(stiffness: S, damping_ratio: S, precision: S) -> Self {
        Self {
            stiffness,
            damping_ratio,
            precision,
        }
    }

    /// Critically damped parameters.
    pub fn critical(stiffness: S) -> Result<Self> {
        Self::new(stiffness, S::one())
    }

    /// Parameters whose critically damped response halves the remaining
    /// distance every `halflife` seconds.
    pub fn from_halflife(halflife: S, damping_ratio: S) -> Result<Self> {
        if !halflife.is_finite() || halflife <= S::zero() {
            return Err(SpringError::InvalidDuration(halflife.to_f64_lossless()));
        }
        Self::new(
            halflife_to_stiffness(halflife, S::lit(DEFAULT_PRECISION)),
            damping_ratio,
        )
    }

    pub fn with_precision(mut self, precision: S) -> Result<Self> {
        self.precision = precision;
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.stiffness.is_finite() || self.stiffness <= S::zero() {
            return Err(SpringError::InvalidStiffness(self.stiffness.to_f64_lossless()));
        }
        if !self.damping_ratio.is_finite() || self.damping_ratio < S::zero() {
            return Err(SpringError::InvalidDampingRatio(
                self.damping_ratio.to_f64_lossless(),
            ));
        }
        if !self.precision.is_finite() || self.precision <= S::zero() {
            return Err(SpringError::InvalidPrecision(self.precision.to_f64_lossless()));
        }
        Ok(())
    }

    /// Halflife of the critically damped response at this stiffness.
    pub fn halflife(&self) -> S {
        stiffness_to_halflife(self.stiffness, self.precision)
    }

    /// Regime as classified by the discriminant `ω² - (2ζω)²/4`.
    pub fn regime(&self) -> DampingRegime {
        let k = self.stiffness * self.stiffness;
        let c = S::lit(2.0) * self.damping_ratio * self.stiffness;
        classify(k - c * c / S::lit(4.0), self.precision)
    }
}

pub(crate) fn classify<S: Real>(discriminant: S, precision: S) -> DampingRegime {
    if discriminant.abs() < precision {
        DampingRegime::Critical
    } else if discriminant > S::zero() {
        DampingRegime::Underdamped
    } else {
        DampingRegime::Overdamped
    }
}

/// Natural frequency whose critically damped response has the given halflife.
pub fn halflife_to_stiffness<S: Real>(halflife: S, precision: S) -> S {
    S::lit(2.0) * S::LN_2() / (halflife + precision)
}

/// Inverse of [`halflife_to_stiffness`].
pub fn stiffness_to_halflife<S: Real>(stiffness: S, precision: S) -> S {
    S::lit(2.0) * S::LN_2() / (stiffness + precision)
}

/// Converts an oscillation frequency in Hz to a natural frequency in rad/s.
pub fn frequency_to_stiffness<S: Real>(hertz: S) -> S {
    S::TAU() * hertz
}

//! Spring configuration files
//!
//! A [`SpringConfig`] describes one spring in TOML:
//!
//! ```toml
//! stiffness = 12.0
//! damping_ratio = 0.7
//!
//! [mode]
//! kind = "velocity_smoothing"
//! smoothing_velocity = 4.0
//! ```
//!
//! Missing fields take the library defaults.

use std::fs;
use std::path::Path;

use recoil_math::{Real, SpringValue};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SpringError};
use crate::params::{
    SpringParams, DEFAULT_ANTICIPATION, DEFAULT_DAMPING_RATIO, DEFAULT_PRECISION,
    DEFAULT_STIFFNESS,
};
use crate::spring::{Spring, SpringMode, DEFAULT_REST_DISTANCE, DEFAULT_REST_VELOCITY};

/// Names accepted by [`SpringConfig::preset`]
pub const PRESET_NAMES: [&str; 5] = ["critical", "stiff", "gentle", "wobbly", "sluggish"];

/// Integration mode as written in a config file
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModeConfig {
    Simple,
    #[default]
    Elastic,
    Precise,
    VelocitySmoothing {
        smoothing_velocity: f64,
        #[serde(default = "default_anticipation")]
        anticipation: f64,
    },
    DurationLimit {
        duration: f64,
        #[serde(default = "default_anticipation")]
        anticipation: f64,
    },
    DoubleSmoothing,
}

/// One spring as described in a config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    /// Natural frequency in rad/s
    #[serde(default = "default_stiffness")]
    pub stiffness: f64,
    #[serde(default = "default_damping_ratio")]
    pub damping_ratio: f64,
    #[serde(default = "default_precision")]
    pub precision: f64,
    /// Velocity the spring should have on arrival
    #[serde(default)]
    pub target_velocity: f64,
    #[serde(default = "default_rest_distance")]
    pub rest_distance: f64,
    #[serde(default = "default_rest_velocity")]
    pub rest_velocity: f64,
    // Tables must come after plain values in TOML output.
    #[serde(default)]
    pub mode: ModeConfig,
}

fn default_stiffness() -> f64 {
    DEFAULT_STIFFNESS
}

fn default_damping_ratio() -> f64 {
    DEFAULT_DAMPING_RATIO
}

fn default_precision() -> f64 {
    DEFAULT_PRECISION
}

fn default_anticipation() -> f64 {
    DEFAULT_ANTICIPATION
}

fn default_rest_distance() -> f64 {
    DEFAULT_REST_DISTANCE
}

fn default_rest_velocity() -> f64 {
    DEFAULT_REST_VELOCITY
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: DEFAULT_STIFFNESS,
            damping_ratio: DEFAULT_DAMPING_RATIO,
            precision: DEFAULT_PRECISION,
            target_velocity: 0.0,
            rest_distance: DEFAULT_REST_DISTANCE,
            rest_velocity: DEFAULT_REST_VELOCITY,
            mode: ModeConfig::default(),
        }
    }
}

impl SpringConfig {
    fn with(mode: ModeConfig, stiffness: f64, damping_ratio: f64) -> Self {
        Self {
            stiffness,
            damping_ratio,
            mode,
            ..Self::default()
        }
    }

    /// Critically damped, no overshoot
    pub fn critical() -> Self {
        Self::with(ModeConfig::Simple, 10.0, 1.0)
    }

    /// Fast and snappy, no overshoot
    pub fn stiff() -> Self {
        Self::with(ModeConfig::Elastic, 20.0, 1.0)
    }

    /// Slow and smooth
    pub fn gentle() -> Self {
        Self::with(ModeConfig::Elastic, 6.0, 1.0)
    }

    /// Bouncy with visible overshoot
    pub fn wobbly() -> Self {
        Self::with(ModeConfig::Elastic, 12.0, 0.35)
    }

    /// Overdamped, creeps into place
    pub fn sluggish() -> Self {
        Self::with(ModeConfig::Elastic, 4.0, 1.6)
    }

    /// Look up a preset by name (see [`PRESET_NAMES`])
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "critical" => Some(Self::critical()),
            "stiff" => Some(Self::stiff()),
            "gentle" => Some(Self::gentle()),
            "wobbly" => Some(Self::wobbly()),
            "sluggish" => Some(Self::sluggish()),
            _ => None,
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SpringConfig = toml::from_str(content)?;
        config.validate()?;
        tracing::debug!(mode = ?config.mode, stiffness = config.stiffness, "parsed spring config");
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| SpringError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        SpringParams::new_unchecked(self.stiffness, self.damping_ratio, self.precision)
            .validate()?;

        for threshold in [self.rest_distance, self.rest_velocity] {
            if !threshold.is_finite() || threshold < 0.0 {
                return Err(SpringError::InvalidRestThreshold(threshold));
            }
        }

        match self.mode {
            ModeConfig::VelocitySmoothing {
                smoothing_velocity,
                anticipation,
            } => {
                if !smoothing_velocity.is_finite() || smoothing_velocity <= 0.0 {
                    return Err(SpringError::InvalidSmoothingVelocity(smoothing_velocity));
                }
                check_anticipation(anticipation)
            }
            ModeConfig::DurationLimit {
                duration,
                anticipation,
            } => {
                if !duration.is_finite() || duration < 0.0 {
                    return Err(SpringError::InvalidDuration(duration));
                }
                check_anticipation(anticipation)
            }
            _ => Ok(()),
        }
    }

    /// Parameters at the precision of `S`
    pub fn params<S: Real>(&self) -> SpringParams<S> {
        SpringParams::new_unchecked(
            S::lit(self.stiffness),
            S::lit(self.damping_ratio),
            S::lit(self.precision),
        )
    }

    /// Mode at the precision of `S`
    pub fn spring_mode<S: Real>(&self) -> SpringMode<S> {
        match self.mode {
            ModeConfig::Simple => SpringMode::Simple,
            ModeConfig::Elastic => SpringMode::Elastic,
            ModeConfig::Precise => SpringMode::Precise,
            ModeConfig::VelocitySmoothing {
                smoothing_velocity,
                anticipation,
            } => SpringMode::VelocitySmoothing {
                smoothing_velocity: S::lit(smoothing_velocity),
                anticipation: S::lit(anticipation),
            },
            ModeConfig::DurationLimit {
                duration,
                anticipation,
            } => SpringMode::DurationLimit {
                duration: S::lit(duration),
                anticipation: S::lit(anticipation),
            },
            ModeConfig::DoubleSmoothing => SpringMode::DoubleSmoothing,
        }
    }

    /// Build a spring starting at `initial`, already heading for `target`
    pub fn build<V: SpringValue>(&self, initial: V, target: V) -> Result<Spring<V>> {
        self.validate()?;

        let mut spring = Spring::new(self.params(), self.spring_mode(), initial)
            .with_rest_thresholds(
                V::Scalar::lit(self.rest_distance),
                V::Scalar::lit(self.rest_velocity),
            );
        if self.target_velocity != 0.0 {
            spring = spring.with_target_velocity(V::splat(V::Scalar::lit(self.target_velocity)));
        }
        spring.set_target(target);
        Ok(spring)
    }
}

fn check_anticipation(anticipation: f64) -> Result<()> {
    if !anticipation.is_finite() || anticipation < 0.0 {
        return Err(SpringError::InvalidAnticipation(anticipation));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = SpringConfig::from_toml_str("").expect("empty config is valid");
        assert_eq!(config, SpringConfig::default());
        assert_eq!(config.mode, ModeConfig::Elastic);
    }

    #[test]
    fn test_presets_are_valid() {
        for name in PRESET_NAMES {
            let preset = SpringConfig::preset(name).expect("listed preset exists");
            assert!(preset.validate().is_ok(), "{name}");
        }
        assert!(SpringConfig::preset("bouncy").is_none());
    }

    #[test]
    fn test_mode_conversion() {
        let config = SpringConfig {
            mode: ModeConfig::DurationLimit {
                duration: 0.75,
                anticipation: 1.5,
            },
            ..SpringConfig::default()
        };
        assert_eq!(
            config.spring_mode::<f32>(),
            SpringMode::DurationLimit {
                duration: 0.75,
                anticipation: 1.5
            }
        );
    }
}

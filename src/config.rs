//! Configuration for synthetic trial generation.
//!
//! This module provides the [`SynthConfig`] struct which centralizes all
//! tunable parameters for the generation core: fall physics, sensor
//! imperfection, the projector fit policy, and the acceptance gate.
//!
//! # Example
//!
//! ```
//! use fall_synth::SynthConfig;
//!
//! let config = SynthConfig::default();
//! assert!(config.validate().is_ok());
//!
//! let gentle = SynthConfig::default().with_damping(0.5);
//! ```

use crate::error::{Result, SynthError};

/// Configuration for synthetic trial generation.
///
/// Defaults reproduce the reference fall dynamic: a rigid inverted pendulum
/// (length 1 m, viscous damping 0.35) sampled at ~30 Hz, with a severity-
/// scaled impact spike shortly after onset.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthConfig {
    // Fall physics
    /// Gravitational acceleration (m/s²).
    pub gravity: f64,

    /// Pendulum length (m), the rigid-body lever arm of the falling torso.
    pub pendulum_length: f64,

    /// Viscous damping coefficient applied to angular and vertical motion.
    pub damping: f64,

    /// Initial pitch angle (rad) at severity 1.0.
    pub initial_pitch: f64,

    /// Initial center-of-mass height (m).
    pub initial_height: f64,

    /// Seconds per frame (~30 Hz sampling).
    pub sample_interval: f64,

    /// Impact spike magnitude at severity 1.0, added to the position
    /// channels.
    pub impact_magnitude: f64,

    /// Frames between fall onset and the impact spike at severity 1.0.
    pub impact_delay_frames: f64,

    /// Per-component clamp for the integrated physics state.
    pub physics_clamp: f64,

    // Sensor imperfection (applied to every raw batch before projection)
    /// Standard deviation of the Gaussian noise injected into raw batches.
    pub sensor_noise: f64,

    /// Constant additive offset injected into raw batches.
    pub sensor_drift: f64,

    // Projector fit policy
    /// Minimum raw rows required before the one-time basis fit.
    pub fit_min_rows: usize,

    // Trial synthesis
    /// Probability that a synthesized trial receives an injected fall.
    pub fall_probability: f64,

    /// Per-element clamp applied to trajectories handed to persistence.
    pub storage_clamp: f64,

    // Acceptance gate
    /// Minimum population standard deviation for a trajectory labeled as a
    /// fall to be accepted.
    pub min_fall_std: f64,

    // Quality scoring
    /// Scale for the physics-plausibility tanh bound.
    pub plausibility_scale: f64,

    /// Scale for the personalization-strength tanh bound.
    pub personalization_scale: f64,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            gravity: 9.81,
            pendulum_length: 1.0,
            damping: 0.35,
            initial_pitch: 0.05,
            initial_height: 1.7,
            sample_interval: 0.033,
            impact_magnitude: 55.0,
            impact_delay_frames: 8.0,
            physics_clamp: 50.0,
            sensor_noise: 0.01,
            sensor_drift: 0.0,
            fit_min_rows: 10,
            fall_probability: 0.5,
            storage_clamp: 1000.0,
            min_fall_std: 0.02,
            plausibility_scale: 3.0,
            personalization_scale: 5.0,
        }
    }
}

impl SynthConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of valid range.
    pub fn validate(&self) -> Result<()> {
        if self.gravity <= 0.0 {
            return Err(SynthError::invalid_config("gravity must be positive"));
        }
        if self.pendulum_length <= 0.0 {
            return Err(SynthError::invalid_config(
                "pendulum_length must be positive",
            ));
        }
        if self.damping < 0.0 {
            return Err(SynthError::invalid_config("damping must be non-negative"));
        }
        if self.sample_interval <= 0.0 {
            return Err(SynthError::invalid_config(
                "sample_interval must be positive",
            ));
        }
        if self.physics_clamp <= 0.0 {
            return Err(SynthError::invalid_config("physics_clamp must be positive"));
        }
        if self.sensor_noise < 0.0 {
            return Err(SynthError::invalid_config(
                "sensor_noise must be non-negative",
            ));
        }
        if self.fit_min_rows == 0 {
            return Err(SynthError::invalid_config("fit_min_rows must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.fall_probability) {
            return Err(SynthError::invalid_config(
                "fall_probability must be in [0, 1]",
            ));
        }
        if self.storage_clamp <= 0.0 {
            return Err(SynthError::invalid_config("storage_clamp must be positive"));
        }
        if self.plausibility_scale <= 0.0 || self.personalization_scale <= 0.0 {
            return Err(SynthError::invalid_config(
                "quality scales must be positive",
            ));
        }
        Ok(())
    }

    /// Set the damping coefficient.
    #[must_use]
    pub const fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the sensor noise standard deviation.
    #[must_use]
    pub const fn with_sensor_noise(mut self, sigma: f64) -> Self {
        self.sensor_noise = sigma;
        self
    }

    /// Set the constant sensor drift.
    #[must_use]
    pub const fn with_sensor_drift(mut self, drift: f64) -> Self {
        self.sensor_drift = drift;
        self
    }

    /// Set the fall injection probability.
    #[must_use]
    pub const fn with_fall_probability(mut self, p: f64) -> Self {
        self.fall_probability = p;
        self
    }

    /// Set the minimum row count for the one-time basis fit.
    #[must_use]
    pub const fn with_fit_min_rows(mut self, rows: usize) -> Self {
        self.fit_min_rows = rows;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SynthConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.gravity, 9.81);
        assert_eq!(config.damping, 0.35);
        assert_eq!(config.fit_min_rows, 10);
    }

    #[test]
    fn test_validation() {
        let mut config = SynthConfig::default();

        config.gravity = 0.0;
        assert!(config.validate().is_err());

        config.gravity = 9.81;
        config.fall_probability = 1.5;
        assert!(config.validate().is_err());

        config.fall_probability = 0.5;
        config.sensor_noise = -0.01;
        assert!(config.validate().is_err());

        config.sensor_noise = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = SynthConfig::default()
            .with_damping(0.5)
            .with_sensor_noise(0.02)
            .with_fall_probability(1.0);
        assert_eq!(config.damping, 0.5);
        assert_eq!(config.sensor_noise, 0.02);
        assert_eq!(config.fall_probability, 1.0);
        assert!(config.validate().is_ok());
    }
}

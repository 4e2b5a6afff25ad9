//! Orchestration-facing trial synthesis driver.
//!
//! [`TrialSynthesizer`] bundles the frozen-once projector with the
//! generation steps an orchestrator runs per trial: fall/ADL coin flip,
//! profile sampling, personalization, domain-gap estimation, the
//! acceptance gate, quality scoring, and assembly of the persistence
//! record. File discovery, looping, progress reporting, and disk I/O stay
//! with the orchestrator.
//!
//! The synthesizer is constructed once per generation run and carries the
//! only mutable state in the core (the projector basis). Reproducibility
//! comes from the caller's RNG: seed a `StdRng` once per run, or
//! partition seeds per trajectory index for parallel execution.

use std::ops::RangeInclusive;

use nalgebra::DMatrix;
use rand::Rng;

use crate::config::SynthConfig;
use crate::domain_gap::real_to_synthetic_gap;
use crate::error::Result;
use crate::fall::inject_fall;
use crate::personalize::{
    personalize, Mobility, ResidentProfile, RoomKind, RoomProfile, SensorProfile,
};
use crate::projector::{LatentProjector, ProjectionOutcome};
use crate::quality::{score_trial, validate_generation};
use crate::trajectory::{Label, LatentFrame, StageFlags, TrialRecord};

/// Sampling ranges for per-trial personalization profiles.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileRanges {
    /// Resident age range (years).
    pub age: RangeInclusive<i32>,
    /// Room layout noise σ range.
    pub layout_noise: RangeInclusive<f64>,
    /// Sensor measurement noise σ range.
    pub sensor_noise: RangeInclusive<f64>,
    /// Sensor drift range.
    pub sensor_drift: RangeInclusive<f64>,
}

impl Default for ProfileRanges {
    fn default() -> Self {
        Self {
            age: 72..=94,
            layout_noise: 0.005..=0.03,
            sensor_noise: 0.005..=0.02,
            sensor_drift: -0.01..=0.01,
        }
    }
}

impl ProfileRanges {
    /// Sample one profile set.
    pub fn sample(
        &self,
        rng: &mut impl Rng,
    ) -> (ResidentProfile, RoomProfile, SensorProfile) {
        const MOBILITY: [Mobility; 3] = [Mobility::Walker, Mobility::Cane, Mobility::Independent];
        const ROOMS: [RoomKind; 3] = [RoomKind::Single, RoomKind::Double, RoomKind::MemoryCare];

        let resident = ResidentProfile {
            age: Some(rng.gen_range(self.age.clone())),
            mobility: Some(MOBILITY[rng.gen_range(0..MOBILITY.len())]),
        };
        let room = RoomProfile {
            kind: Some(ROOMS[rng.gen_range(0..ROOMS.len())]),
            layout_noise: Some(rng.gen_range(self.layout_noise.clone())),
        };
        let sensor = SensorProfile {
            noise: Some(rng.gen_range(self.sensor_noise.clone())),
            drift: Some(rng.gen_range(self.sensor_drift.clone())),
        };
        (resident, room, sensor)
    }
}

/// A synthesized trial: the trajectory handed to persistence plus its
/// metadata record.
#[derive(Debug, Clone)]
pub struct SynthesizedTrial {
    /// Latent trajectory, clamped to the storage range.
    pub frames: Vec<LatentFrame>,
    /// Structured metadata for the persistence collaborator.
    pub record: TrialRecord,
}

/// Per-run driver for trial generation.
#[derive(Debug, Clone)]
pub struct TrialSynthesizer {
    config: SynthConfig,
    projector: LatentProjector,
    ranges: ProfileRanges,
}

impl TrialSynthesizer {
    /// Create a synthesizer for one generation run.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: SynthConfig) -> Result<Self> {
        config.validate()?;
        let projector = LatentProjector::new(&config);
        Ok(Self {
            config,
            projector,
            ranges: ProfileRanges::default(),
        })
    }

    /// Replace the profile sampling ranges.
    #[must_use]
    pub fn with_profile_ranges(mut self, ranges: ProfileRanges) -> Self {
        self.ranges = ranges;
        self
    }

    /// Project a raw recording into latent space.
    ///
    /// The first call with enough rows fits the shared basis; every later
    /// recording in the run is projected through that same frozen basis.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if a non-empty batch is not 36 columns wide.
    pub fn project_recording(
        &mut self,
        raw: &DMatrix<f64>,
        rng: &mut impl Rng,
    ) -> Result<ProjectionOutcome> {
        self.projector.project(raw, rng)
    }

    /// Synthesize one labeled trial from a source latent trajectory.
    ///
    /// Flips the fall/ADL coin, injects and personalizes, estimates the
    /// domain gap against the source, applies the acceptance gate, and
    /// scores. Returns `Ok(None)` when the gate rejects the trial; the
    /// caller drops it silently and moves on.
    ///
    /// # Errors
    ///
    /// `InsufficientSamples` (recoverable) if the source has fewer than 2
    /// frames, too short for the domain-gap covariance.
    pub fn synthesize_trial(
        &self,
        latent: &[LatentFrame],
        source: &str,
        rng: &mut impl Rng,
    ) -> Result<Option<SynthesizedTrial>> {
        let (seq, label) = if rng.gen_bool(self.config.fall_probability) {
            inject_fall(latent, None, 1.0, &self.config, rng)
        } else {
            (latent.to_vec(), Label::Adl)
        };

        let (resident, room, sensor) = self.ranges.sample(rng);
        let seq = personalize(&seq, Some(&resident), Some(&room), Some(&sensor), rng);

        let gap = real_to_synthetic_gap(latent, &seq)?;

        if !validate_generation(&seq, label, &self.config) {
            return Ok(None);
        }

        let quality = score_trial(&seq, &gap, &self.config);

        let clamp = self.config.storage_clamp;
        let frames: Vec<LatentFrame> = seq
            .iter()
            .map(|f| f.map(|v| v.clamp(-clamp, clamp)))
            .collect();

        let record = TrialRecord {
            label,
            frames: frames.len(),
            source: source.to_owned(),
            domain_shift: gap,
            quality,
            personalization: StageFlags {
                resident: true,
                room: true,
                sensor: true,
            },
        };

        Ok(Some(SynthesizedTrial { frames, record }))
    }

    /// The run configuration.
    #[must_use]
    pub const fn config(&self) -> &SynthConfig {
        &self.config
    }

    /// Whether the shared basis has been fitted yet.
    #[must_use]
    pub const fn is_fitted(&self) -> bool {
        self.projector.is_fitted()
    }
}

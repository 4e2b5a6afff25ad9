//! Resident, room, and sensor personalization stages.
//!
//! Personalization emulates the variability a deployed sensor would see:
//! who the resident is, what room the sensor watches, and which physical
//! device recorded the trial. The three stages compose in fixed order
//! (resident, then room, then sensor), each operating on the previous
//! stage's output, so noise and scaling compound. A missing profile is a
//! no-op for its stage, and a missing field is a no-op for that effect.
//!
//! All noise draws are i.i.d. per element per call from the caller's RNG;
//! nothing is cached across calls.

use rand::Rng;
use rand_distr::{Distribution, Normal};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::trajectory::LatentFrame;

// Stage constants, matching the reference personalization model.
const AGE_PIVOT: f64 = 70.0;
const AGE_AMPLITUDE_RATE: f64 = 0.002;
const WALKER_JITTER: f64 = 0.02;
const CANE_JITTER: f64 = 0.01;
const DOUBLE_ROOM_NOISE: f64 = 0.015;
const MEMORY_CARE_NOISE: f64 = 0.03;
const DEFAULT_LAYOUT_NOISE: f64 = 0.01;
const DEFAULT_SENSOR_NOISE: f64 = 0.01;
const DEFAULT_SENSOR_DRIFT: f64 = 0.0;

/// Mobility aid used by the simulated resident.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Mobility {
    Walker,
    Cane,
    Independent,
}

impl Mobility {
    /// Micro-jitter σ contributed by the mobility aid.
    #[must_use]
    const fn jitter(self) -> f64 {
        match self {
            Self::Walker => WALKER_JITTER,
            Self::Cane => CANE_JITTER,
            Self::Independent => 0.0,
        }
    }
}

/// Room category the sensor watches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RoomKind {
    Single,
    Double,
    MemoryCare,
}

impl RoomKind {
    /// Ambient noise σ contributed by the room category.
    #[must_use]
    const fn ambient_noise(self) -> f64 {
        match self {
            Self::Single => 0.0,
            Self::Double => DOUBLE_ROOM_NOISE,
            Self::MemoryCare => MEMORY_CARE_NOISE,
        }
    }
}

/// Resident characteristics. Every field is optional; absence disables
/// that effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResidentProfile {
    /// Age in years; scales motion amplitude around a pivot of 70.
    pub age: Option<i32>,
    /// Mobility aid; adds micro-jitter.
    pub mobility: Option<Mobility>,
}

/// Room characteristics.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoomProfile {
    /// Room category; adds category-specific ambient noise.
    pub kind: Option<RoomKind>,
    /// Layout noise σ; defaults to 0.01 when the profile is present but
    /// the field is not.
    pub layout_noise: Option<f64>,
}

/// Device-to-device sensor variance.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorProfile {
    /// Measurement noise σ; defaults to 0.01.
    pub noise: Option<f64>,
    /// Constant additive drift; defaults to 0.0.
    pub drift: Option<f64>,
}

/// Apply the resident stage: age-based amplitude scaling, then
/// mobility-based micro-jitter.
pub fn personalize_resident(
    seq: &[LatentFrame],
    profile: Option<&ResidentProfile>,
    rng: &mut impl Rng,
) -> Vec<LatentFrame> {
    let mut out = seq.to_vec();
    let Some(profile) = profile else {
        return out;
    };

    if let Some(age) = profile.age {
        let scale = 1.0 + (f64::from(age) - AGE_PIVOT) * AGE_AMPLITUDE_RATE;
        for frame in &mut out {
            for v in frame.iter_mut() {
                *v *= scale;
            }
        }
    }

    if let Some(mobility) = profile.mobility {
        add_gaussian_noise(&mut out, mobility.jitter(), rng);
    }

    out
}

/// Apply the room stage: category-specific ambient noise plus generic
/// layout noise.
pub fn personalize_room(
    seq: &[LatentFrame],
    profile: Option<&RoomProfile>,
    rng: &mut impl Rng,
) -> Vec<LatentFrame> {
    let mut out = seq.to_vec();
    let Some(profile) = profile else {
        return out;
    };

    if let Some(kind) = profile.kind {
        add_gaussian_noise(&mut out, kind.ambient_noise(), rng);
    }

    // Layout noise applies whenever a room profile is present at all.
    let layout_noise = profile.layout_noise.unwrap_or(DEFAULT_LAYOUT_NOISE);
    add_gaussian_noise(&mut out, layout_noise, rng);

    out
}

/// Apply the sensor stage: measurement noise plus constant drift.
pub fn apply_sensor_profile(
    seq: &[LatentFrame],
    profile: Option<&SensorProfile>,
    rng: &mut impl Rng,
) -> Vec<LatentFrame> {
    let mut out = seq.to_vec();
    let Some(profile) = profile else {
        return out;
    };

    add_gaussian_noise(
        &mut out,
        profile.noise.unwrap_or(DEFAULT_SENSOR_NOISE),
        rng,
    );

    let drift = profile.drift.unwrap_or(DEFAULT_SENSOR_DRIFT);
    if drift != 0.0 {
        for frame in &mut out {
            for v in frame.iter_mut() {
                *v += drift;
            }
        }
    }

    out
}

/// Apply all personalization stages in fixed order: resident, room,
/// sensor. Each stage consumes the previous stage's output.
pub fn personalize(
    seq: &[LatentFrame],
    resident: Option<&ResidentProfile>,
    room: Option<&RoomProfile>,
    sensor: Option<&SensorProfile>,
    rng: &mut impl Rng,
) -> Vec<LatentFrame> {
    let seq = personalize_resident(seq, resident, rng);
    let seq = personalize_room(&seq, room, rng);
    apply_sensor_profile(&seq, sensor, rng)
}

fn add_gaussian_noise(seq: &mut [LatentFrame], sigma: f64, rng: &mut impl Rng) {
    if sigma <= 0.0 {
        return;
    }
    let dist =
        Normal::new(0.0, sigma).unwrap_or_else(|_| Normal::new(0.0, f64::EPSILON).unwrap());
    for frame in seq.iter_mut() {
        for v in frame.iter_mut() {
            *v += dist.sample(rng);
        }
    }
}

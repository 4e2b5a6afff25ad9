//! Core data model for synthesized trials.
//!
//! This module defines the latent trajectory representation, trial labels,
//! and the persistence-facing record types.
//!
//! # Latent layout (10 channels per frame)
//!
//! | Index | Content | Written by |
//! |-------|---------|------------|
//! | 0 | pitch angle θ | fall injection |
//! | 1 | angular velocity dθ | fall injection |
//! | 2 | horizontal displacement x | fall injection + impact spike |
//! | 3 | vertical displacement y | fall injection + impact spike |
//! | 4 | horizontal velocity vx | fall injection |
//! | 5 | vertical velocity vy | fall injection |
//! | 6..10 | residual latent channels | projection only |

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use rand::Rng;

/// Width of a raw sensor frame (six 6-axis blocks).
pub const RAW_DIM: usize = 36;

/// Width of a latent frame.
pub const LATENT_DIM: usize = 10;

/// Minimum trajectory length eligible for fall injection. Shorter
/// trajectories are ADL by construction.
pub const MIN_FALL_FRAMES: usize = 20;

/// A single latent frame.
pub type LatentFrame = [f64; LATENT_DIM];

/// Direction of an injected fall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FallDirection {
    Forward,
    Backward,
    Left,
    Right,
}

impl FallDirection {
    /// All four directions, in sampling order.
    pub const ALL: [Self; 4] = [Self::Forward, Self::Backward, Self::Left, Self::Right];

    /// Sample a direction uniformly.
    pub fn sample(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// The trial label produced by a fall in this direction.
    #[must_use]
    pub const fn label(self) -> Label {
        match self {
            Self::Forward => Label::FallForward,
            Self::Backward => Label::FallBackward,
            Self::Left => Label::FallLeft,
            Self::Right => Label::FallRight,
        }
    }
}

/// Classification label of a synthesized trial.
///
/// Determined entirely by whether injection occurred and, if so, the
/// direction chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Label {
    /// Activity of daily living: no fall injected.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "adl"))]
    Adl,
    #[cfg_attr(feature = "serde", serde(rename = "fall_forward"))]
    FallForward,
    #[cfg_attr(feature = "serde", serde(rename = "fall_backward"))]
    FallBackward,
    #[cfg_attr(feature = "serde", serde(rename = "fall_left"))]
    FallLeft,
    #[cfg_attr(feature = "serde", serde(rename = "fall_right"))]
    FallRight,
}

impl Label {
    /// Canonical string form, as consumed by downstream training tooling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Adl => "adl",
            Self::FallForward => "fall_forward",
            Self::FallBackward => "fall_backward",
            Self::FallLeft => "fall_left",
            Self::FallRight => "fall_right",
        }
    }

    /// Whether this label marks an injected fall.
    #[must_use]
    pub const fn is_fall(self) -> bool {
        !matches!(self, Self::Adl)
    }

    /// The fall direction, if any.
    #[must_use]
    pub const fn direction(self) -> Option<FallDirection> {
        match self {
            Self::Adl => None,
            Self::FallForward => Some(FallDirection::Forward),
            Self::FallBackward => Some(FallDirection::Backward),
            Self::FallLeft => Some(FallDirection::Left),
            Self::FallRight => Some(FallDirection::Right),
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Divergence between a real trajectory and its synthesized counterpart.
///
/// Both components are coarse scalar summaries, recomputed per trajectory
/// pair; there is no independent lifecycle.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DomainGap {
    /// First- and second-moment discrepancy of the flattened elements.
    pub mmd: f64,
    /// Frobenius distance between the channel-covariance matrices.
    pub coral: f64,
}

/// Bounded quality summary of a synthesized trial.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QualityScore {
    /// `tanh(std / plausibility_scale)`: 0 for a flat trajectory,
    /// approaching 1 for highly dynamic ones.
    pub physics_plausibility: f64,
    /// `tanh(mean(|x|) / personalization_scale)`.
    pub personalization_strength: f64,
    /// Domain-gap `mmd` passed through unmodified.
    pub domain_alignment: f64,
}

/// Which personalization stages were applied to a trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StageFlags {
    pub resident: bool,
    pub room: bool,
    pub sensor: bool,
}

/// Structured metadata handed to the persistence collaborator alongside a
/// synthesized trajectory.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrialRecord {
    /// Trial classification.
    pub label: Label,
    /// Frame count of the synthesized trajectory.
    pub frames: usize,
    /// Identifier of the originating recording.
    pub source: String,
    /// Divergence from the source trajectory.
    pub domain_shift: DomainGap,
    /// Quality summary for downstream filtering.
    pub quality: QualityScore,
    /// Personalization stages applied.
    pub personalization: StageFlags,
}

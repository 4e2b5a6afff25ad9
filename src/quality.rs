//! Quality scoring and the acceptance gate for synthesized trials.
//!
//! Scores are bounded summaries for downstream filtering, not training
//! targets: `tanh` maps the unbounded trajectory statistics into `[0, 1)`
//! while `domain_alignment` passes the raw moment discrepancy through.
//! NaN inputs yield NaN scores; rejecting NaN trajectories is the
//! caller's job, via [`validate_generation`], before scoring.

use crate::config::SynthConfig;
use crate::math::stats::{contains_nan, flat_mean_abs, flat_std};
use crate::trajectory::{DomainGap, Label, LatentFrame, QualityScore};

/// Derive the quality scores for a synthesized trajectory.
///
/// All three values are rounded to 4 decimal places.
#[must_use]
pub fn score_trial(seq: &[LatentFrame], gap: &DomainGap, config: &SynthConfig) -> QualityScore {
    let physics_plausibility = (flat_std(seq) / config.plausibility_scale).tanh();
    let personalization_strength = (flat_mean_abs(seq) / config.personalization_scale).tanh();

    QualityScore {
        physics_plausibility: round4(physics_plausibility),
        personalization_strength: round4(personalization_strength),
        domain_alignment: round4(gap.mmd),
    }
}

/// Acceptance gate applied before a generated trial is kept.
///
/// Rejects trajectories containing NaN, and trajectories labeled as falls
/// whose population standard deviation is below `min_fall_std`: a labeled
/// fall with nearly no motion is a contradiction. Rejection is not an
/// error: the caller drops the trial and continues.
#[must_use]
pub fn validate_generation(seq: &[LatentFrame], label: Label, config: &SynthConfig) -> bool {
    if contains_nan(seq) {
        return false;
    }
    if label.is_fall() && flat_std(seq) < config.min_fall_std {
        return false;
    }
    true
}

#[inline]
fn round4(value: f64) -> f64 {
    (value * 1e4).round() / 1e4
}

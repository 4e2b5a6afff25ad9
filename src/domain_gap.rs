//! Domain-gap estimation between real and synthesized trajectories.
//!
//! Two coarse scalar summaries quantify how far a synthesized trajectory
//! has drifted from the real distribution it was derived from: a
//! first/second-moment discrepancy over the flattened elements, and the
//! Frobenius distance between the channel-covariance matrices. Neither is
//! a full statistical divergence estimator; both are cheap enough to
//! recompute for every generated trial.

use crate::error::Result;
use crate::math::stats::{channel_covariance, flat_mean, flat_std, frobenius_diff};
use crate::trajectory::{DomainGap, LatentFrame};

/// Moment discrepancy of the flattened element populations:
/// `|mean(x) − mean(y)| + |std(x) − std(y)|`.
///
/// A simplified proxy for maximum mean discrepancy, not a kernel-based
/// estimate. The inputs need not be equal length.
#[must_use]
pub fn moment_discrepancy(real: &[LatentFrame], synthetic: &[LatentFrame]) -> f64 {
    (flat_mean(real) - flat_mean(synthetic)).abs()
        + (flat_std(real) - flat_std(synthetic)).abs()
}

/// Covariance-shape distance: Frobenius norm of the difference between the
/// two channel-covariance matrices.
///
/// # Errors
///
/// `InsufficientSamples` if either trajectory has fewer than 2 frames.
pub fn covariance_alignment(real: &[LatentFrame], synthetic: &[LatentFrame]) -> Result<f64> {
    let cov_real = channel_covariance(real)?;
    let cov_synth = channel_covariance(synthetic)?;
    Ok(frobenius_diff(&cov_real, &cov_synth))
}

/// Compute the full domain gap between a real trajectory and its
/// synthesized counterpart.
///
/// Reflexive: `real_to_synthetic_gap(x, x)` is exactly zero in both
/// components.
///
/// # Errors
///
/// `InsufficientSamples` if either trajectory has fewer than 2 frames
/// (channel covariance undefined).
pub fn real_to_synthetic_gap(
    real: &[LatentFrame],
    synthetic: &[LatentFrame],
) -> Result<DomainGap> {
    Ok(DomainGap {
        mmd: moment_discrepancy(real, synthetic),
        coral: covariance_alignment(real, synthetic)?,
    })
}

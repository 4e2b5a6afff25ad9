//! Fit-once latent projection of raw sensor batches.
//!
//! [`LatentProjector`] maps 36-wide raw frames to 10-wide latent frames
//! using a principal-component basis fitted exactly once per projector,
//! on the first batch with enough rows, and frozen thereafter. Sharing
//! one projector across every recording of a generation run keeps the
//! latent space consistent for the whole run, at the cost of the first
//! recording's statistics disproportionately shaping the space.
//!
//! The projector is an explicit owned object: construct it once, pass it
//! (mutably until fitted) into each projection call. For parallel runs,
//! fit first, then hand workers shared references or clones of the frozen
//! projector; `&mut self` on the fitting path makes concurrent fitting
//! unrepresentable.

use nalgebra::DMatrix;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::config::SynthConfig;
use crate::error::{Result, SynthError};
use crate::math::linalg::{fit_principal_basis, PrincipalBasis};
use crate::trajectory::{LatentFrame, LATENT_DIM, RAW_DIM};

/// Result of projecting one raw batch.
///
/// Insufficient data is an expected outcome, not an error: the caller must
/// treat it as "no trajectory produced" and move to the next input.
#[derive(Debug, Clone)]
pub enum ProjectionOutcome {
    /// The batch was projected into latent space.
    Latent(Vec<LatentFrame>),
    /// The batch was empty, or too small to fit the basis with.
    InsufficientData { rows: usize },
}

impl ProjectionOutcome {
    /// The latent trajectory, if one was produced.
    #[must_use]
    pub fn latent(self) -> Option<Vec<LatentFrame>> {
        match self {
            Self::Latent(frames) => Some(frames),
            Self::InsufficientData { .. } => None,
        }
    }

    /// Whether no trajectory was produced.
    #[must_use]
    pub const fn is_insufficient(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }
}

/// Linear 36 → 10 reducer with a one-time, frozen fit.
#[derive(Debug, Clone)]
pub struct LatentProjector {
    /// Gaussian noise σ injected into every batch before projection.
    noise: f64,

    /// Constant offset injected into every batch before projection.
    drift: f64,

    /// Minimum rows required for the one-time fit.
    fit_min_rows: usize,

    basis: Option<PrincipalBasis>,
}

impl LatentProjector {
    /// Create an unfitted projector from the run configuration.
    #[must_use]
    pub fn new(config: &SynthConfig) -> Self {
        Self {
            noise: config.sensor_noise,
            drift: config.sensor_drift,
            fit_min_rows: config.fit_min_rows,
            basis: None,
        }
    }

    /// Whether the basis has been fitted.
    #[must_use]
    pub const fn is_fitted(&self) -> bool {
        self.basis.is_some()
    }

    /// The fitted basis, if any.
    #[must_use]
    pub const fn basis(&self) -> Option<&PrincipalBasis> {
        self.basis.as_ref()
    }

    /// Fit the basis on a raw batch.
    ///
    /// This is the deterministic fitting primitive; the sensor-imperfection
    /// perturbation belongs to [`project`](Self::project).
    ///
    /// # Errors
    ///
    /// - `DimensionMismatch` if the batch is not 36 columns wide.
    /// - `InsufficientSamples` if the batch has no rows.
    pub fn fit(&mut self, batch: &DMatrix<f64>) -> Result<()> {
        Self::check_width(batch)?;
        self.basis = Some(fit_principal_basis(batch, LATENT_DIM)?);
        Ok(())
    }

    /// Transform a raw batch into latent frames.
    ///
    /// # Errors
    ///
    /// - `NotFitted` if called before a successful [`fit`](Self::fit).
    /// - `DimensionMismatch` if the batch is not 36 columns wide.
    pub fn transform(&self, batch: &DMatrix<f64>) -> Result<Vec<LatentFrame>> {
        Self::check_width(batch)?;
        let basis = self.basis.as_ref().ok_or(SynthError::NotFitted)?;

        let projected = basis.project(batch);
        let frames = projected
            .row_iter()
            .map(|row| {
                let mut frame = [0.0; LATENT_DIM];
                for (f, v) in frame.iter_mut().zip(row.iter()) {
                    *f = *v;
                }
                frame
            })
            .collect();
        Ok(frames)
    }

    /// Project a raw batch, applying the fit-once policy.
    ///
    /// The batch is first perturbed with fresh Gaussian noise and constant
    /// drift, on every call, emulating sensor imperfection. If the basis
    /// is not yet fitted and the batch has at least `fit_min_rows` rows,
    /// it is fitted here (once, for the lifetime of the projector) before
    /// transforming; a smaller batch yields
    /// [`ProjectionOutcome::InsufficientData`] and leaves the projector
    /// unfitted.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if a non-empty batch is not 36 columns wide.
    pub fn project(
        &mut self,
        batch: &DMatrix<f64>,
        rng: &mut impl Rng,
    ) -> Result<ProjectionOutcome> {
        let rows = batch.nrows();
        if rows == 0 {
            return Ok(ProjectionOutcome::InsufficientData { rows: 0 });
        }
        Self::check_width(batch)?;

        let perturbed = self.perturb(batch, rng);

        if !self.is_fitted() {
            if rows < self.fit_min_rows {
                return Ok(ProjectionOutcome::InsufficientData { rows });
            }
            self.basis = Some(fit_principal_basis(&perturbed, LATENT_DIM)?);
        }

        Ok(ProjectionOutcome::Latent(self.transform(&perturbed)?))
    }

    /// Add i.i.d. Gaussian noise and constant drift to a copy of the batch.
    fn perturb(&self, batch: &DMatrix<f64>, rng: &mut impl Rng) -> DMatrix<f64> {
        let mut out = batch.clone();
        if self.noise > 0.0 {
            let dist = Normal::new(0.0, self.noise)
                .unwrap_or_else(|_| Normal::new(0.0, f64::EPSILON).unwrap());
            for v in out.iter_mut() {
                *v += dist.sample(rng);
            }
        }
        if self.drift != 0.0 {
            for v in out.iter_mut() {
                *v += self.drift;
            }
        }
        out
    }

    fn check_width(batch: &DMatrix<f64>) -> Result<()> {
        if batch.ncols() != RAW_DIM {
            return Err(SynthError::dimension_mismatch(RAW_DIM, batch.ncols()));
        }
        Ok(())
    }
}

//! Principal-component basis fitting over dynamic-width batches.
//!
//! Uses nalgebra's symmetric eigendecomposition on the sample covariance
//! of the batch, keeping the top-k eigenvectors as the projection basis.

use nalgebra::{DMatrix, DVector, SymmetricEigen};

use crate::error::{Result, SynthError};

/// A fitted principal-component basis: the centering learned from the fit
/// batch plus the leading eigenvectors of its covariance.
#[derive(Debug, Clone)]
pub struct PrincipalBasis {
    /// Column means of the fit batch.
    pub mean: DVector<f64>,

    /// Principal components as rows (k × input_dim), sorted by descending
    /// eigenvalue.
    pub components: DMatrix<f64>,

    /// Eigenvalues of the kept components, descending.
    pub eigenvalues: Vec<f64>,
}

impl PrincipalBasis {
    /// Input dimensionality the basis was fitted on.
    #[must_use]
    pub fn input_dim(&self) -> usize {
        self.components.ncols()
    }

    /// Output dimensionality of projected rows.
    #[must_use]
    pub fn output_dim(&self) -> usize {
        self.components.nrows()
    }

    /// Project a batch onto the basis: `(X − mean) · componentsᵀ`.
    ///
    /// The batch width must equal [`input_dim`](Self::input_dim); the
    /// caller validates this.
    #[must_use]
    pub fn project(&self, batch: &DMatrix<f64>) -> DMatrix<f64> {
        debug_assert_eq!(batch.ncols(), self.input_dim());
        let mut centered = batch.clone();
        for mut row in centered.row_iter_mut() {
            row -= self.mean.transpose();
        }
        centered * self.components.transpose()
    }
}

/// Fit a principal-component basis on a batch (rows = observations).
///
/// # Errors
///
/// - `InsufficientSamples` if the batch has no rows.
/// - `InvalidConfig` if `k` is zero or exceeds the batch width.
pub fn fit_principal_basis(batch: &DMatrix<f64>, k: usize) -> Result<PrincipalBasis> {
    let n = batch.nrows();
    let d = batch.ncols();

    if n == 0 {
        return Err(SynthError::insufficient_samples(1, 0));
    }
    if k == 0 || k > d {
        return Err(SynthError::invalid_config(format!(
            "component count {k} out of range for {d}-wide input"
        )));
    }

    // Column means and centered batch.
    let mean = DVector::from_iterator(d, (0..d).map(|j| batch.column(j).sum() / n as f64));
    let mut centered = batch.clone();
    for mut row in centered.row_iter_mut() {
        row -= mean.transpose();
    }

    // Sample covariance; a single-row batch degenerates to the zero matrix.
    let denom = (n - 1).max(1) as f64;
    let cov = centered.transpose() * &centered / denom;

    let eigen = SymmetricEigen::new(cov);

    // Collect eigenpairs and sort descending.
    let mut pairs: Vec<(f64, DVector<f64>)> = eigen
        .eigenvalues
        .iter()
        .enumerate()
        .map(|(i, &v)| (v, eigen.eigenvectors.column(i).into_owned()))
        .collect();
    pairs.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    let eigenvalues: Vec<f64> = pairs.iter().take(k).map(|(v, _)| *v).collect();
    let components = DMatrix::from_fn(k, d, |i, j| pairs[i].1[j]);

    Ok(PrincipalBasis {
        mean,
        components,
        eigenvalues,
    })
}

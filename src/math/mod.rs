//! Numeric building blocks: flattened statistics, principal-component
//! basis fitting, and fixed-grid ODE integration.

pub mod integrate;
pub mod linalg;
pub mod stats;

pub use integrate::{linspace, rk4_integrate};
pub use linalg::PrincipalBasis;
pub use stats::{
    channel_covariance, contains_nan, flat_mean, flat_mean_abs, flat_std, frobenius_diff,
};

//! Fall Synthesis Library
//!
//! Physics-based synthesis of labeled motion-sensor trials (falls vs.
//! normal activity) for training fall-detection models, starting from real
//! low-dimensional sensor recordings.
//!
//! # Features
//!
//! - **Shared latent space**: a 36 → 10 projector fitted once per run and
//!   frozen, so every synthesized trial lives in the same space
//! - **Mechanical fall model**: a damped inverted pendulum integrated over
//!   a randomly chosen window and spliced into the motion channels
//! - **Personalization**: composable resident / room / sensor perturbation
//!   stages
//! - **Domain gap + quality**: coarse drift metrics and bounded quality
//!   scores for downstream filtering
//!
//! # Quick Start
//!
//! ```
//! use fall_synth::{SynthConfig, TrialSynthesizer};
//! use nalgebra::DMatrix;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut synth = TrialSynthesizer::new(SynthConfig::default())?;
//!
//! // Raw batch from the ingestion collaborator: rows × 36.
//! let raw = DMatrix::from_fn(60, 36, |i, j| (i as f64 * 0.1 + j as f64).sin());
//!
//! if let Some(latent) = synth.project_recording(&raw, &mut rng)?.latent() {
//!     if let Some(trial) = synth.synthesize_trial(&latent, "recording_01", &mut rng)? {
//!         assert_eq!(trial.frames.len(), 60);
//!         println!("{}", trial.record.label);
//!     }
//! }
//! # Ok::<(), fall_synth::SynthError>(())
//! ```
//!
//! # Determinism
//!
//! Every randomized stage draws from an explicitly passed generator; seed
//! one `StdRng` per run for reproducible generation, or partition seeds by
//! trajectory index for parallel runs. The projector is the only stateful
//! component: fit it once, then share it frozen.

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod config;
pub mod domain_gap;
pub mod error;
pub mod fall;
pub mod ingest;
pub mod math;
pub mod personalize;
pub mod pipeline;
pub mod projector;
pub mod quality;
pub mod trajectory;

// Re-exports for convenient access
pub use config::SynthConfig;
pub use domain_gap::{covariance_alignment, moment_discrepancy, real_to_synthetic_gap};
pub use error::{Result, SynthError};
pub use fall::{inject_fall, inject_fall_at, FALL_STATE_DIM};
pub use ingest::{frames_from_records, RecordLayout};
pub use personalize::{
    apply_sensor_profile, personalize, personalize_resident, personalize_room, Mobility,
    ResidentProfile, RoomKind, RoomProfile, SensorProfile,
};
pub use pipeline::{ProfileRanges, SynthesizedTrial, TrialSynthesizer};
pub use projector::{LatentProjector, ProjectionOutcome};
pub use quality::{score_trial, validate_generation};
pub use trajectory::{
    DomainGap, FallDirection, Label, LatentFrame, QualityScore, StageFlags, TrialRecord,
    LATENT_DIM, MIN_FALL_FRAMES, RAW_DIM,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Physics-based fall injection.
//!
//! A fall is simulated as a rigid inverted pendulum with viscous damping:
//! gravity torques the body away from vertical while the center of mass
//! accelerates downward, ending in an impulsive impact spike. The
//! integrated 6-state dynamic overwrites the motion channels of the
//! trajectory from a randomly chosen onset to the end; everything before
//! the onset and the residual latent channels are left untouched.
//!
//! # Pipeline
//!
//! 1. Refuse trajectories shorter than [`MIN_FALL_FRAMES`] (ADL by
//!    construction).
//! 2. Choose a direction (uniform unless given) and an onset uniformly
//!    from the middle half of the trajectory.
//! 3. Integrate the pendulum-impact ODE from onset to end on the ~30 Hz
//!    sample grid.
//! 4. Splice the clamped state samples into channels 0..6.
//! 5. Add the severity-scaled impact spike to the position channels.

use rand::Rng;

use crate::config::SynthConfig;
use crate::math::integrate::{linspace, rk4_integrate};
use crate::trajectory::{FallDirection, Label, LatentFrame, MIN_FALL_FRAMES};

/// Number of physics state components spliced into the trajectory.
pub const FALL_STATE_DIM: usize = 6;

/// Inject a simulated fall into a copy of `seq`.
///
/// The direction is sampled uniformly when not given; the onset is sampled
/// uniformly from `[T/4, 3T/4]` (inclusive). Trajectories shorter than
/// [`MIN_FALL_FRAMES`] are returned unchanged with [`Label::Adl`]; falls
/// are never injected into short trajectories.
///
/// `severity` scales the initial pitch, the impact magnitude, and the
/// impact delay; 1.0 is the reference fall.
pub fn inject_fall(
    seq: &[LatentFrame],
    direction: Option<FallDirection>,
    severity: f64,
    config: &SynthConfig,
    rng: &mut impl Rng,
) -> (Vec<LatentFrame>, Label) {
    let t = seq.len();
    if t < MIN_FALL_FRAMES {
        return (seq.to_vec(), Label::Adl);
    }

    let direction = direction.unwrap_or_else(|| FallDirection::sample(rng));
    let onset = rng.gen_range(t / 4..=3 * t / 4);

    inject_fall_at(seq, direction, onset, severity, config)
}

/// Inject a fall with an explicit direction and onset frame.
///
/// Deterministic companion to [`inject_fall`]; the onset must lie within
/// the trajectory. Short trajectories are still returned unchanged as ADL.
pub fn inject_fall_at(
    seq: &[LatentFrame],
    direction: FallDirection,
    onset: usize,
    severity: f64,
    config: &SynthConfig,
) -> (Vec<LatentFrame>, Label) {
    let t = seq.len();
    if t < MIN_FALL_FRAMES || onset >= t {
        return (seq.to_vec(), Label::Adl);
    }

    let mut out = seq.to_vec();

    // State: (θ, dθ, x, y, vx, vy). Pitch starts slightly off vertical,
    // center of mass at standing height.
    let initial = [
        config.initial_pitch * severity,
        0.0,
        0.0,
        config.initial_height,
        0.0,
        0.0,
    ];

    let n = t - onset;
    let times = linspace(n as f64 * config.sample_interval, n);

    let g = config.gravity;
    let l = config.pendulum_length;
    let damping = config.damping;

    let states = rk4_integrate(
        move |_t, s: &[f64; FALL_STATE_DIM]| {
            let (theta, dtheta, vx, vy) = (s[0], s[1], s[4], s[5]);

            // Inverted-pendulum gravity torque minus viscous damping.
            let ddtheta = (g / l) * theta.sin() - damping * dtheta;
            let ax = l * ddtheta;
            let ay = -g - damping * vy;

            [dtheta, ddtheta, vx, vy, ax, ay]
        },
        initial,
        &times,
    );

    let clamp = config.physics_clamp;
    for (frame, state) in out[onset..].iter_mut().zip(states.iter()) {
        for (channel, &value) in frame[..FALL_STATE_DIM].iter_mut().zip(state.iter()) {
            *channel = value.clamp(-clamp, clamp);
        }
    }

    // Impulsive impact on the position channels, a severity-scaled number
    // of frames after onset.
    let impact = onset + (config.impact_delay_frames * severity).floor() as usize;
    if impact < t {
        out[impact][2] += config.impact_magnitude * severity;
        out[impact][3] += config.impact_magnitude * severity;
    }

    (out, direction.label())
}

//! Fixed-grid classic Runge–Kutta integration.
//!
//! The fall dynamic is integrated on the trajectory's own sample grid, so
//! the integrator returns exactly one state per requested time point, the
//! first being the initial state.

/// Evenly spaced sample times from 0 to `end` inclusive.
///
/// Returns `n` points; for `n == 1` the single point is 0.
#[must_use]
pub fn linspace(end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => (0..n)
            .map(|i| end * i as f64 / (n - 1) as f64)
            .collect(),
    }
}

/// Integrate `rhs` from `initial` across `times` with one classic RK4 step
/// per grid interval.
///
/// `rhs(t, state)` returns the state derivative. The output has the same
/// length as `times`; `out[0] == initial`.
pub fn rk4_integrate<const N: usize, F>(rhs: F, initial: [f64; N], times: &[f64]) -> Vec<[f64; N]>
where
    F: Fn(f64, &[f64; N]) -> [f64; N],
{
    let mut out = Vec::with_capacity(times.len());
    if times.is_empty() {
        return out;
    }

    let mut state = initial;
    out.push(state);

    for w in times.windows(2) {
        let (t, dt) = (w[0], w[1] - w[0]);

        let k1 = rhs(t, &state);
        let k2 = rhs(t + dt * 0.5, &step(&state, &k1, dt * 0.5));
        let k3 = rhs(t + dt * 0.5, &step(&state, &k2, dt * 0.5));
        let k4 = rhs(t + dt, &step(&state, &k3, dt));

        for i in 0..N {
            state[i] += dt * (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i]) / 6.0;
        }
        out.push(state);
    }

    out
}

#[inline]
fn step<const N: usize>(state: &[f64; N], deriv: &[f64; N], h: f64) -> [f64; N] {
    let mut next = *state;
    for i in 0..N {
        next[i] += deriv[i] * h;
    }
    next
}

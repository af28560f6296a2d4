//! Forward-time SIR integration.
//!
//! Explicit Euler stepping of the classical three-compartment system:
//!
//! ```text
//! dS/dt = -beta * S * I / N
//! dI/dt =  beta * S * I / N - gamma * I
//! dR/dt =  gamma * I
//! ```
//!
//! Each step clamps the compartments at zero (Euler can overshoot) and then
//! rescales the triple so it sums exactly to N again. Without the rescale,
//! independent clamping of three coupled quantities drifts the total over
//! long horizons.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Transmission and removal rates, both strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SirParams {
    pub beta: f64,
    pub gamma: f64,
}

/// One instant of the epidemic: susceptible, infected, removed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SirState {
    pub s: f64,
    pub i: f64,
    pub r: f64,
}

/// A simulated trajectory as parallel columns, one sample per time step
/// including t = 0. Never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub t: Vec<f64>,
    pub s: Vec<f64>,
    pub i: Vec<f64>,
    pub r: Vec<f64>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }
}

/// Integrates the SIR system from `init` over `horizon_days` with the given
/// step size.
///
/// Number of steps is `ceil(horizon_days / step)`; sample times are
/// `k * step`. If the initial triple does not sum to `n`, the first rescale
/// normalizes it silently; seed data from reconciled observations is
/// expected to be imprecise.
pub fn simulate(
    n: f64,
    params: &SirParams,
    init: SirState,
    horizon_days: i64,
    step: f64,
) -> Result<Trajectory, Error> {
    validate(n, params, horizon_days, step)?;

    let steps = (horizon_days as f64 / step).ceil() as usize;
    let mut t = Vec::with_capacity(steps + 1);
    let mut s = Vec::with_capacity(steps + 1);
    let mut i = Vec::with_capacity(steps + 1);
    let mut r = Vec::with_capacity(steps + 1);
    t.push(0.0);
    s.push(init.s);
    i.push(init.i);
    r.push(init.r);

    for k in 0..steps {
        let (sk, ik, rk) = (s[k], i[k], r[k]);
        let ds = -params.beta * sk * ik / n;
        let di = params.beta * sk * ik / n - params.gamma * ik;
        let dr = params.gamma * ik;

        // Clamp before rescaling: a compartment never goes negative.
        let mut s1 = (sk + ds * step).max(0.0);
        let mut i1 = (ik + di * step).max(0.0);
        let mut r1 = (rk + dr * step).max(0.0);

        // Conservation correction. A zero total stays zero for the rest of
        // the run; rescaling it would divide by zero.
        let total = s1 + i1 + r1;
        if total > 0.0 {
            let f = n / total;
            s1 *= f;
            i1 *= f;
            r1 *= f;
        }

        t.push((k + 1) as f64 * step);
        s.push(s1);
        i.push(i1);
        r.push(r1);
    }

    Ok(Trajectory { t, s, i, r })
}

fn validate(n: f64, params: &SirParams, horizon_days: i64, step: f64) -> Result<(), Error> {
    let reason = if !(params.beta > 0.0) {
        Some(format!("beta must be positive, got {}", params.beta))
    } else if !(params.gamma > 0.0) {
        Some(format!("gamma must be positive, got {}", params.gamma))
    } else if !(n > 0.0) {
        Some(format!("population must be positive, got {n}"))
    } else if !(step > 0.0) {
        Some(format!("step must be positive, got {step}"))
    } else if horizon_days < 0 {
        Some(format!("horizon must be non-negative, got {horizon_days}"))
    } else {
        None
    };
    match reason {
        Some(reason) => Err(Error::InvalidParameters { reason }),
        None => Ok(()),
    }
}

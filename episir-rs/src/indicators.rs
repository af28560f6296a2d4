//! Summary indicators over a simulated trajectory.

use serde::{Deserialize, Serialize};

use crate::model::Trajectory;

/// A trajectory counts as "active" while I exceeds this many individuals.
/// Absolute units, deliberately not scaled to population size; for very
/// large populations the reported duration approaches the whole horizon.
pub const ACTIVITY_THRESHOLD: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Indicators {
    /// Maximum of the I series.
    pub peak_i: f64,
    /// Time of the first occurrence of the maximum.
    pub t_peak: f64,
    /// Time between the first and last samples with I above the activity
    /// threshold; 0 when no sample ever exceeds it.
    pub duration_days: f64,
}

/// Recomputed from scratch on every call; the trajectory is read-only.
pub fn indicators(traj: &Trajectory) -> Indicators {
    let mut peak_i = 0.0;
    let mut t_peak = 0.0;
    for (k, &ik) in traj.i.iter().enumerate() {
        // Strict comparison keeps the earliest peak on ties.
        if ik > peak_i {
            peak_i = ik;
            t_peak = traj.t[k];
        }
    }

    let first_active = traj.i.iter().position(|&ik| ik > ACTIVITY_THRESHOLD);
    let last_active = traj.i.iter().rposition(|&ik| ik > ACTIVITY_THRESHOLD);
    let duration_days = match (first_active, last_active) {
        (Some(first), Some(last)) => traj.t[last] - traj.t[first],
        _ => 0.0,
    };

    Indicators {
        peak_i,
        t_peak,
        duration_days,
    }
}

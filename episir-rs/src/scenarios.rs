//! What-if adjustments applied to a seed state before simulation.

use serde::{Deserialize, Serialize};

use crate::model::{SirParams, SirState};

/// A named intervention scenario: public-health measures scale the
/// transmission rate, vaccination moves part of S into R at t = 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default = "default_beta_multiplier")]
    pub beta_multiplier: f64,
    #[serde(default)]
    pub vax_fraction: f64,
}

fn default_beta_multiplier() -> f64 {
    1.0
}

impl Scenario {
    /// Returns the adjusted parameters and initial state; inputs are left
    /// unchanged. The vaccinated fraction is clamped to [0, 1].
    pub fn apply(&self, params: &SirParams, init: &SirState) -> (SirParams, SirState) {
        let adjusted = SirParams {
            beta: params.beta * self.beta_multiplier,
            gamma: params.gamma,
        };
        let v = self.vax_fraction.clamp(0.0, 1.0);
        let moved = v * init.s;
        let state = SirState {
            s: init.s - moved,
            i: init.i,
            r: init.r + moved,
        };
        (adjusted, state)
    }
}

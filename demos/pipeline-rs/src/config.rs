use std::path::PathBuf;

use episir::Scenario;
use serde::Deserialize;

/// Run configuration, read as JSON from stdin. Defaults reproduce the
/// reference run: Canada, beta 0.35, gamma 0.12, 120 days, daily steps.
#[derive(Debug, Deserialize)]
pub struct RunConfig {
    pub cases: PathBuf,
    pub population: PathBuf,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default = "default_beta")]
    pub beta: f64,
    #[serde(default = "default_gamma")]
    pub gamma: f64,
    #[serde(default = "default_horizon")]
    pub horizon_days: i64,
    #[serde(default = "default_step")]
    pub step: f64,
    /// CSV outputs land here; stdout when absent.
    #[serde(default)]
    pub out_dir: Option<PathBuf>,
    /// Optional what-if adjustment applied to the seed state.
    #[serde(default)]
    pub scenario: Option<Scenario>,
}

fn default_country() -> String {
    "Canada".to_string()
}

fn default_beta() -> f64 {
    0.35
}

fn default_gamma() -> f64 {
    0.12
}

fn default_horizon() -> i64 {
    120
}

fn default_step() -> f64 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: RunConfig =
            serde_json::from_str(r#"{"cases": "epi.csv", "population": "pop.csv"}"#).unwrap();
        assert_eq!(config.country, "Canada");
        assert_eq!(config.beta, 0.35);
        assert_eq!(config.gamma, 0.12);
        assert_eq!(config.horizon_days, 120);
        assert_eq!(config.step, 1.0);
        assert!(config.out_dir.is_none());
        assert!(config.scenario.is_none());
    }

    #[test]
    fn test_scenario_block() {
        let config: RunConfig = serde_json::from_str(
            r#"{
                "cases": "epi.csv",
                "population": "pop.csv",
                "scenario": {"name": "distancing", "beta_multiplier": 0.6}
            }"#,
        )
        .unwrap();
        let scenario = config.scenario.unwrap();
        assert_eq!(scenario.beta_multiplier, 0.6);
        assert_eq!(scenario.vax_fraction, 0.0);
    }
}

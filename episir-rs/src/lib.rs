//! Epidemic case-data reconciliation and SIR projection.
//!
//! The pipeline: raw case and population tables in any accepted shape are
//! normalized into one canonical per-country-per-day schema
//! ([`schema::normalize_cases`], [`schema::normalize_population`]), joined
//! under an explicit missing-data policy ([`merge::merge`]), and the
//! reconciled compartments seed a deterministic forward-Euler SIR run
//! ([`model::simulate`]) whose trajectory is summarized by
//! [`indicators::indicators`].
//!
//! Every function here is pure: inputs are fully materialized, nothing is
//! mutated in place, and identical inputs yield identical outputs. Chart
//! and map rendering consume the reconciled table, the trajectory and the
//! snapshot view but live outside this crate.

pub mod countries;
pub mod error;
pub mod indicators;
pub mod merge;
pub mod model;
pub mod scenarios;
pub mod schema;
pub mod table;

pub use error::Error;
pub use indicators::{Indicators, indicators};
pub use merge::{CountrySnapshot, MissingPolicy, ReconciledRecord, latest_snapshot, merge};
pub use model::{SirParams, SirState, Trajectory, simulate};
pub use scenarios::Scenario;
pub use schema::{CaseRecord, PopulationRecord, normalize_cases, normalize_population};
pub use table::Table;

//! Reconciliation of case records with population records.
//!
//! A left join on canonical country name, followed by row-wise derivation
//! of the S/I/R compartments. What happens to case rows whose country has
//! no population is an explicit caller choice, never a global flag.
//!
//! Caveat on the derived `i`: under the cumulative-series input shape the
//! `cases` column is a running total since the start of recording, so `i`
//! overstates currently-infected individuals. The behavior matches the
//! observed-data path and is kept for compatibility; treat the reconciled
//! compartments as a visualization/seeding aid, not as epidemiology.

use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::Error;
use crate::schema::{CaseRecord, PopulationRecord};

/// What to do with case rows whose country has no population record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingPolicy {
    /// Remove the affected rows and report the countries as a warning.
    Drop,
    /// Fail the merge, naming every affected country.
    Fail,
}

/// A case record joined with its population and derived compartments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciledRecord {
    pub country: String,
    pub date: NaiveDate,
    pub cases: f64,
    pub recovered: f64,
    pub deaths: f64,
    pub population: f64,
    pub s: f64,
    pub i: f64,
    pub r: f64,
}

/// Latest per-country infected share, for map display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountrySnapshot {
    pub country: String,
    /// Infected as a percentage of population at the latest observed date.
    pub value: f64,
}

const WARN_PREVIEW: usize = 25;

/// Joins cases with populations and derives `i = cases`,
/// `r = recovered + deaths`, `s = max(population - i - r, 0)`.
///
/// The floor on `s` is a safety clamp against over-counted removals; the
/// triple is not rebalanced here, only the integrator enforces
/// conservation.
pub fn merge(
    cases: &[CaseRecord],
    population: &[PopulationRecord],
    on_missing: MissingPolicy,
) -> Result<Vec<ReconciledRecord>, Error> {
    let by_country: HashMap<&str, f64> = population
        .iter()
        .map(|p| (p.country.as_str(), p.population))
        .collect();

    let mut missing: Vec<String> = Vec::new();
    let mut records = Vec::with_capacity(cases.len());
    for case in cases {
        let Some(&population) = by_country.get(case.country.as_str()) else {
            if missing.last() != Some(&case.country) {
                missing.push(case.country.clone());
            }
            continue;
        };
        let i = case.cases;
        let r = case.recovered + case.deaths;
        let s = (population - i - r).max(0.0);
        records.push(ReconciledRecord {
            country: case.country.clone(),
            date: case.date,
            cases: case.cases,
            recovered: case.recovered,
            deaths: case.deaths,
            population,
            s,
            i,
            r,
        });
    }

    // The last-pushed guard above already collapses runs of a sorted input;
    // sort + dedup makes the report unique for unsorted callers too.
    missing.sort();
    missing.dedup();

    if !missing.is_empty() {
        match on_missing {
            MissingPolicy::Fail => {
                return Err(Error::MissingPopulation { countries: missing });
            }
            MissingPolicy::Drop => {
                let preview = missing[..missing.len().min(WARN_PREVIEW)].join(", ");
                let more = missing.len().saturating_sub(WARN_PREVIEW);
                if more > 0 {
                    warn!("population missing, rows dropped: {preview} (+{more} more)");
                } else {
                    warn!("population missing, rows dropped: {preview}");
                }
            }
        }
    }

    Ok(records)
}

/// Reduces a reconciled table to the most recent observation per country,
/// expressed as percent of population infected. Sorted by country.
pub fn latest_snapshot(records: &[ReconciledRecord]) -> Vec<CountrySnapshot> {
    let mut latest: HashMap<&str, &ReconciledRecord> = HashMap::new();
    for record in records {
        match latest.get(record.country.as_str()) {
            Some(kept) if kept.date >= record.date => {}
            _ => {
                latest.insert(record.country.as_str(), record);
            }
        }
    }
    let mut snapshots: Vec<CountrySnapshot> = latest
        .into_values()
        .map(|r| CountrySnapshot {
            country: r.country.clone(),
            value: r.i / r.population * 100.0,
        })
        .collect();
    snapshots.sort_by(|a, b| a.country.cmp(&b.country));
    snapshots
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(country: &str, date: (i32, u32, u32), cases: f64, recovered: f64, deaths: f64) -> CaseRecord {
        CaseRecord {
            country: country.to_string(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            cases,
            recovered,
            deaths,
        }
    }

    fn pop(country: &str, population: f64) -> PopulationRecord {
        PopulationRecord {
            country: country.to_string(),
            population,
        }
    }

    #[test]
    fn test_merge_derives_compartments() {
        let cases = vec![case("Canada", (2020, 3, 1), 100.0, 20.0, 5.0)];
        let pops = vec![pop("Canada", 1000.0)];
        let records = merge(&cases, &pops, MissingPolicy::Fail).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].i, 100.0);
        assert_eq!(records[0].r, 25.0);
        assert_eq!(records[0].s, 875.0);
        assert_eq!(records[0].population, 1000.0);
    }

    #[test]
    fn test_merge_floors_susceptible_at_zero() {
        let cases = vec![case("Canada", (2020, 3, 1), 900.0, 200.0, 50.0)];
        let pops = vec![pop("Canada", 1000.0)];
        let records = merge(&cases, &pops, MissingPolicy::Fail).unwrap();
        assert_eq!(records[0].s, 0.0);
        // No rebalancing: the floored triple may exceed the population.
        assert!(records[0].s + records[0].i + records[0].r > records[0].population);
    }

    #[test]
    fn test_merge_fail_policy_names_missing_countries() {
        let cases = vec![
            case("Canada", (2020, 3, 1), 1.0, 0.0, 0.0),
            case("X", (2020, 3, 1), 1.0, 0.0, 0.0),
            case("X", (2020, 3, 2), 2.0, 0.0, 0.0),
        ];
        let pops = vec![pop("Canada", 1000.0)];
        match merge(&cases, &pops, MissingPolicy::Fail) {
            Err(Error::MissingPopulation { countries }) => {
                assert_eq!(countries, vec!["X".to_string()]);
            }
            other => panic!("expected MissingPopulation, got {other:?}"),
        }
    }

    #[test]
    fn test_merge_drop_policy_removes_rows_without_error() {
        let cases = vec![
            case("Canada", (2020, 3, 1), 1.0, 0.0, 0.0),
            case("X", (2020, 3, 1), 1.0, 0.0, 0.0),
        ];
        let pops = vec![pop("Canada", 1000.0)];
        let records = merge(&cases, &pops, MissingPolicy::Drop).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records.iter().all(|r| r.country != "X"));
    }

    #[test]
    fn test_merge_does_not_mutate_inputs() {
        let cases = vec![case("Canada", (2020, 3, 1), 1.0, 0.0, 0.0)];
        let pops = vec![pop("Canada", 1000.0)];
        let before = cases.clone();
        let _ = merge(&cases, &pops, MissingPolicy::Drop).unwrap();
        assert_eq!(cases, before);
    }

    #[test]
    fn test_latest_snapshot_takes_most_recent_date() {
        let cases = vec![
            case("Canada", (2020, 3, 1), 10.0, 0.0, 0.0),
            case("Canada", (2020, 3, 5), 50.0, 0.0, 0.0),
            case("France", (2020, 3, 2), 20.0, 0.0, 0.0),
        ];
        let pops = vec![pop("Canada", 1000.0), pop("France", 2000.0)];
        let records = merge(&cases, &pops, MissingPolicy::Fail).unwrap();
        let snaps = latest_snapshot(&records);
        assert_eq!(snaps.len(), 2);
        assert_eq!(snaps[0].country, "Canada");
        assert_eq!(snaps[0].value, 5.0);
        assert_eq!(snaps[1].country, "France");
        assert_eq!(snaps[1].value, 1.0);
    }
}

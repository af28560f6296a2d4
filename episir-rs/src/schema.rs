//! Schema detection and normalization of the two raw input tables.
//!
//! Each source may arrive in one of several accepted shapes. Signatures are
//! checked in a fixed priority order (compact canonical shape first, then
//! the richer source-specific export) and the first one whose required
//! columns are all present wins. A table matching no signature is rejected
//! with the column set it actually carried.
//!
//! Parsing policy differs by column role:
//! - dates are strict: one bad date fails the whole table;
//! - case counts are lenient: an unparseable count reads as 0;
//! - population is strict and must be positive, since it divides later.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::countries;
use crate::error::Error;
use crate::table::Table;

/// One observation: cumulative counts for one country on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub country: String,
    pub date: NaiveDate,
    pub cases: f64,
    /// 0.0 when the source shape does not carry recoveries.
    pub recovered: f64,
    pub deaths: f64,
}

/// Latest available population estimate for one country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationRecord {
    pub country: String,
    pub population: f64,
}

/// Accepted case-table shapes, in detection priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaseSchema {
    /// `date, country, cases, recovered, deaths`
    Canonical,
    /// The OWID export: entity, day, cumulative confirmed cases/deaths.
    /// Recoveries are not observable in this shape.
    CumulativeSeries,
}

impl CaseSchema {
    const CANONICAL: &'static [&'static str] = &["date", "country", "cases", "recovered", "deaths"];
    const CUMULATIVE: &'static [&'static str] = &[
        "Entity",
        "Day",
        "Cumulative confirmed cases",
        "Cumulative confirmed deaths",
    ];

    fn detect(table: &Table) -> Option<CaseSchema> {
        [
            (CaseSchema::Canonical, Self::CANONICAL),
            (CaseSchema::CumulativeSeries, Self::CUMULATIVE),
        ]
        .into_iter()
        .find(|(_, required)| table.has_columns(required))
        .map(|(schema, _)| schema)
    }
}

/// Accepted population-table shapes, in detection priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PopulationSchema {
    /// `country, population`, one row per country.
    Canonical,
    /// The World Bank export: one row per country per year.
    TimeSeries,
}

impl PopulationSchema {
    const CANONICAL: &'static [&'static str] = &["country", "population"];
    const TIME_SERIES: &'static [&'static str] = &["Country Name", "Year", "Value"];

    fn detect(table: &Table) -> Option<PopulationSchema> {
        [
            (PopulationSchema::Canonical, Self::CANONICAL),
            (PopulationSchema::TimeSeries, Self::TIME_SERIES),
        ]
        .into_iter()
        .find(|(_, required)| table.has_columns(required))
        .map(|(schema, _)| schema)
    }
}

/// Normalizes a raw case table into the canonical record sequence, sorted
/// by `(country, date)`.
pub fn normalize_cases(table: &Table) -> Result<Vec<CaseRecord>, Error> {
    let schema = CaseSchema::detect(table).ok_or_else(|| Error::UnrecognizedSchema {
        columns: table.columns().to_vec(),
    })?;

    let mut records = Vec::with_capacity(table.rows().len());
    for (idx, row) in table.rows().iter().enumerate() {
        let record = match schema {
            CaseSchema::Canonical => CaseRecord {
                country: table.cell(row, "country").trim().to_string(),
                date: parse_date(table.cell(row, "date"), idx)?,
                cases: coerce_count(table.cell(row, "cases")),
                recovered: coerce_count(table.cell(row, "recovered")),
                deaths: coerce_count(table.cell(row, "deaths")),
            },
            CaseSchema::CumulativeSeries => CaseRecord {
                country: countries::resolve(table.cell(row, "Entity").trim()).to_string(),
                date: parse_date(table.cell(row, "Day"), idx)?,
                cases: coerce_count(table.cell(row, "Cumulative confirmed cases")),
                // Not observable in this shape: R downstream will equal
                // deaths alone.
                recovered: 0.0,
                deaths: coerce_count(table.cell(row, "Cumulative confirmed deaths")),
            },
        };
        records.push(record);
    }

    records.sort_by(|a, b| (&a.country, a.date).cmp(&(&b.country, b.date)));
    Ok(records)
}

/// Normalizes a raw population table into one record per country.
pub fn normalize_population(table: &Table) -> Result<Vec<PopulationRecord>, Error> {
    let schema = PopulationSchema::detect(table).ok_or_else(|| Error::UnrecognizedSchema {
        columns: table.columns().to_vec(),
    })?;

    let mut records = match schema {
        PopulationSchema::Canonical => {
            let mut out = Vec::with_capacity(table.rows().len());
            for row in table.rows() {
                let country = table.cell(row, "country").trim().to_string();
                let raw = table.cell(row, "population");
                let population: f64 = raw.trim().parse().map_err(|_| Error::InvalidPopulation {
                    country: country.clone(),
                    value: raw.to_string(),
                })?;
                if !population.is_finite() || population <= 0.0 {
                    return Err(Error::InvalidPopulation {
                        country,
                        value: raw.to_string(),
                    });
                }
                out.push(PopulationRecord {
                    country,
                    population,
                });
            }
            out
        }
        PopulationSchema::TimeSeries => {
            // Rows that fail to parse are dropped; per country only the
            // latest year survives.
            let mut latest: HashMap<String, (i64, f64)> = HashMap::new();
            for row in table.rows() {
                let country = table.cell(row, "Country Name").trim();
                let year: Option<i64> = table.cell(row, "Year").trim().parse().ok();
                let value: Option<f64> = table.cell(row, "Value").trim().parse().ok();
                let (Some(year), Some(value)) = (year, value) else {
                    continue;
                };
                if country.is_empty() || !value.is_finite() {
                    continue;
                }
                let country = countries::resolve(country).to_string();
                match latest.get(&country) {
                    Some((kept_year, _)) if *kept_year >= year => {}
                    _ => {
                        latest.insert(country, (year, value));
                    }
                }
            }
            latest
                .into_iter()
                .map(|(country, (_, population))| PopulationRecord {
                    country,
                    population,
                })
                .collect()
        }
    };

    records.sort_by(|a, b| a.country.cmp(&b.country));
    Ok(records)
}

// Strict date parsing; both real feeds use ISO dates.
fn parse_date(value: &str, row: usize) -> Result<NaiveDate, Error> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y/%m/%d"))
        .map_err(|_| Error::InvalidDate {
            value: value.to_string(),
            row,
        })
}

// Lenient count coercion: unparseable case counts read as zero.
fn coerce_count(value: &str) -> f64 {
    value.trim().parse().unwrap_or(0.0)
}

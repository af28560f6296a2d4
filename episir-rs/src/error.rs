//! Error types for the reconciliation and simulation pipeline.
//!
//! Every fallible operation returns one of these variants; bad values are
//! rejected at the boundary where they are discovered, so a malformed input
//! never reaches the integrator.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The input table's columns match no accepted shape.
    #[error("unrecognized table schema, columns found: [{}]", .columns.join(", "))]
    UnrecognizedSchema { columns: Vec<String> },

    /// A date field failed strict parsing under a case-table shape.
    #[error("invalid date {value:?} in row {row}")]
    InvalidDate { value: String, row: usize },

    /// A population value failed to parse or was non-positive. Population is
    /// a divisor downstream, so this is never coerced.
    #[error("invalid population {value:?} for country {country:?}")]
    InvalidPopulation { country: String, value: String },

    /// Case data exists for countries with no population row, under the
    /// fail-on-missing merge policy.
    #[error("population missing for: {}", .countries.join(", "))]
    MissingPopulation { countries: Vec<String> },

    /// Simulation called with a non-positive rate, population or step size,
    /// or a negative horizon.
    #[error("invalid simulation parameters: {reason}")]
    InvalidParameters { reason: String },

    /// The CSV transport failed while materializing a table.
    #[error("failed to read csv input")]
    Csv(#[from] csv::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrecognized_schema_reports_columns() {
        let err = Error::UnrecognizedSchema {
            columns: vec!["foo".into(), "bar".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("foo"));
        assert!(msg.contains("bar"));
    }

    #[test]
    fn test_missing_population_names_countries() {
        let err = Error::MissingPopulation {
            countries: vec!["Atlantis".into()],
        };
        assert!(err.to_string().contains("Atlantis"));
    }
}

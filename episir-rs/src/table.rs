//! Fully materialized tabular input.
//!
//! Raw sources arrive as CSV with unknown column layouts; schema detection
//! happens downstream, so the table keeps every cell as a string. A `Table`
//! is read once and never mutated.

use std::io;
use std::path::Path;

use crate::error::Error;

#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Table {
        Table { columns, rows }
    }

    pub fn from_reader<R: io::Read>(reader: R) -> Result<Table, Error> {
        Table::read(csv::Reader::from_reader(reader))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Table, Error> {
        Table::read(csv::Reader::from_path(path)?)
    }

    fn read<R: io::Read>(mut rdr: csv::Reader<R>) -> Result<Table, Error> {
        let columns = rdr
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(record.iter().map(|c| c.to_string()).collect());
        }
        Ok(Table { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// True when every required column is present, regardless of order or
    /// extra columns.
    pub fn has_columns(&self, required: &[&str]) -> bool {
        required
            .iter()
            .all(|r| self.columns.iter().any(|c| c == r))
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell accessor tolerant of ragged rows: a short row reads as empty.
    pub fn cell<'a>(&'a self, row: &'a [String], name: &str) -> &'a str {
        self.column_index(name)
            .and_then(|idx| row.get(idx))
            .map(String::as_str)
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_reader() {
        let data = "country,population\nCanada,38000000\nFrance,67000000\n";
        let table = Table::from_reader(data.as_bytes()).unwrap();
        assert_eq!(table.columns(), &["country", "population"]);
        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.cell(&table.rows()[1], "country"), "France");
    }

    #[test]
    fn test_has_columns_ignores_order_and_extras() {
        let data = "population,country,extra\n1,A,x\n";
        let table = Table::from_reader(data.as_bytes()).unwrap();
        assert!(table.has_columns(&["country", "population"]));
        assert!(!table.has_columns(&["country", "year"]));
    }

    #[test]
    fn test_headers_are_trimmed() {
        let data = " country , population \nA,1\n";
        let table = Table::from_reader(data.as_bytes()).unwrap();
        assert!(table.has_columns(&["country", "population"]));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "date,country,cases,recovered,deaths").unwrap();
        writeln!(file, "2020-03-01,Canada,10,0,1").unwrap();
        let table = Table::from_path(file.path()).unwrap();
        assert_eq!(table.rows().len(), 1);
        assert_eq!(table.cell(&table.rows()[0], "cases"), "10");
    }
}

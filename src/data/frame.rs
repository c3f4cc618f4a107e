//! Index-carrying tabular data
//!
//! `Frame` keeps cells as strings so numeric and categorical columns travel
//! through the pipeline unchanged. Every row carries a persistent integer
//! index; CSV round-trips store it as the first, unnamed column so the
//! predictor and target tables stay joinable by index.

use std::path::Path;

use crate::error::{PrepError, Result};

/// Cell values treated as missing
const MISSING: [&str; 2] = ["", "NA"];

/// Ordered table of string cells with named columns and a row index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    columns: Vec<String>,
    index: Vec<u64>,
    rows: Vec<Vec<String>>,
}

impl Frame {
    /// Create an empty frame with the given columns
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            index: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Append a row under an explicit index value
    pub fn push_row(&mut self, index: u64, cells: Vec<String>) {
        assert_eq!(cells.len(), self.columns.len(), "row width must match columns");
        self.index.push(index);
        self.rows.push(cells);
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn index(&self) -> &[u64] {
        &self.index
    }

    /// Whether a cell counts as missing
    pub fn is_missing(cell: &str) -> bool {
        MISSING.contains(&cell)
    }

    /// Read a CSV without an index column; rows are indexed 0..n in file order
    pub fn from_csv(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)?;
        let columns: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();

        let mut frame = Frame::new(columns);
        for (i, record) in reader.records().enumerate() {
            let record = record?;
            frame.push_row(i as u64, record.iter().map(|s| s.to_string()).collect());
        }
        Ok(frame)
    }

    /// Read a CSV whose first column is the row index
    pub fn from_csv_indexed(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)?;
        let columns: Vec<String> = reader
            .headers()?
            .iter()
            .skip(1)
            .map(|s| s.to_string())
            .collect();

        let mut frame = Frame::new(columns);
        for record in reader.records() {
            let record = record?;
            let raw_index = record.get(0).unwrap_or_default();
            let index: u64 = raw_index
                .parse()
                .map_err(|_| PrepError::BadIndex(raw_index.to_string()))?;
            frame.push_row(index, record.iter().skip(1).map(|s| s.to_string()).collect());
        }
        Ok(frame)
    }

    /// Write to CSV with the index as the first, unnamed column
    pub fn to_csv(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;

        let mut header = Vec::with_capacity(self.n_cols() + 1);
        header.push(String::new());
        header.extend(self.columns.iter().cloned());
        writer.write_record(&header)?;

        for (index, row) in self.index.iter().zip(&self.rows) {
            let mut record = Vec::with_capacity(self.n_cols() + 1);
            record.push(index.to_string());
            record.extend(row.iter().cloned());
            writer.write_record(&record)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Keep only rows with no missing cell, preserving index values
    pub fn drop_na(&self) -> Frame {
        let mut frame = Frame::new(self.columns.clone());
        for (index, row) in self.index.iter().zip(&self.rows) {
            if !row.iter().any(|cell| Self::is_missing(cell)) {
                frame.push_row(*index, row.clone());
            }
        }
        frame
    }

    fn column_position(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| PrepError::MissingColumn(name.to_string()))
    }

    /// New frame without the named columns
    pub fn drop_columns(&self, names: &[&str]) -> Result<Frame> {
        let dropped: Vec<usize> = names
            .iter()
            .map(|name| self.column_position(name))
            .collect::<Result<_>>()?;

        let kept: Vec<usize> = (0..self.n_cols()).filter(|i| !dropped.contains(i)).collect();
        Ok(self.project(&kept))
    }

    /// New frame holding only the named columns, in the given order
    pub fn select_columns(&self, names: &[&str]) -> Result<Frame> {
        let kept: Vec<usize> = names
            .iter()
            .map(|name| self.column_position(name))
            .collect::<Result<_>>()?;
        Ok(self.project(&kept))
    }

    fn project(&self, positions: &[usize]) -> Frame {
        let columns = positions.iter().map(|&i| self.columns[i].clone()).collect();
        let mut frame = Frame::new(columns);
        for (index, row) in self.index.iter().zip(&self.rows) {
            frame.push_row(*index, positions.iter().map(|&i| row[i].clone()).collect());
        }
        frame
    }

    /// Values of one column, in row order
    pub fn column(&self, name: &str) -> Result<Vec<String>> {
        let pos = self.column_position(name)?;
        Ok(self.rows.iter().map(|row| row[pos].clone()).collect())
    }

    /// New frame holding the rows at the given positions, in the given order
    pub fn take(&self, positions: &[usize]) -> Frame {
        let mut frame = Frame::new(self.columns.clone());
        for &pos in positions {
            frame.push_row(self.index[pos], self.rows[pos].clone());
        }
        frame
    }
}

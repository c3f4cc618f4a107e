//! Base table preparation
//!
//! Reads the raw dataset, drops incomplete rows, and separates predictors
//! from the target label. The two tables keep the surviving raw row indices
//! so they stay joinable by index downstream.

use tracing::info;

use crate::config::{PipelineConfig, RunConfig, LABEL_COLUMN, YEAR_COLUMN};
use crate::data::Frame;
use crate::error::Result;
use crate::pipeline::persist::persist;

/// The predictor table and its row-aligned target table
#[derive(Debug, Clone)]
pub struct BaseTables {
    pub x: Frame,
    pub y: Frame,
}

/// Produce the predictor and target tables from the raw dataset
///
/// Drops every row with a missing cell, removes the label and year columns
/// from the predictors, persists both tables with verification, and records
/// their locations in the run config.
pub fn prepare_base_tables(cfg: &PipelineConfig) -> Result<BaseTables> {
    let raw_path = cfg.raw_path();
    info!("reading raw dataset from {}", raw_path.display());

    let raw = Frame::from_csv(&raw_path)?;
    let complete = raw.drop_na();
    info!(
        "loaded {} rows, {} dropped for missing values",
        raw.n_rows(),
        raw.n_rows() - complete.n_rows()
    );

    let x = complete.drop_columns(&[LABEL_COLUMN, YEAR_COLUMN])?;
    let y = complete.select_columns(&[LABEL_COLUMN])?;

    persist(&x, &cfg.x_path())?;
    persist(&y, &cfg.y_path())?;

    let mut run = RunConfig::new();
    run.set_data_section(cfg);
    run.write(&cfg.config_path)?;

    info!("base tables ready: X and y with {} rows each", x.n_rows());
    Ok(BaseTables { x, y })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrepError;
    use std::fs;
    use tempfile::tempdir;

    fn write_raw(cfg: &PipelineConfig, body: &str) {
        fs::create_dir_all(&cfg.data_dir).unwrap();
        fs::write(cfg.raw_path(), body).unwrap();
    }

    #[test]
    fn test_tables_are_aligned_and_columns_partitioned() {
        let dir = tempdir().unwrap();
        let cfg = PipelineConfig::new(dir.path());
        write_raw(
            &cfg,
            "species,island,bill_length_mm,sex,year\n\
             Adelie,Torgersen,39.1,male,2007\n\
             Adelie,Torgersen,NA,female,2007\n\
             Gentoo,Biscoe,46.1,male,2008\n",
        );

        let tables = prepare_base_tables(&cfg).unwrap();

        assert_eq!(tables.x.n_rows(), tables.y.n_rows());
        assert_eq!(tables.x.index(), tables.y.index());
        // NA row at raw position 1 is gone, original indices survive
        assert_eq!(tables.x.index(), &[0, 2]);
        assert_eq!(
            tables.x.columns(),
            &["island".to_string(), "bill_length_mm".to_string(), "sex".to_string()]
        );
        assert_eq!(tables.y.columns(), &["species".to_string()]);
    }

    #[test]
    fn test_missing_raw_file_creates_nothing() {
        let dir = tempdir().unwrap();
        let cfg = PipelineConfig::new(dir.path());
        fs::create_dir_all(&cfg.data_dir).unwrap();

        let err = prepare_base_tables(&cfg).unwrap_err();
        assert!(matches!(err, PrepError::Csv(_) | PrepError::Io(_)));
        assert!(!cfg.x_path().exists());
        assert!(!cfg.y_path().exists());
    }

    #[test]
    fn test_config_records_base_table_paths() {
        let dir = tempdir().unwrap();
        let cfg = PipelineConfig::new(dir.path());
        write_raw(&cfg, "species,bill_length_mm,year\nAdelie,39.1,2007\n");

        prepare_base_tables(&cfg).unwrap();

        let text = fs::read_to_string(&cfg.config_path).unwrap();
        assert!(text.contains("[DATA]"));
        assert!(text.contains("Penguins_X.csv"));
        assert!(text.contains("Penguins_y.csv"));
    }
}

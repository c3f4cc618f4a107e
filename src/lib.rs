//! # penguin-prep — dataset preparation for penguin classification
//!
//! Prepares the Palmer penguins dataset for a downstream species classifier:
//! loads the raw observations, drops incomplete rows, separates predictors
//! from the target label, and draws a reproducible stratified train/test
//! partition. Artifact locations and downstream training defaults are
//! recorded in a `config.ini`-style file for later stages.
//!
//! ## Modules
//!
//! - `config` - injected pipeline configuration and the run-config artifact
//! - `data` - the index-carrying `Frame` table type
//! - `pipeline` - the loader and splitter stages plus shared persistence
//! - `error` - error types

pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;

pub use config::{ForestDefaults, PipelineConfig, RunConfig};
pub use data::Frame;
pub use error::{PrepError, Result};
pub use pipeline::{prepare_base_tables, split, BaseTables, SplitTables};

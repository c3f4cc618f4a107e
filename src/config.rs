//! Pipeline configuration
//!
//! Two concerns live here:
//! - `PipelineConfig`: where the artifacts live and how the split is drawn,
//!   injected into each stage so tests can run against temporary directories
//! - `RunConfig`: the `config.ini`-style artifact written for downstream
//!   stages, overwritten in full each time a stage completes

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Column holding the class label in the raw dataset
pub const LABEL_COLUMN: &str = "species";
/// Column excluded from the predictors alongside the label
pub const YEAR_COLUMN: &str = "year";

/// Default fraction of rows held out for testing
pub const DEFAULT_TEST_FRACTION: f64 = 0.3;
/// Seed for the stratified draw, fixed so partitions are reproducible
pub const SPLIT_SEED: u64 = 42;

/// Locations and parameters for one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory holding the raw dataset and all artifacts
    pub data_dir: PathBuf,
    /// Location of the run-config artifact
    pub config_path: PathBuf,
    /// Fraction of rows held out for testing, in (0, 1)
    pub test_fraction: f64,
    /// Seed for the stratified draw
    pub seed: u64,
}

impl PipelineConfig {
    /// Configuration rooted at a project directory containing `data/`
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            data_dir: root.join("data"),
            config_path: root.join("config.ini"),
            test_fraction: DEFAULT_TEST_FRACTION,
            seed: SPLIT_SEED,
        }
    }

    /// Override the test fraction
    pub fn with_test_fraction(mut self, test_fraction: f64) -> Self {
        self.test_fraction = test_fraction;
        self
    }

    pub fn raw_path(&self) -> PathBuf {
        self.data_dir.join("penguins.csv")
    }

    pub fn x_path(&self) -> PathBuf {
        self.data_dir.join("Penguins_X.csv")
    }

    pub fn y_path(&self) -> PathBuf {
        self.data_dir.join("Penguins_y.csv")
    }

    pub fn x_train_path(&self) -> PathBuf {
        self.data_dir.join("Train_Penguins_X.csv")
    }

    pub fn y_train_path(&self) -> PathBuf {
        self.data_dir.join("Train_Penguins_y.csv")
    }

    pub fn x_test_path(&self) -> PathBuf {
        self.data_dir.join("Test_Penguins_X.csv")
    }

    pub fn y_test_path(&self) -> PathBuf {
        self.data_dir.join("Test_Penguins_y.csv")
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

/// Default parameters recorded for the downstream random forest stage
///
/// Opaque to this pipeline: the values are written to the run config and never
/// interpreted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestDefaults {
    /// Number of trees in the forest
    pub n_estimators: usize,
    /// Maximum depth of each tree, `None` meaning unbounded
    pub max_depth: Option<usize>,
    /// Minimum samples to split a node
    pub min_samples_split: usize,
    /// Minimum samples in a leaf
    pub min_samples_leaf: usize,
    /// Where the trained model will be saved
    pub model_path: String,
}

impl Default for ForestDefaults {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            model_path: "experiments/random_forest.sav".to_string(),
        }
    }
}

/// Section/key/value model of the run-config artifact
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    sections: Vec<(String, Vec<(String, String)>)>,
}

impl RunConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a key within a section, creating the section on first use
    pub fn set(&mut self, section: &str, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.sections.iter_mut().find(|(name, _)| name == section) {
            Some((_, entries)) => match entries.iter_mut().find(|(k, _)| k == key) {
                Some(entry) => entry.1 = value,
                None => entries.push((key.to_string(), value)),
            },
            None => {
                self.sections
                    .push((section.to_string(), vec![(key.to_string(), value)]));
            }
        }
    }

    /// Look up a key, mainly for tests
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|(name, _)| name == section)?
            .1
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Render in `[SECTION]` / `key = value` form, one blank line per section
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (name, entries) in &self.sections {
            out.push('[');
            out.push_str(name);
            out.push_str("]\n");
            for (key, value) in entries {
                out.push_str(key);
                out.push_str(" = ");
                out.push_str(value);
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }

    /// Overwrite the artifact at `path` with the rendered config
    pub fn write(&self, path: &Path) -> Result<()> {
        fs::write(path, self.render())?;
        Ok(())
    }

    /// Record the base table locations
    pub fn set_data_section(&mut self, cfg: &PipelineConfig) {
        self.set("DATA", "x_data", cfg.x_path().display().to_string());
        self.set("DATA", "y_data", cfg.y_path().display().to_string());
    }

    /// Record the partition locations
    pub fn set_split_section(&mut self, cfg: &PipelineConfig) {
        self.set("SPLIT_DATA", "x_train", cfg.x_train_path().display().to_string());
        self.set("SPLIT_DATA", "y_train", cfg.y_train_path().display().to_string());
        self.set("SPLIT_DATA", "x_test", cfg.x_test_path().display().to_string());
        self.set("SPLIT_DATA", "y_test", cfg.y_test_path().display().to_string());
    }

    /// Record the downstream random forest defaults
    pub fn set_forest_section(&mut self, forest: &ForestDefaults) {
        self.set("RANDOM_FOREST", "n_estimators", forest.n_estimators.to_string());
        let max_depth = match forest.max_depth {
            Some(depth) => depth.to_string(),
            None => "None".to_string(),
        };
        self.set("RANDOM_FOREST", "max_depth", max_depth);
        self.set(
            "RANDOM_FOREST",
            "min_samples_split",
            forest.min_samples_split.to_string(),
        );
        self.set(
            "RANDOM_FOREST",
            "min_samples_leaf",
            forest.min_samples_leaf.to_string(),
        );
        self.set("RANDOM_FOREST", "path", forest.model_path.clone());
    }
}

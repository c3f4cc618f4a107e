//! Stratified train/test partitioning
//!
//! Draws one seeded, label-stratified split of the base tables and persists
//! the four partitions. If the base tables are missing it regenerates them
//! through the loader first; this is a deliberate, documented dependency so
//! the partitioner stays runnable on its own.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use crate::config::{ForestDefaults, PipelineConfig, RunConfig, LABEL_COLUMN};
use crate::data::Frame;
use crate::error::{PrepError, Result};
use crate::pipeline::loader::prepare_base_tables;
use crate::pipeline::persist::persist;

/// The four partition tables produced by one split
#[derive(Debug, Clone)]
pub struct SplitTables {
    pub x_train: Frame,
    pub y_train: Frame,
    pub x_test: Frame,
    pub y_test: Frame,
}

/// Partition the base tables into stratified train and test sets
///
/// Regenerates the base tables via [`prepare_base_tables`] when either
/// artifact is absent. On success the four partitions are persisted with
/// verification and the run config is rewritten in full, including the
/// downstream random forest defaults.
pub fn split(cfg: &PipelineConfig) -> Result<SplitTables> {
    if !cfg.x_path().is_file() || !cfg.y_path().is_file() {
        warn!("base tables missing, regenerating via the loader");
        prepare_base_tables(cfg)?;
    }

    let x = Frame::from_csv_indexed(&cfg.x_path())?;
    let y = Frame::from_csv_indexed(&cfg.y_path())?;
    if x.n_rows() != y.n_rows() {
        return Err(PrepError::Misaligned {
            x_rows: x.n_rows(),
            y_rows: y.n_rows(),
        });
    }

    let labels = y.column(LABEL_COLUMN)?;
    let (train_pos, test_pos) = stratified_indices(&labels, cfg.test_fraction, cfg.seed)?;

    let tables = SplitTables {
        x_train: x.take(&train_pos),
        y_train: y.take(&train_pos),
        x_test: x.take(&test_pos),
        y_test: y.take(&test_pos),
    };

    persist(&tables.x_train, &cfg.x_train_path())?;
    persist(&tables.y_train, &cfg.y_train_path())?;
    persist(&tables.x_test, &cfg.x_test_path())?;
    persist(&tables.y_test, &cfg.y_test_path())?;

    let mut run = RunConfig::new();
    run.set_data_section(cfg);
    run.set_split_section(cfg);
    run.set_forest_section(&ForestDefaults::default());
    run.write(&cfg.config_path)?;

    info!(
        "split {} rows into {} train / {} test",
        x.n_rows(),
        tables.x_train.n_rows(),
        tables.x_test.n_rows()
    );
    Ok(tables)
}

/// Draw stratified train/test row positions
///
/// Each label keeps `round(test_fraction * count)` of its rows in the test
/// set, corrected by largest remainder so the overall test size equals
/// `round(test_fraction * n)`. Positions are returned sorted so partitions
/// keep the source row order; the randomness decides membership only.
fn stratified_indices(
    labels: &[String],
    test_fraction: f64,
    seed: u64,
) -> Result<(Vec<usize>, Vec<usize>)> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(PrepError::InvalidTestFraction(test_fraction));
    }

    let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (pos, label) in labels.iter().enumerate() {
        groups.entry(label.as_str()).or_default().push(pos);
    }
    for (label, members) in &groups {
        if members.len() < 2 {
            return Err(PrepError::StratumTooSmall {
                label: (*label).to_string(),
                count: members.len(),
            });
        }
    }

    let n = labels.len();
    let target_total = (test_fraction * n as f64).round() as usize;

    // Per-label floor allocation, then largest-remainder correction up to the
    // global target.
    let mut allocations: Vec<(&str, usize, f64)> = groups
        .iter()
        .map(|(label, members)| {
            let exact = test_fraction * members.len() as f64;
            let base = exact.floor() as usize;
            (*label, base, exact - base as f64)
        })
        .collect();

    let allocated: usize = allocations.iter().map(|(_, base, _)| base).sum();
    let mut remaining = target_total.saturating_sub(allocated);

    let mut by_remainder: Vec<usize> = (0..allocations.len()).collect();
    by_remainder.sort_by(|&a, &b| {
        allocations[b]
            .2
            .partial_cmp(&allocations[a].2)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for &i in &by_remainder {
        if remaining == 0 {
            break;
        }
        allocations[i].1 += 1;
        remaining -= 1;
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut train = Vec::with_capacity(n);
    let mut test = Vec::with_capacity(target_total);

    for (label, take, _) in &allocations {
        let mut members = groups[label].clone();
        members.shuffle(&mut rng);
        // every label keeps at least one training row
        let take = (*take).min(members.len() - 1);
        test.extend_from_slice(&members[..take]);
        train.extend_from_slice(&members[take..]);
    }

    train.sort_unstable();
    test.sort_unstable();
    Ok((train, test))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balanced_labels() -> Vec<String> {
        let mut labels = Vec::new();
        for species in ["Adelie", "Chinstrap", "Gentoo"] {
            labels.extend(std::iter::repeat(species.to_string()).take(100));
        }
        labels
    }

    #[test]
    fn test_balanced_three_class_scenario() {
        let labels = balanced_labels();
        let (train, test) = stratified_indices(&labels, 0.3, 42).unwrap();

        assert_eq!(test.len(), 90);
        assert_eq!(train.len(), 210);

        // 30 test rows per class
        for class in 0..3 {
            let range = (class * 100)..((class + 1) * 100);
            let in_test = test.iter().filter(|p| range.contains(*p)).count();
            assert_eq!(in_test, 30);
        }
    }

    #[test]
    fn test_split_is_complete_and_disjoint() {
        let labels = balanced_labels();
        let (train, test) = stratified_indices(&labels, 0.3, 42).unwrap();

        let mut all: Vec<usize> = train.iter().chain(test.iter()).copied().collect();
        all.sort_unstable();
        let expected: Vec<usize> = (0..labels.len()).collect();
        assert_eq!(all, expected);
    }

    #[test]
    fn test_same_seed_reproduces_partition() {
        let labels = balanced_labels();
        let first = stratified_indices(&labels, 0.3, 42).unwrap();
        let second = stratified_indices(&labels, 0.3, 42).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unbalanced_classes_keep_proportions() {
        let mut labels = vec!["Adelie".to_string(); 150];
        labels.extend(vec!["Chinstrap".to_string(); 50]);
        let (train, test) = stratified_indices(&labels, 0.3, 42).unwrap();

        assert_eq!(train.len() + test.len(), 200);
        assert_eq!(test.len(), 60);
        let adelie_in_test = test.iter().filter(|&&p| p < 150).count();
        assert_eq!(adelie_in_test, 45);
    }

    #[test]
    fn test_invalid_fraction_rejected() {
        let labels = balanced_labels();
        for bad in [0.0, 1.0, -0.2, 1.5] {
            let err = stratified_indices(&labels, bad, 42).unwrap_err();
            assert!(matches!(err, PrepError::InvalidTestFraction(_)));
        }
    }

    #[test]
    fn test_singleton_stratum_rejected() {
        let mut labels = vec!["Adelie".to_string(); 10];
        labels.push("Chinstrap".to_string());

        let err = stratified_indices(&labels, 0.3, 42).unwrap_err();
        assert!(matches!(
            err,
            PrepError::StratumTooSmall { label, count: 1 } if label == "Chinstrap"
        ));
    }
}

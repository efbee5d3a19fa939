//! Level-by-level orchestration of the anomaly tests.
//!
//! The detector decomposes the observed sequence with the baseline's wavelet
//! and walks both hierarchies from level 0 (raw data) towards the deepest
//! level they share. At every level all configured algorithms run
//! independently, in parallel with the `parallel` feature. Their verdicts are
//! then folded sequentially: each algorithm keeps the worst verdict it has
//! produced so far. The walk stops at the first level after which no
//! algorithm is left in the Suspected state.
//!
//! Observed sequences containing NaN or infinite values are rejected. Any
//! algorithm failure aborts the whole call; no partial map is returned.

use crate::algorithms::AnomalyAlgorithm;
use crate::config::DetectionConfig;
use crate::errors::{validate_all_finite, AnomalyDetectionError, AnomalyResult};
use crate::results::{AnomalyVerdict, VerdictKind};
use crate::transform::{decompose, FeatureHierarchy, LevelStatistics};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Worst verdict per algorithm name, and how far the walk went.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DetectionReport {
    /// Worst verdict of every configured algorithm, keyed by algorithm name
    pub verdicts: BTreeMap<String, AnomalyVerdict>,
    /// Number of levels evaluated before the walk stopped
    pub levels_visited: usize,
}

impl DetectionReport {
    /// Verdicts that are Suspected or Confirmed.
    pub fn anomalies(&self) -> impl Iterator<Item = &AnomalyVerdict> {
        self.verdicts.values().filter(|verdict| verdict.is_anomalous())
    }

    /// Worst kind across all algorithms, `Normal` when nothing was evaluated.
    pub fn worst_kind(&self) -> VerdictKind {
        self.verdicts
            .values()
            .map(|verdict| verdict.kind)
            .max()
            .unwrap_or(VerdictKind::Normal)
    }
}

/// Compares observed sequences against a baseline hierarchy.
///
/// Holds no per-call state, so one detector (and one baseline) can serve
/// concurrent calls.
#[derive(Debug, Clone, Default)]
pub struct WaveletAnomalyDetector {
    config: DetectionConfig,
}

impl WaveletAnomalyDetector {
    /// Creates a detector running `config.algorithms` at `config.sensitivity`.
    pub fn new(config: DetectionConfig) -> Self {
        Self { config }
    }

    /// The configuration this detector runs with.
    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Worst verdict per configured algorithm for `observed` against `baseline`.
    ///
    /// # Example
    /// ```rust
    /// use wavelet_anomaly::{decompose, DetectionConfig, Wavelet, WaveletAnomalyDetector};
    ///
    /// let normal: Vec<f64> = (0..64).map(|i| (i as f64 * 0.4).sin()).collect();
    /// let baseline = decompose(&normal, Wavelet::Haar);
    /// let detector = WaveletAnomalyDetector::new(DetectionConfig::default());
    ///
    /// let verdicts = detector.detect(&normal, &baseline).unwrap();
    /// assert_eq!(verdicts.len(), 3);
    /// assert!(verdicts.values().all(|v| !v.is_anomalous()));
    /// ```
    pub fn detect(
        &self,
        observed: &[f64],
        baseline: &FeatureHierarchy,
    ) -> AnomalyResult<BTreeMap<String, AnomalyVerdict>> {
        self.detect_with_report(observed, baseline)
            .map(|report| report.verdicts)
    }

    /// Like [`detect`](Self::detect), also reporting the number of levels visited.
    pub fn detect_with_report(
        &self,
        observed: &[f64],
        baseline: &FeatureHierarchy,
    ) -> AnomalyResult<DetectionReport> {
        validate_all_finite(observed, "observed")?;
        let test = decompose(observed, baseline.wavelet());
        self.detect_hierarchy(baseline, &test)
    }

    /// Runs the level walk on an already decomposed test hierarchy.
    pub fn detect_hierarchy(
        &self,
        baseline: &FeatureHierarchy,
        test: &FeatureHierarchy,
    ) -> AnomalyResult<DetectionReport> {
        detect_levels(
            baseline,
            test,
            &self.config.algorithms,
            self.config.effective_sensitivity(),
        )
    }
}

/// Single-call form of the detector: decomposes `observed` and walks the
/// levels with the given algorithms and sensitivity.
///
/// `sensitivity` is used as given and must already be strictly positive.
pub fn detect(
    observed: &[f64],
    baseline: &FeatureHierarchy,
    algorithms: &[AnomalyAlgorithm],
    sensitivity: f64,
) -> AnomalyResult<BTreeMap<String, AnomalyVerdict>> {
    validate_all_finite(observed, "observed")?;
    let test = decompose(observed, baseline.wavelet());
    detect_levels(baseline, &test, algorithms, sensitivity).map(|report| report.verdicts)
}

fn detect_levels(
    baseline: &FeatureHierarchy,
    test: &FeatureHierarchy,
    algorithms: &[AnomalyAlgorithm],
    sensitivity: f64,
) -> AnomalyResult<DetectionReport> {
    if baseline.wavelet() != test.wavelet() {
        return Err(AnomalyDetectionError::InvalidParameter {
            parameter: "test.wavelet".to_string(),
            value: test.depth() as f64,
            constraint: format!(
                "must match baseline wavelet {} (got {})",
                baseline.wavelet(),
                test.wavelet()
            ),
        });
    }

    let mut verdicts: BTreeMap<String, AnomalyVerdict> = BTreeMap::new();
    let mut levels_visited = 0;

    if algorithms.is_empty() {
        return Ok(DetectionReport {
            verdicts,
            levels_visited,
        });
    }

    let shared_depth = baseline.depth().min(test.depth());
    for (baseline_level, test_level) in baseline
        .levels()
        .iter()
        .zip(test.levels())
        .take(shared_depth)
    {
        let level_verdicts = evaluate_level(algorithms, baseline_level, test_level, sensitivity)?;
        levels_visited += 1;

        for verdict in level_verdicts {
            keep_worst(&mut verdicts, verdict);
        }

        #[cfg(feature = "debug_logging")]
        log::debug!(
            "level {}: {:?}",
            levels_visited - 1,
            verdicts
                .values()
                .map(|v| (v.source_name.as_str(), v.kind))
                .collect::<Vec<_>>()
        );

        let unresolved = verdicts
            .values()
            .any(|verdict| verdict.kind == VerdictKind::Suspected);
        if !unresolved {
            break;
        }
    }

    Ok(DetectionReport {
        verdicts,
        levels_visited,
    })
}

/// Runs every algorithm on one level pair; the join happens before return.
fn evaluate_level(
    algorithms: &[AnomalyAlgorithm],
    baseline: &LevelStatistics,
    test: &LevelStatistics,
    sensitivity: f64,
) -> AnomalyResult<Vec<AnomalyVerdict>> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        algorithms
            .par_iter()
            .map(|algorithm| algorithm.test_level(baseline, test, sensitivity))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        algorithms
            .iter()
            .map(|algorithm| algorithm.test_level(baseline, test, sensitivity))
            .collect()
    }
}

/// Stores `verdict` if its algorithm has none yet or it is strictly worse.
fn keep_worst(verdicts: &mut BTreeMap<String, AnomalyVerdict>, verdict: AnomalyVerdict) {
    let replace = match verdicts.get(&verdict.source_name) {
        None => true,
        Some(current) => verdict.kind > current.kind,
    };
    if replace {
        verdicts.insert(verdict.source_name.clone(), verdict);
    }
}

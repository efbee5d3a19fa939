//! # Detection Configuration
//!
//! This module contains the configuration consumed by the detector: which
//! algorithms run on every decomposition level and how strongly their
//! statistics are amplified before the threshold comparison.

use crate::algorithms::AnomalyAlgorithm;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Smallest sensitivity accepted; lower values are raised to it.
pub const MIN_SENSITIVITY: f64 = 0.01;

/// Sensitivity used when none is given, or when the given one is NaN.
pub const DEFAULT_SENSITIVITY: f64 = 1.0;

/// Configuration for controlling which algorithms run and how strict they are
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DetectionConfig {
    /// Algorithms evaluated on every visited level
    pub algorithms: Vec<AnomalyAlgorithm>,
    /// Multiplier applied to every test statistic
    pub sensitivity: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            algorithms: AnomalyAlgorithm::all().to_vec(),
            sensitivity: DEFAULT_SENSITIVITY,
        }
    }
}

impl DetectionConfig {
    /// Mean-shift test only
    pub fn mean_only() -> Self {
        Self {
            algorithms: vec![AnomalyAlgorithm::MeanShiftApproximation],
            ..Self::default()
        }
    }

    /// Both variance-ratio tests
    pub fn variance_only() -> Self {
        Self {
            algorithms: vec![
                AnomalyAlgorithm::VarianceRatioApproximation,
                AnomalyAlgorithm::VarianceRatioDetail,
            ],
            ..Self::default()
        }
    }

    /// Replaces the algorithm set. Duplicates are dropped, first occurrence kept.
    pub fn with_algorithms<I>(mut self, algorithms: I) -> Self
    where
        I: IntoIterator<Item = AnomalyAlgorithm>,
    {
        let mut selected = Vec::new();
        for algorithm in algorithms {
            if !selected.contains(&algorithm) {
                selected.push(algorithm);
            }
        }
        self.algorithms = selected;
        self
    }

    /// Sets the sensitivity, clamped by [`clamp_sensitivity`].
    pub fn with_sensitivity(mut self, sensitivity: f64) -> Self {
        self.sensitivity = clamp_sensitivity(sensitivity);
        self
    }

    /// Check if `algorithm` is configured
    pub fn is_enabled(&self, algorithm: AnomalyAlgorithm) -> bool {
        self.algorithms.contains(&algorithm)
    }

    /// Sensitivity with clamping re-applied, for configs whose public field
    /// was set directly or deserialized.
    pub fn effective_sensitivity(&self) -> f64 {
        clamp_sensitivity(self.sensitivity)
    }
}

/// Maps an arbitrary sensitivity into `[MIN_SENSITIVITY, f64::MAX]`.
///
/// NaN becomes [`DEFAULT_SENSITIVITY`] and `+inf` becomes `f64::MAX`.
pub fn clamp_sensitivity(sensitivity: f64) -> f64 {
    if sensitivity.is_nan() {
        log::warn!(
            "sensitivity is NaN, using default {}",
            DEFAULT_SENSITIVITY
        );
        return DEFAULT_SENSITIVITY;
    }
    if sensitivity < MIN_SENSITIVITY {
        log::warn!(
            "sensitivity {} below minimum, clamped to {}",
            sensitivity,
            MIN_SENSITIVITY
        );
        return MIN_SENSITIVITY;
    }
    sensitivity.min(f64::MAX)
}

/// Builds an algorithm list from three independent toggles, in display order.
pub fn select_algorithms(
    mean_shift: bool,
    approximation_variance: bool,
    detail_variance: bool,
) -> Vec<AnomalyAlgorithm> {
    [
        (mean_shift, AnomalyAlgorithm::MeanShiftApproximation),
        (approximation_variance, AnomalyAlgorithm::VarianceRatioApproximation),
        (detail_variance, AnomalyAlgorithm::VarianceRatioDetail),
    ]
    .into_iter()
    .filter_map(|(enabled, algorithm)| enabled.then_some(algorithm))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let config = DetectionConfig::default();
        assert_eq!(config.algorithms.len(), 3);
        assert_eq!(config.sensitivity, 1.0);

        assert_eq!(
            DetectionConfig::mean_only().algorithms,
            vec![AnomalyAlgorithm::MeanShiftApproximation]
        );
        let variance = DetectionConfig::variance_only();
        assert!(!variance.is_enabled(AnomalyAlgorithm::MeanShiftApproximation));
        assert!(variance.is_enabled(AnomalyAlgorithm::VarianceRatioDetail));
    }

    #[test]
    fn test_sensitivity_clamping() {
        assert_eq!(clamp_sensitivity(0.0), MIN_SENSITIVITY);
        assert_eq!(clamp_sensitivity(-5.0), MIN_SENSITIVITY);
        assert_eq!(clamp_sensitivity(f64::NEG_INFINITY), MIN_SENSITIVITY);
        assert_eq!(clamp_sensitivity(f64::NAN), DEFAULT_SENSITIVITY);
        assert_eq!(clamp_sensitivity(f64::INFINITY), f64::MAX);
        assert_eq!(clamp_sensitivity(2.5), 2.5);

        let config = DetectionConfig::default().with_sensitivity(0.001);
        assert_eq!(config.sensitivity, MIN_SENSITIVITY);

        let raw = DetectionConfig {
            sensitivity: -1.0,
            ..DetectionConfig::default()
        };
        assert_eq!(raw.effective_sensitivity(), MIN_SENSITIVITY);
    }

    #[test]
    fn test_with_algorithms_deduplicates() {
        let config = DetectionConfig::default().with_algorithms([
            AnomalyAlgorithm::VarianceRatioDetail,
            AnomalyAlgorithm::MeanShiftApproximation,
            AnomalyAlgorithm::VarianceRatioDetail,
        ]);
        assert_eq!(
            config.algorithms,
            vec![
                AnomalyAlgorithm::VarianceRatioDetail,
                AnomalyAlgorithm::MeanShiftApproximation
            ]
        );
    }

    #[test]
    fn test_select_algorithms() {
        assert_eq!(select_algorithms(true, true, true), AnomalyAlgorithm::all().to_vec());
        assert_eq!(
            select_algorithms(false, false, true),
            vec![AnomalyAlgorithm::VarianceRatioDetail]
        );
        assert!(select_algorithms(false, false, false).is_empty());
    }
}

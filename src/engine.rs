//! Multi-feature detection on top of a baseline model.
//!
//! The engine splits observed samples into feature columns and runs the
//! detector once per column against the matching baseline hierarchy. It only
//! collects results; display formatting is left to the caller.

use crate::config::DetectionConfig;
use crate::detector::WaveletAnomalyDetector;
use crate::errors::{AnomalyDetectionError, AnomalyResult};
use crate::model::{
    build_baseline, build_named_baseline, transpose_samples, MultiFeatureBaselineModel,
};
use crate::results::AnomalyVerdict;
use crate::sample_table::SampleTable;
use crate::wavelet::Wavelet;
use std::collections::BTreeMap;

/// Detection outcome for one feature column.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureDetection {
    /// Column index in the baseline model
    pub feature_index: usize,
    /// Name of the feature in the baseline model
    pub feature_name: String,
    /// Worst verdict per algorithm name
    pub verdicts: BTreeMap<String, AnomalyVerdict>,
}

impl FeatureDetection {
    /// Suspected and Confirmed verdicts only.
    pub fn anomalies(&self) -> impl Iterator<Item = &AnomalyVerdict> {
        self.verdicts.values().filter(|verdict| verdict.is_anomalous())
    }

    /// True if any algorithm flagged this feature.
    pub fn has_anomaly(&self) -> bool {
        self.anomalies().next().is_some()
    }
}

/// A baseline model paired with the detector configuration.
#[derive(Debug, Clone)]
pub struct DetectionEngine {
    model: MultiFeatureBaselineModel,
    detector: WaveletAnomalyDetector,
}

impl DetectionEngine {
    /// Wraps an existing (for example, reloaded) model.
    pub fn new(model: MultiFeatureBaselineModel, config: DetectionConfig) -> Self {
        Self {
            model,
            detector: WaveletAnomalyDetector::new(config),
        }
    }

    /// Builds the baseline from normal samples, then wraps it.
    pub fn from_normal_samples<S: AsRef<[f64]>>(
        samples: &[S],
        wavelet: Wavelet,
        config: DetectionConfig,
    ) -> AnomalyResult<Self> {
        let model = build_baseline(samples, wavelet)?;
        Ok(Self::new(model, config))
    }

    /// Builds the baseline from a normal sample table, keeping its names.
    pub fn from_normal_table(
        table: &SampleTable,
        wavelet: Wavelet,
        config: DetectionConfig,
    ) -> AnomalyResult<Self> {
        let model = build_named_baseline(table.features.clone(), &table.samples, wavelet)?;
        Ok(Self::new(model, config))
    }

    /// The baseline model.
    pub fn model(&self) -> &MultiFeatureBaselineModel {
        &self.model
    }

    /// The detector configuration.
    pub fn config(&self) -> &DetectionConfig {
        self.detector.config()
    }

    /// Detects every feature column of `samples` against the baseline.
    ///
    /// Fails if the sample width differs from the model's feature count.
    pub fn detect_samples<S: AsRef<[f64]>>(
        &self,
        samples: &[S],
    ) -> AnomalyResult<Vec<FeatureDetection>> {
        let columns = transpose_samples(samples)?;
        self.detect_columns(&columns)
    }

    /// Detects every column of `table`.
    ///
    /// Results carry the model's feature names; a table whose names differ
    /// from them is accepted with a warning as long as the widths agree.
    pub fn detect_table(&self, table: &SampleTable) -> AnomalyResult<Vec<FeatureDetection>> {
        if table.features.as_slice() != self.model.feature_names() {
            log::warn!(
                "table features {:?} differ from baseline features {:?}, matching by position",
                table.features,
                self.model.feature_names()
            );
        }
        self.detect_samples(&table.samples)
    }

    /// Detects one already separated column per feature.
    pub fn detect_columns(&self, columns: &[Vec<f64>]) -> AnomalyResult<Vec<FeatureDetection>> {
        if columns.len() != self.model.feature_count() {
            return Err(AnomalyDetectionError::DimensionMismatch {
                context: "observed feature count".to_string(),
                expected: self.model.feature_count(),
                actual: columns.len(),
            });
        }

        columns
            .iter()
            .zip(self.model.hierarchies())
            .zip(self.model.feature_names())
            .enumerate()
            .map(|(feature_index, ((column, baseline), name))| {
                Ok(FeatureDetection {
                    feature_index,
                    feature_name: name.clone(),
                    verdicts: self.detector.detect(column, baseline)?,
                })
            })
            .collect()
    }
}

//! Multi-feature baseline built from known-normal observations.
//!
//! A sample set is a list of equal-width observation vectors. The builder
//! transposes it into one sequence per feature column, keeping the input
//! order, and decomposes every column with the same wavelet.

use crate::errors::{validate_all_finite, AnomalyDetectionError, AnomalyResult};
use crate::transform::{decompose, FeatureHierarchy};
use crate::wavelet::Wavelet;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One decomposition hierarchy per feature column.
///
/// Built once from a normal-only sample set; read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "ModelParts"))]
pub struct MultiFeatureBaselineModel {
    feature_names: Vec<String>,
    hierarchies: Vec<FeatureHierarchy>,
}

/// Unchecked field layout; deserialized models go through [`MultiFeatureBaselineModel::new`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct ModelParts {
    feature_names: Vec<String>,
    hierarchies: Vec<FeatureHierarchy>,
}

#[cfg(feature = "serde")]
impl TryFrom<ModelParts> for MultiFeatureBaselineModel {
    type Error = AnomalyDetectionError;

    fn try_from(parts: ModelParts) -> Result<Self, Self::Error> {
        Self::new(parts.feature_names, parts.hierarchies)
    }
}

impl MultiFeatureBaselineModel {
    /// Assembles a model from named hierarchies, checking that names and
    /// hierarchies align and that every hierarchy uses one wavelet.
    pub fn new(
        feature_names: Vec<String>,
        hierarchies: Vec<FeatureHierarchy>,
    ) -> AnomalyResult<Self> {
        let model = Self {
            feature_names,
            hierarchies,
        };
        model.validate()?;
        Ok(model)
    }

    /// Checks the model invariants.
    pub fn validate(&self) -> AnomalyResult<()> {
        let first = self
            .hierarchies
            .first()
            .ok_or_else(|| AnomalyDetectionError::EmptyInput {
                context: "baseline model hierarchies".to_string(),
            })?;

        if self.feature_names.len() != self.hierarchies.len() {
            return Err(AnomalyDetectionError::DimensionMismatch {
                context: "feature names per hierarchy".to_string(),
                expected: self.hierarchies.len(),
                actual: self.feature_names.len(),
            });
        }

        if let Some(index) = self
            .hierarchies
            .iter()
            .position(|hierarchy| hierarchy.wavelet() != first.wavelet())
        {
            return Err(AnomalyDetectionError::InvalidParameter {
                parameter: format!("hierarchies[{}].wavelet", index),
                value: index as f64,
                constraint: format!("must match model wavelet {}", first.wavelet()),
            });
        }

        Ok(())
    }

    /// Wavelet shared by every feature.
    pub fn wavelet(&self) -> Wavelet {
        self.hierarchies[0].wavelet()
    }

    /// Number of feature columns.
    pub fn feature_count(&self) -> usize {
        self.hierarchies.len()
    }

    /// Feature names, aligned with [`hierarchies`](Self::hierarchies).
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Hierarchies in feature column order.
    pub fn hierarchies(&self) -> &[FeatureHierarchy] {
        &self.hierarchies
    }

    /// Hierarchy of feature column `index`.
    pub fn hierarchy(&self, index: usize) -> Option<&FeatureHierarchy> {
        self.hierarchies.get(index)
    }

    /// Hierarchy of the feature called `name`.
    pub fn hierarchy_by_name(&self, name: &str) -> Option<&FeatureHierarchy> {
        self.feature_names
            .iter()
            .position(|feature| feature == name)
            .map(|index| &self.hierarchies[index])
    }
}

/// Builds a baseline with synthetic feature names `"1".."N"`.
///
/// Fails if `samples` is empty, if the vectors differ in width, or if any
/// value is not finite. No partial model is produced.
///
/// # Example
/// ```rust
/// use wavelet_anomaly::{build_baseline, Wavelet};
///
/// let samples: Vec<Vec<f64>> = (0..32).map(|i| vec![i as f64, (i as f64).sin()]).collect();
/// let model = build_baseline(&samples, Wavelet::Haar).unwrap();
/// assert_eq!(model.feature_count(), 2);
/// assert_eq!(model.feature_names(), ["1", "2"]);
/// ```
pub fn build_baseline<S: AsRef<[f64]>>(
    samples: &[S],
    wavelet: Wavelet,
) -> AnomalyResult<MultiFeatureBaselineModel> {
    let columns = transpose_samples(samples)?;
    let names = synthetic_feature_names(columns.len());
    build_from_columns(names, &columns, wavelet)
}

/// Builds a baseline whose features carry the given names.
pub fn build_named_baseline<S: AsRef<[f64]>>(
    feature_names: Vec<String>,
    samples: &[S],
    wavelet: Wavelet,
) -> AnomalyResult<MultiFeatureBaselineModel> {
    let columns = transpose_samples(samples)?;
    build_from_columns(feature_names, &columns, wavelet)
}

fn build_from_columns(
    feature_names: Vec<String>,
    columns: &[Vec<f64>],
    wavelet: Wavelet,
) -> AnomalyResult<MultiFeatureBaselineModel> {
    if feature_names.len() != columns.len() {
        return Err(AnomalyDetectionError::DimensionMismatch {
            context: "feature names per sample column".to_string(),
            expected: columns.len(),
            actual: feature_names.len(),
        });
    }

    let hierarchies = decompose_columns(columns, wavelet);

    #[cfg(feature = "debug_logging")]
    log::debug!(
        "built baseline: {} features, {} samples, depths {:?}",
        hierarchies.len(),
        columns.first().map_or(0, Vec::len),
        hierarchies.iter().map(FeatureHierarchy::depth).collect::<Vec<_>>()
    );

    MultiFeatureBaselineModel::new(feature_names, hierarchies)
}

fn decompose_columns(columns: &[Vec<f64>], wavelet: Wavelet) -> Vec<FeatureHierarchy> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        columns
            .par_iter()
            .map(|column| decompose(column, wavelet))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        columns
            .iter()
            .map(|column| decompose(column, wavelet))
            .collect()
    }
}

/// Transposes observation vectors into feature columns.
///
/// Column `i` holds every sample's `i`-th value in input order. Rejects an
/// empty set, zero-width vectors, ragged widths and non-finite values.
pub fn transpose_samples<S: AsRef<[f64]>>(samples: &[S]) -> AnomalyResult<Vec<Vec<f64>>> {
    let first = samples.first().ok_or_else(|| AnomalyDetectionError::EmptyInput {
        context: "sample set".to_string(),
    })?;
    let width = first.as_ref().len();
    if width == 0 {
        return Err(AnomalyDetectionError::EmptyInput {
            context: "sample vector".to_string(),
        });
    }

    let mut columns = vec![Vec::with_capacity(samples.len()); width];
    for (row_index, sample) in samples.iter().enumerate() {
        let sample = sample.as_ref();
        if sample.len() != width {
            return Err(AnomalyDetectionError::DimensionMismatch {
                context: format!("width of sample {}", row_index),
                expected: width,
                actual: sample.len(),
            });
        }
        validate_all_finite(sample, &format!("samples[{}]", row_index))?;

        for (column, &value) in columns.iter_mut().zip(sample) {
            column.push(value);
        }
    }

    Ok(columns)
}

/// Ordinal names `"1".."N"`.
pub fn synthetic_feature_names(count: usize) -> Vec<String> {
    (1..=count).map(|i| i.to_string()).collect()
}

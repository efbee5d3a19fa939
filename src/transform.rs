//! Discrete wavelet decomposition into a leveled hierarchy.
//!
//! Level 0 holds the raw sequence in both coefficient slots. Each further
//! level filters the previous approximation with the scaling filter and the
//! detail filter, keeping every second output (downsampling by 2). There is no
//! boundary padding: a filter of length `m` over `n` inputs yields
//! `floor((n - m) / 2) + 1` outputs when `n >= m` and none otherwise. The
//! first empty approximation ends the hierarchy, so its depth is roughly
//! `log2(n / m)`.

use crate::errors::{AnomalyDetectionError, AnomalyResult};
use crate::wavelet::Wavelet;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Coefficients of one decomposition level.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LevelStatistics {
    /// Wavelet that produced this level
    pub wavelet: Wavelet,
    /// Low-frequency (smoothed) coefficients
    pub approximation: Vec<f64>,
    /// High-frequency (residual) coefficients
    pub detail: Vec<f64>,
}

impl LevelStatistics {
    /// The un-decomposed level 0: both slots hold the raw sequence.
    pub fn raw(sequence: &[f64], wavelet: Wavelet) -> Self {
        Self {
            wavelet,
            approximation: sequence.to_vec(),
            detail: sequence.to_vec(),
        }
    }

    /// Applies one decomposition step to this level's approximation.
    pub fn decompose_next(&self) -> LevelStatistics {
        LevelStatistics {
            wavelet: self.wavelet,
            approximation: filter_downsample(&self.approximation, self.wavelet.scaling_filter()),
            detail: filter_downsample(&self.approximation, self.wavelet.detail_filter()),
        }
    }
}

/// Ordered decomposition levels of one feature.
///
/// Index 0 is the raw data and index `k` is the result of `k` recursive
/// decompositions. The hierarchy is never empty and every level shares one
/// wavelet.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<LevelStatistics>", into = "Vec<LevelStatistics>"))]
pub struct FeatureHierarchy {
    levels: Vec<LevelStatistics>,
}

impl FeatureHierarchy {
    /// Builds a hierarchy from explicit levels, checking its invariants.
    pub fn from_levels(levels: Vec<LevelStatistics>) -> AnomalyResult<Self> {
        let first = levels.first().ok_or_else(|| AnomalyDetectionError::EmptyInput {
            context: "feature hierarchy levels".to_string(),
        })?;

        if let Some((index, level)) = levels
            .iter()
            .enumerate()
            .find(|(_, level)| level.wavelet != first.wavelet)
        {
            return Err(AnomalyDetectionError::InvalidParameter {
                parameter: format!("levels[{}].wavelet", index),
                value: index as f64,
                constraint: format!("{} (level 0 uses it, this level uses {})", first.wavelet, level.wavelet),
            });
        }

        Ok(Self { levels })
    }

    /// Wavelet shared by all levels.
    pub fn wavelet(&self) -> Wavelet {
        self.levels[0].wavelet
    }

    /// Number of levels, including level 0.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// All levels, raw data first.
    pub fn levels(&self) -> &[LevelStatistics] {
        &self.levels
    }

    /// Level at `index`, if present.
    pub fn level(&self, index: usize) -> Option<&LevelStatistics> {
        self.levels.get(index)
    }

    /// The original un-decomposed sequence.
    pub fn raw(&self) -> &[f64] {
        &self.levels[0].approximation
    }
}

impl TryFrom<Vec<LevelStatistics>> for FeatureHierarchy {
    type Error = AnomalyDetectionError;

    fn try_from(levels: Vec<LevelStatistics>) -> Result<Self, Self::Error> {
        Self::from_levels(levels)
    }
}

impl From<FeatureHierarchy> for Vec<LevelStatistics> {
    fn from(hierarchy: FeatureHierarchy) -> Self {
        hierarchy.levels
    }
}

/// Decomposes `sequence` until the approximation can no longer be filtered.
///
/// Deterministic: identical inputs produce bit-identical hierarchies.
///
/// # Example
/// ```rust
/// use wavelet_anomaly::{decompose, Wavelet};
///
/// let data: Vec<f64> = (0..16).map(|i| i as f64).collect();
/// let hierarchy = decompose(&data, Wavelet::Haar);
/// let lengths: Vec<usize> = hierarchy.levels().iter().map(|l| l.approximation.len()).collect();
/// assert_eq!(lengths, vec![16, 8, 4, 2, 1]);
/// ```
pub fn decompose(sequence: &[f64], wavelet: Wavelet) -> FeatureHierarchy {
    let mut levels = vec![LevelStatistics::raw(sequence, wavelet)];

    loop {
        let next = levels[levels.len() - 1].decompose_next();
        if next.approximation.is_empty() {
            break;
        }
        levels.push(next);
    }

    FeatureHierarchy { levels }
}

/// FIR convolution at even offsets: `out[k] = Σ_j filter[j] * input[2k + j]`.
pub fn filter_downsample(input: &[f64], filter: &[f64]) -> Vec<f64> {
    let m = filter.len();
    if m == 0 || input.len() < m {
        return Vec::new();
    }

    input
        .windows(m)
        .step_by(2)
        .map(|window| window.iter().zip(filter).map(|(x, h)| h * x).sum())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_filter_downsample_haar() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        let approximation = filter_downsample(&data, Wavelet::Haar.scaling_filter());
        let detail = filter_downsample(&data, Wavelet::Haar.detail_filter());

        // Trailing odd sample is dropped: offsets 0 and 2 only
        assert_eq!(approximation, vec![3.0, 7.0]);
        assert_eq!(detail, vec![-1.0, -1.0]);
    }

    #[test]
    fn test_filter_shorter_than_input_yields_nothing() {
        assert!(filter_downsample(&[1.0, 2.0, 3.0], Wavelet::Daubechies4.scaling_filter()).is_empty());
        assert!(filter_downsample(&[], Wavelet::Haar.scaling_filter()).is_empty());
    }

    #[test]
    fn test_haar_depth_on_sixteen_samples() {
        let data: Vec<f64> = (0..16).map(|i| (i as f64 * 0.3).sin()).collect();
        let hierarchy = decompose(&data, Wavelet::Haar);

        assert_eq!(hierarchy.depth(), 5);
        let lengths: Vec<usize> = hierarchy
            .levels()
            .iter()
            .map(|level| level.approximation.len())
            .collect();
        assert_eq!(lengths, vec![16, 8, 4, 2, 1]);
        for level in hierarchy.levels() {
            assert_eq!(level.approximation.len(), level.detail.len());
        }
    }

    #[test]
    fn test_d4_depth_on_sixteen_samples() {
        let data: Vec<f64> = (0..16).map(|i| i as f64).collect();
        let hierarchy = decompose(&data, Wavelet::Daubechies4);

        // 16 -> floor((16-4)/2)+1 = 7 -> floor((7-4)/2)+1 = 2 -> stop
        let lengths: Vec<usize> = hierarchy
            .levels()
            .iter()
            .map(|level| level.approximation.len())
            .collect();
        assert_eq!(lengths, vec![16, 7, 2]);
    }

    #[test]
    fn test_level_zero_holds_raw_data() {
        let data = vec![4.0, -1.0, 2.5, 0.0];
        let hierarchy = decompose(&data, Wavelet::Daubechies6);

        assert_eq!(hierarchy.depth(), 1);
        assert_eq!(hierarchy.raw(), data.as_slice());
        assert_eq!(hierarchy.levels()[0].detail, data);
        assert_eq!(hierarchy.wavelet(), Wavelet::Daubechies6);
    }

    #[test]
    fn test_constant_sequence_has_zero_detail() {
        let data = vec![2.5; 64];
        for wavelet in Wavelet::ALL {
            let hierarchy = decompose(&data, wavelet);
            for level in &hierarchy.levels()[1..] {
                for &coefficient in &level.detail {
                    assert_approx_eq!(coefficient, 0.0, 1e-5);
                }
            }
        }
    }

    #[test]
    fn test_decompose_is_deterministic() {
        let data: Vec<f64> = (0..300).map(|i| (i as f64 * 0.17).sin() * (i as f64).sqrt()).collect();
        for wavelet in Wavelet::ALL {
            let first = decompose(&data, wavelet);
            let second = decompose(&data, wavelet);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_from_levels_rejects_mixed_wavelets() {
        let levels = vec![
            LevelStatistics::raw(&[1.0, 2.0], Wavelet::Haar),
            LevelStatistics::raw(&[3.0], Wavelet::Daubechies4),
        ];
        assert!(FeatureHierarchy::from_levels(levels).is_err());
        assert!(matches!(
            FeatureHierarchy::from_levels(Vec::new()),
            Err(AnomalyDetectionError::EmptyInput { .. })
        ));
    }
}

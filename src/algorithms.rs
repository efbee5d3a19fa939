//! Statistical hypothesis tests comparing baseline and test coefficients.
//!
//! Every algorithm receives both coefficient pairs of a level but reads only
//! the pair its statistic is defined on; the other pair may be empty. Each
//! test computes one statistic, multiplies it by the caller's sensitivity and
//! compares it against two critical limits:
//!
//! - above the 0.05 limit the verdict is [`VerdictKind::Suspected`];
//! - above the 0.001 limit as well it is [`VerdictKind::Confirmed`] and the
//!   reported limit becomes the 0.001 limit.
//!
//! Arrays with fewer than two coefficients have no sample variance and are
//! rejected with `InsufficientData`. A zero variance in a denominator is a
//! `NumericalError`.

use crate::distributions::{
    fisher_critical_value, student_critical_value, CONFIRMED_SIGNIFICANCE,
    SUSPECTED_SIGNIFICANCE,
};
use crate::errors::{validate_parameter, AnomalyDetectionError, AnomalyResult};
use crate::math_utils::{sample_moments, SampleMoments};
use crate::results::{AnomalyVerdict, VerdictKind};
use crate::transform::LevelStatistics;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// Statistic and limits of one test before naming and messages are attached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestStatistic {
    /// Statistic after the sensitivity multiplier
    pub value: f64,
    /// Limit at the 0.05 significance level
    pub suspected_limit: f64,
    /// Limit at the 0.001 significance level
    pub confirmed_limit: f64,
}

impl TestStatistic {
    /// Applies the two-threshold escalation, returning the kind and the
    /// limit to report with it.
    pub fn escalate(&self) -> (VerdictKind, f64) {
        let mut outcome = (VerdictKind::Normal, self.suspected_limit);
        if self.value > self.suspected_limit {
            outcome = (VerdictKind::Suspected, self.suspected_limit);
        }
        if self.value > self.confirmed_limit {
            outcome = (VerdictKind::Confirmed, self.confirmed_limit);
        }
        outcome
    }
}

/// The family of detection algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AnomalyAlgorithm {
    /// Cochran–Cox mean-shift test on approximation coefficients
    MeanShiftApproximation,
    /// Fisher variance-ratio test on approximation coefficients
    VarianceRatioApproximation,
    /// Fisher variance-ratio test on detail coefficients
    VarianceRatioDetail,
}

impl AnomalyAlgorithm {
    /// Every algorithm, in display order.
    pub fn all() -> [AnomalyAlgorithm; 3] {
        [
            AnomalyAlgorithm::MeanShiftApproximation,
            AnomalyAlgorithm::VarianceRatioApproximation,
            AnomalyAlgorithm::VarianceRatioDetail,
        ]
    }

    /// Display name; used as the verdict's `source_name` and the detector's
    /// aggregation key.
    pub fn name(&self) -> &'static str {
        match self {
            AnomalyAlgorithm::MeanShiftApproximation => "Cochran-Cox criterion (approximation mean)",
            AnomalyAlgorithm::VarianceRatioApproximation => {
                "Fisher criterion (approximation variance)"
            }
            AnomalyAlgorithm::VarianceRatioDetail => "Fisher criterion (detail variance)",
        }
    }

    fn message(&self, kind: VerdictKind) -> Option<String> {
        let text = match (self, kind) {
            (_, VerdictKind::Normal) => return None,
            (AnomalyAlgorithm::MeanShiftApproximation, VerdictKind::Suspected) => {
                "High probability of a long-term low-frequency anomaly."
            }
            (AnomalyAlgorithm::MeanShiftApproximation, VerdictKind::Confirmed) => {
                "Long-term low-frequency anomaly detected."
            }
            (AnomalyAlgorithm::VarianceRatioApproximation, VerdictKind::Suspected) => {
                "High probability of a low-frequency variance anomaly."
            }
            (AnomalyAlgorithm::VarianceRatioApproximation, VerdictKind::Confirmed) => {
                "Low-frequency variance anomaly detected."
            }
            (AnomalyAlgorithm::VarianceRatioDetail, VerdictKind::Suspected) => {
                "High probability of a short-term high-frequency anomaly."
            }
            (AnomalyAlgorithm::VarianceRatioDetail, VerdictKind::Confirmed) => {
                "Short-term high-frequency anomaly detected."
            }
        };
        Some(text.to_string())
    }

    /// Compares baseline coefficients against test coefficients.
    ///
    /// Mean-shift and approximation-variance tests read the approximation
    /// arrays; the detail-variance test reads the detail arrays.
    pub fn test(
        &self,
        baseline_approximation: &[f64],
        baseline_detail: &[f64],
        test_approximation: &[f64],
        test_detail: &[f64],
        sensitivity: f64,
    ) -> AnomalyResult<AnomalyVerdict> {
        validate_sensitivity(sensitivity)?;

        let statistic = match self {
            AnomalyAlgorithm::MeanShiftApproximation => {
                mean_shift_statistic(baseline_approximation, test_approximation, sensitivity)?
            }
            AnomalyAlgorithm::VarianceRatioApproximation => {
                variance_ratio_statistic(baseline_approximation, test_approximation, sensitivity)?
            }
            AnomalyAlgorithm::VarianceRatioDetail => {
                variance_ratio_statistic(baseline_detail, test_detail, sensitivity)?
            }
        };

        let (kind, limit) = statistic.escalate();
        Ok(AnomalyVerdict {
            kind,
            statistic_value: statistic.value,
            statistic_limit: limit,
            source_name: self.name().to_string(),
            message: self.message(kind),
        })
    }

    /// Runs [`test`](Self::test) on a pair of matching decomposition levels.
    pub fn test_level(
        &self,
        baseline: &LevelStatistics,
        observed: &LevelStatistics,
        sensitivity: f64,
    ) -> AnomalyResult<AnomalyVerdict> {
        self.test(
            &baseline.approximation,
            &baseline.detail,
            &observed.approximation,
            &observed.detail,
            sensitivity,
        )
    }
}

impl fmt::Display for AnomalyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn validate_sensitivity(sensitivity: f64) -> AnomalyResult<()> {
    validate_parameter(sensitivity, f64::MIN_POSITIVE, f64::MAX, "sensitivity")
}

/// Rejects NaN and infinite statistics, which no limit comparison can classify.
fn ensure_finite(value: f64, operation: &str) -> AnomalyResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AnomalyDetectionError::NumericalError {
            reason: format!("statistic is not finite ({})", value),
            operation: Some(operation.to_string()),
        })
    }
}

/// Cochran–Cox statistic for a shift in means.
///
/// `|mean_test - mean_baseline| / sqrt(se²_baseline + se²_test)`, where
/// `se² = variance / n`. The limit at each significance level blends the two
/// Student critical values (at `n - 1` degrees of freedom per side) weighted
/// by each side's squared standard error.
pub fn mean_shift_statistic(
    baseline: &[f64],
    test: &[f64],
    sensitivity: f64,
) -> AnomalyResult<TestStatistic> {
    let baseline = sample_moments(baseline)?;
    let test = sample_moments(test)?;

    let baseline_error = baseline.squared_standard_error();
    let test_error = test.squared_standard_error();
    let pooled_error = baseline_error + test_error;
    if pooled_error.is_nan() || pooled_error <= 0.0 {
        return Err(AnomalyDetectionError::NumericalError {
            reason: "both coefficient arrays have zero variance".to_string(),
            operation: Some("mean-shift test".to_string()),
        });
    }

    let value = (test.mean - baseline.mean).abs() / pooled_error.sqrt() * sensitivity;
    ensure_finite(value, "mean-shift test")?;

    let blended_limit = |alpha: f64| -> AnomalyResult<f64> {
        let baseline_t = student_critical_value(baseline.degrees_of_freedom(), alpha)?;
        let test_t = student_critical_value(test.degrees_of_freedom(), alpha)?;
        Ok((baseline_error * baseline_t + test_error * test_t) / pooled_error)
    };

    Ok(TestStatistic {
        value,
        suspected_limit: blended_limit(SUSPECTED_SIGNIFICANCE)?,
        confirmed_limit: blended_limit(CONFIRMED_SIGNIFICANCE)?,
    })
}

/// Fisher statistic for a change in variance: `variance_test / variance_baseline`.
///
/// Limits are the F critical values at `(n_baseline - 1, n_test - 1)`.
pub fn variance_ratio_statistic(
    baseline: &[f64],
    test: &[f64],
    sensitivity: f64,
) -> AnomalyResult<TestStatistic> {
    let baseline: SampleMoments = sample_moments(baseline)?;
    let test = sample_moments(test)?;

    if baseline.variance.is_nan() || baseline.variance <= 0.0 {
        return Err(AnomalyDetectionError::NumericalError {
            reason: "baseline coefficients have zero variance".to_string(),
            operation: Some("variance-ratio test".to_string()),
        });
    }

    let value = test.variance / baseline.variance * sensitivity;
    ensure_finite(value, "variance-ratio test")?;
    let numerator = baseline.degrees_of_freedom();
    let denominator = test.degrees_of_freedom();

    Ok(TestStatistic {
        value,
        suspected_limit: fisher_critical_value(numerator, denominator, SUSPECTED_SIGNIFICANCE)?,
        confirmed_limit: fisher_critical_value(numerator, denominator, CONFIRMED_SIGNIFICANCE)?,
    })
}

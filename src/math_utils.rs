//! Sample statistics shared by the hypothesis tests.
//!
//! The tests compare coefficient arrays by their first two moments. Both
//! moments are computed in a single Welford pass; variance uses the Bessel
//! correction and therefore needs at least two observations.

use crate::errors::{validate_data_length, AnomalyResult};

/// Mean and Bessel-corrected variance of a coefficient array.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleMoments {
    /// Number of observations
    pub count: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Sample variance, `Σ(x - mean)² / (n - 1)`
    pub variance: f64,
}

impl SampleMoments {
    /// Degrees of freedom of the variance estimate, `n - 1`.
    pub fn degrees_of_freedom(&self) -> usize {
        self.count - 1
    }

    /// Squared standard error of the mean, `variance / n`.
    pub fn squared_standard_error(&self) -> f64 {
        self.variance / self.count as f64
    }
}

/// Computes mean and sample variance in one pass.
///
/// Fails with `InsufficientData` for fewer than two values, where the sample
/// variance is undefined.
pub fn sample_moments(data: &[f64]) -> AnomalyResult<SampleMoments> {
    validate_data_length(data, 2)?;

    // Welford (1962): numerically stable single pass
    let mut mean = 0.0;
    let mut m2 = 0.0;
    for (i, &value) in data.iter().enumerate() {
        let count = (i + 1) as f64;
        let delta = value - mean;
        mean += delta / count;
        m2 += delta * (value - mean);
    }

    Ok(SampleMoments {
        count: data.len(),
        mean,
        variance: m2 / (data.len() - 1) as f64,
    })
}

/// Bessel-corrected sample variance.
pub fn sample_variance(data: &[f64]) -> AnomalyResult<f64> {
    sample_moments(data).map(|m| m.variance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AnomalyDetectionError;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_sample_moments_match_two_pass() {
        let data: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let moments = sample_moments(&data).unwrap();

        assert_eq!(moments.count, 10);
        assert_eq!(moments.degrees_of_freedom(), 9);
        assert_approx_eq!(moments.mean, 4.5, 1e-12);
        // Σ(i - 4.5)² for i in 0..10 is 82.5
        assert_approx_eq!(moments.variance, 82.5 / 9.0, 1e-12);
        assert_approx_eq!(moments.squared_standard_error(), 82.5 / 90.0, 1e-12);
    }

    #[test]
    fn test_variance_requires_two_values() {
        assert!(matches!(
            sample_variance(&[1.0]),
            Err(AnomalyDetectionError::InsufficientData {
                required: 2,
                actual: 1
            })
        ));
        assert!(sample_variance(&[]).is_err());
    }

    #[test]
    fn test_constant_data_has_zero_variance() {
        assert_eq!(sample_variance(&[3.25; 8]).unwrap(), 0.0);
    }
}

//! Error types and validation functions for wavelet anomaly detection.
//!
//! Every fallible operation in the crate returns [`AnomalyResult`]. Errors fall
//! into four categories (see [`ErrorCategory`]): malformed input, statistical
//! table domain violations, numeric degeneracy, and I/O framing around the
//! sample table and model persistence. None of them is retried internally.

use std::sync::Arc;
use thiserror::Error;

/// Error types for baseline construction and anomaly detection.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum AnomalyDetectionError {
    /// Not enough coefficients or samples for the requested computation.
    #[error("Insufficient data: need at least {required} points, got {actual}")]
    InsufficientData {
        /// Minimum required data points
        required: usize,
        /// Actual number of data points provided
        actual: usize,
    },

    /// An input collection that must not be empty was empty.
    #[error("Empty input: {context}")]
    EmptyInput {
        /// What was empty
        context: String,
    },

    /// Ragged sample rows or a feature count that does not match the model.
    #[error("Dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Where the mismatch was found
        context: String,
        /// Expected width
        expected: usize,
        /// Width actually seen
        actual: usize,
    },

    /// Invalid parameter value.
    #[error("Invalid parameter: {parameter} = {value}, expected {constraint}")]
    InvalidParameter {
        /// Parameter name
        parameter: String,
        /// Invalid value provided
        value: f64,
        /// Valid range or constraint description
        constraint: String,
    },

    /// No critical value table exists for the requested significance level.
    #[error("No distribution table for significance level {level}; use 0.05 or 0.001")]
    UnsupportedSignificanceLevel {
        /// Requested significance level
        level: f64,
    },

    /// Degrees of freedom outside the tabulated range.
    #[error("Degrees of freedom {degrees_of_freedom} outside table range [1, {max}]")]
    DegreesOfFreedomOutOfRange {
        /// Requested degrees of freedom
        degrees_of_freedom: usize,
        /// Largest tabulated breakpoint
        max: usize,
    },

    /// Numerical computation error, e.g. a zero variance in a ratio statistic.
    #[error("Numerical computation failed: {reason}")]
    NumericalError {
        /// Detailed reason for numerical failure
        reason: String,
        /// Operation that failed
        operation: Option<String>,
    },

    /// A sample table line could not be parsed.
    #[error("Parse error on line {line}: {reason}")]
    ParseError {
        /// 1-based line number
        line: usize,
        /// What went wrong
        reason: String,
    },

    /// I/O operation error.
    #[error("I/O operation failed: {operation}")]
    IoError {
        /// I/O operation that failed
        operation: String,
        /// Underlying error if available
        #[source]
        source: Option<Arc<std::io::Error>>,
    },

    /// Serialization/deserialization error.
    #[error("Serialization failed ({format}): {reason}")]
    SerializationError {
        /// Format that failed (JSON)
        format: String,
        /// Underlying reason
        reason: String,
    },
}

/// Coarse classification of [`AnomalyDetectionError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed request: ragged tables, empty sets, too few coefficients.
    InputShape,
    /// Statistical table lookups outside their domain.
    Domain,
    /// Degenerate numerics such as zero variance.
    Numeric,
    /// Reading, parsing or (de)serializing external data.
    Io,
}

impl AnomalyDetectionError {
    /// The taxonomy bucket this error belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InsufficientData { .. }
            | Self::EmptyInput { .. }
            | Self::DimensionMismatch { .. }
            | Self::InvalidParameter { .. } => ErrorCategory::InputShape,
            Self::UnsupportedSignificanceLevel { .. }
            | Self::DegreesOfFreedomOutOfRange { .. } => ErrorCategory::Domain,
            Self::NumericalError { .. } => ErrorCategory::Numeric,
            Self::ParseError { .. } | Self::IoError { .. } | Self::SerializationError { .. } => {
                ErrorCategory::Io
            }
        }
    }

    pub(crate) fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::IoError {
            operation: operation.into(),
            source: Some(Arc::new(source)),
        }
    }
}

/// Result type for anomaly detection operations.
pub type AnomalyResult<T> = Result<T, AnomalyDetectionError>;

/// Validates that data has sufficient length for a computation.
///
/// # Example
/// ```rust
/// use wavelet_anomaly::errors::validate_data_length;
///
/// let data = vec![1.0, 2.0, 3.0];
/// assert!(validate_data_length(&data, 2).is_ok());
/// assert!(validate_data_length(&data, 5).is_err());
/// ```
pub fn validate_data_length(data: &[f64], min_required: usize) -> AnomalyResult<()> {
    if data.len() < min_required {
        Err(AnomalyDetectionError::InsufficientData {
            required: min_required,
            actual: data.len(),
        })
    } else {
        Ok(())
    }
}

/// Validates that a parameter is within expected bounds (inclusive).
///
/// # Example
/// ```rust
/// use wavelet_anomaly::errors::validate_parameter;
///
/// assert!(validate_parameter(0.5, 0.0, 1.0, "alpha").is_ok());
/// assert!(validate_parameter(1.5, 0.0, 1.0, "alpha").is_err());
/// ```
pub fn validate_parameter(value: f64, min: f64, max: f64, name: &str) -> AnomalyResult<()> {
    if value.is_nan() {
        return Err(AnomalyDetectionError::InvalidParameter {
            parameter: name.to_string(),
            value,
            constraint: "must not be NaN".to_string(),
        });
    }

    if min.is_nan() || max.is_nan() || min > max {
        return Err(AnomalyDetectionError::NumericalError {
            reason: format!(
                "Invalid bounds for parameter {}: min={}, max={}",
                name, min, max
            ),
            operation: None,
        });
    }

    if value < min || value > max {
        Err(AnomalyDetectionError::InvalidParameter {
            parameter: name.to_string(),
            value,
            constraint: format!("[{}, {}]", min, max),
        })
    } else {
        Ok(())
    }
}

/// Validates that all values in a slice are finite.
///
/// Returns on the first non-finite value, reporting its index.
///
/// # Example
/// ```rust
/// use wavelet_anomaly::errors::validate_all_finite;
///
/// assert!(validate_all_finite(&[1.0, 2.0, 3.0], "test").is_ok());
/// assert!(validate_all_finite(&[1.0, f64::NAN, 3.0], "test").is_err());
/// ```
pub fn validate_all_finite(data: &[f64], name: &str) -> AnomalyResult<()> {
    if let Some((i, &value)) = data.iter().enumerate().find(|(_, &v)| !v.is_finite()) {
        let value_desc = if value.is_nan() {
            "NaN".to_string()
        } else if value.is_sign_positive() {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        };

        return Err(AnomalyDetectionError::InvalidParameter {
            parameter: format!("{}[{}]", name, i),
            value,
            constraint: format!("finite value, got {}", value_desc),
        });
    }

    Ok(())
}

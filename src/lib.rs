//! # Wavelet Anomaly Detection
//!
//! Multi-resolution statistical detection of deviations from a learned
//! "normal" baseline.
//!
//! A known-normal series is decomposed with a discrete wavelet transform into
//! a hierarchy of approximation/detail coefficient pairs. New data is
//! decomposed the same way and compared level by level with hypothesis tests
//! whose critical values come from fixed Student and Fisher tables. Each test
//! escalates from Normal to Suspected (0.05) to Confirmed (0.001), the worst
//! verdict per test is kept, and the walk through the levels stops as soon as
//! no test is left undecided.
//!
//! ## Quick Start
//!
//! ```rust
//! use wavelet_anomaly::{DetectionConfig, DetectionEngine, VerdictKind, Wavelet};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 512 normal observations of two features
//!     let normal: Vec<Vec<f64>> = (0..512)
//!         .map(|i| {
//!             let t = i as f64;
//!             vec![(t * 0.21).sin(), (t * 0.05).cos()]
//!         })
//!         .collect();
//!
//!     let engine = DetectionEngine::from_normal_samples(
//!         &normal,
//!         Wavelet::Daubechies4,
//!         DetectionConfig::default(),
//!     )?;
//!
//!     // Second feature now fluctuates four times as strongly
//!     let observed: Vec<Vec<f64>> = normal.iter().map(|row| vec![row[0], row[1] * 4.0]).collect();
//!
//!     for feature in engine.detect_samples(&observed)? {
//!         for verdict in feature.anomalies() {
//!             println!(
//!                 "{}: {} ({} > {:.3})",
//!                 feature.feature_name, verdict.source_name, verdict.statistic_value,
//!                 verdict.statistic_limit
//!             );
//!             assert_eq!(verdict.kind, VerdictKind::Confirmed);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Algorithms
//!
//! - **Cochran–Cox mean shift** on approximation coefficients
//! - **Fisher variance ratio** on approximation coefficients
//! - **Fisher variance ratio** on detail coefficients
//!
//! ## Architecture
//!
//! [`decompose`] builds a [`FeatureHierarchy`]; [`build_baseline`] does so per
//! feature column to form a [`MultiFeatureBaselineModel`]. The
//! [`WaveletAnomalyDetector`] compares one observed sequence with one
//! hierarchy, and the [`DetectionEngine`] applies it to every column of a
//! sample set. Models persist as versioned JSON with the `serde` feature.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
pub mod config;
pub mod errors;
pub mod math_utils;
pub mod results;

// Signal processing
pub mod transform;
pub mod wavelet;

// Statistical testing
pub mod algorithms;
pub mod detector;
pub mod distributions;

// Baselines and data
pub mod engine;
pub mod model;
#[cfg(feature = "serde")]
pub mod persistence;
pub mod sample_table;

// Re-export main types
pub use algorithms::AnomalyAlgorithm;
pub use config::{select_algorithms, DetectionConfig, MIN_SENSITIVITY};
pub use detector::{detect, DetectionReport, WaveletAnomalyDetector};
pub use distributions::{
    critical_value, Distribution, CONFIRMED_SIGNIFICANCE, SUSPECTED_SIGNIFICANCE,
};
pub use engine::{DetectionEngine, FeatureDetection};
pub use errors::{AnomalyDetectionError, AnomalyResult, ErrorCategory};
pub use model::{build_baseline, build_named_baseline, MultiFeatureBaselineModel};
pub use results::{AnomalyVerdict, VerdictKind};
pub use sample_table::SampleTable;
pub use transform::{decompose, FeatureHierarchy, LevelStatistics};
pub use wavelet::Wavelet;

#[cfg(feature = "serde")]
pub use persistence::{
    load_model, load_model_from_path, model_from_bytes, model_to_bytes, save_model,
    save_model_to_path,
};

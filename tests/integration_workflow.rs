//! Integration tests for full workflow scenarios
//!
//! These tests drive the public API end to end: building a baseline from
//! normal data, detecting shifted data, persisting models and loading sample
//! tables from disk.

use rand::prelude::*;
use rand_distr::Normal;
use std::collections::BTreeMap;
use std::io::Write;
use wavelet_anomaly::{
    build_baseline, decompose, load_model_from_path, save_model_to_path, AnomalyAlgorithm,
    AnomalyVerdict, DetectionConfig, DetectionEngine, SampleTable, VerdictKind, Wavelet, WaveletAnomalyDetector,
};

fn gaussian(len: usize, mean: f64, std_dev: f64, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(mean, std_dev).unwrap();
    (0..len).map(|_| rng.sample(normal)).collect()
}

fn kind_of(verdicts: &BTreeMap<String, AnomalyVerdict>, algorithm: AnomalyAlgorithm) -> VerdictKind {
    verdicts[algorithm.name()].kind
}

/// Test scenario: operator trains on normal data and replays it
///
/// Replaying the exact training data must never raise an alarm, for every
/// wavelet family.
#[test]
fn test_replayed_training_data_is_normal() {
    let normal = gaussian(1024, 0.0, 1.0, 7);

    for wavelet in Wavelet::ALL {
        let baseline = decompose(&normal, wavelet);
        let report = WaveletAnomalyDetector::default()
            .detect_with_report(&normal, &baseline)
            .unwrap();

        assert_eq!(report.levels_visited, 1, "{} walked past level 0", wavelet);
        assert_eq!(report.verdicts.len(), 3);
        assert_eq!(report.worst_kind(), VerdictKind::Normal);
    }
}

/// Test scenario: the process level jumps by five standard deviations
#[test]
fn test_level_shift_confirmed_by_mean_test() {
    let normal = gaussian(1024, 0.0, 1.0, 11);
    let shifted = gaussian(1024, 5.0, 1.0, 12);
    let baseline = decompose(&normal, Wavelet::Daubechies4);

    let verdicts = WaveletAnomalyDetector::default()
        .detect(&shifted, &baseline)
        .unwrap();

    assert_eq!(
        kind_of(&verdicts, AnomalyAlgorithm::MeanShiftApproximation),
        VerdictKind::Confirmed
    );
    let mean_verdict = &verdicts[AnomalyAlgorithm::MeanShiftApproximation.name()];
    assert!(mean_verdict.statistic_value > mean_verdict.statistic_limit);
    assert!(mean_verdict.message.is_some());
}

/// Test scenario: the process becomes three times as noisy
#[test]
fn test_volatility_burst_confirmed_by_variance_tests() {
    let normal = gaussian(1024, 0.0, 1.0, 21);
    let noisy = gaussian(1024, 0.0, 3.0, 22);
    let baseline = decompose(&normal, Wavelet::Haar);

    let verdicts = WaveletAnomalyDetector::new(DetectionConfig::variance_only())
        .detect(&noisy, &baseline)
        .unwrap();

    assert_eq!(verdicts.len(), 2);
    assert_eq!(
        kind_of(&verdicts, AnomalyAlgorithm::VarianceRatioApproximation),
        VerdictKind::Confirmed
    );
    assert_eq!(
        kind_of(&verdicts, AnomalyAlgorithm::VarianceRatioDetail),
        VerdictKind::Confirmed
    );
}

/// Test scenario: baseline saved to disk, reloaded in a later session
///
/// The reloaded model must produce exactly the same verdicts.
#[test]
fn test_persisted_model_detects_identically() {
    let samples: Vec<Vec<f64>> = gaussian(600, 0.0, 1.0, 31)
        .chunks(3)
        .map(|chunk| chunk.to_vec())
        .collect();
    let model = build_baseline(&samples, Wavelet::Daubechies8).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("baseline.json");
    save_model_to_path(&model, &path).unwrap();
    let reloaded = load_model_from_path(&path).unwrap();
    assert_eq!(reloaded, model);

    let observed: Vec<Vec<f64>> = gaussian(600, 0.5, 2.0, 32)
        .chunks(3)
        .map(|chunk| chunk.to_vec())
        .collect();

    let original = DetectionEngine::new(model, DetectionConfig::default());
    let restored = DetectionEngine::new(reloaded, DetectionConfig::default());
    assert_eq!(
        original.detect_samples(&observed).unwrap(),
        restored.detect_samples(&observed).unwrap()
    );
}

/// Test scenario: normal and observed data arrive as semicolon tables on disk
#[test]
fn test_sample_table_files_workflow() {
    let dir = tempfile::tempdir().unwrap();

    let write_table = |name: &str, scale: f64, seed: u64| {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "pressure;temperature").unwrap();
        let first = gaussian(256, 10.0, 1.0, seed);
        let second = gaussian(256, 50.0, 1.0, seed + 1);
        for (p, t) in first.iter().zip(&second) {
            writeln!(file, "{};{};", p, 50.0 + (t - 50.0) * scale).unwrap();
        }
        path
    };

    let normal_path = write_table("normal.csv", 1.0, 41);
    let observed_path = write_table("observed.csv", 4.0, 41);

    let normal = SampleTable::from_path(&normal_path).unwrap();
    let observed = SampleTable::from_path(&observed_path).unwrap();
    assert_eq!(normal.features, vec!["pressure", "temperature"]);
    assert_eq!(normal.len(), 256);

    let engine = DetectionEngine::from_normal_table(
        &normal,
        Wavelet::Daubechies4,
        DetectionConfig::default(),
    )
    .unwrap();
    let detections = engine.detect_table(&observed).unwrap();

    // Pressure column is identical, temperature fluctuates four times as much
    assert!(!detections[0].has_anomaly());
    assert_eq!(detections[1].feature_name, "temperature");
    assert_eq!(
        detections[1].verdicts[AnomalyAlgorithm::VarianceRatioDetail.name()].kind,
        VerdictKind::Confirmed
    );
}

/// Test scenario: analyst restricts the run to the mean test and raises the sensitivity
#[test]
fn test_sensitivity_exposes_small_shift() {
    let normal: Vec<f64> = (0..512).map(|i| (i as f64 * 0.3).sin()).collect();
    let shifted: Vec<f64> = normal.iter().map(|x| x + 0.05).collect();
    let baseline = decompose(&normal, Wavelet::Haar);

    let relaxed = WaveletAnomalyDetector::new(DetectionConfig::mean_only())
        .detect(&shifted, &baseline)
        .unwrap();
    assert_eq!(
        kind_of(&relaxed, AnomalyAlgorithm::MeanShiftApproximation),
        VerdictKind::Normal
    );

    let strict = WaveletAnomalyDetector::new(DetectionConfig::mean_only().with_sensitivity(50.0))
        .detect(&shifted, &baseline)
        .unwrap();
    assert_eq!(
        kind_of(&strict, AnomalyAlgorithm::MeanShiftApproximation),
        VerdictKind::Confirmed
    );
}

//! Wavelet families used for decomposition.
//!
//! Each wavelet is a fixed pair of finite impulse response filters: the detail
//! (wavelet) filter and the scaling filter. The taps are unnormalized, so the
//! scaling filter of every family sums to 2 and each decomposition level
//! doubles the magnitude of the approximation coefficients.

use crate::errors::AnomalyDetectionError;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const HAAR_DETAIL: [f64; 2] = [1.0, -1.0];
const HAAR_SCALING: [f64; 2] = [1.0, 1.0];

const D4_DETAIL: [f64; 4] = [-0.1830127, -0.3169873, 1.1830127, -0.6830127];
const D4_SCALING: [f64; 4] = [0.6830127, 1.1830127, 0.3169873, -0.1830127];

const D6_DETAIL: [f64; 6] = [
    0.0498175, 0.12083221, -0.19093442, -0.650365, 1.14111692, -0.47046721,
];
const D6_SCALING: [f64; 6] = [
    0.47046721, 1.14111692, 0.650365, -0.19093442, -0.12083221, 0.0498175,
];

const D8_DETAIL: [f64; 8] = [
    -0.01498699, -0.0465036, 0.0436163, 0.26450717, -0.03957503, -0.89220014, 1.01094572,
    -0.32580343,
];
const D8_SCALING: [f64; 8] = [
    0.32580343, 1.01094572, 0.89220014, -0.03957503, -0.26450717, 0.0436163, 0.0465036,
    -0.01498699,
];

/// A wavelet family identified by its filter pair.
///
/// Values are stateless and `Copy`; they are shared freely across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Wavelet {
    /// Haar wavelet, filter length 2
    Haar,
    /// Daubechies wavelet with 4 taps
    #[default]
    Daubechies4,
    /// Daubechies wavelet with 6 taps
    Daubechies6,
    /// Daubechies wavelet with 8 taps
    Daubechies8,
}

impl Wavelet {
    /// Every supported family, in order of increasing filter length.
    pub const ALL: [Wavelet; 4] = [
        Wavelet::Haar,
        Wavelet::Daubechies4,
        Wavelet::Daubechies6,
        Wavelet::Daubechies8,
    ];

    /// High-pass filter producing detail coefficients.
    pub fn detail_filter(&self) -> &'static [f64] {
        match self {
            Wavelet::Haar => &HAAR_DETAIL,
            Wavelet::Daubechies4 => &D4_DETAIL,
            Wavelet::Daubechies6 => &D6_DETAIL,
            Wavelet::Daubechies8 => &D8_DETAIL,
        }
    }

    /// Low-pass filter producing approximation coefficients.
    pub fn scaling_filter(&self) -> &'static [f64] {
        match self {
            Wavelet::Haar => &HAAR_SCALING,
            Wavelet::Daubechies4 => &D4_SCALING,
            Wavelet::Daubechies6 => &D6_SCALING,
            Wavelet::Daubechies8 => &D8_SCALING,
        }
    }

    /// Number of taps in each filter.
    pub fn filter_len(&self) -> usize {
        self.scaling_filter().len()
    }

    /// Human readable family name.
    pub fn name(&self) -> &'static str {
        match self {
            Wavelet::Haar => "Haar",
            Wavelet::Daubechies4 => "Daubechies 4",
            Wavelet::Daubechies6 => "Daubechies 6",
            Wavelet::Daubechies8 => "Daubechies 8",
        }
    }
}

impl fmt::Display for Wavelet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Wavelet {
    type Err = AnomalyDetectionError;

    /// Accepts the display name or the short forms `haar`, `d4`, `d6`, `d8`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-', '_'], "");
        match normalized.as_str() {
            "haar" => Ok(Wavelet::Haar),
            "d4" | "db4" | "daubechies4" => Ok(Wavelet::Daubechies4),
            "d6" | "db6" | "daubechies6" => Ok(Wavelet::Daubechies6),
            "d8" | "db8" | "daubechies8" => Ok(Wavelet::Daubechies8),
            _ => Err(AnomalyDetectionError::ParseError {
                line: 0,
                reason: format!("unknown wavelet '{}'", s),
            }),
        }
    }
}

//! Verdicts produced by the anomaly detection algorithms.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// Three-state escalation of a hypothesis test outcome.
///
/// Totally ordered `Normal < Suspected < Confirmed`; the detector keeps the
/// greatest kind seen for each algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VerdictKind {
    /// Statistic below the 0.05 limit
    Normal,
    /// Statistic above the 0.05 limit: high probability of an anomaly
    Suspected,
    /// Statistic above the 0.001 limit
    Confirmed,
}

impl VerdictKind {
    /// True for `Suspected` and `Confirmed`.
    pub fn is_anomalous(&self) -> bool {
        *self != VerdictKind::Normal
    }
}

impl fmt::Display for VerdictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            VerdictKind::Normal => "normal",
            VerdictKind::Suspected => "suspected",
            VerdictKind::Confirmed => "confirmed",
        };
        f.write_str(label)
    }
}

/// Outcome of one algorithm on one decomposition level.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnomalyVerdict {
    /// Escalation state
    pub kind: VerdictKind,
    /// Test statistic after the sensitivity multiplier
    pub statistic_value: f64,
    /// Limit the statistic was compared against; the Confirmed limit once
    /// the verdict is Confirmed, the Suspected limit otherwise
    pub statistic_limit: f64,
    /// Name of the algorithm that produced the verdict
    pub source_name: String,
    /// Explanation attached to non-Normal verdicts
    pub message: Option<String>,
}

impl AnomalyVerdict {
    /// True when the verdict is Suspected or Confirmed.
    pub fn is_anomalous(&self) -> bool {
        self.kind.is_anomalous()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_kind_order() {
        assert!(VerdictKind::Normal < VerdictKind::Suspected);
        assert!(VerdictKind::Suspected < VerdictKind::Confirmed);
        assert_eq!(
            [VerdictKind::Suspected, VerdictKind::Confirmed, VerdictKind::Normal]
                .into_iter()
                .max(),
            Some(VerdictKind::Confirmed)
        );
        assert!(!VerdictKind::Normal.is_anomalous());
        assert!(VerdictKind::Suspected.is_anomalous());
        assert_eq!(VerdictKind::Confirmed.to_string(), "confirmed");
    }
}

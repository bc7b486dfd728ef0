//! Qualitative confidence labels for display.

use serde::Serialize;
use std::fmt;

/// Three-tier confidence label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        };
        write!(f, "{label}")
    }
}

/// Display-facing confidence assessment for a surfaced recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Confidence {
    pub tier: ConfidenceTier,
    /// Set when the source market's vigorish is negative, i.e. the
    /// bookmaker has mispriced the market.
    pub premium: bool,
}

const HIGH_THRESHOLD: f64 = 0.70;
const MEDIUM_THRESHOLD: f64 = 0.60;

/// Map a (probability, vigorish) pair to a confidence assessment.
///
/// Pure and total: any pair of finite floats produces a label.
#[must_use]
pub fn assess(probability: f64, vigorish: f64) -> Confidence {
    let tier = if probability > HIGH_THRESHOLD {
        ConfidenceTier::High
    } else if probability > MEDIUM_THRESHOLD {
        ConfidenceTier::Medium
    } else {
        ConfidenceTier::Low
    };
    Confidence {
        tier,
        premium: vigorish < 0.0,
    }
}

//! Scoring engine implementation

use fairscore_core::{round_dp, FeatureName, FeatureVector};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier of the scoring formula below
pub const SCORING_VERSION: &str = "0.1";

/// Feature weights in table order. Sums to 1.0.
pub const WEIGHTS: [(FeatureName, f64); 7] = [
    (FeatureName::PayHist, 0.30),
    (FeatureName::Utilization, 0.20),
    (FeatureName::SavingsRate, 0.15),
    (FeatureName::CashflowVar, 0.10),
    (FeatureName::HistoryLen, 0.10),
    (FeatureName::SipRegularity, 0.10),
    (FeatureName::MandatePunctual, 0.05),
];

const SCORE_FLOOR: f64 = 300.0;
const SCORE_SPAN: f64 = 600.0;

/// Weighted sums above this map to the top of the scale
const RAW_CAP: f64 = 0.8;

/// One line of the explainability breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub name: String,
    pub weight: f64,
    /// The value that was multiplied by `weight` (inverted for cost features)
    pub value: f64,
}

/// Output of a scoring call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: f64,
    pub contributions: Vec<Contribution>,
    pub version: String,
}

/// Scoring Engine
///
/// Stateless apart from the formula version tag; safe to share across
/// threads and call concurrently.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    version: String,
}

impl ScoringEngine {
    /// Create an engine for the current formula version
    pub fn new() -> Self {
        Self {
            version: SCORING_VERSION.to_string(),
        }
    }

    /// Formula version reported with every result
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Score a feature vector.
    ///
    /// `utilization` and `cashflow_var` are costs: they are clamped to
    /// `[0, 1]` and inverted before weighting. The other features are used
    /// as supplied. The weighted sum is capped to `[0, 0.8]` and mapped
    /// linearly onto `[300, 900]`, rounded to one decimal.
    pub fn score(&self, features: &FeatureVector) -> ScoreResult {
        let contributions: Vec<Contribution> = WEIGHTS
            .iter()
            .map(|(name, weight)| Contribution {
                name: name.to_string(),
                weight: *weight,
                value: effective_value(*name, features.get(*name)),
            })
            .collect();

        let raw: f64 = contributions.iter().map(|c| c.weight * c.value).sum();
        let z = raw.clamp(0.0, RAW_CAP);
        let score = round_dp(SCORE_FLOOR + (z / RAW_CAP) * SCORE_SPAN, 1);

        tracing::debug!(raw, score, version = %self.version, "Scored feature vector");

        ScoreResult {
            score,
            contributions,
            version: self.version.clone(),
        }
    }

    /// Score an open JSON mapping.
    ///
    /// Missing or non-numeric features are substituted with `0.0`.
    pub fn score_json(&self, features: &Value) -> ScoreResult {
        let (vector, substituted) = FeatureVector::from_json_lenient(features);
        if !substituted.is_empty() {
            let names: Vec<&str> = substituted.iter().map(|n| n.as_ref()).collect();
            tracing::debug!(?names, "Substituted 0.0 for missing features");
        }
        self.score(&vector)
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// The value actually multiplied by the feature's weight
fn effective_value(name: FeatureName, value: f64) -> f64 {
    let value = if value.is_finite() { value } else { 0.0 };
    match name {
        FeatureName::Utilization | FeatureName::CashflowVar => 1.0 - value.clamp(0.0, 1.0),
        _ => value,
    }
}

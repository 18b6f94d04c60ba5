// Detector
// Extraction followed by scoring: the one operation callers use

use crate::models::ScoreResult;
use crate::services::config_store::ConfigError;
use super::classifier::{FeatureScorer, WeightedClassifier};
use super::feature_extractor::extract_features;
use super::weights::ScoringConfig;
use std::sync::OnceLock;

/// Stateless detector; holds only an immutable scorer and is safe to
/// share across threads.
#[derive(Debug, Clone, Default)]
pub struct Detector<S: FeatureScorer = WeightedClassifier> {
    scorer: S,
}

impl Detector<WeightedClassifier> {
    /// Detector backed by a validated weight table
    pub fn from_config(config: ScoringConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(WeightedClassifier::new(config)?))
    }
}

impl<S: FeatureScorer> Detector<S> {
    pub fn new(scorer: S) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    /// Classify `text`. Total over every string: degenerate input yields a
    /// neutral, zero-confidence result rather than an error.
    pub fn detect(&self, text: &str) -> ScoreResult {
        let features = extract_features(text);
        self.scorer.score_features(&features)
    }
}

/// Classify `text` with the built-in weight table
pub fn detect(text: &str) -> ScoreResult {
    static DEFAULT: OnceLock<Detector> = OnceLock::new();
    DEFAULT.get_or_init(Detector::default).detect(text)
}

// Scoring Table
// Weights, feature bands and confidence damping used by the weighted classifier.
// The table is an immutable value handed to the classifier at construction.

use crate::models::FeatureKind;
use crate::services::config_store::ConfigError;
use serde::{Deserialize, Serialize};

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureWeights {
    pub lexical_diversity: f64,
    pub sentence_uniformity: f64,
    pub word_length: f64,
    pub sentence_length: f64,
    pub formal_markers: f64,
    pub informal_markers: f64,
}

impl Default for FeatureWeights {
    fn default() -> Self {
        Self {
            lexical_diversity: 0.30,
            sentence_uniformity: 0.25,
            word_length: 0.15,
            sentence_length: 0.10,
            formal_markers: 0.10,
            informal_markers: 0.10,
        }
    }
}

impl FeatureWeights {
    pub fn get(&self, kind: FeatureKind) -> f64 {
        match kind {
            FeatureKind::LexicalDiversity => self.lexical_diversity,
            FeatureKind::SentenceUniformity => self.sentence_uniformity,
            FeatureKind::WordLength => self.word_length,
            FeatureKind::SentenceLength => self.sentence_length,
            FeatureKind::FormalMarkers => self.formal_markers,
            FeatureKind::InformalMarkers => self.informal_markers,
        }
    }

    pub fn total(&self) -> f64 {
        FeatureKind::ALL.iter().map(|k| self.get(*k)).sum()
    }
}

/// Linear ramp between the value that reads fully AI-like (sub-score 1.0)
/// and the value that reads fully human-like (sub-score 0.0).
///
/// Either end may be the larger one, so the same type covers "lower is
/// more AI" and "higher is more AI" dimensions. Inputs past either end
/// saturate.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub ai: f64,
    pub human: f64,
}

impl Band {
    pub const fn new(ai: f64, human: f64) -> Self {
        Self { ai, human }
    }

    pub fn sub_score(&self, value: f64) -> f64 {
        let t = (value - self.human) / (self.ai - self.human);
        if t.is_nan() {
            return 0.5;
        }
        t.clamp(0.0, 1.0)
    }

    fn is_valid(&self) -> bool {
        self.ai.is_finite() && self.human.is_finite() && self.ai != self.human
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringBands {
    /// Distinct words / total words
    pub lexical_diversity: Band,
    /// Standard deviation of words per sentence
    pub sentence_std_dev: Band,
    /// Mean characters per word
    pub avg_word_length: Band,
    /// Mean words per sentence
    pub avg_sentence_length: Band,
    /// AI stock phrases (double-counted) plus formal transitions per 100 words
    pub formal_markers: Band,
    /// Contractions, slang, repeated letters, emphatic punctuation per 100 words
    pub informal_markers: Band,
}

impl Default for ScoringBands {
    fn default() -> Self {
        Self {
            lexical_diversity: Band::new(0.45, 0.75),
            sentence_std_dev: Band::new(2.0, 8.0),
            avg_word_length: Band::new(5.6, 4.2),
            avg_sentence_length: Band::new(26.0, 12.0),
            formal_markers: Band::new(3.0, 0.0),
            informal_markers: Band::new(0.0, 5.0),
        }
    }
}

impl ScoringBands {
    fn named(&self) -> [(&'static str, Band); 6] {
        [
            ("lexicalDiversity", self.lexical_diversity),
            ("sentenceStdDev", self.sentence_std_dev),
            ("avgWordLength", self.avg_word_length),
            ("avgSentenceLength", self.avg_sentence_length),
            ("formalMarkers", self.formal_markers),
            ("informalMarkers", self.informal_markers),
        ]
    }
}

/// Confidence reduction for texts under the recommended length
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceDamping {
    pub recommended_words: usize,
    /// Factor applied at zero words; grows linearly to 1.0 at `recommended_words`
    pub min_factor: f64,
}

impl Default for ConfidenceDamping {
    fn default() -> Self {
        Self {
            recommended_words: 50,
            min_factor: 0.5,
        }
    }
}

impl ConfidenceDamping {
    pub fn factor(&self, word_count: usize) -> f64 {
        if word_count >= self.recommended_words || self.recommended_words == 0 {
            return 1.0;
        }
        let progress = word_count as f64 / self.recommended_words as f64;
        (self.min_factor + (1.0 - self.min_factor) * progress).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringConfig {
    #[serde(default)]
    pub weights: FeatureWeights,
    #[serde(default)]
    pub bands: ScoringBands,
    /// Below this many sentences, uniformity carries no signal (sub-score 0.5)
    #[serde(default = "default_min_sentences")]
    pub min_sentences_for_uniformity: usize,
    #[serde(default)]
    pub damping: ConfidenceDamping,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: FeatureWeights::default(),
            bands: ScoringBands::default(),
            min_sentences_for_uniformity: default_min_sentences(),
            damping: ConfidenceDamping::default(),
        }
    }
}

fn default_min_sentences() -> usize { 3 }

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for kind in FeatureKind::ALL {
            let value = self.weights.get(kind);
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight {
                    name: kind.name().to_string(),
                    value,
                });
            }
        }

        let total = self.weights.total();
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightSum(total));
        }

        for (name, band) in self.bands.named() {
            if !band.is_valid() {
                return Err(ConfigError::DegenerateBand(name.to_string()));
            }
        }

        let min_factor = self.damping.min_factor;
        if !(0.0..=1.0).contains(&min_factor) {
            return Err(ConfigError::InvalidDamping(format!(
                "minFactor must be within [0, 1], got {}",
                min_factor
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_valid() {
        let config = ScoringConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.weights.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_band_decreasing() {
        let band = Band::new(0.45, 0.75);
        assert_eq!(band.sub_score(0.2), 1.0);
        assert_eq!(band.sub_score(0.45), 1.0);
        assert!((band.sub_score(0.60) - 0.5).abs() < 1e-9);
        assert_eq!(band.sub_score(0.75), 0.0);
        assert_eq!(band.sub_score(0.95), 0.0);
    }

    #[test]
    fn test_band_increasing() {
        let band = Band::new(5.6, 4.2);
        assert_eq!(band.sub_score(3.0), 0.0);
        assert!((band.sub_score(4.9) - 0.5).abs() < 1e-9);
        assert_eq!(band.sub_score(12.0), 1.0);
    }

    #[test]
    fn test_band_is_monotonic() {
        let band = ScoringBands::default().sentence_std_dev;
        let mut last = f64::INFINITY;
        for step in 0..100 {
            let score = band.sub_score(step as f64 * 0.2);
            assert!(score <= last);
            last = score;
        }
    }

    #[test]
    fn test_damping_factor() {
        let damping = ConfidenceDamping::default();
        assert_eq!(damping.factor(0), 0.5);
        assert!((damping.factor(25) - 0.75).abs() < 1e-12);
        assert_eq!(damping.factor(50), 1.0);
        assert_eq!(damping.factor(500), 1.0);
    }

    #[test]
    fn test_rejects_negative_weight() {
        let mut config = ScoringConfig::default();
        config.weights.word_length = -0.15;
        config.weights.lexical_diversity = 0.60;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidWeight { .. })));
    }

    #[test]
    fn test_rejects_weight_sum() {
        let mut config = ScoringConfig::default();
        config.weights.lexical_diversity = 0.5;
        assert!(matches!(config.validate(), Err(ConfigError::WeightSum(_))));
    }

    #[test]
    fn test_rejects_degenerate_band() {
        let mut config = ScoringConfig::default();
        config.bands.avg_word_length = Band::new(5.0, 5.0);
        assert!(matches!(config.validate(), Err(ConfigError::DegenerateBand(name)) if name == "avgWordLength"));
    }

    #[test]
    fn test_rejects_bad_damping() {
        let mut config = ScoringConfig::default();
        config.damping.min_factor = 1.5;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidDamping(_))));
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let json = r#"{"weights":{"lexicalDiversity":0.4,"sentenceUniformity":0.15,"wordLength":0.15,"sentenceLength":0.1,"formalMarkers":0.1,"informalMarkers":0.1}}"#;
        let config: ScoringConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.bands, ScoringBands::default());
        assert_eq!(config.min_sentences_for_uniformity, 3);
        assert!(config.validate().is_ok());
    }
}

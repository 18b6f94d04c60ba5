// Detector Data Models
// Field names are the JSON surface of a detection result

use serde::{Deserialize, Serialize};
use std::fmt;

// ============ Features ============

/// Linguistic features of one text, all derived from a single tokenization pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub word_count: usize,
    pub sentence_count: usize,
    /// Mean character length of counted words
    pub avg_word_length: f64,
    /// Case-insensitively distinct words / word_count
    pub lexical_diversity: f64,

    #[serde(default)]
    pub char_count: usize,
    #[serde(default)]
    pub avg_sentence_length: f64,
    /// Population variance of words per sentence
    #[serde(default)]
    pub sentence_length_variance: f64,
    #[serde(default)]
    pub sentence_length_std_dev: f64,
    /// Punctuation marks per word
    #[serde(default)]
    pub punctuation_density: f64,
    #[serde(default)]
    pub stop_word_ratio: f64,
    #[serde(default)]
    pub uppercase_word_ratio: f64,

    #[serde(default)]
    pub ai_phrase_count: usize,
    #[serde(default)]
    pub formal_transition_count: usize,
    #[serde(default)]
    pub contraction_count: usize,
    #[serde(default)]
    pub slang_count: usize,
    #[serde(default)]
    pub repeated_char_runs: usize,
    #[serde(default)]
    pub exclamation_count: usize,
    #[serde(default)]
    pub question_count: usize,
    #[serde(default)]
    pub ellipsis_count: usize,
    #[serde(default)]
    pub comma_count: usize,
}

impl FeatureVector {
    /// Occurrences of a marker per 100 words; 0 for empty text
    pub fn per_hundred_words(&self, count: f64) -> f64 {
        if self.word_count == 0 {
            0.0
        } else {
            count * 100.0 / self.word_count as f64
        }
    }
}

// ============ Scoring ============

/// Scoring dimensions. Each maps one or more features to a sub-score.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    LexicalDiversity,
    SentenceUniformity,
    WordLength,
    SentenceLength,
    FormalMarkers,
    InformalMarkers,
}

impl FeatureKind {
    pub const ALL: [FeatureKind; 6] = [
        FeatureKind::LexicalDiversity,
        FeatureKind::SentenceUniformity,
        FeatureKind::WordLength,
        FeatureKind::SentenceLength,
        FeatureKind::FormalMarkers,
        FeatureKind::InformalMarkers,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FeatureKind::LexicalDiversity => "lexical_diversity",
            FeatureKind::SentenceUniformity => "sentence_uniformity",
            FeatureKind::WordLength => "word_length",
            FeatureKind::SentenceLength => "sentence_length",
            FeatureKind::FormalMarkers => "formal_markers",
            FeatureKind::InformalMarkers => "informal_markers",
        }
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One dimension's share of the final probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureContribution {
    pub feature: FeatureKind,
    /// AI-likelihood along this dimension, in [0,1]
    pub sub_score: f64,
    pub weight: f64,
    /// weight * sub_score
    pub contribution: f64,
    /// weight * (sub_score - 0.5); positive pushes toward AI
    pub push: f64,
}

impl FeatureContribution {
    pub fn new(feature: FeatureKind, sub_score: f64, weight: f64) -> Self {
        Self {
            feature,
            sub_score,
            weight,
            contribution: weight * sub_score,
            push: weight * (sub_score - 0.5),
        }
    }
}

// ============ Result ============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// True iff `ai_probability >= 0.5`
    pub is_ai_generated: bool,
    pub confidence: f64,
    pub ai_probability: f64,
    pub human_probability: f64,
    pub explanation: String,
    pub features: FeatureVector,
    /// Factor applied to the raw confidence; 1.0 unless the text is short
    #[serde(default = "default_damping")]
    pub confidence_damping: f64,
    /// Per-dimension contributions, strongest push toward the verdict first
    #[serde(default)]
    pub contributions: Vec<FeatureContribution>,
}

fn default_damping() -> f64 { 1.0 }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_vector_serializes_snake_case() {
        let features = FeatureVector {
            word_count: 3,
            sentence_count: 1,
            avg_word_length: 4.0,
            lexical_diversity: 1.0,
            ..Default::default()
        };
        let json = serde_json::to_value(&features).unwrap();
        assert_eq!(json["word_count"], 3);
        assert_eq!(json["sentence_count"], 1);
        assert_eq!(json["avg_word_length"], 4.0);
        assert_eq!(json["lexical_diversity"], 1.0);
    }

    #[test]
    fn test_feature_vector_accepts_minimal_json() {
        let json = r#"{"word_count":10,"sentence_count":2,"avg_word_length":4.5,"lexical_diversity":0.8}"#;
        let features: FeatureVector = serde_json::from_str(json).unwrap();
        assert_eq!(features.word_count, 10);
        assert_eq!(features.comma_count, 0);
    }

    #[test]
    fn test_per_hundred_words() {
        let features = FeatureVector { word_count: 50, ..Default::default() };
        assert!((features.per_hundred_words(2.0) - 4.0).abs() < 1e-12);
        assert_eq!(FeatureVector::default().per_hundred_words(3.0), 0.0);
    }

    #[test]
    fn test_contribution_push_sign() {
        let c = FeatureContribution::new(FeatureKind::WordLength, 0.9, 0.2);
        assert!(c.push > 0.0);
        assert!((c.contribution - 0.18).abs() < 1e-12);
        let c = FeatureContribution::new(FeatureKind::WordLength, 0.1, 0.2);
        assert!(c.push < 0.0);
    }

    #[test]
    fn test_feature_kind_serializes_snake_case() {
        let json = serde_json::to_string(&FeatureKind::SentenceUniformity).unwrap();
        assert_eq!(json, "\"sentence_uniformity\"");
        assert_eq!(FeatureKind::SentenceUniformity.to_string(), "sentence_uniformity");
    }
}

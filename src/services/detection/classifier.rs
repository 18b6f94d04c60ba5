// Weighted Classifier
// Maps a FeatureVector to AI/human probabilities, confidence and explanation.
//
// Each dimension becomes a sub-score in [0,1] through a clamped linear band;
// the probability is the weighted sum of sub-scores. Short texts keep their
// probability but report damped confidence.

use crate::models::{FeatureContribution, FeatureKind, FeatureVector, ScoreResult};
use crate::services::config_store::ConfigError;
use super::explanation::{compose_explanation, neutral_explanation};
use super::weights::ScoringConfig;
use std::cmp::Ordering;
use tracing::debug;

/// Probability at which the verdict flips; ties go to AI
pub const DECISION_BOUNDARY: f64 = 0.5;

/// The single seam between extracted features and a verdict.
///
/// The weighted rule table is the only implementation today; a learned
/// model can replace it without touching extraction or callers.
pub trait FeatureScorer: Send + Sync {
    fn score_features(&self, features: &FeatureVector) -> ScoreResult;
}

/// AI stock phrases count double against formal transitions
pub fn formal_marker_rate(features: &FeatureVector) -> f64 {
    let markers = 2 * features.ai_phrase_count + features.formal_transition_count;
    features.per_hundred_words(markers as f64)
}

/// Informal markers per 100 words. A single question mark is not counted.
pub fn informal_marker_rate(features: &FeatureVector) -> f64 {
    let markers = features.contraction_count
        + features.slang_count
        + features.repeated_char_runs
        + features.exclamation_count
        + features.ellipsis_count
        + features.question_count.saturating_sub(1);
    features.per_hundred_words(markers as f64) + features.uppercase_word_ratio * 100.0
}

#[derive(Debug, Clone, Default)]
pub struct WeightedClassifier {
    config: ScoringConfig,
}

impl WeightedClassifier {
    pub fn new(config: ScoringConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// AI-likelihood of one dimension, in [0,1]
    pub fn sub_score(&self, kind: FeatureKind, features: &FeatureVector) -> f64 {
        let bands = &self.config.bands;
        match kind {
            FeatureKind::LexicalDiversity => bands.lexical_diversity.sub_score(features.lexical_diversity),
            FeatureKind::SentenceUniformity => {
                if features.sentence_count < self.config.min_sentences_for_uniformity {
                    0.5
                } else {
                    bands.sentence_std_dev.sub_score(features.sentence_length_std_dev)
                }
            }
            FeatureKind::WordLength => bands.avg_word_length.sub_score(features.avg_word_length),
            FeatureKind::SentenceLength => bands.avg_sentence_length.sub_score(features.avg_sentence_length),
            FeatureKind::FormalMarkers => bands.formal_markers.sub_score(formal_marker_rate(features)),
            FeatureKind::InformalMarkers => bands.informal_markers.sub_score(informal_marker_rate(features)),
        }
    }

    /// Contributions of every dimension, in `FeatureKind::ALL` order
    pub fn contributions(&self, features: &FeatureVector) -> Vec<FeatureContribution> {
        FeatureKind::ALL
            .iter()
            .map(|&kind| FeatureContribution::new(kind, self.sub_score(kind, features), self.config.weights.get(kind)))
            .collect()
    }

    /// Confidence multiplier for a text of `word_count` words
    pub fn confidence_damping(&self, word_count: usize) -> f64 {
        self.config.damping.factor(word_count)
    }

    pub fn classify(&self, features: &FeatureVector) -> ScoreResult {
        if features.word_count == 0 {
            return self.neutral_result(features);
        }

        let mut contributions = self.contributions(features);
        let ai_probability = contributions
            .iter()
            .map(|c| c.contribution)
            .sum::<f64>()
            .clamp(0.0, 1.0);
        let human_probability = 1.0 - ai_probability;
        let is_ai_generated = ai_probability >= DECISION_BOUNDARY;

        let damping = self.confidence_damping(features.word_count);
        let confidence = (2.0 * (ai_probability - DECISION_BOUNDARY).abs() * damping).clamp(0.0, 1.0);

        rank_toward_verdict(&mut contributions, is_ai_generated);
        let explanation = compose_explanation(
            is_ai_generated,
            confidence,
            features.word_count,
            damping < 1.0,
            &contributions,
        );

        debug!(
            ai_probability,
            confidence,
            damping,
            word_count = features.word_count,
            "classifier.scored"
        );

        ScoreResult {
            is_ai_generated,
            confidence,
            ai_probability,
            human_probability,
            explanation,
            features: features.clone(),
            confidence_damping: damping,
            contributions,
        }
    }

    fn neutral_result(&self, features: &FeatureVector) -> ScoreResult {
        let contributions = FeatureKind::ALL
            .iter()
            .map(|&kind| FeatureContribution::new(kind, 0.5, self.config.weights.get(kind)))
            .collect();

        ScoreResult {
            // ai_probability sits exactly on the boundary
            is_ai_generated: true,
            confidence: 0.0,
            ai_probability: DECISION_BOUNDARY,
            human_probability: 1.0 - DECISION_BOUNDARY,
            explanation: neutral_explanation(),
            features: features.clone(),
            confidence_damping: self.confidence_damping(0),
            contributions,
        }
    }
}

impl FeatureScorer for WeightedClassifier {
    fn score_features(&self, features: &FeatureVector) -> ScoreResult {
        self.classify(features)
    }
}

/// Stable sort: strongest push toward the verdict first, ties keep table order
fn rank_toward_verdict(contributions: &mut [FeatureContribution], is_ai: bool) {
    contributions.sort_by(|a, b| {
        let (a_push, b_push) = if is_ai { (a.push, b.push) } else { (-a.push, -b.push) };
        b_push.partial_cmp(&a_push).unwrap_or(Ordering::Equal)
    });
}

// Detection Module
// Rule-based AI text detection organized into specialized submodules:
// - feature_extractor: Turns raw text into a FeatureVector
// - weights: Weight table, feature bands and confidence damping
// - classifier: Weighted sub-score combination behind the FeatureScorer seam
// - explanation: Template-based explanation of the verdict
// - detector: Extraction + scoring entry point

pub mod feature_extractor;
pub mod weights;
pub mod classifier;
pub mod explanation;
pub mod detector;

// Re-export commonly used items
pub use feature_extractor::{extract_features, sentence_stats, SentenceStats};
pub use weights::{Band, ConfidenceDamping, FeatureWeights, ScoringBands, ScoringConfig};
pub use classifier::{
    formal_marker_rate,
    informal_marker_rate,
    FeatureScorer,
    WeightedClassifier,
    DECISION_BOUNDARY,
};
pub use explanation::{compose_explanation, feature_phrase, verdict_sentence};
pub use detector::{detect, Detector};

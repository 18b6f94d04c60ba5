// Detector Core Services

pub mod text_processor;
pub mod config_store;
pub mod input_policy;
pub mod detection;

pub use text_processor::*;
pub use config_store::*;
pub use input_policy::*;

pub use detection::{
    detect,
    extract_features,
    Detector,
    FeatureScorer,
    ScoringConfig,
    WeightedClassifier,
};

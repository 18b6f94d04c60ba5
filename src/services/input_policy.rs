// Input Policy
// Caller-side length validation applied before the detector runs.
// Rejections here are distinct from a low-confidence detection result.

use crate::services::config_store::ConfigError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Text cannot be empty")]
    Empty,
    #[error("Text too short for analysis ({chars} characters, minimum {min})")]
    TooShort { chars: usize, min: usize },
    #[error(
        "Text is too short for reliable detection ({words} words). Please provide at least {min} words ({recommended}+ words recommended for best accuracy)"
    )]
    TooFewWords {
        words: usize,
        min: usize,
        recommended: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputPolicy {
    #[serde(default = "default_min_chars")]
    pub min_chars: usize,
    #[serde(default = "default_min_words")]
    pub min_words: usize,
    #[serde(default = "default_recommended_words")]
    pub recommended_words: usize,
}

impl Default for InputPolicy {
    fn default() -> Self {
        Self {
            min_chars: default_min_chars(),
            min_words: default_min_words(),
            recommended_words: default_recommended_words(),
        }
    }
}

fn default_min_chars() -> usize { 10 }
fn default_min_words() -> usize { 20 }
fn default_recommended_words() -> usize { 50 }

/// Outcome of an accepted input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputCheck {
    pub word_count: usize,
    /// Accepted, but results will carry reduced confidence
    pub below_recommended: bool,
}

impl InputPolicy {
    /// Sanity-check the policy's own thresholds
    pub fn validate_settings(&self) -> Result<(), ConfigError> {
        if self.min_words > self.recommended_words {
            return Err(ConfigError::InvalidPolicy(format!(
                "minWords ({}) exceeds recommendedWords ({})",
                self.min_words, self.recommended_words
            )));
        }
        Ok(())
    }

    /// Check trimmed text against the length policy
    pub fn validate(&self, text: &str) -> Result<InputCheck, ValidationError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty);
        }

        let chars = trimmed.chars().count();
        if chars < self.min_chars {
            return Err(ValidationError::TooShort {
                chars,
                min: self.min_chars,
            });
        }

        let word_count = trimmed.split_whitespace().count();
        if word_count < self.min_words {
            return Err(ValidationError::TooFewWords {
                words: word_count,
                min: self.min_words,
                recommended: self.recommended_words,
            });
        }

        Ok(InputCheck {
            word_count,
            below_recommended: word_count < self.recommended_words,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_rejects_empty() {
        let policy = InputPolicy::default();
        assert_eq!(policy.validate(""), Err(ValidationError::Empty));
        assert_eq!(policy.validate("  \n\t "), Err(ValidationError::Empty));
    }

    #[test]
    fn test_rejects_short_text() {
        let policy = InputPolicy::default();
        assert_eq!(
            policy.validate("  tiny  "),
            Err(ValidationError::TooShort { chars: 4, min: 10 })
        );
    }

    #[test]
    fn test_rejects_few_words() {
        let policy = InputPolicy::default();
        let err = policy.validate(&words(19)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::TooFewWords {
                words: 19,
                min: 20,
                recommended: 50
            }
        );
        assert!(err.to_string().contains("at least 20 words"));
    }

    #[test]
    fn test_accepts_with_recommendation_flag() {
        let policy = InputPolicy::default();
        let check = policy.validate(&words(20)).unwrap();
        assert_eq!(check.word_count, 20);
        assert!(check.below_recommended);

        let check = policy.validate(&words(50)).unwrap();
        assert!(!check.below_recommended);
    }

    #[test]
    fn test_policy_validation() {
        let policy = InputPolicy {
            min_chars: 10,
            min_words: 80,
            recommended_words: 50,
        };
        assert!(matches!(policy.validate_settings(), Err(ConfigError::InvalidPolicy(_))));
        assert!(InputPolicy::default().validate_settings().is_ok());
    }
}

// Feature Extractor
// Turns raw text into the FeatureVector consumed by the classifier

use crate::models::FeatureVector;
use crate::services::text_processor::{normalize_punctuation, Tokenization};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;
use tracing::debug;

/// Stock phrases typical of assistant-style output
const AI_PHRASES: &[&str] = &[
    "as an ai",
    "language model",
    "i don't have",
    "i cannot",
    "i can't",
    "it's important to note",
    "it is important to note",
    "in conclusion",
    "it's worth noting",
    "it is worth noting",
    "i apologize",
    "i'm sorry",
    "my apologies",
    "delve into",
    "navigating",
    "landscape of",
    "realm of",
    "it's crucial",
    "underscores the importance",
];

const FORMAL_TRANSITIONS: &[&str] = &[
    "furthermore",
    "moreover",
    "additionally",
    "consequently",
    "therefore",
    "thus",
    "hence",
    "accordingly",
    "nevertheless",
    "however",
];

const CONTRACTION_SUFFIXES: &[&str] = &["n't", "'m", "'re", "'ve", "'ll", "'d", "'s"];

const SLANG_WORDS: &[&str] = &[
    "lol", "omg", "btw", "idk", "tbh", "ngl", "fr", "rn", "gonna", "wanna", "gotta",
];

const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "nor", "of", "to", "in", "on", "at", "for", "with",
    "by", "from", "into", "about", "as", "is", "are", "was", "were", "be", "been", "being",
    "am", "it", "its", "this", "that", "these", "those", "i", "you", "he", "she", "we", "they",
    "me", "him", "her", "us", "them", "my", "your", "his", "our", "their", "not", "no", "so",
    "if", "then", "than", "there", "do", "does", "did", "have", "has", "had", "will", "would",
    "can", "could", "should", "may", "might", "must", "just", "also", "very", "what", "which",
    "who", "when", "where", "how", "all", "any", "some",
];

fn ai_phrase_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let alternation = AI_PHRASES
            .iter()
            .map(|p| regex::escape(p))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(r"(?i)\b(?:{})\b", alternation)).expect("ai phrase regex")
    })
}

fn stop_words() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| STOP_WORDS.iter().copied().collect())
}

/// Mean, population variance and standard deviation of sentence lengths
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct SentenceStats {
    pub mean: f64,
    pub variance: f64,
    pub std_dev: f64,
}

pub fn sentence_stats(lengths: &[usize]) -> SentenceStats {
    if lengths.is_empty() {
        return SentenceStats::default();
    }

    let n = lengths.len() as f64;
    let mean = lengths.iter().sum::<usize>() as f64 / n;
    let variance = lengths
        .iter()
        .map(|&len| {
            let diff = len as f64 - mean;
            diff * diff
        })
        .sum::<f64>()
        / n;

    SentenceStats {
        mean,
        variance,
        std_dev: variance.sqrt(),
    }
}

/// Count runs of the same letter repeated 3+ times ("sooo", "nooo")
fn count_repeated_runs(text: &str) -> usize {
    let mut runs = 0;
    let mut prev: Option<char> = None;
    let mut run_len = 0usize;

    for ch in text.chars().flat_map(char::to_lowercase) {
        if ch.is_alphabetic() && Some(ch) == prev {
            run_len += 1;
            if run_len == 3 {
                runs += 1;
            }
        } else {
            run_len = 1;
        }
        prev = Some(ch);
    }

    runs
}

fn is_shouted(word: &str) -> bool {
    word.chars().count() > 1
        && word.chars().any(char::is_alphabetic)
        && word.chars().filter(|c| c.is_alphabetic()).all(char::is_uppercase)
}

fn is_contraction(lowered: &str) -> bool {
    lowered.contains('\'') && CONTRACTION_SUFFIXES.iter().any(|s| lowered.ends_with(s))
}

/// Extract the full feature vector from raw text.
///
/// Never fails: text without any counted word (empty, whitespace, bare
/// punctuation) yields the all-zero vector.
pub fn extract_features(text: &str) -> FeatureVector {
    let normalized = normalize_punctuation(text);
    let tokens = Tokenization::new(&normalized);
    let word_count = tokens.word_count();

    if word_count == 0 {
        debug!(chars = text.chars().count(), "features.empty");
        return FeatureVector::default();
    }

    let wc = word_count as f64;
    let words: Vec<&str> = tokens.words().collect();
    let lowered: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();

    let distinct: HashSet<&str> = lowered.iter().map(String::as_str).collect();
    let lexical_diversity = distinct.len() as f64 / wc;

    let avg_word_length = words.iter().map(|w| w.chars().count()).sum::<usize>() as f64 / wc;

    let stats = sentence_stats(&tokens.sentence_lengths());

    let punctuation = normalized.chars().filter(|c| c.is_ascii_punctuation()).count();
    let stop = lowered.iter().filter(|w| stop_words().contains(w.as_str())).count();
    let shouted = words.iter().filter(|w| is_shouted(w)).count();

    let features = FeatureVector {
        word_count,
        sentence_count: tokens.sentence_count(),
        avg_word_length,
        lexical_diversity,
        char_count: normalized.chars().count(),
        avg_sentence_length: stats.mean,
        sentence_length_variance: stats.variance,
        sentence_length_std_dev: stats.std_dev,
        punctuation_density: punctuation as f64 / wc,
        stop_word_ratio: stop as f64 / wc,
        uppercase_word_ratio: shouted as f64 / wc,
        ai_phrase_count: ai_phrase_re().find_iter(&normalized).count(),
        formal_transition_count: lowered
            .iter()
            .filter(|w| FORMAL_TRANSITIONS.contains(&w.as_str()))
            .count(),
        contraction_count: lowered.iter().filter(|w| is_contraction(w)).count(),
        slang_count: lowered
            .iter()
            .filter(|w| SLANG_WORDS.contains(&w.as_str()))
            .count(),
        repeated_char_runs: count_repeated_runs(&normalized),
        exclamation_count: normalized.matches('!').count(),
        question_count: normalized.matches('?').count(),
        ellipsis_count: normalized.matches("...").count(),
        comma_count: normalized.matches(',').count(),
    };

    debug!(
        word_count = features.word_count,
        sentence_count = features.sentence_count,
        lexical_diversity = features.lexical_diversity,
        avg_word_length = features.avg_word_length,
        "features.extracted"
    );

    features
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_uniform_sentences() {
        let features =
            extract_features("The cat sat on the mat. The dog sat on the rug. The bird sat on the branch.");
        assert_eq!(features.sentence_count, 3);
        assert_eq!(features.word_count, 18);
        assert_eq!(features.sentence_length_variance, 0.0);
        assert_eq!(features.sentence_length_std_dev, 0.0);
        assert!((features.avg_sentence_length - 6.0).abs() < EPSILON);
        assert!((features.stop_word_ratio - 0.5).abs() < EPSILON);
        assert!((features.punctuation_density - 3.0 / 18.0).abs() < EPSILON);
        // the, cat, sat, on, mat, dog, rug, bird, branch
        assert!((features.lexical_diversity - 9.0 / 18.0).abs() < EPSILON);
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert_eq!(extract_features(""), FeatureVector::default());
        assert_eq!(extract_features("   \n\t  "), FeatureVector::default());
    }

    #[test]
    fn test_punctuation_only_is_all_zero() {
        let features = extract_features("... !!! ??? -- ,,,");
        assert_eq!(features, FeatureVector::default());
        assert_eq!(features.lexical_diversity, 0.0);
    }

    #[test]
    fn test_no_terminal_punctuation_counts_one_sentence() {
        let features = extract_features("just a few words without an ending");
        assert_eq!(features.sentence_count, 1);
        assert_eq!(features.word_count, 7);
    }

    #[test]
    fn test_lexical_diversity_is_case_insensitive() {
        let features = extract_features("The the THE cat.");
        assert_eq!(features.word_count, 4);
        assert!((features.lexical_diversity - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_avg_word_length_counts_chars_not_bytes() {
        let features = extract_features("Café naïve résumé.");
        assert_eq!(features.word_count, 3);
        assert!((features.avg_word_length - 5.0).abs() < EPSILON);
    }

    #[test]
    fn test_avg_word_length_ignores_punctuation_tokens() {
        let features = extract_features("Hi - there , friend !");
        assert_eq!(features.word_count, 3);
        assert!((features.avg_word_length - 13.0 / 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_sentence_variance() {
        // lengths 2 and 6: mean 4, variance 4, std dev 2
        let features = extract_features("Short one. This sentence has six words here.");
        assert_eq!(features.sentence_count, 2);
        assert!((features.sentence_length_variance - 4.0).abs() < EPSILON);
        assert!((features.sentence_length_std_dev - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_marker_counts() {
        let text = "Furthermore, it is important to note that we can't stop. Honestly lol this is sooo COOL!!! Why? Really?";
        let features = extract_features(text);
        assert_eq!(features.word_count, 18);
        assert_eq!(features.ai_phrase_count, 1);
        assert_eq!(features.formal_transition_count, 1);
        assert_eq!(features.contraction_count, 1);
        assert_eq!(features.slang_count, 1);
        assert_eq!(features.repeated_char_runs, 1);
        assert_eq!(features.exclamation_count, 3);
        assert_eq!(features.question_count, 2);
        assert_eq!(features.ellipsis_count, 0);
        assert_eq!(features.comma_count, 1);
        assert!((features.uppercase_word_ratio - 1.0 / 18.0).abs() < EPSILON);
    }

    #[test]
    fn test_smart_quotes_and_ellipsis_are_normalized() {
        let features = extract_features("It\u{2019}s late\u{2026} we\u{2019}ll see.");
        assert_eq!(features.contraction_count, 2);
        assert_eq!(features.ellipsis_count, 1);
    }

    #[test]
    fn test_ai_phrases_respect_word_boundaries() {
        assert_eq!(extract_features("The realm of ideas is vast.").ai_phrase_count, 1);
        assert_eq!(extract_features("The overrealm offers little.").ai_phrase_count, 0);
    }

    #[test]
    fn test_repeated_runs() {
        assert_eq!(count_repeated_runs("soooo nooo yes"), 2);
        assert_eq!(count_repeated_runs("aaaaaa"), 1);
        assert_eq!(count_repeated_runs("book keeper"), 0);
        assert_eq!(count_repeated_runs("111 ..."), 0);
    }

    #[test]
    fn test_sentence_stats_empty() {
        assert_eq!(sentence_stats(&[]), SentenceStats::default());
    }

    #[test]
    fn test_deterministic() {
        let text = "Some text here. Another sentence follows it! And a question?";
        assert_eq!(extract_features(text), extract_features(text));
    }
}

// Explanation Synthesis
// Template-based sentences naming the dimensions that drove the verdict

use crate::models::{FeatureContribution, FeatureKind};

/// Contributions pushing less than this toward the verdict are not cited
const MIN_CITED_PUSH: f64 = 1e-9;
const MAX_CITED: usize = 2;

/// Phrase describing a dimension when it leans toward the given verdict,
/// and whether the phrase takes a plural verb
fn phrase_entry(kind: FeatureKind, toward_ai: bool) -> (&'static str, bool) {
    match (kind, toward_ai) {
        (FeatureKind::LexicalDiversity, true) => ("low lexical diversity", false),
        (FeatureKind::LexicalDiversity, false) => ("varied vocabulary", false),
        (FeatureKind::SentenceUniformity, true) => ("uniform sentence lengths", true),
        (FeatureKind::SentenceUniformity, false) => ("naturally varied sentence lengths", true),
        (FeatureKind::WordLength, true) => ("long formal vocabulary", false),
        (FeatureKind::WordLength, false) => ("short plain words", true),
        (FeatureKind::SentenceLength, true) => ("long sentences", true),
        (FeatureKind::SentenceLength, false) => ("short sentences", true),
        (FeatureKind::FormalMarkers, true) => ("formal transitions and stock AI phrasing", true),
        (FeatureKind::FormalMarkers, false) => ("the absence of stock AI phrasing", false),
        (FeatureKind::InformalMarkers, true) => ("a lack of contractions or slang", false),
        (FeatureKind::InformalMarkers, false) => {
            ("informal touches like contractions and expressive punctuation", true)
        }
    }
}

pub fn feature_phrase(kind: FeatureKind, toward_ai: bool) -> &'static str {
    phrase_entry(kind, toward_ai).0
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lead sentence citing the top contributions toward the verdict.
///
/// `ranked` must be ordered by push toward the verdict, strongest first.
pub fn verdict_sentence(is_ai: bool, ranked: &[FeatureContribution]) -> String {
    let cited: Vec<(&'static str, bool)> = ranked
        .iter()
        .filter(|c| {
            let toward = if is_ai { c.push } else { -c.push };
            toward > MIN_CITED_PUSH
        })
        .take(MAX_CITED)
        .map(|c| phrase_entry(c.feature, is_ai))
        .collect();

    let conclusion = if is_ai { "AI generation" } else { "human authorship" };

    match cited.as_slice() {
        [] if is_ai => "Text structure and patterns suggest AI generation.".to_string(),
        [] => "Writing style and patterns suggest human authorship.".to_string(),
        [(only, plural)] => {
            let verb = if *plural { "suggest" } else { "suggests" };
            format!("{} {} {}.", capitalize(only), verb, conclusion)
        }
        [(first, _), (second, _), ..] => {
            format!("{} and {} suggest {}.", capitalize(first), second, conclusion)
        }
    }
}

/// Full explanation: verdict sentence, optional short-text note, confidence suffix
pub fn compose_explanation(
    is_ai: bool,
    confidence: f64,
    word_count: usize,
    damped: bool,
    ranked: &[FeatureContribution],
) -> String {
    let mut parts = vec![verdict_sentence(is_ai, ranked)];
    if damped {
        let noun = if word_count == 1 { "word" } else { "words" };
        parts.push(format!("Short text ({} {}): reduced confidence.", word_count, noun));
    }
    parts.push(format!("Confidence: {:.1}%.", confidence * 100.0));
    parts.join(" ")
}

/// Explanation for input without any countable words
pub fn neutral_explanation() -> String {
    "Not enough text to analyze; the result is neutral. Confidence: 0.0%.".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contribution(kind: FeatureKind, sub_score: f64) -> FeatureContribution {
        FeatureContribution::new(kind, sub_score, 0.25)
    }

    #[test]
    fn test_two_ai_features() {
        let ranked = vec![
            contribution(FeatureKind::LexicalDiversity, 1.0),
            contribution(FeatureKind::SentenceUniformity, 0.9),
            contribution(FeatureKind::WordLength, 0.8),
        ];
        assert_eq!(
            verdict_sentence(true, &ranked),
            "Low lexical diversity and uniform sentence lengths suggest AI generation."
        );
    }

    #[test]
    fn test_single_human_feature() {
        let ranked = vec![
            contribution(FeatureKind::InformalMarkers, 0.0),
            contribution(FeatureKind::WordLength, 0.7),
        ];
        assert_eq!(
            verdict_sentence(false, &ranked),
            "Informal touches like contractions and expressive punctuation suggest human authorship."
        );
    }

    #[test]
    fn test_singular_phrase_agreement() {
        let ranked = vec![contribution(FeatureKind::LexicalDiversity, 0.0)];
        assert_eq!(
            verdict_sentence(false, &ranked),
            "Varied vocabulary suggests human authorship."
        );
    }

    #[test]
    fn test_fallback_when_nothing_pushes() {
        let ranked = vec![contribution(FeatureKind::SentenceLength, 0.5)];
        assert_eq!(
            verdict_sentence(true, &ranked),
            "Text structure and patterns suggest AI generation."
        );
        assert_eq!(
            verdict_sentence(false, &[]),
            "Writing style and patterns suggest human authorship."
        );
    }

    #[test]
    fn test_every_feature_has_both_phrases() {
        for kind in FeatureKind::ALL {
            assert!(!feature_phrase(kind, true).is_empty());
            assert!(!feature_phrase(kind, false).is_empty());
            assert_ne!(feature_phrase(kind, true), feature_phrase(kind, false));
        }
    }

    #[test]
    fn test_compose_with_short_text_note() {
        let ranked = vec![contribution(FeatureKind::SentenceLength, 0.0)];
        let text = compose_explanation(false, 0.4231, 30, true, &ranked);
        assert_eq!(
            text,
            "Short sentences suggest human authorship. Short text (30 words): reduced confidence. Confidence: 42.3%."
        );
    }

    #[test]
    fn test_short_text_note_singular() {
        let ranked = vec![contribution(FeatureKind::SentenceLength, 0.0)];
        let text = compose_explanation(false, 0.1, 1, true, &ranked);
        assert!(text.contains("Short text (1 word): reduced confidence."));
    }
}

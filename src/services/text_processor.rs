// Text Processing Service
// Normalization, sentence splitting and word tokenization shared by every feature

use regex::Regex;
use std::sync::OnceLock;

const TERMINAL_MARKS: [char; 3] = ['.', '!', '?'];

fn space_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\u{3000}\u{00A0}\u{2007}\u{202F}]").expect("space regex"))
}

fn horizontal_ws_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[ \t\x0C\x0B]+").expect("whitespace regex"))
}

/// Normalize typographic punctuation and whitespace
pub fn normalize_punctuation(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut s = text
        .replace(['\u{201c}', '\u{201d}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'")
        .replace(['\u{2014}', '\u{2013}'], "-")
        .replace('\u{2026}', "...");

    s = space_re().replace_all(&s, " ").into_owned();

    // Normalize line endings
    s = s.replace("\r\n", "\n").replace('\r', "\n");

    s = horizontal_ws_re().replace_all(&s, " ").into_owned();

    s.lines()
        .map(|ln| ln.trim())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[inline]
fn is_terminal(ch: char) -> bool {
    TERMINAL_MARKS.contains(&ch)
}

/// Split text into sentences on runs of `.`, `!` and `?`.
///
/// Consecutive marks ("?!", "...") close a single sentence. A period between
/// two digits is a decimal point, not a boundary. Text after the last mark
/// forms a trailing sentence. Returned slices are trimmed and never empty.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0usize;
    let mut prev: Option<char> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if !is_terminal(ch) {
            prev = Some(ch);
            continue;
        }

        let next_is_digit = chars.peek().map_or(false, |&(_, n)| n.is_ascii_digit());
        if ch == '.' && prev.map_or(false, |p| p.is_ascii_digit()) && next_is_digit {
            prev = Some(ch);
            continue;
        }

        let mut end = idx + ch.len_utf8();
        while let Some(&(next_idx, next)) = chars.peek() {
            if !is_terminal(next) {
                break;
            }
            end = next_idx + next.len_utf8();
            chars.next();
        }

        let sentence = text[start..end].trim();
        if !sentence.is_empty() {
            sentences.push(sentence);
        }
        start = end;
        prev = Some(ch);
    }

    let remaining = text[start..].trim();
    if !remaining.is_empty() {
        sentences.push(remaining);
    }

    sentences
}

/// Strip leading/trailing punctuation from a whitespace token.
/// Returns `None` for tokens without any alphanumeric character.
pub fn clean_word(token: &str) -> Option<&str> {
    let word = token.trim_matches(|c: char| !c.is_alphanumeric());
    if word.is_empty() {
        None
    } else {
        Some(word)
    }
}

/// Sentences and their counted words, produced in a single pass.
///
/// Sentences that contain no counted word are dropped, so
/// `sentences.len()` is the sentence count every feature agrees on.
#[derive(Debug, Clone, Default)]
pub struct Tokenization<'a> {
    pub sentences: Vec<Vec<&'a str>>,
}

impl<'a> Tokenization<'a> {
    pub fn new(text: &'a str) -> Self {
        let sentences = split_sentences(text)
            .into_iter()
            .map(|sentence| sentence.split_whitespace().filter_map(clean_word).collect::<Vec<_>>())
            .filter(|words| !words.is_empty())
            .collect();
        Self { sentences }
    }

    pub fn words(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.sentences.iter().flat_map(|s| s.iter().copied())
    }

    pub fn word_count(&self) -> usize {
        self.sentences.iter().map(Vec::len).sum()
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    /// Words per sentence
    pub fn sentence_lengths(&self) -> Vec<usize> {
        self.sentences.iter().map(Vec::len).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

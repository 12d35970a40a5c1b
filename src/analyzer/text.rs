//! Text metrics over extracted page content
//!
//! Readability, lexicon sentiment and single-document keyword ranking. All of
//! these are deterministic functions of the input text.

use std::collections::HashMap;

/// Maximum number of keywords kept per page
pub const MAX_KEYWORDS: usize = 20;

const POSITIVE_WORDS: &[&str] = &[
    "excellent",
    "great",
    "amazing",
    "wonderful",
    "fantastic",
    "good",
    "best",
    "quality",
    "professional",
    "reliable",
    "trusted",
    "secure",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad",
    "terrible",
    "awful",
    "poor",
    "worst",
    "problem",
    "issue",
    "error",
    "failed",
    "broken",
    "difficult",
    "complicated",
];

/// English stop-words dropped before keyword ranking
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "ain", "all", "am", "an", "and", "any",
    "are", "aren", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "couldn", "d", "did", "didn", "do", "does", "doesn", "doing",
    "don", "down", "during", "each", "few", "for", "from", "further", "had", "hadn", "has",
    "hasn", "have", "haven", "having", "he", "her", "here", "hers", "herself", "him", "himself",
    "his", "how", "i", "if", "in", "into", "is", "isn", "it", "its", "itself", "just", "ll", "m",
    "ma", "me", "mightn", "more", "most", "mustn", "my", "myself", "needn", "no", "nor", "not",
    "now", "o", "of", "off", "on", "once", "only", "or", "other", "our", "ours", "ourselves",
    "out", "over", "own", "re", "s", "same", "shan", "she", "should", "shouldn", "so", "some",
    "such", "t", "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there",
    "these", "they", "this", "those", "through", "to", "too", "under", "until", "up", "ve",
    "very", "was", "wasn", "we", "were", "weren", "what", "when", "where", "which", "while",
    "who", "whom", "why", "will", "with", "won", "wouldn", "y", "you", "your", "yours",
    "yourself", "yourselves",
];

/// Computes the Flesch reading ease of a text, rounded to two decimals
///
/// `206.835 - 1.015 * (words / sentences) - 84.6 * (syllables / words)`.
/// Returns 0 for text without words.
pub fn reading_ease(text: &str) -> f64 {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return 0.0;
    }

    let sentences = count_sentences(text).max(1);
    let syllables: usize = words.iter().map(|w| count_syllables(w)).sum();

    let word_count = words.len() as f64;
    let score = 206.835
        - 1.015 * (word_count / sentences as f64)
        - 84.6 * (syllables as f64 / word_count);

    (score * 100.0).round() / 100.0
}

/// Counts sentences as runs of text terminated by `.`, `!` or `?`
fn count_sentences(text: &str) -> usize {
    text.split(['.', '!', '?'])
        .filter(|fragment| fragment.chars().any(char::is_alphanumeric))
        .count()
}

/// Estimates syllables in a word by counting vowel groups
///
/// A trailing silent `e` is dropped (except in `-le` endings). Words with
/// letters always count at least one syllable; words without letters count
/// none.
pub fn count_syllables(word: &str) -> usize {
    let letters: Vec<char> = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();

    if letters.is_empty() {
        return 0;
    }

    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');

    let mut count = 0;
    let mut previous_vowel = false;
    for &c in &letters {
        let vowel = is_vowel(c);
        if vowel && !previous_vowel {
            count += 1;
        }
        previous_vowel = vowel;
    }

    let n = letters.len();
    if count > 1 && letters[n - 1] == 'e' && !(n >= 2 && letters[n - 2] == 'l') {
        count -= 1;
    }

    count.max(1)
}

/// Scores sentiment as `(positive hits - negative hits) / total words`
///
/// Words are whitespace-separated and matched exactly (after lowercasing)
/// against two fixed lexicons. Returns 0 for empty text.
pub fn sentiment_score(text: &str) -> f64 {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    if words.is_empty() {
        return 0.0;
    }

    let positive = words.iter().filter(|w| POSITIVE_WORDS.contains(w)).count() as f64;
    let negative = words.iter().filter(|w| NEGATIVE_WORDS.contains(w)).count() as f64;

    (positive - negative) / words.len() as f64
}

/// Returns true if the word is an English stop-word
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.binary_search(&word).is_ok()
}

/// Splits text into lowercase keyword candidates
///
/// Tokens are split on any non-alphanumeric character; tokens containing
/// digits, single letters and stop-words are discarded.
pub fn keyword_tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.chars().count() >= 2)
        .filter(|token| token.chars().all(char::is_alphabetic))
        .filter(|token| !is_stop_word(token))
        .map(str::to_string)
        .collect()
}

/// Ranks unigrams and adjacent bigrams by frequency within one document
///
/// Ties are broken alphabetically. At most `max_keywords` terms are
/// returned, highest frequency first.
pub fn extract_keywords(text: &str, max_keywords: usize) -> Vec<String> {
    let tokens = keyword_tokens(text);
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut counts: HashMap<String, usize> = HashMap::new();
    for token in &tokens {
        *counts.entry(token.clone()).or_default() += 1;
    }
    for pair in tokens.windows(2) {
        *counts.entry(format!("{} {}", pair[0], pair[1])).or_default() += 1;
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    ranked
        .into_iter()
        .take(max_keywords)
        .map(|(term, _)| term)
        .collect()
}

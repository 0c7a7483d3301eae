//! Text normalization ahead of vectorization

use crate::stopwords::StopwordSet;

/// Replace every non-ASCII-letter character with a space and lowercase.
///
/// Each replaced character becomes exactly one space, so runs of punctuation
/// yield runs of spaces; tokenization collapses them.
pub fn normalize(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_ascii_alphabetic() {
                c.to_ascii_lowercase()
            } else {
                ' '
            }
        })
        .collect()
}

/// True when the text has nothing but whitespace.
///
/// The information separators U+001C to U+001F count as whitespace here,
/// even though `char::is_whitespace` rejects them.
pub fn is_blank(text: &str) -> bool {
    text.chars()
        .all(|c| c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c))
}

/// Split on whitespace
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Drop stopwords, keeping the surviving tokens in their original order
pub fn remove_stopwords<'a>(tokens: &[&'a str], stopwords: &StopwordSet) -> Vec<&'a str> {
    tokens
        .iter()
        .copied()
        .filter(|token| !stopwords.contains(token))
        .collect()
}

/// Full cleanup: normalize, tokenize, filter stopwords, rejoin with single spaces
pub fn preprocess(text: &str, stopwords: &StopwordSet) -> String {
    let normalized = normalize(text);
    let tokens = tokenize(&normalized);
    remove_stopwords(&tokens, stopwords).join(" ")
}

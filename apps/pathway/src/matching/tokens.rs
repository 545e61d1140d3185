//! Whole-word matching primitive shared by the skill and interest scorers.
//!
//! Two strings match when, after lowercasing and trimming, they are equal or
//! share a token longer than two characters, where tokens are split on space,
//! slash, dot and hyphen. `"java"` therefore never matches `"javascript"`.

use crate::models::normalize;

/// Shortest token length (exclusive) allowed to carry a match on its own.
const MIN_TOKEN_LEN: usize = 2;

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '/' | '.' | '-')
}

/// Splits an already-normalized string into match-eligible tokens.
pub fn tokens(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(is_separator)
        .filter(|t| t.chars().count() > MIN_TOKEN_LEN)
}

/// Whole-word match between two arbitrary strings.
pub fn whole_word_match(a: &str, b: &str) -> bool {
    let a = normalize(a);
    let b = normalize(b);
    whole_word_match_normalized(&a, &b)
}

/// Same as [`whole_word_match`] for inputs that are already normalized.
pub fn whole_word_match_normalized(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a == b {
        return true;
    }
    tokens(a).any(|ta| tokens(b).any(|tb| ta == tb))
}

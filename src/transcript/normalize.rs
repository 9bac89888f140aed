//! Word normalization for fuzzy comparison.

/// Normalize a word for comparison: lower-case, keep Unicode letters,
/// digits and apostrophes, collapse everything else to single spaces,
/// then trim.
///
/// An empty result means the word has no comparable content and callers
/// should skip it.
pub fn normalize_word(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    for c in word.to_lowercase().chars() {
        if c.is_alphanumeric() || c == '\'' {
            out.push(c);
        } else {
            out.push(' ');
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keep only the alphabetic characters of a word, lower-cased.
///
/// Used for abbreviation lookups, where trailing dots and digits are noise.
pub fn alpha_only_lowercase(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_alphabetic())
        .collect::<String>()
        .to_lowercase()
}

//! Sentence boundary detection over word-level timestamps.
//!
//! Recognizers emit words one at a time with terminal punctuation attached
//! (or occasionally as standalone tokens), so sentence boundaries have to be
//! reconstructed heuristically: terminator punctuation closes a sentence
//! unless the word is a known abbreviation or a dotted compound, and dotted
//! words followed by a short continuation token ("Node." + "js") are merged
//! back together before the boundary is evaluated.

use super::models::SentenceCandidate;
use crate::config::SegmentationSettings;
use crate::error::Result;
use crate::transcript::{alpha_only_lowercase, validate_words, WordTimestamp};
use regex::Regex;
use std::collections::HashSet;
use tracing::debug;

const TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Walks a word-timestamp sequence and emits raw sentence candidates.
pub struct SentenceBoundaryDetector {
    abbreviations: HashSet<String>,
    suffixes: HashSet<String>,
    dotted_compound: Regex,
}

impl SentenceBoundaryDetector {
    pub fn new(settings: &SegmentationSettings) -> Self {
        // An alphanumeric on each side of a dot, e.g. "U.S" or "2.5"
        let dotted_compound =
            Regex::new(r"[A-Za-z0-9]\.[A-Za-z0-9]").expect("Invalid regex");

        Self {
            abbreviations: settings
                .abbreviations
                .iter()
                .map(|s| s.to_lowercase())
                .collect(),
            suffixes: settings
                .dotted_suffixes
                .iter()
                .map(|s| s.to_lowercase())
                .collect(),
            dotted_compound,
        }
    }

    /// Partition words into sentence candidates.
    ///
    /// Fails fast on structurally malformed word entries; a corrupted
    /// transcript must not be silently segmented.
    pub fn detect(&self, words: &[WordTimestamp]) -> Result<Vec<SentenceCandidate>> {
        validate_words(words)?;

        let mut candidates: Vec<SentenceCandidate> = Vec::new();
        let mut buffer: Vec<String> = Vec::new();
        let mut buf_start: f64 = 0.0;
        let mut buf_end: f64 = 0.0;

        let mut i = 0;
        while i < words.len() {
            let word = &words[i];
            let text = word.text.trim();

            if text.is_empty() {
                i += 1;
                continue;
            }

            if is_bare_punctuation(text) {
                match buffer.last_mut() {
                    // "Dr" + "." arrives as two tokens; reattach the
                    // punctuation so the abbreviation check sees "Dr."
                    Some(last) => {
                        last.push_str(text);
                        buf_end = buf_end.max(word.end);
                    }
                    None => {
                        debug!("skipping leading punctuation token {:?}", text);
                        i += 1;
                        continue;
                    }
                }
            } else {
                if buffer.is_empty() {
                    buf_start = word.start;
                    buf_end = word.end;
                } else {
                    buf_end = buf_end.max(word.end);
                }
                buffer.push(text.to_string());
            }

            // Merge a dotted word with a short continuation token
            // ("Node." + "js", "2." + "5") before evaluating the boundary.
            // Only '.' qualifies: '?' and '!' always end real sentences.
            if buffer.last().is_some_and(|t| t.ends_with('.')) {
                if let Some(next) = words.get(i + 1) {
                    let next_text = next.text.trim();
                    if self.is_continuation(next_text) {
                        if let Some(last) = buffer.last_mut() {
                            last.push_str(next_text);
                        }
                        buf_end = buf_end.max(next.end);
                        i += 1;
                    }
                }
            }

            let last = buffer.last().map(String::as_str).unwrap_or("");
            if self.closes_sentence(last) {
                candidates.push(SentenceCandidate::new(
                    candidates.len(),
                    buffer.join(" "),
                    buf_start,
                    buf_end,
                ));
                buffer.clear();
            }

            i += 1;
        }

        // Leftover words form a final, unterminated sentence.
        if !buffer.is_empty() {
            candidates.push(SentenceCandidate::new(
                candidates.len(),
                buffer.join(" "),
                buf_start,
                buf_end,
            ));
        }

        debug!("detected {} sentence candidates", candidates.len());
        Ok(candidates)
    }

    /// Does this (possibly merged) token end the current sentence?
    fn closes_sentence(&self, token: &str) -> bool {
        if !ends_with_terminator(token) {
            return false;
        }
        if self.abbreviations.contains(&alpha_only_lowercase(token)) {
            return false;
        }
        let stripped = token.trim_end_matches(TERMINATORS);
        if self.dotted_compound.is_match(stripped) {
            return false;
        }
        true
    }

    /// A short alphanumeric token that continues a dotted word: an entry
    /// from the suffix allow-list, or a 1-3 digit number.
    fn is_continuation(&self, token: &str) -> bool {
        if token.is_empty() {
            return false;
        }
        if self.suffixes.contains(&token.to_lowercase()) {
            return true;
        }
        token.len() <= 3 && token.chars().all(|c| c.is_ascii_digit())
    }
}

fn ends_with_terminator(token: &str) -> bool {
    token.ends_with(TERMINATORS)
}

fn is_bare_punctuation(token: &str) -> bool {
    !token.chars().any(|c| c.is_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> SentenceBoundaryDetector {
        SentenceBoundaryDetector::new(&SegmentationSettings::default())
    }

    fn words(entries: &[(&str, f64, f64)]) -> Vec<WordTimestamp> {
        entries
            .iter()
            .map(|(t, s, e)| WordTimestamp::new(*t, *s, *e))
            .collect()
    }

    #[test]
    fn test_splits_on_terminators() {
        let words = words(&[
            ("Hello", 0.0, 0.4),
            ("world.", 0.5, 1.0),
            ("How", 1.2, 1.5),
            ("are", 1.5, 1.7),
            ("you?", 1.7, 2.0),
        ]);
        let candidates = detector().detect(&words).unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].text, "Hello world.");
        assert_eq!(candidates[0].start_seconds, 0.0);
        assert_eq!(candidates[0].end_seconds, 1.0);
        assert_eq!(candidates[1].text, "How are you?");
        assert_eq!(candidates[1].ordinal, 1);
    }

    #[test]
    fn test_abbreviation_does_not_split() {
        // "Dr" and "." arrive as separate tokens.
        let words = words(&[
            ("Dr", 0.0, 0.3),
            (".", 0.3, 0.35),
            ("Smith", 0.4, 0.8),
            ("left", 0.9, 1.2),
            (".", 1.2, 1.25),
        ]);
        let candidates = detector().detect(&words).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].text, "Dr. Smith left.");
        assert_eq!(candidates[0].start_seconds, 0.0);
        assert_eq!(candidates[0].end_seconds, 1.25);
    }

    #[test]
    fn test_attached_abbreviation_does_not_split() {
        let words = words(&[
            ("Mr.", 0.0, 0.3),
            ("Jones", 0.4, 0.8),
            ("spoke.", 0.9, 1.4),
        ]);
        let candidates = detector().detect(&words).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].text, "Mr. Jones spoke.");
    }

    #[test]
    fn test_dotted_compound_does_not_split() {
        let words = words(&[
            ("The", 0.0, 0.2),
            ("U.S.", 0.3, 0.7),
            ("economy", 0.8, 1.3),
            ("grew.", 1.4, 1.8),
        ]);
        let candidates = detector().detect(&words).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].text, "The U.S. economy grew.");
    }

    #[test]
    fn test_suffix_merge_does_not_split() {
        let words = words(&[
            ("We", 0.0, 0.2),
            ("use", 0.2, 0.4),
            ("Node.", 0.5, 0.9),
            ("js", 0.9, 1.1),
            ("daily.", 1.2, 1.7),
        ]);
        let candidates = detector().detect(&words).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].text, "We use Node.js daily.");
        assert_eq!(candidates[0].end_seconds, 1.7);
    }

    #[test]
    fn test_numeric_suffix_merge() {
        let words = words(&[
            ("Version", 0.0, 0.4),
            ("2.", 0.5, 0.7),
            ("5", 0.7, 0.9),
            ("shipped.", 1.0, 1.5),
        ]);
        let candidates = detector().detect(&words).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].text, "Version 2.5 shipped.");
    }

    #[test]
    fn test_trailing_words_emitted() {
        let words = words(&[
            ("First.", 0.0, 0.5),
            ("and", 0.6, 0.8),
            ("then", 0.8, 1.0),
        ]);
        let candidates = detector().detect(&words).unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[1].text, "and then");
        assert_eq!(candidates[1].end_seconds, 1.0);
    }

    #[test]
    fn test_empty_input() {
        let candidates = detector().detect(&[]).unwrap();
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_malformed_word_fails_fast() {
        let words = vec![WordTimestamp::new("", f64::NAN, f64::NAN)];
        assert!(detector().detect(&words).is_err());
    }
}

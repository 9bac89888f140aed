//! Script-to-transcript alignment.
//!
//! When an authoritative script exists its sentences are preferred over the
//! recognizer's noisy text, but timing still has to come from the transcript.
//! Each script sentence is matched against a bounded window of upcoming
//! transcript words; the best-matching span donates its start/end times.
//!
//! The aligner is greedy, monotonic, and single-pass: the transcript cursor
//! only ever advances, so a local mismatch is never globally re-optimized.
//! This is a known limitation accepted for predictability; the fallback
//! ladder (windowed match, then positional consumption, then average-duration
//! extrapolation) guarantees every tokenizable sentence gets a segment.

use super::models::{round2, SentenceCandidate};
use crate::config::SegmentationSettings;
use crate::transcript::{normalize_word, WordTimestamp};
use tracing::{debug, warn};

/// A transcript word reduced to its comparable form. Words that normalize
/// to nothing are dropped before alignment.
struct AlignWord {
    token: String,
    start: f64,
    end: f64,
}

/// Assigns transcript timing to script sentences.
pub struct ScriptAligner {
    window_words: usize,
    score_threshold: f64,
    default_word_duration: f64,
}

impl ScriptAligner {
    pub fn new(settings: &SegmentationSettings) -> Self {
        Self {
            window_words: settings.alignment_window_words,
            score_threshold: settings.alignment_score_threshold,
            default_word_duration: settings.default_word_duration_seconds,
        }
    }

    /// Produce one timed candidate per script sentence that has at least one
    /// comparable token. Candidate text is the script sentence, not the
    /// recognized words.
    pub fn align(&self, sentences: &[String], words: &[WordTimestamp]) -> Vec<SentenceCandidate> {
        let align_words: Vec<AlignWord> = words
            .iter()
            .filter_map(|w| {
                let token = normalize_word(&w.text);
                if token.is_empty() {
                    None
                } else {
                    Some(AlignWord {
                        token,
                        start: w.start,
                        end: w.end,
                    })
                }
            })
            .collect();

        let avg_word_duration = average_word_duration(&align_words, self.default_word_duration);

        let mut candidates: Vec<SentenceCandidate> = Vec::new();
        let mut cursor = 0usize;
        let mut prev_end = 0.0f64;

        for sentence in sentences {
            let tokens = tokenize(sentence);
            if tokens.is_empty() {
                debug!("skipping script sentence with no comparable tokens: {:?}", sentence);
                continue;
            }

            let (start, end) = if cursor < align_words.len() {
                match self.best_match(&tokens, &align_words, cursor) {
                    Some(m) if m.score >= self.score_threshold => {
                        let start = align_words[m.start_index].start;
                        let end = align_words[m.start_index + m.length - 1].end;
                        cursor = m.start_index + m.length;
                        (start, end)
                    }
                    _ => {
                        // No acceptable match in the window; consume words
                        // positionally so the transcript keeps draining.
                        let take = tokens.len().min(align_words.len() - cursor);
                        let start = align_words[cursor].start;
                        let end = align_words[cursor + take - 1].end;
                        cursor += take;
                        debug!(
                            "positional fallback for sentence {:?} ({} words)",
                            truncate(sentence),
                            take
                        );
                        (start, end)
                    }
                }
            } else {
                // Transcript exhausted: extrapolate from the previous end.
                warn!(
                    "transcript exhausted, extrapolating timing for {:?}",
                    truncate(sentence)
                );
                let start = prev_end;
                let end = start + avg_word_duration * tokens.len() as f64;
                (start, end)
            };

            let mut end = round2(end);
            let start = round2(start);
            if end < start {
                end = round2(start + avg_word_duration * tokens.len() as f64);
            }

            candidates.push(SentenceCandidate::new(
                candidates.len(),
                sentence.trim(),
                start,
                end,
            ));
            prev_end = end;
        }

        candidates
    }

    /// Search a bounded lookahead window for the transcript span that best
    /// matches the sentence tokens. Ties keep the earliest span; a perfect
    /// score stops the search.
    fn best_match(
        &self,
        tokens: &[String],
        words: &[AlignWord],
        cursor: usize,
    ) -> Option<SpanMatch> {
        let window_end = (cursor + self.window_words).min(words.len());
        let min_len = tokens.len().saturating_sub(2).max(1);
        let max_len = tokens.len() + 2;

        let mut best: Option<SpanMatch> = None;

        for start_index in cursor..window_end {
            for length in min_len..=max_len {
                if start_index + length > words.len() {
                    break;
                }

                let overlap = length.min(tokens.len());
                let matched = (0..overlap)
                    .filter(|&i| words[start_index + i].token == tokens[i])
                    .count();
                let score = matched as f64 / tokens.len() as f64;

                if best.as_ref().is_none_or(|b| score > b.score) {
                    best = Some(SpanMatch {
                        score,
                        start_index,
                        length,
                    });
                    if score >= 1.0 {
                        return best;
                    }
                }
            }
        }

        best
    }
}

struct SpanMatch {
    score: f64,
    start_index: usize,
    length: usize,
}

/// Normalized tokens of a sentence, empties dropped.
fn tokenize(sentence: &str) -> Vec<String> {
    sentence
        .split_whitespace()
        .map(normalize_word)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Mean word duration across the whole transcript, or the configured
/// default when the transcript is empty.
fn average_word_duration(words: &[AlignWord], default: f64) -> f64 {
    if words.is_empty() {
        return default;
    }
    let total: f64 = words.iter().map(|w| w.end - w.start).sum();
    total / words.len() as f64
}

fn truncate(s: &str) -> String {
    s.chars().take(40).collect()
}

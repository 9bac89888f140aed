//! Transcript input types and parsing.
//!
//! Transcription services wrap their word timestamps in a handful of
//! container shapes. This module unwraps the known shapes into a flat
//! [`WordTimestamp`] list and validates each entry before it reaches the
//! engine. Structurally malformed rows abort the whole run: a half-parsed
//! transcript would silently misplace every downstream boundary.

mod normalize;

pub use normalize::{alpha_only_lowercase, normalize_word};

use crate::error::{Result, SegmentationError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// A single word with timing from a speech recognizer.
///
/// Immutable input: the engine only ever reads these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordTimestamp {
    /// The word text.
    #[serde(alias = "word")]
    pub text: String,
    /// Start time in seconds.
    #[serde(alias = "startSeconds")]
    pub start: f64,
    /// End time in seconds.
    #[serde(alias = "endSeconds")]
    pub end: f64,
}

impl WordTimestamp {
    /// Create a new word timestamp.
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }
}

/// Validate a word list before segmentation.
///
/// Fails fast on entries that carry neither text nor usable timing; a
/// recognizer that produced such a row has corrupted output and no partial
/// result should be built from it. An `end` before `start` is tolerated
/// (recognizers emit these around clipped audio) but logged.
pub fn validate_words(words: &[WordTimestamp]) -> Result<()> {
    for (i, w) in words.iter().enumerate() {
        let timing_ok = w.start.is_finite() && w.end.is_finite();
        if w.text.trim().is_empty() && !timing_ok {
            return Err(SegmentationError::MalformedInput(format!(
                "word entry {} has no text and no numeric timing",
                i
            )));
        }
        if !timing_ok {
            return Err(SegmentationError::MalformedInput(format!(
                "word entry {} ({:?}) has non-numeric timing",
                i, w.text
            )));
        }
        if w.end < w.start {
            warn!(
                "word entry {} ({:?}) ends before it starts ({} < {})",
                i, w.text, w.end, w.start
            );
        }
    }
    Ok(())
}

/// Extract a flat word-timestamp list from a transcription payload.
///
/// Accepts, in order of preference:
/// - a bare JSON array of word objects
/// - `{"words": [...]}` or `{"word_timestamps": [...]}`
/// - `{"transcription": {"words": [...]}}`
/// - `{"response": {"segments": [{"words": [...]}, ...]}}` (NeMo-style
///   output; per-segment word lists are flattened in order)
pub fn parse_words(value: &Value) -> Result<Vec<WordTimestamp>> {
    if let Some(items) = value.as_array() {
        return parse_word_array(items);
    }

    if let Some(obj) = value.as_object() {
        for key in ["words", "word_timestamps"] {
            if let Some(items) = obj.get(key).and_then(|v| v.as_array()) {
                return parse_word_array(items);
            }
        }
        if let Some(items) = obj
            .get("transcription")
            .and_then(|v| v.get("words"))
            .and_then(|v| v.as_array())
        {
            return parse_word_array(items);
        }
        if let Some(segments) = obj
            .get("response")
            .and_then(|v| v.get("segments"))
            .and_then(|v| v.as_array())
        {
            let mut words = Vec::new();
            for segment in segments {
                if let Some(items) = segment.get("words").and_then(|v| v.as_array()) {
                    words.extend(parse_word_array(items)?);
                }
            }
            return Ok(words);
        }
    }

    Err(SegmentationError::MalformedInput(
        "no word timestamps found under any known container key".to_string(),
    ))
}

fn parse_word_array(items: &[Value]) -> Result<Vec<WordTimestamp>> {
    let mut words = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let text = item
            .get("word")
            .or_else(|| item.get("text"))
            .and_then(|v| v.as_str());
        let start = item.get("start").and_then(|v| v.as_f64());
        let end = item.get("end").and_then(|v| v.as_f64());

        match (text, start, end) {
            (Some(text), Some(start), Some(end)) => {
                words.push(WordTimestamp::new(text, start, end));
            }
            // A missing text field alone is tolerable: the entry still
            // occupies its time span and is skipped by boundary detection.
            (None, Some(start), Some(end)) => {
                words.push(WordTimestamp::new("", start, end));
            }
            (None, _, _) => {
                return Err(SegmentationError::MalformedInput(format!(
                    "word entry {} has no text and no numeric timing",
                    i
                )));
            }
            (Some(_), _, _) => {
                return Err(SegmentationError::MalformedInput(format!(
                    "word entry {} is missing numeric start/end fields",
                    i
                )));
            }
        }
    }
    Ok(words)
}

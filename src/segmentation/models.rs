//! Data models for segmentation.

use serde::{Deserialize, Serialize};

/// Round a time to centisecond precision.
///
/// Applied at every assignment point, not just on output: intermediate
/// rounding keeps results reproducible across runs and platforms.
pub fn round2(seconds: f64) -> f64 {
    (seconds * 100.0).round() / 100.0
}

/// A provisional sentence produced by boundary detection or alignment,
/// before deduplication and reconciliation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentenceCandidate {
    /// Position among emitted candidates.
    pub ordinal: usize,
    /// Sentence text (recognized words, or the script sentence when aligned).
    pub text: String,
    /// Start time in seconds.
    pub start_seconds: f64,
    /// End time in seconds.
    pub end_seconds: f64,
    /// Duration in seconds; kept equal to `end_seconds - start_seconds`.
    pub duration_seconds: f64,
}

impl SentenceCandidate {
    /// Create a candidate with rounded, consistent timing.
    pub fn new(ordinal: usize, text: impl Into<String>, start: f64, end: f64) -> Self {
        let start = round2(start);
        let end = round2(end);
        Self {
            ordinal,
            text: text.into(),
            start_seconds: start,
            end_seconds: end,
            duration_seconds: round2(end - start),
        }
    }
}

/// Whether a segment carries speech or silence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// A spoken sentence.
    Sentence,
    /// A non-speech interval, including leading/trailing silence.
    Gap,
}

/// A final timed unit of the output timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    /// Dense 0-based position in the final sequence.
    pub ordinal: usize,
    /// Speech or silence.
    pub kind: SegmentKind,
    /// Sentence text; empty for gaps.
    pub text: String,
    /// Start time in seconds.
    pub start_seconds: f64,
    /// End time in seconds.
    pub end_seconds: f64,
    /// Duration in seconds; kept equal to `end_seconds - start_seconds`.
    pub duration_seconds: f64,
    /// The preceding segment's end time (0 for the first segment). Derived
    /// once the sequence is final, never set incrementally.
    pub predecessor_end_seconds: f64,
}

impl Segment {
    /// Create a sentence segment.
    pub fn sentence(ordinal: usize, text: impl Into<String>, start: f64, end: f64) -> Self {
        Self::with_kind(ordinal, SegmentKind::Sentence, text.into(), start, end)
    }

    /// Create a gap segment.
    pub fn gap(ordinal: usize, start: f64, end: f64) -> Self {
        Self::with_kind(ordinal, SegmentKind::Gap, String::new(), start, end)
    }

    fn with_kind(ordinal: usize, kind: SegmentKind, text: String, start: f64, end: f64) -> Self {
        let start = round2(start);
        let end = round2(end);
        Self {
            ordinal,
            kind,
            text,
            start_seconds: start,
            end_seconds: end,
            duration_seconds: round2(end - start),
            predecessor_end_seconds: 0.0,
        }
    }

    /// Is this a sentence segment?
    pub fn is_sentence(&self) -> bool {
        self.kind == SegmentKind::Sentence
    }

    /// Is this a gap segment?
    pub fn is_gap(&self) -> bool {
        self.kind == SegmentKind::Gap
    }

    /// Move the start boundary, recomputing the duration.
    pub fn set_start(&mut self, start: f64) {
        self.start_seconds = round2(start);
        self.duration_seconds = round2(self.end_seconds - self.start_seconds);
    }

    /// Move the end boundary, recomputing the duration.
    pub fn set_end(&mut self, end: f64) {
        self.end_seconds = round2(end);
        self.duration_seconds = round2(self.end_seconds - self.start_seconds);
    }

    /// Shift the segment to a new start, preserving its duration.
    pub fn shift_to(&mut self, start: f64) {
        let duration = self.duration_seconds;
        self.start_seconds = round2(start);
        self.end_seconds = round2(self.start_seconds + duration);
        self.duration_seconds = round2(self.end_seconds - self.start_seconds);
    }

    /// Collapse to zero duration at the given instant.
    pub fn collapse_at(&mut self, at: f64) {
        self.start_seconds = round2(at);
        self.end_seconds = self.start_seconds;
        self.duration_seconds = 0.0;
    }
}

impl From<SentenceCandidate> for Segment {
    fn from(candidate: SentenceCandidate) -> Self {
        Segment::sentence(
            candidate.ordinal,
            candidate.text,
            candidate.start_seconds,
            candidate.end_seconds,
        )
    }
}

//! Sentence segmentation pipeline stages.
//!
//! Candidates flow strictly forward: boundary detection (or script
//! alignment) produces them, deduplication filters them, and the timeline
//! builder reconciles them into the final segment sequence.

mod align;
mod boundary;
mod dedup;
mod models;
mod timeline;

pub use align::ScriptAligner;
pub use boundary::SentenceBoundaryDetector;
pub use dedup::dedup_candidates;
pub use models::{round2, Segment, SegmentKind, SentenceCandidate};
pub use timeline::TimelineBuilder;

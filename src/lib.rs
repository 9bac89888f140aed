//! Sceneseg - Transcript-to-Scene Segmentation
//!
//! Partitions a video's audio track into an ordered sequence of sentence and
//! gap (silence) segments, given word-level speech timestamps and, optionally,
//! an authoritative script text.
//!
//! # Overview
//!
//! Sceneseg takes noisy word-level recognizer output and produces a timeline
//! suitable for per-sentence downstream processing:
//!
//! - Sentence-boundary heuristics over word timestamps (abbreviations,
//!   dotted compounds, split suffix tokens)
//! - Fuzzy alignment of a canonical script against transcript timing
//! - Overlap deduplication and gap/overlap reconciliation with several
//!   tie-break policies
//! - Timeline-consistency repair and derived predecessor references
//!
//! # Architecture
//!
//! - `config` - Engine tuning knobs (allow-lists, thresholds)
//! - `transcript` - Input word timestamps: parsing, validation, normalization
//! - `script` - Script text sentence splitting
//! - `segmentation` - Boundary detection, alignment, dedup, timeline building
//! - `engine` - Pipeline orchestration and the persistence sink boundary
//!
//! # Example
//!
//! ```rust
//! use sceneseg::engine::SegmentationEngine;
//! use sceneseg::transcript::WordTimestamp;
//!
//! let words = vec![
//!     WordTimestamp::new("Hello", 0.0, 0.4),
//!     WordTimestamp::new("world.", 0.5, 1.0),
//! ];
//!
//! let engine = SegmentationEngine::default();
//! let segments = engine.segment_from_transcript(&words, Some(3.0)).unwrap();
//! assert!(segments[0].is_sentence());
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod script;
pub mod segmentation;
pub mod transcript;

pub use engine::{SegmentationEngine, SegmentSink};
pub use error::{Result, SegmentationError};
pub use segmentation::{Segment, SegmentKind};

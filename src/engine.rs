//! Segmentation engine: pipeline orchestration and the persistence boundary.
//!
//! Two pipelines share the same tail:
//!
//! - **Transcript-only**: boundary detection over recognized words.
//! - **Script + transcript**: the authoritative script is split into
//!   sentences and aligned against the transcript's word timing.
//!
//! Both feed deduplication and timeline reconciliation, producing the final
//! ordered segment list. A single invocation is a pure, synchronous
//! computation over its own copies of the inputs; no state survives the call.

use crate::config::SegmentationSettings;
use crate::error::Result;
use crate::script::split_sentences;
use crate::segmentation::{
    dedup_candidates, Segment, SentenceBoundaryDetector, ScriptAligner, TimelineBuilder,
};
use crate::transcript::{validate_words, WordTimestamp};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// Receives the final segment list for storage.
///
/// The engine has no opinion about storage shape: identifier assignment and
/// relating segments to their parent media record belong entirely to the
/// implementor.
pub trait SegmentSink {
    /// Persist a finished segment list.
    fn persist(&mut self, segments: &[Segment]) -> Result<()>;
}

/// Sink that writes segments as pretty-printed JSON to a file.
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl SegmentSink for JsonFileSink {
    fn persist(&mut self, segments: &[Segment]) -> Result<()> {
        let json = serde_json::to_string_pretty(segments)?;
        std::fs::write(&self.path, json)?;
        info!("wrote {} segments to {}", segments.len(), self.path.display());
        Ok(())
    }
}

/// Transcript-to-scene segmentation engine.
pub struct SegmentationEngine {
    settings: SegmentationSettings,
}

impl SegmentationEngine {
    pub fn new(settings: SegmentationSettings) -> Self {
        Self { settings }
    }

    /// Segment using recognized words only.
    ///
    /// `total_duration` enables leading/trailing-silence detection; without
    /// it the timeline covers only the span the words themselves claim.
    #[instrument(skip(self, words), fields(words = words.len()))]
    pub fn segment_from_transcript(
        &self,
        words: &[WordTimestamp],
        total_duration: Option<f64>,
    ) -> Result<Vec<Segment>> {
        let detector = SentenceBoundaryDetector::new(&self.settings);
        let candidates = detector.detect(words)?;
        info!("transcript-only pipeline: {} candidates", candidates.len());

        let deduped = dedup_candidates(candidates);
        let builder = TimelineBuilder::new(&self.settings);
        Ok(builder.build(deduped, total_duration, false))
    }

    /// Segment using an authoritative script, timed against the transcript.
    ///
    /// Falls back to the transcript-only pipeline when the script contains
    /// no sentences.
    #[instrument(skip(self, script, words), fields(words = words.len()))]
    pub fn segment_from_script_and_transcript(
        &self,
        script: &str,
        words: &[WordTimestamp],
        total_duration: Option<f64>,
    ) -> Result<Vec<Segment>> {
        validate_words(words)?;

        let sentences = split_sentences(script);
        if sentences.is_empty() {
            warn!("script produced no sentences, using transcript-only pipeline");
            return self.segment_from_transcript(words, total_duration);
        }
        info!(
            "script pipeline: {} script sentences, {} words",
            sentences.len(),
            words.len()
        );

        let aligner = ScriptAligner::new(&self.settings);
        let candidates = aligner.align(&sentences, words);

        let deduped = dedup_candidates(candidates);
        let builder = TimelineBuilder::new(&self.settings);
        Ok(builder.build(deduped, total_duration, true))
    }
}

impl Default for SegmentationEngine {
    fn default() -> Self {
        Self::new(SegmentationSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmentation::SegmentKind;

    fn words(entries: &[(&str, f64, f64)]) -> Vec<WordTimestamp> {
        entries
            .iter()
            .map(|(t, s, e)| WordTimestamp::new(*t, *s, *e))
            .collect()
    }

    #[test]
    fn test_transcript_pipeline_end_to_end() {
        let engine = SegmentationEngine::default();
        let words = words(&[
            ("Hello", 0.0, 0.4),
            ("world.", 0.5, 1.0),
            ("Goodbye", 2.0, 2.4),
            ("moon.", 2.5, 3.0),
        ]);

        let segments = engine.segment_from_transcript(&words, Some(4.0)).unwrap();

        let sentences: Vec<&Segment> =
            segments.iter().filter(|s| s.is_sentence()).collect();
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].text, "Hello world.");
        assert_eq!(sentences[1].text, "Goodbye moon.");
        assert_eq!(segments.last().unwrap().kind, SegmentKind::Gap);
    }

    #[test]
    fn test_script_pipeline_prefers_script_text() {
        let engine = SegmentationEngine::default();
        let words = words(&[
            ("helo", 0.0, 0.4),
            ("world", 0.5, 1.0),
            ("goodbye", 2.0, 2.4),
            ("moon", 2.5, 3.0),
        ]);
        let script = "Hello world. Goodbye moon.";

        let segments = engine
            .segment_from_script_and_transcript(script, &words, None)
            .unwrap();

        let sentences: Vec<&Segment> =
            segments.iter().filter(|s| s.is_sentence()).collect();
        assert_eq!(sentences.len(), 2);
        // Script spelling wins over the recognizer's.
        assert_eq!(sentences[0].text, "Hello world.");
    }

    #[test]
    fn test_empty_script_falls_back() {
        let engine = SegmentationEngine::default();
        let words = words(&[("Hi.", 0.0, 0.5)]);

        let segments = engine
            .segment_from_script_and_transcript("   \n  ", &words, None)
            .unwrap();

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "Hi.");
    }

    #[test]
    fn test_empty_words_with_duration_yields_full_gap() {
        let engine = SegmentationEngine::default();
        let segments = engine.segment_from_transcript(&[], Some(30.0)).unwrap();
        assert_eq!(segments.len(), 1);
        assert!(segments[0].is_gap());
        assert_eq!(segments[0].duration_seconds, 30.0);
    }

    #[test]
    fn test_empty_words_without_duration_yields_empty() {
        let engine = SegmentationEngine::default();
        let segments = engine.segment_from_transcript(&[], None).unwrap();
        assert!(segments.is_empty());
    }

    #[test]
    fn test_json_sink_writes_segments() {
        let engine = SegmentationEngine::default();
        let words = words(&[("Done.", 0.0, 1.0)]);
        let segments = engine.segment_from_transcript(&words, None).unwrap();

        let dir = std::env::temp_dir().join("sceneseg-test-sink");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("segments.json");
        let mut sink = JsonFileSink::new(&path);
        sink.persist(&segments).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<Segment> = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed.len(), segments.len());
        std::fs::remove_file(&path).ok();
    }
}

//! End-to-end tests for the segmentation engine's public entry points.

use sceneseg::engine::SegmentationEngine;
use sceneseg::segmentation::{Segment, SegmentKind};
use sceneseg::transcript::WordTimestamp;

fn words(entries: &[(&str, f64, f64)]) -> Vec<WordTimestamp> {
    entries
        .iter()
        .map(|(t, s, e)| WordTimestamp::new(*t, *s, *e))
        .collect()
}

fn sentences(segments: &[Segment]) -> Vec<&Segment> {
    segments.iter().filter(|s| s.is_sentence()).collect()
}

fn assert_invariants(segments: &[Segment], total_duration: Option<f64>) {
    // Non-overlap: adjacent segments never intersect.
    for pair in segments.windows(2) {
        assert!(
            pair[1].start_seconds >= pair[0].end_seconds,
            "overlap: {:?} then {:?}",
            pair[0],
            pair[1]
        );
    }

    // Duration consistency at centisecond precision.
    for segment in segments {
        assert!(
            (segment.duration_seconds - (segment.end_seconds - segment.start_seconds)).abs()
                < 0.01,
            "inconsistent duration: {:?}",
            segment
        );
        assert!(segment.duration_seconds > 0.0);
    }

    // Dense ordinals.
    for (i, segment) in segments.iter().enumerate() {
        assert_eq!(segment.ordinal, i);
    }

    // Predecessor-end references.
    for (i, segment) in segments.iter().enumerate() {
        let expected = if i == 0 {
            0.0
        } else {
            segments[i - 1].end_seconds
        };
        assert_eq!(segment.predecessor_end_seconds, expected);
    }

    // Coverage against a known media duration.
    if let Some(total) = total_duration {
        if let Some(last) = segments.last() {
            assert!(last.end_seconds <= total + 1e-9);
        }
    }
}

#[test]
fn abbreviation_does_not_split_sentence() {
    // "Dr." arrives as a word plus a detached period; the abbreviation must
    // not end the sentence.
    let engine = SegmentationEngine::default();
    let words = words(&[
        ("Dr", 0.0, 0.3),
        (".", 0.3, 0.35),
        ("Smith", 0.4, 0.8),
        ("left", 0.9, 1.2),
        (".", 1.2, 1.25),
    ]);

    let segments = engine.segment_from_transcript(&words, None).unwrap();

    let sentences = sentences(&segments);
    assert_eq!(sentences.len(), 1);
    assert_eq!(sentences[0].text, "Dr. Smith left.");
    assert_eq!(sentences[0].start_seconds, 0.0);
    assert_eq!(sentences[0].end_seconds, 1.25);
    assert_invariants(&segments, None);
}

#[test]
fn negative_gap_swaps_boundaries() {
    // Sentence one ends at 5.0 while sentence two starts at 4.6; after
    // reconciliation the boundaries are exchanged and no gap remains.
    let engine = SegmentationEngine::default();
    let words = words(&[("One.", 0.0, 5.0), ("Two.", 4.6, 8.0)]);

    let segments = engine.segment_from_transcript(&words, None).unwrap();

    let sentences = sentences(&segments);
    assert_eq!(sentences.len(), 2);
    assert_eq!(sentences[0].end_seconds, 4.6);
    assert_eq!(sentences[1].start_seconds, 5.0);
    assert!(!segments
        .iter()
        .any(|s| s.is_gap() && s.start_seconds >= 4.0 && s.end_seconds <= 5.5));
    assert_invariants(&segments, None);
}

#[test]
fn small_gap_absorbed_into_preceding_sentence() {
    let engine = SegmentationEngine::default();
    let words = words(&[("One.", 0.0, 3.0), ("Two.", 3.15, 6.0)]);

    let segments = engine.segment_from_transcript(&words, None).unwrap();

    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].end_seconds, 3.15);
    assert_eq!(segments[1].start_seconds, 3.15);
    assert_invariants(&segments, None);
}

#[test]
fn trailing_silence_becomes_gap() {
    let engine = SegmentationEngine::default();
    let words = words(&[("Only.", 0.0, 4.0)]);

    let segments = engine.segment_from_transcript(&words, Some(6.0)).unwrap();

    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].kind, SegmentKind::Sentence);
    assert_eq!(segments[0].start_seconds, 0.0);
    assert_eq!(segments[0].end_seconds, 4.0);
    assert_eq!(segments[1].kind, SegmentKind::Gap);
    assert_eq!(segments[1].start_seconds, 4.0);
    assert_eq!(segments[1].end_seconds, 6.0);
    assert_invariants(&segments, Some(6.0));
}

#[test]
fn unmatched_script_sentence_still_gets_a_segment() {
    // The middle script sentence matches nothing in the transcript; it must
    // fall back to positional consumption rather than vanish.
    let engine = SegmentationEngine::default();
    let words = words(&[
        ("hello", 0.0, 0.4),
        ("world", 0.5, 1.0),
        ("xyzzy", 1.2, 1.6),
        ("quux", 1.7, 2.2),
        ("goodbye", 2.4, 2.8),
        ("moon", 2.9, 3.4),
    ]);
    let script = "Hello world. Entirely unrelated words. Goodbye moon.";

    let segments = engine
        .segment_from_script_and_transcript(script, &words, None)
        .unwrap();

    let sentences = sentences(&segments);
    assert_eq!(sentences.len(), 3);
    assert_eq!(sentences[1].text, "Entirely unrelated words.");
    assert!(sentences[1].duration_seconds > 0.0);
    assert_invariants(&segments, None);
}

#[test]
fn leading_silence_starts_timeline_at_zero() {
    let engine = SegmentationEngine::default();
    let words = words(&[("Late.", 5.0, 6.0)]);

    let segments = engine.segment_from_transcript(&words, Some(8.0)).unwrap();

    assert!(segments[0].is_gap());
    assert_eq!(segments[0].start_seconds, 0.0);
    assert_invariants(&segments, Some(8.0));
}

#[test]
fn messy_transcript_satisfies_all_invariants() {
    let engine = SegmentationEngine::default();
    let words = words(&[
        ("Intro", 0.5, 0.9),
        ("line.", 0.9, 1.4),
        ("Overlapping", 1.3, 1.8),
        ("next.", 1.8, 2.3),
        ("Then", 2.35, 2.7),
        ("a", 2.7, 2.8),
        ("pause.", 2.8, 3.2),
        ("Far", 6.0, 6.4),
        ("away.", 6.4, 6.9),
    ]);

    let segments = engine.segment_from_transcript(&words, Some(10.0)).unwrap();

    assert!(!segments.is_empty());
    assert_invariants(&segments, Some(10.0));
}

#[test]
fn script_pipeline_satisfies_all_invariants() {
    let engine = SegmentationEngine::default();
    let words = words(&[
        ("the", 0.2, 0.4),
        ("quick", 0.4, 0.7),
        ("brown", 0.7, 1.0),
        ("fox", 1.0, 1.3),
        ("jumps", 1.5, 1.9),
        ("over", 1.9, 2.2),
        ("the", 2.2, 2.3),
        ("lazy", 2.3, 2.7),
        ("dog", 2.7, 3.0),
    ]);
    let script = "The quick brown fox.\nJumps over the lazy dog.";

    let segments = engine
        .segment_from_script_and_transcript(script, &words, Some(5.0))
        .unwrap();

    let sentences = sentences(&segments);
    assert_eq!(sentences.len(), 2);
    assert_eq!(sentences[0].text, "The quick brown fox.");
    assert_invariants(&segments, Some(5.0));
}

#[test]
fn malformed_word_aborts_run() {
    let engine = SegmentationEngine::default();
    let words = vec![
        WordTimestamp::new("ok.", 0.0, 1.0),
        WordTimestamp::new("", f64::NAN, f64::NAN),
    ];

    assert!(engine.segment_from_transcript(&words, None).is_err());
    assert!(engine
        .segment_from_script_and_transcript("Some script.", &words, None)
        .is_err());
}

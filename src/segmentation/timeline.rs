//! Timeline construction and reconciliation.
//!
//! Turns deduplicated sentence candidates into the final segment sequence:
//! gaps are synthesized between sentences (plus leading/trailing silence when
//! the media duration is known), then overlaps and small/large gaps are
//! resolved into consistent boundaries. Reconciliation runs over a flat,
//! index-addressed segment vector; neighbors are always `i - 1` / `i + 1`,
//! never looked up by identity.

use super::models::{round2, Segment, SentenceCandidate};
use crate::config::SegmentationSettings;
use std::collections::HashSet;
use tracing::{debug, info};

/// Builds and reconciles the final segment timeline.
pub struct TimelineBuilder {
    large_gap: f64,
    small_gap: f64,
    edge_shift: f64,
    gap_absorption: f64,
}

impl TimelineBuilder {
    pub fn new(settings: &SegmentationSettings) -> Self {
        Self {
            large_gap: settings.large_gap_seconds,
            small_gap: settings.small_gap_seconds,
            edge_shift: settings.edge_shift_seconds,
            gap_absorption: settings.gap_absorption_seconds,
        }
    }

    /// Build the reconciled timeline.
    ///
    /// `absorb_trailing_padding` is enabled on the script-alignment path
    /// only: aligned speech tends to carry breath/mouth padding after each
    /// sentence, so up to a second of each following gap is folded into the
    /// sentence before reconciliation.
    pub fn build(
        &self,
        candidates: Vec<SentenceCandidate>,
        total_duration: Option<f64>,
        absorb_trailing_padding: bool,
    ) -> Vec<Segment> {
        if candidates.is_empty() {
            return match total_duration {
                Some(total) if total > 0.0 => {
                    vec![Segment::gap(0, 0.0, total)]
                }
                _ => Vec::new(),
            };
        }

        let mut segments = self.interleave(&candidates, total_duration);

        if absorb_trailing_padding {
            self.absorb_sentence_padding(&mut segments);
        }

        self.reconcile_gaps(&mut segments);

        segments.retain(|s| s.duration_seconds > 0.0);
        for (i, segment) in segments.iter_mut().enumerate() {
            segment.ordinal = i;
        }

        repair_monotonicity(&mut segments);
        derive_predecessor_ends(&mut segments);

        info!(
            "timeline built: {} segments ({} sentences)",
            segments.len(),
            segments.iter().filter(|s| s.is_sentence()).count()
        );
        segments
    }

    /// Steps 1-3: leading gap, sentence/gap interleave, trailing gap.
    ///
    /// Gap spans are emitted even when negative or zero; reconciliation
    /// resolves them. Duplicate (start, end) gap spans collapse to their
    /// first occurrence, guarding against duplicate upstream candidates.
    fn interleave(
        &self,
        candidates: &[SentenceCandidate],
        total_duration: Option<f64>,
    ) -> Vec<Segment> {
        let mut segments: Vec<Segment> = Vec::with_capacity(candidates.len() * 2 + 2);
        let mut gap_keys: HashSet<(i64, i64)> = HashSet::new();

        let first_start = candidates[0].start_seconds;
        if first_start > 0.0 && gap_keys.insert(gap_key(0.0, first_start)) {
            segments.push(Segment::gap(0, 0.0, first_start));
        }

        for (i, candidate) in candidates.iter().enumerate() {
            segments.push(Segment::from(candidate.clone()));
            if let Some(next) = candidates.get(i + 1) {
                let (gap_start, gap_end) = (candidate.end_seconds, next.start_seconds);
                if gap_keys.insert(gap_key(gap_start, gap_end)) {
                    segments.push(Segment::gap(0, gap_start, gap_end));
                }
            }
        }

        if let Some(total) = total_duration {
            let last_end = candidates
                .last()
                .map(|c| c.end_seconds)
                .unwrap_or(0.0);
            if total - last_end > 0.01 && gap_keys.insert(gap_key(last_end, total)) {
                segments.push(Segment::gap(0, last_end, total));
            }
        }

        segments
    }

    /// Step 4 (script path): fold up to `gap_absorption` seconds of each
    /// following gap into its preceding sentence.
    fn absorb_sentence_padding(&self, segments: &mut [Segment]) {
        for i in 0..segments.len().saturating_sub(1) {
            if !(segments[i].is_sentence() && segments[i + 1].is_gap()) {
                continue;
            }
            let gap_len = segments[i + 1].duration_seconds;
            if gap_len <= 0.0 {
                continue;
            }
            let shift = gap_len.min(self.gap_absorption);
            let new_end = round2(segments[i].end_seconds + shift);
            segments[i].set_end(new_end);
            segments[i + 1].set_start(new_end);
        }
    }

    /// Step 5: resolve each gap against its current neighbors, in order.
    ///
    /// A trailing gap (no following segment) is left untouched: it is real
    /// silence measured against the known media duration, not slack between
    /// sentences.
    fn reconcile_gaps(&self, segments: &mut [Segment]) {
        let len = segments.len();
        for i in 0..len {
            if !segments[i].is_gap() || i + 1 >= len {
                continue;
            }

            let duration = segments[i].duration_seconds;

            if duration < 0.0 {
                // Overlap: shorten the previous sentence, delay the next.
                let overlap = -duration;
                let gap_end = segments[i].end_seconds;
                if i > 0 && segments[i - 1].is_sentence() {
                    let end = segments[i - 1].end_seconds - overlap;
                    segments[i - 1].set_end(end);
                }
                if segments[i + 1].is_sentence() {
                    let start = segments[i + 1].start_seconds + overlap;
                    segments[i + 1].set_start(start);
                }
                segments[i].collapse_at(gap_end);
                debug!("resolved {:.2}s overlap at segment {}", overlap, i);
            } else if duration > self.large_gap {
                // Measured silence usually includes a little sentence audio
                // at each edge; give a fixed slice back to each neighbor.
                if i > 0 && segments[i - 1].is_sentence() {
                    let end = segments[i - 1].end_seconds + self.edge_shift;
                    segments[i - 1].set_end(end);
                    let start = segments[i].start_seconds + self.edge_shift;
                    segments[i].set_start(start);
                }
                if segments[i + 1].is_sentence() {
                    let start = segments[i + 1].start_seconds - self.edge_shift;
                    segments[i + 1].set_start(start);
                    let end = segments[i].end_seconds - self.edge_shift;
                    segments[i].set_end(end);
                }
            } else if duration > 0.0 && duration <= self.small_gap {
                // Absorb into the preceding sentence. Never pull the next
                // sentence earlier here: that would create a new overlap.
                if i > 0 && segments[i - 1].is_sentence() {
                    let end = segments[i - 1].end_seconds + duration;
                    segments[i - 1].set_end(end);
                    let at = segments[i].end_seconds;
                    segments[i].collapse_at(at);
                }
            }
        }
    }
}

/// Step 7: push any segment that starts before its predecessor's end to
/// start exactly there, preserving its duration. Local adjustments in
/// reconciliation can interact across three or more neighbors; this pass
/// guarantees the non-overlap invariant.
fn repair_monotonicity(segments: &mut [Segment]) {
    for i in 1..segments.len() {
        let prev_end = segments[i - 1].end_seconds;
        if segments[i].start_seconds < prev_end {
            debug!(
                "repairing overlap: segment {} start {:.2} < previous end {:.2}",
                i, segments[i].start_seconds, prev_end
            );
            segments[i].shift_to(prev_end);
        }
    }
}

/// Step 8: derive each segment's predecessor-end reference, first segment
/// gets 0.
fn derive_predecessor_ends(segments: &mut [Segment]) {
    for i in 0..segments.len() {
        segments[i].predecessor_end_seconds = if i == 0 {
            0.0
        } else {
            segments[i - 1].end_seconds
        };
    }
}

fn gap_key(start: f64, end: f64) -> (i64, i64) {
    ((start * 100.0).round() as i64, (end * 100.0).round() as i64)
}

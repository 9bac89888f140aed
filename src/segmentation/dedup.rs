//! Overlap-based candidate deduplication.
//!
//! Upstream stages can emit candidates that re-cover a span already claimed
//! by an earlier sentence (chunked recognizers overlap their chunks, and the
//! aligner's positional fallback can land on consumed audio). A candidate
//! that spends more than half its own duration inside previously accepted
//! intervals' territory is dropped.
//!
//! Quadratic in the candidate count, which is fine at per-video scale
//! (tens to low hundreds of sentences).

use super::models::SentenceCandidate;
use tracing::debug;

const MAX_OVERLAP_RATIO: f64 = 0.5;

/// Drop candidates that overlap an already accepted interval by more than
/// half of their own duration. Relative order is preserved and ordinals are
/// reassigned densely. Idempotent: accepted candidates pass unchanged on a
/// second run.
pub fn dedup_candidates(candidates: Vec<SentenceCandidate>) -> Vec<SentenceCandidate> {
    let mut accepted: Vec<SentenceCandidate> = Vec::with_capacity(candidates.len());
    let mut used: Vec<(f64, f64)> = Vec::new();

    for candidate in candidates {
        if is_duplicate(&candidate, &used) {
            debug!(
                "dropping duplicate candidate [{:.2}, {:.2}] {:?}",
                candidate.start_seconds, candidate.end_seconds, candidate.text
            );
            continue;
        }
        used.push((candidate.start_seconds, candidate.end_seconds));
        let mut candidate = candidate;
        candidate.ordinal = accepted.len();
        accepted.push(candidate);
    }

    accepted
}

fn is_duplicate(candidate: &SentenceCandidate, used: &[(f64, f64)]) -> bool {
    if candidate.duration_seconds <= 0.0 {
        // A zero-length candidate cannot meaningfully overlap anything.
        return false;
    }
    used.iter().any(|&(start, end)| {
        let overlap =
            (candidate.end_seconds.min(end) - candidate.start_seconds.max(start)).max(0.0);
        overlap / candidate.duration_seconds > MAX_OVERLAP_RATIO
    })
}

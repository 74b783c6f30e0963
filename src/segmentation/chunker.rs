//! Work-list chunker: divides a token run into word-count-bounded chunks.
//!
//! The divide-and-conquer split is driven by an explicit stack of index
//! ranges instead of recursion; adversarial sentences (thousands of words,
//! no break candidates) stay bounded in stack depth. Every step strictly
//! shrinks the range it processes, so termination is unconditional.

use std::ops::Range;

use super::breakpoints::{find_split, BreakPolicy, BreakToken};
use crate::types::SegmenterConfig;

/// Split a run into ordered, contiguous index ranges. The ranges partition
/// `0..tokens.len()` exactly and each holds at most `max_words` tokens.
///
/// Inter-word gaps above `pause_threshold` pre-split the run before any
/// break class is consulted: a real silence breaks the display regardless
/// of word counts.
pub fn chunk_run(
    tokens: &[BreakToken],
    policy: &BreakPolicy,
    config: &SegmenterConfig,
) -> Vec<Range<usize>> {
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut chunks = Vec::new();
    // Stack discipline keeps output left-to-right: the right half is pushed
    // first so the left half is processed next.
    let mut pending = pause_spans(tokens, config.pause_threshold);
    pending.reverse();

    while let Some(range) = pending.pop() {
        if range.len() <= config.max_words {
            chunks.push(range);
            continue;
        }

        match find_split(&tokens[range.clone()], policy, config) {
            Some(split) => {
                let mid = range.start + split;
                pending.push(mid..range.end);
                pending.push(range.start..mid);
            }
            None => {
                // No scorable break: force a split at exactly max_words.
                let mid = range.start + config.max_words;
                chunks.push(range.start..mid);
                pending.push(mid..range.end);
            }
        }
    }

    enforce_max_words(chunks, config.max_words)
}

/// Partition the run at every inter-word gap above the threshold.
fn pause_spans(tokens: &[BreakToken], threshold: f64) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut start = 0;
    for i in 1..tokens.len() {
        if tokens[i].gap_before > threshold {
            spans.push(start..i);
            start = i;
        }
    }
    spans.push(start..tokens.len());
    spans
}

/// Cleanup pass: hard-slice any surviving over-long chunk.
fn enforce_max_words(chunks: Vec<Range<usize>>, max_words: usize) -> Vec<Range<usize>> {
    let mut bounded = Vec::with_capacity(chunks.len());
    for range in chunks {
        if range.len() <= max_words {
            bounded.push(range);
            continue;
        }
        let mut start = range.start;
        while start < range.end {
            let end = (start + max_words).min(range.end);
            bounded.push(start..end);
            start = end;
        }
    }
    bounded
}

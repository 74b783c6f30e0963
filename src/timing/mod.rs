//! Time allocator: assigns start/end bounds to a sentence's chunks.
//!
//! The mode is selected per chunk by data availability. A chunk whose words
//! all carry valid timestamps takes its bounds straight from them with zero
//! error. Chunks with missing or broken timing are interpolated: each maximal
//! run of such chunks splits the residual interval between its neighboring
//! anchors proportionally to word counts. Consecutive boundaries are left
//! monotonic either way.

use std::ops::Range;

use tracing::debug;

use crate::types::{join_words, Chunk, Sentence, Word};

pub const EPS: f64 = 1e-9;

/// Materialize chunk ranges into timed [`Chunk`]s. A sentence with no
/// usable timing at all is skipped (no chunks emitted) rather than given
/// invented timestamps.
pub fn allocate(sentence: &Sentence, ranges: &[Range<usize>]) -> Vec<Chunk> {
    if ranges.is_empty() {
        return Vec::new();
    }

    let exact: Vec<bool> = ranges
        .iter()
        .map(|range| sentence.words[range.clone()].iter().all(Word::has_valid_timing))
        .collect();

    let mut chunks = if exact.iter().all(|&e| e) {
        exact_chunks(sentence, ranges)
    } else {
        let Some(interval) = sentence_interval(sentence) else {
            debug!("sentence has no usable timestamps; skipping emission");
            return Vec::new();
        };
        if !exact.iter().any(|&e| e) && interval.1 - interval.0 <= EPS {
            debug!("zero-duration sentence interval; skipping emission");
            return Vec::new();
        }
        mixed_chunks(sentence, ranges, &exact, interval)
    };
    clamp_monotonic(&mut chunks);
    chunks
}

/// Bounds come straight from the first and last word of each range.
fn exact_chunks(sentence: &Sentence, ranges: &[Range<usize>]) -> Vec<Chunk> {
    ranges
        .iter()
        .map(|range| {
            let words = sentence.words[range.clone()].to_vec();
            let start = words[0].start;
            let end = words[words.len() - 1].end;
            Chunk {
                text: join_words(&words),
                words,
                start,
                end,
            }
        })
        .collect()
}

/// Per-chunk allocation when timing is partial. Exactly-timed chunks anchor
/// the timeline; each maximal run of untimed chunks distributes the interval
/// between its anchors (or the sentence interval edges) proportionally to
/// chunk word counts.
fn mixed_chunks(
    sentence: &Sentence,
    ranges: &[Range<usize>],
    exact: &[bool],
    interval: (f64, f64),
) -> Vec<Chunk> {
    let mut chunks: Vec<Chunk> = ranges
        .iter()
        .enumerate()
        .map(|(i, range)| {
            let words = sentence.words[range.clone()].to_vec();
            let (start, end) = if exact[i] {
                (words[0].start, words[words.len() - 1].end)
            } else {
                (0.0, 0.0)
            };
            Chunk {
                text: join_words(&words),
                words,
                start,
                end,
            }
        })
        .collect();

    let mut i = 0;
    while i < ranges.len() {
        if exact[i] {
            i += 1;
            continue;
        }
        let run_start = i;
        while i < ranges.len() && !exact[i] {
            i += 1;
        }

        let lo = if run_start == 0 {
            interval.0
        } else {
            chunks[run_start - 1].end
        };
        let hi = if i == ranges.len() { interval.1 } else { chunks[i].start };
        let hi = hi.max(lo);

        let total_words: usize = ranges[run_start..i].iter().map(Range::len).sum();
        let mut cursor = lo;
        for k in run_start..i {
            let share = if total_words == 0 {
                0.0
            } else {
                (hi - lo) * ranges[k].len() as f64 / total_words as f64
            };
            chunks[k].start = cursor;
            cursor += share;
            chunks[k].end = cursor;
        }
    }

    chunks
}

/// Earliest valid start and latest valid end among the sentence's words.
fn sentence_interval(sentence: &Sentence) -> Option<(f64, f64)> {
    let valid = sentence
        .words
        .iter()
        .filter(|word| word.has_valid_timing())
        .collect::<Vec<_>>();
    let start = valid.first()?.start;
    let end = valid.last()?.end;
    (end > start).then_some((start, end))
}

fn clamp_monotonic(chunks: &mut [Chunk]) {
    for i in 0..chunks.len() {
        if i > 0 && chunks[i].start < chunks[i - 1].end {
            chunks[i].start = chunks[i - 1].end;
        }
        if chunks[i].end < chunks[i].start {
            chunks[i].end = chunks[i].start;
        }
    }
}

//! Segmentation engine: turns a timestamped word stream into display chunks.
//!
//! Per sentence the pipeline is: annotate the reconstructed text, align the
//! provider's tokens back onto the words, pick break points under the
//! syntactic policy, and chunk with the work-list splitter. Any failure in
//! the annotated path demotes that sentence (and only that sentence) to the
//! punctuation-only rule set; segmentation itself never fails.

mod align;
mod breakpoints;
mod chunker;
mod sentences;


pub use align::align_tokens;
pub use breakpoints::{find_split, BreakClass, BreakPolicy, BreakToken};
pub use chunker::chunk_run;
pub use sentences::split_sentences;

use tracing::{debug, warn};

use crate::annotate::Annotator;
use crate::timing;
use crate::types::{
    AlignedToken, AnnotatedToken, Chunk, DepRelation, PosTag, SegmenterConfig, Sentence, Word,
};

/// Segment one sentence into timed chunks.
pub fn segment_sentence(
    sentence: &Sentence,
    config: &SegmenterConfig,
    annotator: Option<&dyn Annotator>,
) -> Vec<Chunk> {
    let (tokens, policy) = match annotated_run(sentence, annotator) {
        Some(run) => (run, BreakPolicy::syntactic()),
        None => (fallback_run(&sentence.words), BreakPolicy::punctuation_only()),
    };

    let ranges = chunk_run(&tokens, &policy, config);
    timing::allocate(sentence, &ranges)
}

/// Segment a whole word stream: normalize into sentences, then chunk each.
/// Chunks come back flattened in original order.
pub fn segment_words(
    words: &[Word],
    config: &SegmenterConfig,
    annotator: Option<&dyn Annotator>,
) -> Vec<Chunk> {
    let sentences = split_sentences(words);
    debug!(sentences = sentences.len(), "normalized word stream");
    sentences
        .iter()
        .flat_map(|sentence| segment_sentence(sentence, config, annotator))
        .collect()
}

/// Build the selector's view of a sentence from aligned annotations.
/// Returns `None` when no annotator is available, annotation errors out, or
/// alignment fails; the caller then uses the annotation-free view.
fn annotated_run(
    sentence: &Sentence,
    annotator: Option<&dyn Annotator>,
) -> Option<Vec<BreakToken>> {
    let annotator = annotator?;
    let text = sentence.plain_text();

    let tokens = match annotator.annotate(&text) {
        Ok(tokens) => tokens,
        Err(err) => {
            warn!(error = %err, "annotation failed; using punctuation-only rules");
            return None;
        }
    };

    let Some(aligned) = align_tokens(&sentence.words, &tokens) else {
        warn!(
            words = sentence.word_count(),
            "token alignment failed; using punctuation-only rules"
        );
        return None;
    };

    Some(build_run(&sentence.words, &tokens, &aligned))
}

fn fallback_run(words: &[Word]) -> Vec<BreakToken> {
    words
        .iter()
        .enumerate()
        .map(|(i, word)| BreakToken::plain(word.text.clone(), gap_before(words, i)))
        .collect()
}

fn build_run(
    words: &[Word],
    tokens: &[AnnotatedToken],
    aligned: &[AlignedToken],
) -> Vec<BreakToken> {
    let interior = protected_interiors(tokens);
    aligned
        .iter()
        .map(|pair| {
            let token = &tokens[pair.token_idx];
            BreakToken {
                text: words[pair.word_idx].text.clone(),
                gap_before: gap_before(words, pair.word_idx),
                subordinating: token.dep == DepRelation::Mark || token.pos == PosTag::SubordConj,
                coordinating: token.dep == DepRelation::Cc || token.pos == PosTag::CoordConj,
                preposition: token.pos == PosTag::Preposition,
                protected: interior[pair.token_idx],
            }
        })
        .collect()
}

fn gap_before(words: &[Word], idx: usize) -> f64 {
    if idx == 0 {
        return 0.0;
    }
    let prev = &words[idx - 1];
    let word = &words[idx];
    if prev.has_valid_timing() && word.has_valid_timing() {
        word.start - prev.end
    } else {
        0.0
    }
}

/// Mark token positions strictly inside a protected span: a split landing
/// there would cut a named-entity run or a preposition-headed subtree.
fn protected_interiors(tokens: &[AnnotatedToken]) -> Vec<bool> {
    let n = tokens.len();
    let mut interior = vec![false; n];

    // Contiguous entity runs.
    let mut idx = 0;
    while idx < n {
        if tokens[idx].is_entity {
            let span_start = idx;
            while idx < n && tokens[idx].is_entity {
                idx += 1;
            }
            for inner in span_start + 1..idx {
                interior[inner] = true;
            }
        } else {
            idx += 1;
        }
    }

    // Preposition-headed subtrees, taken as the covering index range.
    for root in 0..n {
        if tokens[root].pos != PosTag::Preposition {
            continue;
        }
        let mut lo = root;
        let mut hi = root;
        for candidate in 0..n {
            if in_subtree(tokens, candidate, root) {
                lo = lo.min(candidate);
                hi = hi.max(candidate);
            }
        }
        for inner in lo + 1..=hi {
            interior[inner] = true;
        }
    }

    interior
}

/// Follow the head chain from `idx`; bounded by sequence length so malformed
/// head graphs (cycles, self-loops) cannot spin.
fn in_subtree(tokens: &[AnnotatedToken], idx: usize, root: usize) -> bool {
    let mut current = idx;
    for _ in 0..=tokens.len() {
        if current == root {
            return true;
        }
        let head = tokens[current].head;
        if head == current || head >= tokens.len() {
            return false;
        }
        current = head;
    }
    false
}

//! Break-point selector: proposes the best split index for a token run.
//!
//! Break classes are evaluated in strict priority order; within a class the
//! scan runs left to right and the earliest valid candidate wins, keeping
//! early chunks short. The class list is data, so a language- or
//! style-specific policy is a different list, not different code.

use crate::types::SegmenterConfig;

/// Per-position view of a run as the selector sees it, independent of
/// whether annotations were available.
#[derive(Debug, Clone)]
pub struct BreakToken {
    pub text: String,
    /// Gap in seconds since the previous word ended; 0 for the first word.
    pub gap_before: f64,
    pub subordinating: bool,
    pub coordinating: bool,
    pub preposition: bool,
    /// A split immediately before this token would cut a protected span
    /// (named-entity run or preposition-headed subtree).
    pub protected: bool,
}

impl BreakToken {
    /// Annotation-free view carrying only surface text and timing.
    pub fn plain(text: impl Into<String>, gap_before: f64) -> Self {
        Self {
            text: text.into(),
            gap_before,
            subordinating: false,
            coordinating: false,
            preposition: false,
            protected: false,
        }
    }
}

/// One break-point class. Pause breaks are not a class: gaps above the
/// configured threshold pre-split the run before any class is consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakClass {
    /// Strong sentence punctuation (`.`, `!`, `?`), split after.
    Terminal,
    /// Comma, colon, or semicolon, kept in the left chunk.
    ClausePunct,
    /// Subordinating marker, split before so it opens the new chunk.
    Subordinator,
    /// Coordinating conjunction between clauses, split before.
    Coordinator,
    /// Preposition, only once the run already exceeds `max_words`.
    Preposition,
}

/// Priority-ordered break rule set.
#[derive(Debug, Clone)]
pub struct BreakPolicy {
    classes: Vec<BreakClass>,
}

impl BreakPolicy {
    pub fn new(classes: Vec<BreakClass>) -> Self {
        Self { classes }
    }

    /// Full rule set used when annotations aligned.
    pub fn syntactic() -> Self {
        Self::new(vec![
            BreakClass::Terminal,
            BreakClass::ClausePunct,
            BreakClass::Subordinator,
            BreakClass::Coordinator,
            BreakClass::Preposition,
        ])
    }

    /// Degraded rule set for the annotation-free fallback path.
    pub fn punctuation_only() -> Self {
        Self::new(vec![BreakClass::Terminal, BreakClass::ClausePunct])
    }

    pub fn classes(&self) -> &[BreakClass] {
        &self.classes
    }
}

/// Return the first valid split index under the policy, or `None` when no
/// class yields one (the chunker then force-splits by word count).
/// A split index `i` divides the run into `[..i]` and `[i..]`.
pub fn find_split(
    tokens: &[BreakToken],
    policy: &BreakPolicy,
    config: &SegmenterConfig,
) -> Option<usize> {
    let n = tokens.len();
    if n < 2 {
        return None;
    }

    for class in policy.classes() {
        let found = match class {
            BreakClass::Terminal => find_terminal(tokens),
            BreakClass::ClausePunct => {
                find_candidate(tokens, config, |i| ends_with_clause_punct(&tokens[i - 1].text))
            }
            BreakClass::Subordinator => find_candidate(tokens, config, |i| tokens[i].subordinating),
            BreakClass::Coordinator => find_candidate(tokens, config, |i| tokens[i].coordinating),
            BreakClass::Preposition => (n > config.max_words)
                .then(|| find_candidate(tokens, config, |i| tokens[i].preposition))
                .flatten(),
        };
        if found.is_some() {
            return found;
        }
    }

    None
}

/// Terminal punctuation is always eligible regardless of `min_words`;
/// a mark on the final token yields no split (nothing would follow it).
fn find_terminal(tokens: &[BreakToken]) -> Option<usize> {
    (1..tokens.len()).find(|&i| ends_with_terminal(&tokens[i - 1].text))
}

fn find_candidate(
    tokens: &[BreakToken],
    config: &SegmenterConfig,
    matches: impl Fn(usize) -> bool,
) -> Option<usize> {
    let n = tokens.len();
    (1..n).find(|&i| {
        matches(i) && i >= config.min_words && n - i >= config.min_words && !tokens[i].protected
    })
}

fn ends_with_terminal(text: &str) -> bool {
    text.trim_end().ends_with(['.', '!', '?'])
}

fn ends_with_clause_punct(text: &str) -> bool {
    text.trim_end().ends_with([',', ';', ':'])
}

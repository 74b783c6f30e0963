//! Annotation aligner: maps the provider's token stream back onto the
//! original timestamped words.
//!
//! Two independently produced tokenizations of the same text rarely agree
//! (contractions, punctuation splitting), so the join is a two-cursor merge
//! with an explicit failure mode rather than a best-effort zip. Failure is
//! not fatal; the caller falls back to annotation-free chunking for the
//! sentence.

use crate::annotate::normalize_token;
use crate::types::{AlignedToken, AnnotatedToken, Word};

/// Walk the token and word sequences in lock-step. Returns `None` when the
/// sequences cannot be reconciled; on success every word is covered exactly
/// once, in order.
pub fn align_tokens(words: &[Word], tokens: &[AnnotatedToken]) -> Option<Vec<AlignedToken>> {
    let mut aligned = Vec::with_capacity(words.len());
    let mut cursor = 0;

    for (token_idx, token) in tokens.iter().enumerate() {
        let matched = words
            .get(cursor)
            .is_some_and(|word| normalize_token(&word.text) == normalize_token(&token.text));

        if matched {
            aligned.push(AlignedToken {
                token_idx,
                word_idx: cursor,
            });
            cursor += 1;
        } else if is_artifact(&token.text, words) {
            // Provider-injected token with no counterpart in the word list.
            continue;
        } else {
            return None;
        }
    }

    // Total alignment: tokens exhausted exactly when words are.
    (cursor == words.len()).then_some(aligned)
}

/// A non-alphabetic token that appears in no word is a tokenizer artifact
/// (a split-off punctuation mark, stray whitespace token) and may be skipped
/// without consuming a word.
fn is_artifact(text: &str, words: &[Word]) -> bool {
    text.chars().all(|c| !c.is_alphabetic()) && !words.iter().any(|word| word.text == text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DepRelation, PosTag};

    fn token(text: &str) -> AnnotatedToken {
        AnnotatedToken {
            text: text.to_string(),
            pos: PosTag::Other,
            dep: DepRelation::Other,
            head: 0,
            is_entity: false,
        }
    }

    fn words(texts: &[&str]) -> Vec<Word> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Word::new(*t, i as f64, i as f64 + 0.5))
            .collect()
    }

    #[test]
    fn aligns_identical_tokenizations() {
        let ws = words(&["the", "quick", "fox"]);
        let ts = vec![token("the"), token("quick"), token("fox")];
        let aligned = align_tokens(&ws, &ts).unwrap();
        assert_eq!(aligned.len(), 3);
        assert_eq!(aligned[2].word_idx, 2);
        assert_eq!(aligned[2].token_idx, 2);
    }

    #[test]
    fn skips_split_off_punctuation_tokens() {
        // Provider split "sleeps." into two tokens; the word list did not.
        let ws = words(&["the", "cat", "sleeps."]);
        let ts = vec![token("the"), token("cat"), token("sleeps"), token(".")];
        let aligned = align_tokens(&ws, &ts).unwrap();
        assert_eq!(aligned.len(), 3);
        assert_eq!(aligned[2].token_idx, 2);
    }

    #[test]
    fn matching_ignores_case_and_edge_punctuation() {
        let ws = words(&["Hello,", "World"]);
        let ts = vec![token("hello"), token("world")];
        assert!(align_tokens(&ws, &ts).is_some());
    }

    #[test]
    fn diverging_word_fails_alignment() {
        let ws = words(&["one", "two", "three"]);
        let ts = vec![token("one"), token("deux"), token("three")];
        assert!(align_tokens(&ws, &ts).is_none());
    }

    #[test]
    fn leftover_words_fail_alignment() {
        let ws = words(&["one", "two", "three"]);
        let ts = vec![token("one"), token("two")];
        assert!(align_tokens(&ws, &ts).is_none());
    }

    #[test]
    fn leftover_alphabetic_tokens_fail_alignment() {
        let ws = words(&["one"]);
        let ts = vec![token("one"), token("extra")];
        assert!(align_tokens(&ws, &ts).is_none());
    }

    #[test]
    fn punctuation_word_consumes_matching_token() {
        let ws = words(&["well", ","]);
        let ts = vec![token("well"), token(",")];
        let aligned = align_tokens(&ws, &ts).unwrap();
        assert_eq!(aligned.len(), 2);
    }
}

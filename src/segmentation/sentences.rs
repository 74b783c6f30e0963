//! Word stream normalizer: groups timestamped words into sentences.

use crate::types::{Sentence, Word};

/// Accumulate words into sentences, closing a sentence when a word carries a
/// terminal mark (`.`, `!`, `?`) or input ends. Whitespace-only words are
/// dropped and never count toward a boundary. Pure function; zero words in
/// means zero sentences out.
pub fn split_sentences(words: &[Word]) -> Vec<Sentence> {
    let mut sentences = Vec::new();
    let mut current: Vec<Word> = Vec::new();

    for word in words {
        if word.text.trim().is_empty() {
            continue;
        }
        current.push(word.clone());
        if has_terminal_mark(&word.text) {
            sentences.push(Sentence {
                words: std::mem::take(&mut current),
            });
        }
    }

    if !current.is_empty() {
        sentences.push(Sentence { words: current });
    }

    sentences
}

pub(crate) fn has_terminal_mark(text: &str) -> bool {
    text.contains(['.', '!', '?'])
}

//! Core types for the semvtt subtitle segmentation pipeline

use anyhow::{ensure, Result};

/// A single transcribed word with timing from the upstream recognizer.
/// Immutable once produced; timestamps are in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub text: String,
    pub start: f64,
    pub end: f64,
}

impl Word {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    /// True when both timestamps are finite and ordered.
    pub fn has_valid_timing(&self) -> bool {
        self.start.is_finite() && self.end.is_finite() && self.end >= self.start
    }
}

/// An ordered, non-empty run of words closed at a sentence-terminal mark
/// (or end of input).
#[derive(Debug, Clone)]
pub struct Sentence {
    pub words: Vec<Word>,
}

impl Sentence {
    /// Reconstructed plain text handed to the annotation provider:
    /// word texts joined with single spaces.
    pub fn plain_text(&self) -> String {
        let mut text = String::new();
        for word in &self.words {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(&word.text);
        }
        text
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }
}

/// Part-of-speech class as far as the break-point selector cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosTag {
    CoordConj,
    SubordConj,
    Preposition,
    Punct,
    Other,
}

/// Dependency relation of a token to its head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepRelation {
    /// Root of the sentence's dependency tree.
    Root,
    /// Subordinating marker introducing a dependent clause.
    Mark,
    /// Coordinating conjunction.
    Cc,
    Other,
}

/// One token produced by the linguistic annotation provider.
#[derive(Debug, Clone)]
pub struct AnnotatedToken {
    pub text: String,
    pub pos: PosTag,
    pub dep: DepRelation,
    /// Index of this token's head within the same annotated sequence.
    pub head: usize,
    pub is_entity: bool,
}

/// Join of one annotated token with one word of the original stream.
/// Indices point into the sentence's token and word sequences; a successful
/// alignment reproduces the word sequence in order with no gaps.
#[derive(Debug, Clone, Copy)]
pub struct AlignedToken {
    pub token_idx: usize,
    pub word_idx: usize,
}

/// A contiguous run of words selected for one cue, with allocated bounds.
#[derive(Debug, Clone)]
pub struct Chunk {
    pub words: Vec<Word>,
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// One displayed subtitle entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    /// 1-based sequence number across the whole output run.
    pub index: u32,
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// Languages with a built-in annotation lexicon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    En,
    Fr,
}

impl Language {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "en" => Some(Self::En),
            "fr" => Some(Self::Fr),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
        }
    }
}

/// Configuration for the segmentation engine.
#[derive(Debug, Clone, Copy)]
pub struct SegmenterConfig {
    /// Hard upper bound on words per chunk.
    pub max_words: usize,
    /// Lower bound enforced at split points; 0 means no minimum.
    pub min_words: usize,
    /// Inter-word gap (seconds) that forces a break regardless of word count.
    pub pause_threshold: f64,
    pub language: Language,
}

impl SegmenterConfig {
    pub fn new(max_words: usize) -> Self {
        Self {
            max_words,
            min_words: (max_words / 2).min(3),
            pause_threshold: 0.5,
            language: Language::En,
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.max_words >= 1, "max_words must be at least 1");
        ensure!(
            self.min_words <= self.max_words,
            "min_words ({}) must not exceed max_words ({})",
            self.min_words,
            self.max_words
        );
        ensure!(
            self.pause_threshold.is_finite() && self.pause_threshold >= 0.0,
            "pause_threshold must be a non-negative number of seconds"
        );
        Ok(())
    }
}

/// Render a word run as display text. Punctuation-only words attach to the
/// preceding word without a space, so `["sleeps", "."]` reads `"sleeps."`.
pub fn join_words(words: &[Word]) -> String {
    let mut text = String::new();
    for word in words {
        if !text.is_empty() && !is_punctuation_only(&word.text) {
            text.push(' ');
        }
        text.push_str(&word.text);
    }
    text
}

fn is_punctuation_only(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| !c.is_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_follow_max_words() {
        let config = SegmenterConfig::new(7);
        assert_eq!(config.max_words, 7);
        assert_eq!(config.min_words, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_rejects_inverted_bounds() {
        let mut config = SegmenterConfig::new(2);
        config.min_words = 5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn join_attaches_trailing_punctuation() {
        let words = vec![
            Word::new("The", 0.0, 0.1),
            Word::new("cat", 0.1, 0.2),
            Word::new("sleeps", 0.2, 0.3),
            Word::new(".", 0.3, 0.3),
        ];
        assert_eq!(join_words(&words), "The cat sleeps.");
    }

    #[test]
    fn invalid_timing_detected() {
        assert!(!Word::new("x", 1.0, 0.5).has_valid_timing());
        assert!(!Word::new("x", f64::NAN, 1.0).has_valid_timing());
        assert!(Word::new("x", 0.5, 0.5).has_valid_timing());
    }
}

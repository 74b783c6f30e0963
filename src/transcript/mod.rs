//! Whisper-style transcript loading
//!
//! Accepts either a full transcription document (`{"segments": [{"words":
//! [...]}]}`) or a bare top-level word array. Word objects may use either
//! `"text"` or `"word"` for their surface form; both appear in the wild.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::types::Word;

/// Flattened word stream plus the language tag the transcriber reported,
/// if any.
#[derive(Debug)]
pub struct LoadedTranscript {
    pub words: Vec<Word>,
    pub language: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawInput {
    Document(RawTranscript),
    Words(Vec<RawWord>),
}

#[derive(Debug, Deserialize)]
struct RawTranscript {
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    segments: Vec<RawSegment>,
}

#[derive(Debug, Deserialize)]
struct RawSegment {
    #[serde(default)]
    words: Vec<RawWord>,
}

#[derive(Debug, Deserialize)]
struct RawWord {
    #[serde(alias = "word")]
    text: String,
    start: f64,
    end: f64,
}

/// Read and flatten a transcript file into an ordered word stream.
pub fn load_words(path: &Path) -> Result<LoadedTranscript> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read transcript file {:?}", path))?;
    parse_words(&data).with_context(|| format!("Failed to parse transcript file {:?}", path))
}

/// Parse transcript JSON into an ordered word stream. Missing `segments` or
/// `words` keys yield an empty stream rather than an error.
pub fn parse_words(raw: &str) -> Result<LoadedTranscript> {
    let input: RawInput = serde_json::from_str(raw).context("Invalid transcript JSON")?;

    let (raw_words, language) = match input {
        RawInput::Document(doc) => {
            let words: Vec<RawWord> = doc
                .segments
                .into_iter()
                .flat_map(|segment| segment.words)
                .collect();
            (words, doc.language)
        }
        RawInput::Words(words) => (words, None),
    };

    let words: Vec<Word> = raw_words
        .into_iter()
        .filter_map(|raw| {
            let text = raw.text.trim().to_string();
            if text.is_empty() {
                None
            } else {
                Some(Word {
                    text,
                    start: raw.start,
                    end: raw.end,
                })
            }
        })
        .collect();

    debug!(word_count = words.len(), "flattened transcript words");
    Ok(LoadedTranscript { words, language })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_segmented_document() {
        let raw = r#"{
            "language": "fr",
            "segments": [
                {"words": [
                    {"text": " Bonjour", "start": 0.0, "end": 0.4},
                    {"text": "monde.", "start": 0.4, "end": 0.9}
                ]},
                {"words": [
                    {"text": "Salut", "start": 1.2, "end": 1.5}
                ]}
            ]
        }"#;
        let transcript = parse_words(raw).unwrap();
        assert_eq!(transcript.language.as_deref(), Some("fr"));
        assert_eq!(transcript.words.len(), 3);
        assert_eq!(transcript.words[0].text, "Bonjour");
    }

    #[test]
    fn parses_bare_word_list_with_word_key() {
        let raw = r#"[
            {"word": "Hello", "start": 0.0, "end": 0.5},
            {"word": "there", "start": 0.5, "end": 1.0}
        ]"#;
        let transcript = parse_words(raw).unwrap();
        assert!(transcript.language.is_none());
        assert_eq!(transcript.words.len(), 2);
        assert_eq!(transcript.words[1].text, "there");
    }

    #[test]
    fn missing_keys_yield_empty_stream() {
        let transcript = parse_words(r#"{"text": "no word timing here"}"#).unwrap();
        assert!(transcript.words.is_empty());
    }

    #[test]
    fn whitespace_words_are_dropped() {
        let raw = r#"[
            {"text": "  ", "start": 0.0, "end": 0.1},
            {"text": "kept", "start": 0.1, "end": 0.2}
        ]"#;
        let transcript = parse_words(raw).unwrap();
        assert_eq!(transcript.words.len(), 1);
        assert_eq!(transcript.words[0].text, "kept");
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(parse_words("{not json").is_err());
    }
}

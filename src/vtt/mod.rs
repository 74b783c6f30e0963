//! Cue assembly and WEBVTT rendering.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::timing::EPS;
use crate::types::{Chunk, Cue};

/// Assign running 1-based cue indices across all chunks, in order.
/// Chunks that collapsed to zero duration are dropped; a cue always has
/// `start < end`.
pub fn assemble_cues(chunks: &[Chunk]) -> Vec<Cue> {
    let mut cues = Vec::with_capacity(chunks.len());
    let mut index = 0u32;
    for chunk in chunks {
        if chunk.end - chunk.start <= EPS {
            debug!(text = %chunk.text, "dropping zero-duration chunk");
            continue;
        }
        index += 1;
        cues.push(Cue {
            index,
            start: chunk.start,
            end: chunk.end,
            text: chunk.text.clone(),
        });
    }
    cues
}

/// Render cues as a WEBVTT document: header, then per cue a sequence
/// number, a timestamp line, the text, and a blank separator.
pub fn render(cues: &[Cue]) -> String {
    let mut out = String::from("WEBVTT\n\n");
    for cue in cues {
        out.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            cue.index,
            format_timestamp(cue.start),
            format_timestamp(cue.end),
            cue.text
        ));
    }
    out
}

pub fn write_vtt(path: &Path, cues: &[Cue]) -> Result<()> {
    fs::write(path, render(cues))
        .with_context(|| format!("Failed to write VTT file {:?}", path))
}

/// `HH:MM:SS.mmm`, truncating below the millisecond.
pub fn format_timestamp(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0) as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1_000;
    let millis = total_ms % 1_000;
    format!("{hours:02}:{minutes:02}:{secs:02}.{millis:03}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Word;

    fn chunk(text: &str, start: f64, end: f64) -> Chunk {
        Chunk {
            words: vec![Word::new(text, start, end)],
            start,
            end,
            text: text.to_string(),
        }
    }

    #[test]
    fn indices_run_from_one() {
        let cues = assemble_cues(&[chunk("a", 0.0, 1.0), chunk("b", 1.0, 2.0)]);
        assert_eq!(cues[0].index, 1);
        assert_eq!(cues[1].index, 2);
    }

    #[test]
    fn zero_duration_chunks_are_dropped_without_index_gaps() {
        let cues = assemble_cues(&[
            chunk("a", 0.0, 1.0),
            chunk("empty", 1.0, 1.0),
            chunk("b", 1.0, 2.0),
        ]);
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[1].index, 2);
        assert_eq!(cues[1].text, "b");
    }

    #[test]
    fn timestamp_format_matches_vtt() {
        assert_eq!(format_timestamp(0.0), "00:00:00.000");
        assert_eq!(format_timestamp(3723.5), "01:02:03.500");
        assert_eq!(format_timestamp(59.9999), "00:00:59.999");
    }

    #[test]
    fn render_produces_header_and_cue_blocks() {
        let cues = assemble_cues(&[chunk("Hello world.", 1.0, 2.0)]);
        let doc = render(&cues);
        assert!(doc.starts_with("WEBVTT\n\n"));
        assert!(doc.contains("1\n00:00:01.000 --> 00:00:02.000\nHello world.\n\n"));
    }

    #[test]
    fn render_of_no_cues_is_bare_header() {
        assert_eq!(render(&[]), "WEBVTT\n\n");
    }
}

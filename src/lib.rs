//! semvtt: semantic subtitle cue generation from timestamped word streams.
//!
//! Pipeline: normalize words into sentences, align linguistic annotations,
//! chunk at natural break points under word-count bounds, allocate time, and
//! render WEBVTT cues.

pub mod annotate;
pub mod segmentation;
pub mod timing;
pub mod transcript;
pub mod types;
pub mod vtt;

//! Linguistic annotation seam
//!
//! The segmentation engine consumes part-of-speech tags, dependency
//! relations, and entity flags through the [`Annotator`] trait; it never
//! tokenizes or parses text itself. The built-in provider is a deterministic
//! lexicon lookup; heavier models can slot in behind the same trait.

pub mod lexicon;
pub mod registry;

use anyhow::Result;

use crate::types::AnnotatedToken;

pub use lexicon::LexiconAnnotator;
pub use registry::{annotator_for, shutdown};

/// Produces per-token annotations for a sentence's plain text.
/// Must be deterministic for identical input.
pub trait Annotator: Send + Sync {
    fn annotate(&self, text: &str) -> Result<Vec<AnnotatedToken>>;
}

/// Normalized form used when matching tokens across tokenizations:
/// lowercase with leading and trailing punctuation stripped.
pub fn normalize_token(text: &str) -> String {
    text.trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::normalize_token;

    #[test]
    fn normalization_strips_edge_punctuation() {
        assert_eq!(normalize_token("Sleeps."), "sleeps");
        assert_eq!(normalize_token("«Oui,»"), "oui");
        assert_eq!(normalize_token("..."), "");
    }

    #[test]
    fn normalization_keeps_interior_marks() {
        assert_eq!(normalize_token("l'heure"), "l'heure");
    }
}

//! Deterministic lexicon-based annotation provider
//!
//! Tokenizes on whitespace and classifies tokens against per-language
//! function-word lists. Entity detection is a capitalization heuristic:
//! a capitalized word that is not sentence-initial is flagged, so runs like
//! "New York" survive as protected spans.

use std::collections::HashSet;

use anyhow::Result;

use crate::types::{AnnotatedToken, DepRelation, Language, PosTag};

use super::{normalize_token, Annotator};

const EN_SUBORDINATORS: &[&str] = &[
    "although", "because", "which", "if", "when", "while", "since", "unless", "until", "after",
    "before", "whereas", "though",
];
const EN_COORDINATORS: &[&str] = &["and", "but", "or", "so", "nor", "yet"];
const EN_PREPOSITIONS: &[&str] = &[
    "in", "on", "at", "with", "from", "to", "for", "of", "by", "about", "into", "over", "under",
];

const FR_SUBORDINATORS: &[&str] = &[
    "que", "qui", "si", "lorsque", "parce", "puisque", "quand", "comme", "dont",
];
const FR_COORDINATORS: &[&str] = &["et", "mais", "ou", "donc", "or", "ni", "car"];
const FR_PREPOSITIONS: &[&str] = &[
    "à", "de", "dans", "sur", "avec", "pour", "par", "sans", "sous", "vers", "chez", "entre",
];

/// Built-in annotation provider backed by static word lists.
pub struct LexiconAnnotator {
    language: Language,
    subordinators: HashSet<&'static str>,
    coordinators: HashSet<&'static str>,
    prepositions: HashSet<&'static str>,
}

impl LexiconAnnotator {
    pub fn new(language: Language) -> Self {
        let (subordinators, coordinators, prepositions) = match language {
            Language::En => (EN_SUBORDINATORS, EN_COORDINATORS, EN_PREPOSITIONS),
            Language::Fr => (FR_SUBORDINATORS, FR_COORDINATORS, FR_PREPOSITIONS),
        };
        Self {
            language,
            subordinators: subordinators.iter().copied().collect(),
            coordinators: coordinators.iter().copied().collect(),
            prepositions: prepositions.iter().copied().collect(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    fn classify(&self, normalized: &str, raw: &str) -> (PosTag, DepRelation) {
        if normalized.is_empty() && !raw.is_empty() {
            return (PosTag::Punct, DepRelation::Other);
        }
        if self.subordinators.contains(normalized) {
            return (PosTag::SubordConj, DepRelation::Mark);
        }
        if self.coordinators.contains(normalized) {
            return (PosTag::CoordConj, DepRelation::Cc);
        }
        if self.prepositions.contains(normalized) {
            return (PosTag::Preposition, DepRelation::Other);
        }
        (PosTag::Other, DepRelation::Other)
    }
}

impl Annotator for LexiconAnnotator {
    fn annotate(&self, text: &str) -> Result<Vec<AnnotatedToken>> {
        let mut tokens = Vec::new();
        for (idx, raw) in text.split_whitespace().enumerate() {
            let normalized = normalize_token(raw);
            let (pos, mut dep) = self.classify(&normalized, raw);
            if idx == 0 && dep == DepRelation::Other {
                dep = DepRelation::Root;
            }
            let is_entity = idx > 0
                && pos == PosTag::Other
                && raw
                    .chars()
                    .find(|c| c.is_alphabetic())
                    .is_some_and(|c| c.is_uppercase());
            tokens.push(AnnotatedToken {
                text: raw.to_string(),
                pos,
                dep,
                // Lexicon lookups carry no parse structure; a self-head
                // keeps every subtree trivial.
                head: idx,
                is_entity,
            });
        }
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_english_function_words() {
        let annotator = LexiconAnnotator::new(Language::En);
        let tokens = annotator
            .annotate("We left because it rained, and we ran")
            .unwrap();
        assert_eq!(tokens.len(), 8);
        assert_eq!(tokens[2].pos, PosTag::SubordConj);
        assert_eq!(tokens[2].dep, DepRelation::Mark);
        assert_eq!(tokens[5].pos, PosTag::CoordConj);
        assert_eq!(tokens[5].dep, DepRelation::Cc);
    }

    #[test]
    fn classifies_french_function_words() {
        let annotator = LexiconAnnotator::new(Language::Fr);
        let tokens = annotator.annotate("Il pleut mais nous partons").unwrap();
        assert_eq!(tokens[2].pos, PosTag::CoordConj);
    }

    #[test]
    fn flags_capitalized_interior_words_as_entities() {
        let annotator = LexiconAnnotator::new(Language::En);
        let tokens = annotator.annotate("He visited New York today").unwrap();
        assert!(!tokens[0].is_entity, "sentence-initial word is not an entity");
        assert!(tokens[2].is_entity);
        assert!(tokens[3].is_entity);
        assert!(!tokens[4].is_entity);
    }

    #[test]
    fn punctuation_only_tokens_get_punct_tag() {
        let annotator = LexiconAnnotator::new(Language::En);
        let tokens = annotator.annotate("wait ... what").unwrap();
        assert_eq!(tokens[1].pos, PosTag::Punct);
    }

    #[test]
    fn annotation_is_deterministic() {
        let annotator = LexiconAnnotator::new(Language::En);
        let first = annotator.annotate("stable because input").unwrap();
        let second = annotator.annotate("stable because input").unwrap();
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.text, b.text);
            assert_eq!(a.pos, b.pos);
        }
    }
}

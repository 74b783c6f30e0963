//! Process-wide annotation provider cache
//!
//! Providers are expensive to build in principle (real NLP models), so they
//! are created lazily, keyed by language, and shared read-only afterwards.
//! `shutdown` drops every cached provider; calling it is never required.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;
use tracing::{debug, info};

use crate::types::Language;

use super::{Annotator, LexiconAnnotator};

static PROVIDERS: Lazy<Mutex<HashMap<Language, Arc<LexiconAnnotator>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Look up (and lazily initialize) the provider for a language code.
/// Returns `None` for unsupported languages; callers continue on the
/// annotation-free fallback path in that case.
pub fn annotator_for(code: &str) -> Option<Arc<dyn Annotator>> {
    let language = Language::from_code(code)?;
    let mut providers = PROVIDERS.lock().expect("annotator registry poisoned");
    let provider = providers.entry(language).or_insert_with(|| {
        info!(language = language.code(), "initializing annotation provider");
        Arc::new(LexiconAnnotator::new(language))
    });
    Some(Arc::clone(provider) as Arc<dyn Annotator>)
}

/// Drop all cached providers. Subsequent lookups re-initialize.
pub fn shutdown() {
    let mut providers = PROVIDERS.lock().expect("annotator registry poisoned");
    let dropped = providers.len();
    providers.clear();
    debug!(dropped, "annotation providers released");
}

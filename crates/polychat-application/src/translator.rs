//! Best-effort translation.
//!
//! `Translator` wraps a [`TranslationBackend`] and never fails: identical
//! languages and empty text short-circuit, and any backend error returns the
//! original text. Callers must treat the output as possibly untranslated.

use std::collections::BTreeMap;
use std::sync::Arc;

use polychat_core::language::{LanguageCode, SourceLanguage};
use polychat_core::translation::TranslationBackend;

#[derive(Clone)]
pub struct Translator {
    backend: Arc<dyn TranslationBackend>,
    /// Targets of bulk translation.
    languages: Vec<LanguageCode>,
}

impl Translator {
    pub fn new(backend: Arc<dyn TranslationBackend>, languages: Vec<LanguageCode>) -> Self {
        Self { backend, languages }
    }

    pub fn languages(&self) -> &[LanguageCode] {
        &self.languages
    }

    /// Translates `text` into `target`, returning `text` unchanged when
    /// `source == target`, when `text` is blank, or when the backend fails.
    pub async fn translate(
        &self,
        text: &str,
        source: SourceLanguage,
        target: LanguageCode,
    ) -> String {
        if text.trim().is_empty() || source.known() == Some(target) {
            return text.to_string();
        }

        match self.backend.translate(text, source, target).await {
            Ok(translated) => translated,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    source = source.code(),
                    target = target.code(),
                    "Translation failed, using original text"
                );
                text.to_string()
            }
        }
    }

    /// Translates `text` into every configured language.
    ///
    /// The source language maps to `text` itself. Each entry is an independent
    /// call, so some entries may be untranslated while others succeed.
    pub async fn translate_to_all(
        &self,
        text: &str,
        source: SourceLanguage,
    ) -> BTreeMap<LanguageCode, String> {
        let mut translations = BTreeMap::new();
        for &lang in &self.languages {
            let translated = self.translate(text, source, lang).await;
            translations.insert(lang, translated);
        }
        translations
    }
}

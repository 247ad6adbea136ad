//! Translation service trait definition.

use async_trait::async_trait;

use crate::error::Result;
use crate::language::{LanguageCode, SourceLanguage};

/// A machine-translation service.
///
/// Implementations report failures as errors; callers that need the
/// best-effort contract (never fail, fall back to the input) wrap a backend
/// in the application layer's `Translator`.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Translates `text` from `source` into `target`.
    ///
    /// # Arguments
    /// * `text` - Non-empty text to translate
    /// * `source` - Source language, or `SourceLanguage::Auto` to let the
    ///   service detect it
    /// * `target` - Language to translate into
    async fn translate(
        &self,
        text: &str,
        source: SourceLanguage,
        target: LanguageCode,
    ) -> Result<String>;
}

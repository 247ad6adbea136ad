//! Answer pipeline.
//!
//! For one user utterance and a display language, the pipeline:
//! 1. picks the query language (the display language if the knowledge source
//!    supports it, otherwise the default language)
//! 2. walks the attempt list `[query language, default language]` and stops
//!    at the first attempt that yields a candidate
//! 3. translates the first candidate's snippet into the display language
//! 4. otherwise offers the first search's titles as suggestions, or reports
//!    that nothing was found
//!
//! Every path ends in display-language text; no error escapes.

use polychat_core::language::{LanguageCode, SourceLanguage};
use polychat_core::messages;
use serde::{Deserialize, Serialize};

use crate::knowledge_lookup::KnowledgeLookup;
use crate::translator::Translator;

/// Reply produced for one user turn, rendered in the display language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PipelineResult {
    Answered { text: String, source_title: String },
    /// No direct answer, but the search returned related topics.
    Suggested {
        text: String,
        candidate_titles: Vec<String>,
    },
    NotFound { text: String },
}

impl PipelineResult {
    pub fn text(&self) -> &str {
        match self {
            Self::Answered { text, .. } | Self::Suggested { text, .. } | Self::NotFound { text } => {
                text
            }
        }
    }

    /// Article title the answer came from, if any.
    pub fn source_title(&self) -> Option<&str> {
        match self {
            Self::Answered { source_title, .. } => Some(source_title),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct AnswerPipeline {
    lookup: KnowledgeLookup,
    translator: Translator,
}

impl AnswerPipeline {
    pub fn new(lookup: KnowledgeLookup, translator: Translator) -> Self {
        Self { lookup, translator }
    }

    pub fn lookup(&self) -> &KnowledgeLookup {
        &self.lookup
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    /// Languages searched, in order, for a given display language. Contains
    /// the default language at most once, so there is at most one retry.
    pub fn attempt_languages(&self, display: LanguageCode) -> Vec<LanguageCode> {
        let default = self.lookup.default_language();
        let query_language = if self.lookup.supports(display) {
            display
        } else {
            default
        };

        let mut attempts = vec![query_language];
        if query_language != default {
            attempts.push(default);
        }
        attempts
    }

    pub async fn answer(&self, user_text: &str, display: LanguageCode) -> PipelineResult {
        let mut first_titles: Option<Vec<String>> = None;

        for language in self.attempt_languages(display) {
            let outcome = self
                .lookup
                .lookup(user_text, language, self.lookup.result_limit())
                .await;

            if let Some(candidate) = outcome.best() {
                let text = self
                    .translator
                    .translate(&candidate.snippet, SourceLanguage::Known(language), display)
                    .await;
                let display_language = display;
                tracing::info!(
                    %language,
                    display = %display_language,
                    title = %candidate.title,
                    "Answered from knowledge source"
                );
                return PipelineResult::Answered {
                    text,
                    source_title: candidate.title.clone(),
                };
            }

            tracing::debug!(%language, "No candidate at this language");
            if first_titles.is_none() {
                first_titles = Some(outcome.related_titles);
            }
        }

        match first_titles {
            Some(titles) if !titles.is_empty() => {
                let display_language = display;
                tracing::info!(display = %display_language, suggestions = titles.len(), "Offering suggestions");
                let header = self.localized(messages::suggestion_header, display).await;
                PipelineResult::Suggested {
                    text: messages::render_suggestions(&header, &titles),
                    candidate_titles: titles,
                }
            }
            _ => {
                let display_language = display;
                tracing::info!(display = %display_language, "No answer found");
                PipelineResult::NotFound {
                    text: self.localized(messages::not_found, display).await,
                }
            }
        }
    }

    /// Native template if one exists, otherwise the English template
    /// translated into `display`.
    async fn localized(
        &self,
        template: fn(LanguageCode) -> Option<&'static str>,
        display: LanguageCode,
    ) -> String {
        if let Some(text) = template(display) {
            return text.to_string();
        }
        let english = template(LanguageCode::English).unwrap_or_default();
        self.translator
            .translate(english, SourceLanguage::Known(LanguageCode::English), display)
            .await
    }
}

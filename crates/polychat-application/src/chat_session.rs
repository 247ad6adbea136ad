//! Per-conversation turn processing.
//!
//! `ChatSession` owns a [`Session`] and drives one user turn at a time:
//! detect the input language, record the user turn, resolve the display
//! language, obtain a reply (knowledge pipeline or intent responder) and
//! record the assistant turn.

use std::sync::Arc;

use polychat_core::config::{AnswerMode, PolychatConfig};
use polychat_core::intent::{Clock, IntentResponder};
use polychat_core::knowledge::KnowledgeSource;
use polychat_core::language::{
    DEFAULTED_CONFIDENCE, LanguageCode, LanguageDetector, SourceLanguage, TextStatistics,
};
use polychat_core::messages;
use polychat_core::session::{DisplayPreference, Session, Transcript, Turn};
use polychat_core::translation::TranslationBackend;

use crate::answer_pipeline::AnswerPipeline;
use crate::knowledge_lookup::KnowledgeLookup;
use crate::translator::Translator;

/// Service handles shared by every conversation.
///
/// Built once at startup and cloned into each `ChatSession`.
#[derive(Clone)]
pub struct ChatServices {
    pub detector: Arc<dyn LanguageDetector>,
    pub translator: Translator,
    pub pipeline: AnswerPipeline,
    pub responder: IntentResponder,
    pub default_language: LanguageCode,
}

impl ChatServices {
    /// Wires the pipeline, translator and responder from `config` around the
    /// given backends.
    pub fn from_config(
        config: &PolychatConfig,
        detector: Arc<dyn LanguageDetector>,
        translation: Arc<dyn TranslationBackend>,
        knowledge: Arc<dyn KnowledgeSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let translator = Translator::new(translation, config.supported_languages.clone());
        let lookup = KnowledgeLookup::new(
            knowledge,
            config.default_language,
            config.lookup.result_limit,
            config.lookup.summary_sentences,
        );
        let responder = IntentResponder::new(clock)
            .with_short_turn_threshold(config.responder.short_turn_threshold);

        Self {
            detector,
            pipeline: AnswerPipeline::new(lookup, translator.clone()),
            translator,
            responder,
            default_language: config.default_language,
        }
    }
}

pub struct ChatSession {
    services: ChatServices,
    session: Session,
    mode: AnswerMode,
}

impl ChatSession {
    pub fn new(services: ChatServices, preference: DisplayPreference, mode: AnswerMode) -> Self {
        Self {
            services,
            session: Session::new(preference),
            mode,
        }
    }

    /// Creates a session using the mode from `config`.
    pub fn from_config(services: ChatServices, config: &PolychatConfig) -> Self {
        Self::new(services, DisplayPreference::Auto, config.mode)
    }

    pub fn transcript(&self) -> &Transcript {
        self.session.transcript()
    }

    pub fn preference(&self) -> DisplayPreference {
        self.session.preference()
    }

    pub fn set_preference(&mut self, preference: DisplayPreference) {
        tracing::info!(?preference, "Display preference changed");
        self.session.set_preference(preference);
    }

    pub fn mode(&self) -> AnswerMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: AnswerMode) {
        tracing::info!(?mode, "Answer mode changed");
        self.mode = mode;
    }

    /// Greeting in the preferred language (the default language under `Auto`).
    pub async fn greeting(&self) -> String {
        let language = match self.session.preference() {
            DisplayPreference::Auto => self.services.default_language,
            DisplayPreference::Fixed(lang) => lang,
        };
        if let Some(text) = messages::greeting(language) {
            return text.to_string();
        }
        let english = messages::greeting(LanguageCode::English).unwrap_or_default();
        self.services
            .translator
            .translate(english, SourceLanguage::Known(LanguageCode::English), language)
            .await
    }

    pub fn text_statistics(&self, text: &str) -> TextStatistics {
        TextStatistics::collect(text, self.services.detector.as_ref())
    }

    /// Processes one user utterance and returns the assistant turn appended
    /// to the transcript.
    pub async fn process_turn(&mut self, text: &str) -> Turn {
        let prior_turns = self.session.transcript().len();
        let detection = self.services.detector.detect(text);
        self.session.append(Turn::user(text, detection.language));

        let display = self.session.preference().resolve(detection.language);
        let display_language = display;
        tracing::debug!(
            detected = %detection.language,
            confidence = detection.confidence,
            display = %display_language,
            mode = ?self.mode,
            "Processing turn"
        );

        let (reply, source) = match self.mode {
            AnswerMode::Knowledge => {
                let result = self.services.pipeline.answer(text, display).await;
                let source = result.source_title().map(str::to_string);
                (result.text().to_string(), source)
            }
            AnswerMode::Intent => {
                // Defaulted or failed detections say nothing about the real
                // source language.
                let source = if detection.confidence > DEFAULTED_CONFIDENCE {
                    SourceLanguage::Known(detection.language)
                } else {
                    SourceLanguage::Auto
                };
                let english = self
                    .services
                    .translator
                    .translate(text, source, LanguageCode::English)
                    .await;
                let reply = self.services.responder.respond(&english, prior_turns);
                let reply = self
                    .services
                    .translator
                    .translate(&reply, SourceLanguage::Known(LanguageCode::English), display)
                    .await;
                (reply, None)
            }
        };

        self.session
            .append(Turn::assistant(reply, display, source))
            .clone()
    }
}

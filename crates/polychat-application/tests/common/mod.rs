//! In-memory fakes for the external services.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use polychat_application::ChatServices;
use polychat_core::PolychatError;
use polychat_core::config::PolychatConfig;
use polychat_core::intent::FixedClock;
use polychat_core::knowledge::{KnowledgeSource, SummaryOutcome};
use polychat_core::language::{
    DetectionPolicy, DetectionResult, LanguageCode, LanguageDetector, SourceLanguage,
};
use polychat_core::translation::TranslationBackend;

pub const EINSTEIN: &str = "Albert Einstein was a theoretical physicist who developed the theory of relativity.";

// ============================================================================
// Knowledge source
// ============================================================================

#[derive(Default)]
pub struct FakeKnowledgeSource {
    results: HashMap<(LanguageCode, String), Vec<String>>,
    summaries: HashMap<(LanguageCode, String), SummaryOutcome>,
    fail_all: bool,
    pub searches: Mutex<Vec<(String, LanguageCode)>>,
    pub fetches: Mutex<Vec<(String, LanguageCode)>>,
}

impl FakeKnowledgeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails with a transport error.
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    pub fn with_results(mut self, language: LanguageCode, query: &str, titles: &[&str]) -> Self {
        self.results.insert(
            (language, query.to_string()),
            titles.iter().map(|t| t.to_string()).collect(),
        );
        self
    }

    pub fn with_summary(mut self, language: LanguageCode, title: &str, summary: &str) -> Self {
        self.summaries.insert(
            (language, title.to_string()),
            SummaryOutcome::Found {
                title: title.to_string(),
                summary: summary.to_string(),
            },
        );
        self
    }

    pub fn with_disambiguation(
        mut self,
        language: LanguageCode,
        title: &str,
        options: &[&str],
    ) -> Self {
        self.summaries.insert(
            (language, title.to_string()),
            SummaryOutcome::Disambiguation {
                options: options.iter().map(|o| o.to_string()).collect(),
            },
        );
        self
    }

    pub fn searches(&self) -> Vec<(String, LanguageCode)> {
        self.searches.lock().unwrap().clone()
    }

    pub fn fetched_titles(&self) -> Vec<String> {
        self.fetches
            .lock()
            .unwrap()
            .iter()
            .map(|(title, _)| title.clone())
            .collect()
    }
}

#[async_trait]
impl KnowledgeSource for FakeKnowledgeSource {
    fn languages(&self) -> Vec<LanguageCode> {
        vec![
            LanguageCode::English,
            LanguageCode::Hindi,
            LanguageCode::Telugu,
        ]
    }

    async fn search(
        &self,
        query: &str,
        language: LanguageCode,
        limit: usize,
    ) -> Result<Vec<String>, PolychatError> {
        self.searches
            .lock()
            .unwrap()
            .push((query.to_string(), language));
        if self.fail_all {
            return Err(PolychatError::transport("fake wiki", "connection refused"));
        }
        Ok(self
            .results
            .get(&(language, query.to_string()))
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .take(limit)
            .collect())
    }

    async fn fetch_summary(
        &self,
        title: &str,
        language: LanguageCode,
        _sentences: usize,
    ) -> Result<SummaryOutcome, PolychatError> {
        self.fetches
            .lock()
            .unwrap()
            .push((title.to_string(), language));
        if self.fail_all {
            return Err(PolychatError::transport("fake wiki", "connection refused"));
        }
        Ok(self
            .summaries
            .get(&(language, title.to_string()))
            .cloned()
            .unwrap_or(SummaryOutcome::Missing))
    }
}

// ============================================================================
// Translation backend
// ============================================================================

/// Returns scripted translations, or `[target] text` when none is scripted.
#[derive(Default)]
pub struct FakeTranslationBackend {
    scripted: HashMap<(String, LanguageCode), String>,
    fail_all: bool,
    pub calls: Mutex<Vec<(String, SourceLanguage, LanguageCode)>>,
}

impl FakeTranslationBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    pub fn with_translation(mut self, text: &str, target: LanguageCode, translated: &str) -> Self {
        self.scripted
            .insert((text.to_string(), target), translated.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl TranslationBackend for FakeTranslationBackend {
    async fn translate(
        &self,
        text: &str,
        source: SourceLanguage,
        target: LanguageCode,
    ) -> Result<String, PolychatError> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), source, target));
        if self.fail_all {
            return Err(PolychatError::http("fake translate", 429, "quota exceeded"));
        }
        Ok(self
            .scripted
            .get(&(text.to_string(), target))
            .cloned()
            .unwrap_or_else(|| format!("[{}] {}", target.code(), text)))
    }
}

// ============================================================================
// Language detector
// ============================================================================

/// Returns a fixed result, or the policy's failure result when `None`.
pub struct FakeDetector {
    result: Option<DetectionResult>,
    policy: DetectionPolicy,
}

impl FakeDetector {
    pub fn detecting(language: LanguageCode, confidence: f64) -> Self {
        Self {
            result: Some(DetectionResult::new(language, confidence)),
            policy: DetectionPolicy::default(),
        }
    }

    /// Behaves like a classifier that can never decide.
    pub fn failing() -> Self {
        Self {
            result: None,
            policy: DetectionPolicy::default(),
        }
    }
}

impl LanguageDetector for FakeDetector {
    fn detect(&self, _text: &str) -> DetectionResult {
        self.result.unwrap_or_else(|| self.policy.failed())
    }

    fn supported_languages(&self) -> Vec<LanguageCode> {
        self.policy.supported().to_vec()
    }
}

// ============================================================================
// Wiring
// ============================================================================

pub fn fixed_clock() -> Arc<FixedClock> {
    let now = NaiveDate::from_ymd_opt(2024, 3, 15)
        .unwrap()
        .and_hms_opt(14, 30, 0)
        .unwrap();
    Arc::new(FixedClock(now))
}

pub fn services(
    detector: Arc<FakeDetector>,
    translation: Arc<FakeTranslationBackend>,
    knowledge: Arc<FakeKnowledgeSource>,
) -> ChatServices {
    let mut config = PolychatConfig::default();
    config.supported_languages.push(LanguageCode::French);
    ChatServices::from_config(&config, detector, translation, knowledge, fixed_clock())
}

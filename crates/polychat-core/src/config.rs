//! Application configuration (`config.toml`).
//!
//! Every field has a default, so a missing file or a partial file both load.

use crate::error::{PolychatError, Result};
use crate::language::{DetectionPolicy, LanguageCode, default_substitutions};
use crate::session::DisplayPreference;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where replies come from.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnswerMode {
    /// Encyclopedic lookup through the answer pipeline.
    #[default]
    Knowledge,
    /// Rule-based intent responder, no external lookup.
    Intent,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PolychatConfig {
    /// Fallback language for detection and the default query language.
    pub default_language: LanguageCode,
    /// Languages the detector resolves into.
    pub supported_languages: Vec<LanguageCode>,
    /// Languages the knowledge source is queried in natively.
    pub lookup_languages: Vec<LanguageCode>,
    pub mode: AnswerMode,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// Detected ISO code → supported language it is folded into.
    pub substitutions: BTreeMap<String, LanguageCode>,
    pub lookup: LookupSettings,
    pub translation: TranslationSettings,
    pub http: HttpSettings,
    pub responder: ResponderSettings,
}

impl Default for PolychatConfig {
    fn default() -> Self {
        let languages = vec![
            LanguageCode::English,
            LanguageCode::Hindi,
            LanguageCode::Telugu,
        ];
        Self {
            default_language: LanguageCode::English,
            supported_languages: languages.clone(),
            lookup_languages: languages,
            mode: AnswerMode::default(),
            log_level: "info".to_string(),
            substitutions: default_substitutions(),
            lookup: LookupSettings::default(),
            translation: TranslationSettings::default(),
            http: HttpSettings::default(),
            responder: ResponderSettings::default(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LookupSettings {
    /// Maximum number of titles taken from a search.
    pub result_limit: usize,
    /// Sentence bound for each fetched snippet.
    pub summary_sentences: usize,
    /// MediaWiki API endpoint; `{lang}` is replaced by the language code.
    pub wikipedia_api_url: String,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            result_limit: 3,
            summary_sentences: 3,
            wikipedia_api_url: "https://{lang}.wikipedia.org/w/api.php".to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TranslationSettings {
    pub endpoint: String,
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://translate.googleapis.com/translate_a/single".to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct HttpSettings {
    /// Per-request timeout for every external call.
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: concat!("polychat/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ResponderSettings {
    pub short_turn_threshold: usize,
}

impl Default for ResponderSettings {
    fn default() -> Self {
        Self {
            short_turn_threshold: crate::intent::DEFAULT_SHORT_TURN_THRESHOLD,
        }
    }
}

impl PolychatConfig {
    /// Parses a TOML document and validates it.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.supported_languages.contains(&self.default_language) {
            return Err(PolychatError::config(format!(
                "default_language '{}' is not in supported_languages",
                self.default_language
            )));
        }
        if self.lookup.result_limit == 0 {
            return Err(PolychatError::config("lookup.result_limit must be at least 1"));
        }
        if self.lookup.summary_sentences == 0 {
            return Err(PolychatError::config(
                "lookup.summary_sentences must be at least 1",
            ));
        }
        if !self.lookup.wikipedia_api_url.contains("{lang}") {
            return Err(PolychatError::config(
                "lookup.wikipedia_api_url must contain a {lang} placeholder",
            ));
        }
        if self.http.timeout_secs == 0 {
            return Err(PolychatError::config("http.timeout_secs must be at least 1"));
        }
        Ok(())
    }

    /// Accepts `Auto` and fixed languages from `supported_languages`.
    pub fn check_preference(&self, preference: DisplayPreference) -> Result<DisplayPreference> {
        match preference {
            DisplayPreference::Fixed(lang) if !self.supported_languages.contains(&lang) => {
                Err(PolychatError::UnsupportedLanguage(lang.code().to_string()))
            }
            _ => Ok(preference),
        }
    }

    pub fn detection_policy(&self) -> DetectionPolicy {
        DetectionPolicy::new(
            self.default_language,
            self.supported_languages.clone(),
            self.substitutions.clone(),
        )
    }
}

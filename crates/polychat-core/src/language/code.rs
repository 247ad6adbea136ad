//! Language codes known to PolyChat.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// A language PolyChat can converse in.
///
/// The enum is the closed universe of languages; a deployment narrows it to a
/// *supported set* through configuration. Codes are ISO 639-1.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum LanguageCode {
    #[serde(rename = "en")]
    #[strum(serialize = "en")]
    English,
    #[serde(rename = "hi")]
    #[strum(serialize = "hi")]
    Hindi,
    #[serde(rename = "te")]
    #[strum(serialize = "te")]
    Telugu,
    #[serde(rename = "es")]
    #[strum(serialize = "es")]
    Spanish,
    #[serde(rename = "fr")]
    #[strum(serialize = "fr")]
    French,
}

impl LanguageCode {
    /// ISO 639-1 code, e.g. `"te"`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Hindi => "hi",
            Self::Telugu => "te",
            Self::Spanish => "es",
            Self::French => "fr",
        }
    }

    /// Human-readable English name of the language.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Hindi => "Hindi",
            Self::Telugu => "Telugu",
            Self::Spanish => "Spanish",
            Self::French => "French",
        }
    }

    /// Looks up a language by its ISO code, ignoring case and surrounding
    /// whitespace. Returns `None` for anything outside the known set.
    pub fn from_code(code: &str) -> Option<Self> {
        code.trim().parse().ok()
    }

    /// All known languages in declaration order.
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self::English
    }
}

/// Source language argument for translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceLanguage {
    /// Let the translation service detect the source language.
    Auto,
    Known(LanguageCode),
}

impl SourceLanguage {
    /// Code sent to translation services (`"auto"` for auto-detection).
    pub fn code(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Known(lang) => lang.code(),
        }
    }

    pub fn known(&self) -> Option<LanguageCode> {
        match self {
            Self::Auto => None,
            Self::Known(lang) => Some(*lang),
        }
    }
}

impl From<LanguageCode> for SourceLanguage {
    fn from(lang: LanguageCode) -> Self {
        Self::Known(lang)
    }
}

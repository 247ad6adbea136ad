//! Session domain model.
//!
//! A session owns the transcript and the user's display-language preference.
//! It lives for one conversation and is never persisted.

use super::turn::{Transcript, Turn};
use crate::language::LanguageCode;
use serde::{Deserialize, Serialize};

/// The user's choice of language for replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayPreference {
    /// Reply in whatever language the user just wrote in.
    #[default]
    Auto,
    /// Always reply in this language.
    Fixed(LanguageCode),
}

impl DisplayPreference {
    /// Resolves the display language for a turn whose input was detected as
    /// `detected`.
    pub fn resolve(&self, detected: LanguageCode) -> LanguageCode {
        match self {
            Self::Auto => detected,
            Self::Fixed(lang) => *lang,
        }
    }

    /// Parses `"auto"` or a language code.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("auto") {
            return Some(Self::Auto);
        }
        LanguageCode::from_code(value).map(Self::Fixed)
    }
}

/// Conversation state for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Timestamp when the session was created (ISO 8601 format)
    pub created_at: String,
    transcript: Transcript,
    preference: DisplayPreference,
}

impl Session {
    pub fn new(preference: DisplayPreference) -> Self {
        Self {
            created_at: chrono::Utc::now().to_rfc3339(),
            transcript: Transcript::new(),
            preference,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn preference(&self) -> DisplayPreference {
        self.preference
    }

    pub fn set_preference(&mut self, preference: DisplayPreference) {
        self.preference = preference;
    }

    pub fn append(&mut self, turn: Turn) -> &Turn {
        self.transcript.append(turn)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DisplayPreference::Auto)
    }
}

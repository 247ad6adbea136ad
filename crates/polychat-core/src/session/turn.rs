//! Conversation turn types.
//!
//! This module contains types for representing turns in a conversation and
//! the append-only transcript that holds them.

use crate::language::LanguageCode;
use serde::{Deserialize, Serialize};

/// Represents who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// Text typed by the user.
    User,
    /// Reply produced by PolyChat.
    Assistant,
}

/// A single turn in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub text: String,
    /// For user turns, the detected language of `text`; for assistant turns,
    /// the display language the reply was rendered in.
    pub language: LanguageCode,
    /// Provenance of an assistant answer, e.g. an article title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Timestamp when the turn was created (ISO 8601 format).
    pub timestamp: String,
}

impl Turn {
    pub fn user(text: impl Into<String>, language: LanguageCode) -> Self {
        Self {
            role: TurnRole::User,
            text: text.into(),
            language,
            source: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn assistant(
        text: impl Into<String>,
        language: LanguageCode,
        source: Option<String>,
    ) -> Self {
        Self {
            role: TurnRole::Assistant,
            text: text.into(),
            language,
            source,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Append-only ordered log of turns.
///
/// Turns cannot be edited or removed once appended.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a turn and returns a reference to it.
    pub fn append(&mut self, turn: Turn) -> &Turn {
        self.turns.push(turn);
        &self.turns[self.turns.len() - 1]
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Number of turns with the given role.
    pub fn count(&self, role: TurnRole) -> usize {
        self.turns.iter().filter(|t| t.role == role).count()
    }
}

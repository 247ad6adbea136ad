//! Rule-based intent responder.
//!
//! Used when PolyChat runs without a knowledge source. Input is English;
//! callers translate in and out of the user's language.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::clock::Clock;

/// Intents recognised by the responder, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    Farewell,
    StatusCheck,
    Identity,
    Help,
    Capabilities,
    Gratitude,
    Time,
    Date,
    Weather,
    Joke,
}

struct IntentRule {
    intent: Intent,
    phrases: &'static [&'static str],
}

/// Evaluated top to bottom; the first matching rule wins.
const RULES: &[IntentRule] = &[
    IntentRule {
        intent: Intent::Greeting,
        phrases: &[
            "hello",
            "hi",
            "hey",
            "greetings",
            "namaste",
            "good morning",
            "good afternoon",
            "good evening",
        ],
    },
    IntentRule {
        intent: Intent::Farewell,
        phrases: &["bye", "goodbye", "farewell", "see you", "good night"],
    },
    IntentRule {
        intent: Intent::StatusCheck,
        phrases: &["how are you", "how are things", "how is it going", "how s it going"],
    },
    IntentRule {
        intent: Intent::Identity,
        phrases: &["who are you", "your name", "what are you"],
    },
    IntentRule {
        intent: Intent::Help,
        phrases: &["help", "assist", "support"],
    },
    IntentRule {
        intent: Intent::Capabilities,
        phrases: &["what can you do", "capabilities", "features", "abilities"],
    },
    IntentRule {
        intent: Intent::Gratitude,
        phrases: &["thank", "thanks", "thank you", "appreciate"],
    },
    IntentRule {
        intent: Intent::Time,
        phrases: &["time", "clock"],
    },
    IntentRule {
        intent: Intent::Date,
        phrases: &["date", "today", "what day"],
    },
    IntentRule {
        intent: Intent::Weather,
        phrases: &["weather", "temperature", "forecast", "rain", "sunny"],
    },
    IntentRule {
        intent: Intent::Joke,
        phrases: &["joke", "funny", "make me laugh"],
    },
];

const JOKES: &[&str] = &[
    "Why don't scientists trust atoms? Because they make up everything!",
    "Why did the scarecrow win an award? Because he was outstanding in his field!",
    "What do you call a bear with no teeth? A gummy bear!",
];

pub const DEFAULT_SHORT_TURN_THRESHOLD: usize = 4;

/// Answers English input from an ordered table of keyword rules.
///
/// Stateless: the reply depends only on the text, the number of turns so far
/// and the clock.
#[derive(Clone)]
pub struct IntentResponder {
    clock: Arc<dyn Clock>,
    short_turn_threshold: usize,
}

impl IntentResponder {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            short_turn_threshold: DEFAULT_SHORT_TURN_THRESHOLD,
        }
    }

    /// Conversations longer than `threshold` turns get the "tell me more"
    /// fallback instead of the plain acknowledgement.
    pub fn with_short_turn_threshold(mut self, threshold: usize) -> Self {
        self.short_turn_threshold = threshold;
        self
    }

    /// Returns the first intent whose keywords occur in `text`.
    pub fn classify(&self, text: &str) -> Option<Intent> {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return None;
        }
        RULES
            .iter()
            .find(|rule| {
                rule.phrases
                    .iter()
                    .any(|phrase| contains_phrase(&tokens, phrase))
            })
            .map(|rule| rule.intent)
    }

    /// Produces an English reply for `text`.
    ///
    /// `turn_count` is the number of turns already in the conversation; it
    /// only influences the no-match fallback and joke rotation.
    pub fn respond(&self, text: &str, turn_count: usize) -> String {
        match self.classify(text) {
            Some(intent) => {
                tracing::debug!(?intent, "Matched intent");
                self.reply(intent, turn_count)
            }
            None if turn_count > self.short_turn_threshold => {
                "That's interesting! Tell me more about it.".to_string()
            }
            None => "I understand. What would you like to know?".to_string(),
        }
    }

    fn reply(&self, intent: Intent, turn_count: usize) -> String {
        match intent {
            Intent::Greeting => "Hello! How can I help you today?".to_string(),
            Intent::Farewell => "Goodbye! Have a great day.".to_string(),
            Intent::StatusCheck => {
                "I'm doing well, thank you for asking! How can I help you?".to_string()
            }
            Intent::Identity => {
                "I'm PolyChat, a multilingual assistant. I can talk with you in several languages."
                    .to_string()
            }
            Intent::Help => {
                "I can answer simple questions, tell you the time or date, or share a joke. Just ask!"
                    .to_string()
            }
            Intent::Capabilities => {
                "I understand several languages, answer simple questions, tell the time and date, and tell jokes."
                    .to_string()
            }
            Intent::Gratitude => {
                "You're welcome! Is there anything else I can help with?".to_string()
            }
            Intent::Time => {
                let now = self.clock.now();
                format!("The current time is {}.", now.format("%H:%M"))
            }
            Intent::Date => {
                let now = self.clock.now();
                format!("Today is {}.", now.format("%A, %B %-d, %Y"))
            }
            Intent::Weather => {
                "I can't check live weather yet. A weather service will have the latest forecast."
                    .to_string()
            }
            Intent::Joke => JOKES[turn_count % JOKES.len()].to_string(),
        }
    }
}

/// Case-folds and splits on anything that is not a letter or digit.
fn tokenize(text: &str) -> Vec<String> {
    text.trim()
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn contains_phrase(tokens: &[String], phrase: &str) -> bool {
    let needle: Vec<&str> = phrase.split_whitespace().collect();
    if needle.is_empty() || needle.len() > tokens.len() {
        return false;
    }
    tokens
        .windows(needle.len())
        .any(|window| window.iter().zip(&needle).all(|(t, n)| t == n))
}

//! Domain layer for PolyChat.
//!
//! Holds the language model, the service traits implemented by the
//! infrastructure crate (`LanguageDetector`, `TranslationBackend`,
//! `KnowledgeSource`), the rule-based intent responder, session state and
//! configuration.

pub mod config;
pub mod error;
pub mod intent;
pub mod knowledge;
pub mod language;
pub mod messages;
pub mod session;
pub mod translation;

// Re-export common error type
pub use error::PolychatError;

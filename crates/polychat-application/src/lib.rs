//! Application layer for PolyChat.
//!
//! This crate coordinates the domain services into the answer pipeline and
//! per-conversation turn processing. Backends are injected as trait objects,
//! so tests run against in-memory fakes.

pub mod answer_pipeline;
pub mod chat_session;
pub mod knowledge_lookup;
pub mod translator;

pub use answer_pipeline::{AnswerPipeline, PipelineResult};
pub use chat_session::{ChatServices, ChatSession};
pub use knowledge_lookup::KnowledgeLookup;
pub use translator::Translator;

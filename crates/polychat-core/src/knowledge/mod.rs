//! Encyclopedic knowledge lookup.
//!
//! - `model`: candidates and per-title summary outcomes
//! - `source`: the `KnowledgeSource` capability implemented by backends

pub mod model;
pub mod source;

pub use model::{LookupCandidate, LookupOutcome, SummaryOutcome};
pub use source::KnowledgeSource;

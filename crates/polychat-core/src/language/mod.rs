//! Language domain module.
//!
//! - `code`: the closed set of language codes (`LanguageCode`, `SourceLanguage`)
//! - `detection`: detection results, the supported-set policy and the
//!   `LanguageDetector` trait

mod code;
mod detection;

pub use code::{LanguageCode, SourceLanguage};
pub use detection::{
    DEFAULTED_CONFIDENCE, DetectionPolicy, DetectionResult, FAILED_CONFIDENCE, LanguageDetector,
    MATCH_CONFIDENCE, RawDetection, TextStatistics, default_substitutions,
};

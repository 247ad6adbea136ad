//! Infrastructure layer for PolyChat: concrete implementations of the
//! domain service traits and configuration loading.

pub mod config_service;
pub mod google_translator;
mod http;
pub mod paths;
pub mod whatlang_detector;
pub mod wikipedia_source;

pub use crate::config_service::ConfigService;
pub use crate::google_translator::GoogleTranslator;
pub use crate::http::build_client;
pub use crate::whatlang_detector::WhatlangDetector;
pub use crate::wikipedia_source::WikipediaSource;

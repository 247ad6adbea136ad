//! Language detection results and the policy that folds raw classifier
//! output into the supported language set.

use super::code::LanguageCode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Confidence attached to a result that was defaulted because the detected
/// language is not supported.
pub const DEFAULTED_CONFIDENCE: f64 = 0.5;

/// Confidence attached to a result the detector failed to produce.
pub const FAILED_CONFIDENCE: f64 = 0.0;

/// Minimum confidence for text to count as written in an expected language.
pub const MATCH_CONFIDENCE: f64 = 0.3;

/// Outcome of detecting the language of a piece of text.
///
/// `language` is always a member of the deployment's supported set.
/// `confidence` is advisory: `0.0` means detection failed outright, `0.5`
/// means an unsupported language was detected and the default substituted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub language: LanguageCode,
    pub confidence: f64,
}

impl DetectionResult {
    pub fn new(language: LanguageCode, confidence: f64) -> Self {
        Self {
            language,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// True when this is `expected` with confidence above `min_confidence`.
    pub fn matches(&self, expected: LanguageCode, min_confidence: f64) -> bool {
        self.language == expected && self.confidence > min_confidence
    }
}

/// What a classifier said before any supported-set policy was applied.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDetection {
    /// ISO 639-1 code where one exists, otherwise the classifier's own code.
    pub code: String,
    pub confidence: f64,
}

/// Maps raw classifier output onto the supported language set.
///
/// Resolution order:
/// 1. no classification → default language, confidence 0.0
/// 2. supported language → as detected
/// 3. substitution table hit that lands in the supported set → substituted
///    language, detector confidence kept
/// 4. anything else → default language, confidence 0.5
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionPolicy {
    default_language: LanguageCode,
    supported: Vec<LanguageCode>,
    substitutions: BTreeMap<String, LanguageCode>,
}

impl DetectionPolicy {
    pub fn new(
        default_language: LanguageCode,
        supported: Vec<LanguageCode>,
        substitutions: BTreeMap<String, LanguageCode>,
    ) -> Self {
        let mut supported = supported;
        if !supported.contains(&default_language) {
            supported.push(default_language);
        }
        Self {
            default_language,
            supported,
            substitutions,
        }
    }

    pub fn default_language(&self) -> LanguageCode {
        self.default_language
    }

    pub fn supported(&self) -> &[LanguageCode] {
        &self.supported
    }

    pub fn is_supported(&self, language: LanguageCode) -> bool {
        self.supported.contains(&language)
    }

    /// Result used for empty input and classifier failures.
    pub fn failed(&self) -> DetectionResult {
        DetectionResult::new(self.default_language, FAILED_CONFIDENCE)
    }

    pub fn resolve(&self, raw: Option<RawDetection>) -> DetectionResult {
        let Some(raw) = raw else {
            return self.failed();
        };

        let code = raw.code.trim().to_ascii_lowercase();
        if let Some(lang) = LanguageCode::from_code(&code) {
            if self.is_supported(lang) {
                return DetectionResult::new(lang, raw.confidence);
            }
        }

        if let Some(&substitute) = self.substitutions.get(&code) {
            if self.is_supported(substitute) {
                tracing::warn!(
                    detected = %code,
                    substitute = %substitute,
                    "Substituting unsupported language"
                );
                return DetectionResult::new(substitute, raw.confidence);
            }
        }

        tracing::warn!(detected = %code, "Unsupported language, using default");
        DetectionResult::new(self.default_language, DEFAULTED_CONFIDENCE)
    }
}

impl Default for DetectionPolicy {
    fn default() -> Self {
        Self::new(
            LanguageCode::English,
            vec![
                LanguageCode::English,
                LanguageCode::Hindi,
                LanguageCode::Telugu,
            ],
            default_substitutions(),
        )
    }
}

/// Regional languages mapped to the nearest supported one.
pub fn default_substitutions() -> BTreeMap<String, LanguageCode> {
    BTreeMap::from([
        ("ta".to_string(), LanguageCode::Telugu),
        ("ur".to_string(), LanguageCode::Hindi),
    ])
}

/// Detects the language of user text.
///
/// Implementations must never fail: empty input, classifier failure and
/// unsupported languages all degrade through [`DetectionPolicy`].
pub trait LanguageDetector: Send + Sync {
    fn detect(&self, text: &str) -> DetectionResult;

    /// Supported set this detector resolves into.
    fn supported_languages(&self) -> Vec<LanguageCode>;

    /// Checks that `text` is written in `expected`. No expectation always
    /// passes.
    fn is_in_language(&self, text: &str, expected: Option<LanguageCode>) -> bool {
        match expected {
            Some(expected) => self.detect(text).matches(expected, MATCH_CONFIDENCE),
            None => true,
        }
    }
}

/// Summary statistics of a piece of text, for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStatistics {
    pub character_count: usize,
    pub word_count: usize,
    pub detected_language: LanguageCode,
    pub language_name: String,
    pub confidence: f64,
    pub is_supported: bool,
}

impl TextStatistics {
    pub fn collect(text: &str, detector: &dyn LanguageDetector) -> Self {
        let detection = detector.detect(text);
        Self {
            character_count: text.chars().count(),
            word_count: text.split_whitespace().count(),
            detected_language: detection.language,
            language_name: detection.language.display_name().to_string(),
            confidence: detection.confidence,
            is_supported: detector
                .supported_languages()
                .contains(&detection.language),
        }
    }
}

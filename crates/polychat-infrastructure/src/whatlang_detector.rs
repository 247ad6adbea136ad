//! Whatlang-based language detector.
//!
//! Uses the whatlang crate for fast, trigram-based language detection. The
//! classifier is restricted to the languages PolyChat knows plus the regional
//! languages the substitution table folds into them.

use polychat_core::language::{
    DetectionPolicy, DetectionResult, LanguageCode, LanguageDetector, RawDetection,
};
use whatlang::{Detector, Lang};

/// Whatlang-based implementation of [`LanguageDetector`].
pub struct WhatlangDetector {
    detector: Detector,
    policy: DetectionPolicy,
}

impl WhatlangDetector {
    pub fn new(policy: DetectionPolicy) -> Self {
        tracing::info!(
            default = %policy.default_language(),
            supported = ?policy.supported(),
            "Initializing Whatlang language detector"
        );
        Self {
            detector: Detector::with_allowlist(allowlist()),
            policy,
        }
    }
}

impl Default for WhatlangDetector {
    fn default() -> Self {
        Self::new(DetectionPolicy::default())
    }
}

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> DetectionResult {
        if text.trim().is_empty() {
            return self.policy.failed();
        }

        let raw = self.detector.detect(text).map(|info| RawDetection {
            code: iso_code(info.lang()).to_string(),
            confidence: info.confidence(),
        });
        if raw.is_none() {
            tracing::debug!("Whatlang could not classify input");
        }

        self.policy.resolve(raw)
    }

    fn supported_languages(&self) -> Vec<LanguageCode> {
        self.policy.supported().to_vec()
    }
}

/// Classifier languages: every `LanguageCode` plus the substitution sources.
fn allowlist() -> Vec<Lang> {
    let mut langs: Vec<Lang> = LanguageCode::all().into_iter().map(whatlang_lang).collect();
    langs.extend([Lang::Tam, Lang::Urd]);
    langs
}

fn whatlang_lang(lang: LanguageCode) -> Lang {
    match lang {
        LanguageCode::English => Lang::Eng,
        LanguageCode::Hindi => Lang::Hin,
        LanguageCode::Telugu => Lang::Tel,
        LanguageCode::Spanish => Lang::Spa,
        LanguageCode::French => Lang::Fra,
    }
}

fn iso_code(lang: Lang) -> &'static str {
    match lang {
        Lang::Eng => "en",
        Lang::Hin => "hi",
        Lang::Tel => "te",
        Lang::Spa => "es",
        Lang::Fra => "fr",
        Lang::Tam => "ta",
        Lang::Urd => "ur",
        // Fallback to 3-letter code if not explicitly mapped
        l => l.code(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polychat_core::language::{DEFAULTED_CONFIDENCE, default_substitutions};

    #[test]
    fn test_empty_input_is_zero_confidence_default() {
        let detector = WhatlangDetector::default();
        for text in ["", "   ", "\n\t"] {
            let result = detector.detect(text);
            assert_eq!(result.language, LanguageCode::English);
            assert_eq!(result.confidence, 0.0);
        }
    }

    #[test]
    fn test_detects_english() {
        let detector = WhatlangDetector::default();
        let result = detector
            .detect("This is a longer English sentence to ensure correct detection.");
        assert_eq!(result.language, LanguageCode::English);
        assert!(result.confidence > 0.0);
    }

    #[test]
    fn test_detects_scripts_of_supported_indic_languages() {
        let detector = WhatlangDetector::default();
        assert_eq!(
            detector.detect("नमस्ते, आप कैसे हैं? मैं आज बहुत खुश हूँ।").language,
            LanguageCode::Hindi
        );
        assert_eq!(
            detector.detect("హలో, మీరు ఎలా ఉన్నారు? నేను ఈ రోజు చాలా సంతోషంగా ఉన్నాను.").language,
            LanguageCode::Telugu
        );
    }

    #[test]
    fn test_tamil_is_substituted_with_telugu() {
        let detector = WhatlangDetector::default();
        let result = detector.detect("வணக்கம், நீங்கள் எப்படி இருக்கிறீர்கள்? நான் நன்றாக இருக்கிறேன்.");
        assert_eq!(result.language, LanguageCode::Telugu);
    }

    #[test]
    fn test_unsupported_language_defaults_at_half_confidence() {
        let detector = WhatlangDetector::default();
        let result = detector.detect(
            "Bonjour tout le monde, je voudrais savoir où se trouve la bibliothèque municipale.",
        );
        assert_eq!(result.language, LanguageCode::English);
        assert_eq!(result.confidence, DEFAULTED_CONFIDENCE);
    }

    #[test]
    fn test_french_supported_when_configured() {
        let policy = DetectionPolicy::new(
            LanguageCode::English,
            vec![LanguageCode::English, LanguageCode::French],
            default_substitutions(),
        );
        let detector = WhatlangDetector::new(policy);
        let result = detector.detect(
            "Bonjour tout le monde, je voudrais savoir où se trouve la bibliothèque municipale.",
        );
        assert_eq!(result.language, LanguageCode::French);
        assert_eq!(detector.supported_languages().len(), 2);
    }

    #[test]
    fn test_result_always_in_supported_set() {
        let detector = WhatlangDetector::default();
        let supported = detector.supported_languages();
        for text in ["123 456", "!!!", "ok", "Guten Tag, wie geht es Ihnen heute?", "こんにちは"] {
            let result = detector.detect(text);
            assert!(supported.contains(&result.language), "{text:?}");
        }
    }
}

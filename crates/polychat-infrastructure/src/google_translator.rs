//! GoogleTranslator - REST client for Google's public translate endpoint.
//!
//! Calls `translate_a/single` with `client=gtx`, which needs no API key and
//! accepts `sl=auto` for source-language detection.

use async_trait::async_trait;
use polychat_core::PolychatError;
use polychat_core::config::{HttpSettings, TranslationSettings};
use polychat_core::language::{LanguageCode, SourceLanguage};
use polychat_core::translation::TranslationBackend;
use reqwest::Client;
use serde_json::Value;

use crate::http;

const SERVICE: &str = "Google Translate";

/// Translation backend that talks to Google Translate over HTTP.
#[derive(Clone)]
pub struct GoogleTranslator {
    client: Client,
    endpoint: String,
}

impl GoogleTranslator {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Builds a translator with its own timeout-bounded client.
    pub fn from_settings(
        translation: &TranslationSettings,
        http_settings: &HttpSettings,
    ) -> Result<Self, PolychatError> {
        Ok(Self::new(
            http::build_client(http_settings)?,
            translation.endpoint.clone(),
        ))
    }
}

#[async_trait]
impl TranslationBackend for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        source: SourceLanguage,
        target: LanguageCode,
    ) -> Result<String, PolychatError> {
        tracing::debug!(
            source = source.code(),
            target = target.code(),
            chars = text.chars().count(),
            "Requesting translation"
        );

        let query = [
            ("client", "gtx".to_string()),
            ("sl", source.code().to_string()),
            ("tl", target.code().to_string()),
            ("dt", "t".to_string()),
            ("q", text.to_string()),
        ];
        let payload: Value = http::get_json(&self.client, SERVICE, &self.endpoint, &query).await?;

        extract_translation(&payload)
    }
}

/// Joins the translated segments of a `translate_a/single` response.
///
/// The body is a nested array whose first element lists
/// `[translated, original, ...]` segments.
fn extract_translation(payload: &Value) -> Result<String, PolychatError> {
    let segments = payload
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| PolychatError::parse(SERVICE, "missing translation segments"))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.trim().is_empty() {
        return Err(PolychatError::parse(SERVICE, "empty translation"));
    }
    Ok(translated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_joins_segments() {
        let payload = json!([
            [
                ["Bonjour. ", "Hello. ", null, null, 10],
                ["Comment allez-vous?", "How are you?", null, null, 10]
            ],
            null,
            "en"
        ]);
        assert_eq!(
            extract_translation(&payload).unwrap(),
            "Bonjour. Comment allez-vous?"
        );
    }

    #[test]
    fn test_extract_rejects_unexpected_shape() {
        let err = extract_translation(&json!({"error": "quota"})).unwrap_err();
        assert!(matches!(err, PolychatError::Parse { .. }));
    }

    #[test]
    fn test_extract_rejects_empty_translation() {
        let err = extract_translation(&json!([[], null, "en"])).unwrap_err();
        assert!(err.is_remote());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let settings = HttpSettings {
            timeout_secs: 1,
            ..HttpSettings::default()
        };
        let translator = GoogleTranslator::from_settings(
            &TranslationSettings {
                endpoint: "http://127.0.0.1:9/translate_a/single".to_string(),
            },
            &settings,
        )
        .unwrap();
        let err = translator
            .translate("hello", SourceLanguage::Known(LanguageCode::English), LanguageCode::French)
            .await
            .unwrap_err();
        assert!(matches!(err, PolychatError::Transport { .. }));
    }
}

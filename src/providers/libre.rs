//! LibreTranslate (self-hosted or public instance)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{network_error, read_body, TranslationProvider};
use crate::core::errors::{Result, TranslationError};
use crate::core::models::ProviderDescriptor;

#[derive(Debug, Serialize)]
struct LibreRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LibreResponse {
    translated_text: Option<String>,
    error: Option<String>,
}

/// POST `{q, source: "auto", target, format: "text"}`, answer in `translatedText`
#[derive(Debug, Clone)]
pub struct LibreProvider {
    client: reqwest::Client,
    descriptor: ProviderDescriptor,
    target_lang: String,
    api_key: Option<String>,
}

impl LibreProvider {
    /// Provider translating into `target_lang`; key from `LIBRE_TRANSLATE_API_KEY` if set
    pub fn new(client: reqwest::Client, descriptor: ProviderDescriptor, target_lang: &str) -> Self {
        Self {
            client,
            descriptor,
            target_lang: target_lang.to_string(),
            api_key: std::env::var("LIBRE_TRANSLATE_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
        }
    }

    /// Override the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    fn request_body<'a>(&'a self, text: &'a str) -> LibreRequest<'a> {
        LibreRequest {
            q: text,
            source: "auto",
            target: &self.target_lang,
            format: "text",
            api_key: self.api_key.as_deref(),
        }
    }
}

#[async_trait]
impl TranslationProvider for LibreProvider {
    fn descriptor(&self) -> &ProviderDescriptor {
        &self.descriptor
    }

    async fn fetch(&self, text: &str) -> Result<String> {
        debug!("Sending translation request to LibreTranslate");

        let response = self
            .client
            .post(&self.descriptor.endpoint)
            .json(&self.request_body(text))
            .send()
            .await
            .map_err(network_error)?;

        read_body(response).await
    }

    fn parse(&self, raw: &str) -> Result<String> {
        let response: LibreResponse = serde_json::from_str(raw)?;

        if let Some(error) = response.error {
            return Err(TranslationError::InvalidResponseError { message: error });
        }

        response
            .translated_text
            .ok_or_else(|| TranslationError::InvalidResponseError {
                message: "No translatedText in response".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::default_providers;
    use crate::core::models::ProviderKind;
    use assert_json_diff::assert_json_eq;
    use serde_json::json;

    fn provider() -> LibreProvider {
        let descriptor = default_providers()
            .into_iter()
            .find(|p| p.kind == ProviderKind::Libre)
            .unwrap();
        let mut provider = LibreProvider::new(reqwest::Client::new(), descriptor, "vi");
        provider.api_key = None;
        provider
    }

    #[test]
    fn test_request_body_shape() {
        let provider = provider();
        let body = serde_json::to_value(provider.request_body("Hello")).unwrap();
        assert_json_eq!(
            body,
            json!({ "q": "Hello", "source": "auto", "target": "vi", "format": "text" })
        );

        let provider = provider.with_api_key("secret");
        let body = serde_json::to_value(provider.request_body("Hello")).unwrap();
        assert_eq!(body["api_key"], "secret");
    }

    #[test]
    fn test_parse_flat_field() {
        assert_eq!(
            provider().parse(r#"{"translatedText":"Xin chào"}"#).unwrap(),
            "Xin chào"
        );
    }

    #[test]
    fn test_parse_error_body() {
        assert!(provider().parse(r#"{"error":"Invalid API key"}"#).is_err());
        assert!(provider().parse("{}").is_err());
    }
}

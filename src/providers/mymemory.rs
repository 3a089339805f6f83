//! MyMemory translation memory API

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::{network_error, read_body, TranslationProvider};
use crate::core::errors::{Result, TranslationError};
use crate::core::models::ProviderDescriptor;

/// GET `?q=<text>&langpair=<source>|<target>`, answer in
/// `responseData.translatedText`.
#[derive(Debug, Clone)]
pub struct MyMemoryProvider {
    client: reqwest::Client,
    descriptor: ProviderDescriptor,
    langpair: String,
}

impl MyMemoryProvider {
    /// Provider for the `source|target` pair
    pub fn new(
        client: reqwest::Client,
        descriptor: ProviderDescriptor,
        source_lang: &str,
        target_lang: &str,
    ) -> Self {
        Self {
            client,
            descriptor,
            langpair: format!("{}|{}", source_lang, target_lang),
        }
    }

    /// `langpair` query value
    pub fn langpair(&self) -> &str {
        &self.langpair
    }
}

/// `responseStatus` arrives as a number or a numeric string
fn response_status(json: &Value) -> Option<u64> {
    match json.get("responseStatus")? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

#[async_trait]
impl TranslationProvider for MyMemoryProvider {
    fn descriptor(&self) -> &ProviderDescriptor {
        &self.descriptor
    }

    async fn fetch(&self, text: &str) -> Result<String> {
        debug!("Sending translation request to MyMemory");

        let response = self
            .client
            .get(&self.descriptor.endpoint)
            .query(&[("q", text), ("langpair", self.langpair.as_str())])
            .send()
            .await
            .map_err(network_error)?;

        read_body(response).await
    }

    fn parse(&self, raw: &str) -> Result<String> {
        let json: Value = serde_json::from_str(raw)?;

        // Quota warnings come back as HTTP 200 with the warning as "translation"
        if let Some(status) = response_status(&json) {
            if status != 200 {
                return Err(TranslationError::ApiError {
                    status: u16::try_from(status).unwrap_or(u16::MAX),
                    message: json["responseDetails"].as_str().unwrap_or_default().to_string(),
                });
            }
        }

        json["responseData"]["translatedText"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| TranslationError::InvalidResponseError {
                message: "No translatedText in responseData".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::default_providers;
    use crate::core::models::ProviderKind;

    fn provider() -> MyMemoryProvider {
        let descriptor = default_providers()
            .into_iter()
            .find(|p| p.kind == ProviderKind::MyMemory)
            .unwrap();
        MyMemoryProvider::new(reqwest::Client::new(), descriptor, "en", "vi")
    }

    #[test]
    fn test_langpair() {
        assert_eq!(provider().langpair(), "en|vi");
    }

    #[test]
    fn test_parse_nested_field() {
        let raw = r#"{"responseData":{"translatedText":"Bóng đá Việt Nam","match":0.98},"responseStatus":200,"matches":[]}"#;
        assert_eq!(provider().parse(raw).unwrap(), "Bóng đá Việt Nam");
    }

    #[test]
    fn test_parse_quota_warning_is_error() {
        let raw = r#"{"responseData":{"translatedText":"MYMEMORY WARNING: YOU USED ALL AVAILABLE FREE TRANSLATIONS FOR TODAY"},"responseDetails":"quota","responseStatus":"429"}"#;
        match provider().parse(raw) {
            Err(TranslationError::ApiError { status, .. }) => assert_eq!(status, 429),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_parse_out_of_range_status_saturates() {
        let raw = r#"{"responseData":{"translatedText":"x"},"responseStatus":70000}"#;
        match provider().parse(raw) {
            Err(TranslationError::ApiError { status, .. }) => assert_eq!(status, u16::MAX),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_parse_missing_field() {
        assert!(provider().parse(r#"{"responseData":{}}"#).is_err());
    }
}

//! Google Translate free `gtx` endpoint

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::{network_error, read_body, TranslationProvider, BROWSER_USER_AGENT};
use crate::core::errors::{Result, TranslationError};
use crate::core::models::ProviderDescriptor;

/// GET `?client=gtx&sl=auto&tl=<target>&dt=t&q=<text>`.
///
/// The body is a nested array; `body[0]` holds one `[translated, original,
/// ...]` entry per sentence, concatenated in order.
#[derive(Debug, Clone)]
pub struct GoogleProvider {
    client: reqwest::Client,
    descriptor: ProviderDescriptor,
    target_lang: String,
}

impl GoogleProvider {
    /// Provider translating into `target_lang`
    pub fn new(client: reqwest::Client, descriptor: ProviderDescriptor, target_lang: &str) -> Self {
        Self {
            client,
            descriptor,
            target_lang: target_lang.to_string(),
        }
    }
}

#[async_trait]
impl TranslationProvider for GoogleProvider {
    fn descriptor(&self) -> &ProviderDescriptor {
        &self.descriptor
    }

    async fn fetch(&self, text: &str) -> Result<String> {
        debug!("Sending translation request to Google Translate");

        let response = self
            .client
            .get(&self.descriptor.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", self.target_lang.as_str()),
                ("dt", "t"),
                ("q", text),
            ])
            .header(reqwest::header::USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .await
            .map_err(network_error)?;

        read_body(response).await
    }

    fn parse(&self, raw: &str) -> Result<String> {
        let json: Value = serde_json::from_str(raw)?;

        let segments = json
            .get(0)
            .and_then(Value::as_array)
            .ok_or_else(|| TranslationError::InvalidResponseError {
                message: "Missing segment array".to_string(),
            })?;

        Ok(segments
            .iter()
            .filter_map(|segment| segment.get(0).and_then(Value::as_str))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::default_providers;
    use crate::core::models::ProviderKind;

    fn provider() -> GoogleProvider {
        let descriptor = default_providers()
            .into_iter()
            .find(|p| p.kind == ProviderKind::Google)
            .unwrap();
        GoogleProvider::new(reqwest::Client::new(), descriptor, "vi")
    }

    #[test]
    fn test_parse_concatenates_segments() {
        let raw = r#"[[["Kinh tế Việt Nam tăng trưởng. ","Vietnam economy grows. ",null,null,10],["Xuất khẩu tăng.","Exports rise.",null,null,10]],null,"en"]"#;
        assert_eq!(
            provider().parse(raw).unwrap(),
            "Kinh tế Việt Nam tăng trưởng. Xuất khẩu tăng."
        );
    }

    #[test]
    fn test_parse_skips_null_segments() {
        let raw = r#"[[[null,"x"],["Xin chào","Hello"]],null,"en"]"#;
        assert_eq!(provider().parse(raw).unwrap(), "Xin chào");
    }

    #[test]
    fn test_parse_rejects_malformed_body() {
        assert!(provider().parse(r#"{"error":"blocked"}"#).is_err());
        assert!(provider().parse("<html>").is_err());
    }

    #[test]
    fn test_descriptor_limits() {
        let provider = provider();
        assert_eq!(provider.descriptor().max_input_chars, 500);
        assert_eq!(provider.descriptor().timeout_ms, 5000);
    }
}

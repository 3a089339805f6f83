//! Network translation providers
//!
//! Every backend speaks its own protocol, so each one owns both halves of
//! the exchange: [`TranslationProvider::fetch`] issues the request and
//! returns the raw body, [`TranslationProvider::parse`] turns that body into
//! translated text.

use async_trait::async_trait;
use tracing::debug;

use crate::core::config::TranslatorConfig;
use crate::core::errors::{Result, TranslationError};
use crate::core::models::{ProviderDescriptor, ProviderKind};

pub mod google;
pub mod libre;
pub mod mymemory;

pub use google::GoogleProvider;
pub use libre::LibreProvider;
pub use mymemory::MyMemoryProvider;

/// Browser-like identification; the public endpoints block bare clients
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// One translation backend
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Priority, endpoint, limits
    fn descriptor(&self) -> &ProviderDescriptor;

    /// Backend family
    fn kind(&self) -> ProviderKind {
        self.descriptor().kind
    }

    /// Send `text` (already truncated) and return the raw response body
    async fn fetch(&self, text: &str) -> Result<String>;

    /// Extract the translated string from a raw response body
    fn parse(&self, raw: &str) -> Result<String>;
}

/// Turn a response into its body, mapping non-success statuses to errors
pub(crate) async fn read_body(response: reqwest::Response) -> Result<String> {
    let status = response.status();

    if status.is_success() {
        return response
            .text()
            .await
            .map_err(|e| TranslationError::NetworkError {
                message: e.to_string(),
            });
    }

    let status_code = status.as_u16();
    let error_text = response.text().await.unwrap_or_default();
    Err(TranslationError::ApiError {
        status: status_code,
        message: error_text.chars().take(200).collect(),
    })
}

pub(crate) fn network_error(err: reqwest::Error) -> TranslationError {
    TranslationError::NetworkError {
        message: err.to_string(),
    }
}

/// Build the enabled providers from configuration, sorted by priority
pub fn build_providers(
    config: &TranslatorConfig,
    client: &reqwest::Client,
) -> Vec<Box<dyn TranslationProvider>> {
    config
        .get_enabled_providers()
        .into_iter()
        .map(|descriptor| {
            debug!(
                "Registering provider {} (priority {})",
                descriptor.kind, descriptor.priority
            );
            let descriptor = descriptor.clone();
            let provider: Box<dyn TranslationProvider> = match descriptor.kind {
                ProviderKind::Google => Box::new(GoogleProvider::new(
                    client.clone(),
                    descriptor,
                    &config.target_lang,
                )),
                ProviderKind::MyMemory => Box::new(MyMemoryProvider::new(
                    client.clone(),
                    descriptor,
                    &config.source_lang,
                    &config.target_lang,
                )),
                ProviderKind::Libre => Box::new(LibreProvider::new(
                    client.clone(),
                    descriptor,
                    &config.target_lang,
                )),
            };
            provider
        })
        .collect()
}

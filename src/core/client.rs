//! Async translation client: cache, rate limiter and provider chain per fragment

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::core::cache::TranslationCache;
use crate::core::chain::ProviderChain;
use crate::core::config::TranslatorConfig;
use crate::core::errors::Result;
use crate::core::models::{TranslationOrigin, TranslationUnit};
use crate::core::rate_limiter::RateLimiter;

/// Upper bound for a single HTTP exchange; providers cut earlier on their own
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Process-wide HTTP client for providers and the news source
pub fn build_http_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .pool_idle_timeout(Some(Duration::from_secs(30)))
        .pool_max_idle_per_host(10)
        .build()?)
}

/// Translates fragments through the shared cache and rate limiter.
///
/// Clones share the cache and the permit pool.
#[derive(Debug, Clone)]
pub struct AsyncTranslator {
    chain: Arc<ProviderChain>,
    cache: Arc<TranslationCache>,
    rate_limiter: RateLimiter,
}

impl AsyncTranslator {
    /// Create a translator with its own cache, limiter and HTTP client
    pub fn new(config: &TranslatorConfig) -> Result<Self> {
        Self::with_client(config, &build_http_client()?)
    }

    /// Create a translator whose providers send through `client`
    pub fn with_client(config: &TranslatorConfig, client: &reqwest::Client) -> Result<Self> {
        config.validate()?;

        let chain = ProviderChain::from_config(config, client)?;
        debug!("Provider chain ready: {:?}", chain);

        Ok(Self::with_components(
            Arc::new(chain),
            Arc::new(TranslationCache::new()),
            RateLimiter::new(config.max_concurrent, config.min_request_interval()),
        ))
    }

    /// Assemble from explicitly constructed parts
    pub fn with_components(
        chain: Arc<ProviderChain>,
        cache: Arc<TranslationCache>,
        rate_limiter: RateLimiter,
    ) -> Self {
        Self {
            chain,
            cache,
            rate_limiter,
        }
    }

    /// Create from environment
    pub fn from_env() -> Result<Self> {
        let config = TranslatorConfig::load()?;
        Self::new(&config)
    }

    /// Run one fragment through cache, skip check, limiter and chain
    pub async fn translate_unit(&self, text: &str) -> TranslationUnit {
        let unit = TranslationUnit::new(text);

        if text.trim().is_empty() {
            return unit.resolve(String::new(), TranslationOrigin::Skipped);
        }

        if let Some(cached) = self.cache.get(text) {
            debug!("Using cached translation");
            return unit.resolve(cached, TranslationOrigin::Cache);
        }

        if !self.chain.needs_translation(text) {
            return unit.resolve(text.to_string(), TranslationOrigin::Skipped);
        }

        let permit = match self.rate_limiter.acquire().await {
            Ok(permit) => permit,
            Err(e) => {
                warn!("Could not acquire rate limiter permit: {}", e);
                return unit.resolve(text.to_string(), TranslationOrigin::Original);
            }
        };
        let (translated, origin) = self.chain.translate_detailed(text).await;
        permit.release();

        if !translated.trim().is_empty() {
            self.cache.put(text, translated.clone());
        }

        unit.resolve(translated, origin)
    }

    /// Translate a single fragment
    pub async fn translate_text(&self, text: &str) -> String {
        self.translate_unit(text).await.into_text()
    }

    /// Translate title and description concurrently
    pub async fn translate_article(
        &self,
        title: Option<&str>,
        description: Option<&str>,
    ) -> (TranslationUnit, TranslationUnit) {
        let title = title.unwrap_or_default();
        let description = description.unwrap_or_default();

        tokio::join!(self.translate_unit(title), self.translate_unit(description))
    }

    /// Shared cache
    pub fn cache(&self) -> &Arc<TranslationCache> {
        &self.cache
    }

    /// Shared permit pool
    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }

    /// Provider chain
    pub fn chain(&self) -> &ProviderChain {
        &self.chain
    }
}

//! Ordered provider fallback chain

use tokio::time::timeout;
use tracing::{debug, warn};

use crate::core::config::TranslatorConfig;
use crate::core::detector::LanguageDetector;
use crate::core::dictionary::FallbackDictionary;
use crate::core::errors::{Result, TranslationError};
use crate::core::models::TranslationOrigin;
use crate::providers::{build_providers, TranslationProvider};

/// Result of one provider attempt
#[derive(Debug)]
pub enum AttemptOutcome {
    /// Non-empty text that differs from the input
    Translated(String),
    /// Provider echoed the input back
    Unchanged,
    /// Provider answered with nothing usable
    Empty,
    /// Per-provider timeout elapsed; carries `TranslationError::TimeoutError`
    TimedOut(TranslationError),
    /// Network, status or parse failure
    Failed(TranslationError),
}

impl AttemptOutcome {
    /// Only a real translation stops the chain
    pub fn into_translation(self) -> Option<String> {
        match self {
            AttemptOutcome::Translated(text) => Some(text),
            _ => None,
        }
    }
}

/// Walks providers in priority order, then the fallback dictionary.
pub struct ProviderChain {
    providers: Vec<Box<dyn TranslationProvider>>,
    dictionary: FallbackDictionary,
    detector: LanguageDetector,
    min_text_len: usize,
}

impl std::fmt::Debug for ProviderChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderChain")
            .field(
                "providers",
                &self.providers.iter().map(|p| p.kind()).collect::<Vec<_>>(),
            )
            .field("dictionary_entries", &self.dictionary.len())
            .field("min_text_len", &self.min_text_len)
            .finish()
    }
}

impl ProviderChain {
    /// Create a chain; providers are ordered by their descriptor priority
    pub fn new(
        mut providers: Vec<Box<dyn TranslationProvider>>,
        dictionary: FallbackDictionary,
        min_text_len: usize,
    ) -> Self {
        providers.sort_by_key(|p| p.descriptor().priority);
        Self {
            providers,
            dictionary,
            detector: LanguageDetector::new(),
            min_text_len,
        }
    }

    /// Build the configured HTTP providers plus the built-in dictionary
    pub fn from_config(config: &TranslatorConfig, client: &reqwest::Client) -> Result<Self> {
        Ok(Self::new(
            build_providers(config, client),
            FallbackDictionary::load()?,
            config.min_text_len,
        ))
    }

    /// Number of network providers
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// `false` for blank, too-short or already-Vietnamese text
    pub fn needs_translation(&self, text: &str) -> bool {
        if text.trim().is_empty() || text.chars().count() < self.min_text_len {
            return false;
        }
        !self.detector.is_target_language(text)
    }

    /// Run one provider under its own timeout
    pub async fn attempt(&self, provider: &dyn TranslationProvider, text: &str) -> AttemptOutcome {
        let descriptor = provider.descriptor();
        let input = descriptor.truncate(text);

        let raw = match timeout(descriptor.timeout(), provider.fetch(input)).await {
            Err(_) => {
                return AttemptOutcome::TimedOut(TranslationError::TimeoutError {
                    timeout_ms: descriptor.timeout_ms,
                })
            }
            Ok(Err(e)) => return AttemptOutcome::Failed(e),
            Ok(Ok(raw)) => raw,
        };

        match provider.parse(&raw) {
            Err(e) => AttemptOutcome::Failed(e),
            Ok(translated) if translated.trim().is_empty() => AttemptOutcome::Empty,
            Ok(translated) if translated == text || translated == input => {
                AttemptOutcome::Unchanged
            }
            Ok(translated) => AttemptOutcome::Translated(translated),
        }
    }

    /// Translate `text`, reporting where the result came from
    pub async fn translate_detailed(&self, text: &str) -> (String, TranslationOrigin) {
        if !self.needs_translation(text) {
            return (text.to_string(), TranslationOrigin::Skipped);
        }

        for provider in &self.providers {
            let kind = provider.kind();
            match self.attempt(provider.as_ref(), text).await {
                AttemptOutcome::Translated(translated) => {
                    debug!("{} translated {} chars", kind, text.chars().count());
                    return (translated, TranslationOrigin::Provider(kind));
                }
                AttemptOutcome::Unchanged => debug!("{} returned the input unchanged", kind),
                AttemptOutcome::Empty => debug!("{} returned an empty translation", kind),
                AttemptOutcome::TimedOut(e) => warn!("{}: {}", kind, e),
                AttemptOutcome::Failed(e) => warn!("{} failed: {}", kind, e),
            }
        }

        let substituted = self.dictionary.substitute(text);
        if substituted != text && !substituted.trim().is_empty() {
            debug!("Fallback dictionary applied");
            return (substituted, TranslationOrigin::Dictionary);
        }

        debug!("No translation available, keeping original text");
        (text.to_string(), TranslationOrigin::Original)
    }

    /// Translate `text`; the original comes back when nothing else works
    pub async fn translate(&self, text: &str) -> String {
        self.translate_detailed(text).await.0
    }
}

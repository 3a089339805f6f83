//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

use crate::core::errors::{Result, TranslationError};
use crate::core::models::{ProviderDescriptor, ProviderKind};

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "VNT";

/// Configuration for the translation engine and the news source
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Target language code
    pub target_lang: String,
    /// Source language for providers that need an explicit pair
    pub source_lang: String,
    /// Permits in the shared rate limiter
    pub max_concurrent: usize,
    /// Minimum spacing between provider dispatches
    pub min_request_interval_ms: u64,
    /// Articles beyond this are dropped from a batch
    pub max_articles: usize,
    /// Articles translated concurrently per sub-batch
    pub batch_size: usize,
    /// Pause between sub-batches
    pub batch_delay_ms: u64,
    /// Shorter fragments are not translated
    pub min_text_len: usize,
    /// Fixed offset applied to source timestamps
    pub utc_offset_hours: i32,
    /// Marker appended to localized timestamps
    pub local_zone_label: String,
    /// Provider chain; empty means the built-in defaults
    pub providers: Vec<ProviderDescriptor>,
    /// NewsAPI-compatible search endpoint
    pub news_api_endpoint: String,
    /// NewsAPI key
    pub news_api_key: String,
    /// Articles requested per page
    pub news_page_size: usize,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            target_lang: "vi".to_string(),
            source_lang: "en".to_string(),
            max_concurrent: 5,
            min_request_interval_ms: 100,
            max_articles: 30,
            batch_size: 5,
            batch_delay_ms: 500,
            min_text_len: 3,
            utc_offset_hours: 7,
            local_zone_label: "Giờ VN".to_string(),
            providers: vec![],
            news_api_endpoint: "https://newsapi.org/v2/everything".to_string(),
            news_api_key: String::new(),
            news_page_size: 100,
        }
    }
}

/// Default provider table: (kind, priority, endpoint, timeout ms, max chars, enabled)
const DEFAULT_PROVIDERS: &[(ProviderKind, u32, &str, u64, usize, bool)] = &[
    (
        ProviderKind::Google,
        1,
        "https://translate.googleapis.com/translate_a/single",
        5000,
        500,
        true,
    ),
    (
        ProviderKind::MyMemory,
        2,
        "https://api.mymemory.translated.net/get",
        8000,
        400,
        true,
    ),
    // Public instance is quota-limited; opt in via config
    (
        ProviderKind::Libre,
        3,
        "https://libretranslate.com/translate",
        10000,
        1000,
        false,
    ),
];

/// Default provider descriptors
pub fn default_providers() -> Vec<ProviderDescriptor> {
    DEFAULT_PROVIDERS
        .iter()
        .map(
            |(kind, priority, endpoint, timeout_ms, max_input_chars, enabled)| ProviderDescriptor {
                kind: *kind,
                priority: *priority,
                endpoint: endpoint.to_string(),
                timeout_ms: *timeout_ms,
                max_input_chars: *max_input_chars,
                enabled: *enabled,
            },
        )
        .collect()
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    let key = format!("{}_{}", ENV_PREFIX, name);
    match std::env::var(&key) {
        Ok(raw) => raw.parse::<T>().map_err(|e| TranslationError::ConfigError {
            message: format!("{}: {}", key, e),
        }),
        Err(_) => Ok(default),
    }
}

impl TranslatorConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            target_lang: env_or("TARGET_LANG", defaults.target_lang)?,
            source_lang: env_or("SOURCE_LANG", defaults.source_lang)?,
            max_concurrent: env_or("MAX_CONCURRENT", defaults.max_concurrent)?,
            min_request_interval_ms: env_or(
                "MIN_REQUEST_INTERVAL_MS",
                defaults.min_request_interval_ms,
            )?,
            max_articles: env_or("MAX_ARTICLES", defaults.max_articles)?,
            batch_size: env_or("BATCH_SIZE", defaults.batch_size)?,
            batch_delay_ms: env_or("BATCH_DELAY_MS", defaults.batch_delay_ms)?,
            min_text_len: env_or("MIN_TEXT_LEN", defaults.min_text_len)?,
            utc_offset_hours: env_or("UTC_OFFSET_HOURS", defaults.utc_offset_hours)?,
            local_zone_label: env_or("LOCAL_ZONE_LABEL", defaults.local_zone_label)?,
            providers: vec![],
            news_api_endpoint: env_or("NEWS_API_ENDPOINT", defaults.news_api_endpoint)?,
            news_api_key: std::env::var("NEWS_API_KEY")
                .or_else(|_| std::env::var(format!("{}_NEWS_API_KEY", ENV_PREFIX)))
                .unwrap_or_default(),
            news_page_size: env_or("NEWS_PAGE_SIZE", defaults.news_page_size)?,
        })
    }

    /// Load configuration with default providers
    pub fn load() -> Result<Self> {
        let mut config = Self::from_env()?;
        config.fill_default_providers();
        Ok(config)
    }

    /// Load from a JSON or TOML file, with `VNT_*` environment overrides on top
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?;

        let mut config: Self = settings.try_deserialize()?;
        config.fill_default_providers();
        Ok(config)
    }

    /// Save configuration to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn fill_default_providers(&mut self) {
        if self.providers.is_empty() {
            self.providers = default_providers();
            info!("Loaded {} default providers", self.providers.len());
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: &str| {
            Err(TranslationError::ConfigError {
                message: message.to_string(),
            })
        };

        if self.target_lang.trim().is_empty() {
            return invalid("target_lang is required");
        }

        if self.max_concurrent == 0 {
            return invalid("max_concurrent must be greater than 0");
        }

        if self.batch_size == 0 {
            return invalid("batch_size must be greater than 0");
        }

        if self.max_articles == 0 {
            return invalid("max_articles must be greater than 0");
        }

        if self.get_enabled_providers().is_empty() {
            warn!("No providers enabled, only the fallback dictionary will be used");
        }

        Ok(())
    }

    /// Enabled providers sorted by priority
    pub fn get_enabled_providers(&self) -> Vec<&ProviderDescriptor> {
        let mut providers: Vec<&ProviderDescriptor> =
            self.providers.iter().filter(|p| p.enabled).collect();
        providers.sort_by_key(|p| p.priority);
        providers
    }

    /// Find provider by kind
    pub fn find_provider(&self, kind: ProviderKind) -> Option<&ProviderDescriptor> {
        self.providers.iter().find(|p| p.kind == kind)
    }

    /// Minimum dispatch spacing
    pub fn min_request_interval(&self) -> Duration {
        Duration::from_millis(self.min_request_interval_ms)
    }

    /// Pause between sub-batches
    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_validation() {
        let mut config = TranslatorConfig::default();
        config.providers = default_providers();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_zero_permits() {
        let config = TranslatorConfig {
            max_concurrent: 0,
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_batch_size() {
        let config = TranslatorConfig {
            batch_size: 0,
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_enabled_providers_in_priority_order() {
        let mut config = TranslatorConfig::default();
        config.providers = default_providers();
        config.providers.reverse();

        let kinds: Vec<ProviderKind> = config
            .get_enabled_providers()
            .iter()
            .map(|p| p.kind)
            .collect();

        // Libre is disabled by default
        assert_eq!(kinds, vec![ProviderKind::Google, ProviderKind::MyMemory]);
        assert_eq!(config.find_provider(ProviderKind::Libre).map(|p| p.max_input_chars), Some(1000));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{ "max_concurrent": 2, "batch_size": 3, "local_zone_label": "ICT" }}"#
        )
        .unwrap();

        let config = TranslatorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.max_concurrent, 2);
        assert_eq!(config.batch_size, 3);
        assert_eq!(config.local_zone_label, "ICT");
        assert_eq!(config.max_articles, 30);
        assert_eq!(config.providers.len(), 3);
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("translator.json");

        let mut config = TranslatorConfig::default();
        config.providers = default_providers();
        config.batch_delay_ms = 250;
        config.to_file(&path).unwrap();

        let loaded = TranslatorConfig::from_file(&path).unwrap();
        assert_eq!(loaded.batch_delay(), Duration::from_millis(250));
        assert_eq!(loaded.providers, config.providers);
    }
}

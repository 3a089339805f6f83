//! VTV News Translator - Vietnamese-localized news aggregation
//!
//! This library provides a translation engine for article headlines and
//! descriptions: a shared cache and rate limiter in front of an ordered
//! chain of translation providers, with a phrase dictionary as last resort.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod core;
pub mod processors;
pub mod providers;

// Re-export key types for convenience
pub use core::{
    batch::{BatchReport, BatchTranslator},
    cache::TranslationCache,
    chain::{AttemptOutcome, ProviderChain},
    client::AsyncTranslator,
    config::TranslatorConfig,
    detector::LanguageDetector,
    dictionary::FallbackDictionary,
    errors::TranslationError,
    models::{Article, NewsCategory, ProviderDescriptor, ProviderKind, SortBy, TranslationOrigin, TranslationUnit},
    rate_limiter::{RatePermit, RateLimiter},
    timestamp::LocalTimeConverter,
};

pub use processors::{
    feed::{FeedRequest, NewsFeed, NewsPage},
    news_source::{ArticleSource, NewsApiSource},
};

pub use providers::TranslationProvider;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

//! Upstream article source

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::core::config::TranslatorConfig;
use crate::core::errors::{Result, TranslationError};
use crate::core::models::{Article, SortBy};

/// Upper bound for one search request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Supplies articles for a search query
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// `Ok(None)` or an empty list both mean "nothing found"
    async fn fetch_articles(
        &self,
        query: &str,
        from: Option<NaiveDate>,
        sort_by: SortBy,
        page_size: usize,
    ) -> Result<Option<Vec<Article>>>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsApiResponse {
    status: String,
    #[serde(default)]
    total_results: Option<u64>,
    #[serde(default)]
    articles: Option<Vec<Article>>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// NewsAPI-compatible `/v2/everything` client
#[derive(Debug, Clone)]
pub struct NewsApiSource {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl NewsApiSource {
    /// Source for `endpoint`, authenticated with `api_key`
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    /// Source configured from `config`, sending through the shared `client`
    pub fn from_config(config: &TranslatorConfig, client: reqwest::Client) -> Self {
        if config.news_api_key.is_empty() {
            warn!("NEWS_API_KEY is not set; requests will likely be rejected");
        }

        Self::new(client, &config.news_api_endpoint, &config.news_api_key)
    }

    /// Decode a NewsAPI body
    pub fn parse_response(body: &str) -> Result<Option<Vec<Article>>> {
        let response: NewsApiResponse = serde_json::from_str(body)?;

        if response.status != "ok" {
            return Err(TranslationError::NewsSourceError {
                message: format!(
                    "{}: {}",
                    response.code.unwrap_or_else(|| response.status.clone()),
                    response.message.unwrap_or_default()
                ),
            });
        }

        debug!(
            "News source returned {} articles (total {:?})",
            response.articles.as_ref().map(Vec::len).unwrap_or(0),
            response.total_results
        );
        Ok(response.articles)
    }
}

#[async_trait]
impl ArticleSource for NewsApiSource {
    async fn fetch_articles(
        &self,
        query: &str,
        from: Option<NaiveDate>,
        sort_by: SortBy,
        page_size: usize,
    ) -> Result<Option<Vec<Article>>> {
        let mut params = vec![
            ("q", query.to_string()),
            ("sortBy", sort_by.as_str().to_string()),
            ("pageSize", page_size.to_string()),
            ("language", "en".to_string()),
        ];
        if let Some(from) = from {
            params.push(("from", from.format("%Y-%m-%d").to_string()));
        }

        let response = self
            .client
            .get(&self.endpoint)
            .query(&params)
            .header("X-Api-Key", &self.api_key)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| TranslationError::NewsSourceError {
                message: e.to_string(),
            })?;

        // Error bodies carry the reason, so decode them too
        let body = response.text().await?;
        Self::parse_response(&body)
    }
}

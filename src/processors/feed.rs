//! News feed: fetch, translate and summarize one page of articles

use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::core::batch::BatchTranslator;
use crate::core::models::{Article, NewsCategory, SortBy};
use crate::processors::news_source::ArticleSource;

/// Shown when the source has nothing for the query
pub const NO_ARTICLES_MESSAGE: &str = "Không tìm thấy bài viết phù hợp. Vui lòng thử lại sau.";

/// Shown when a reader's own search has no results
pub const NO_SEARCH_RESULTS_MESSAGE: &str = "Không tìm thấy kết quả phù hợp với từ khóa tìm kiếm.";

/// Query used when the reader submits a blank search
pub const FALLBACK_QUERY: &str = "vietnam";

/// What the reader asked for
#[derive(Debug, Clone)]
pub struct FeedRequest {
    /// Tab the page belongs to
    pub category: NewsCategory,
    /// `None` uses the category's default query; `Some` is a reader search
    pub query: Option<String>,
    /// Only articles published since this day
    pub from: Option<NaiveDate>,
    /// Ordering passed to the source
    pub sort_by: SortBy,
}

impl FeedRequest {
    /// Category page with the default query
    pub fn category(category: NewsCategory) -> Self {
        Self {
            category,
            query: None,
            from: None,
            sort_by: SortBy::Relevancy,
        }
    }

    /// Turn the request into a search for `query`
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Restrict to articles since `from`
    pub fn with_from(mut self, from: NaiveDate) -> Self {
        self.from = Some(from);
        self
    }

    /// Set the ordering
    pub fn with_sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = sort_by;
        self
    }

    /// `true` when the reader typed a query
    pub fn is_search(&self) -> bool {
        self.query.is_some()
    }

    /// Message for an empty result
    pub fn no_results_message(&self) -> &'static str {
        if self.is_search() {
            NO_SEARCH_RESULTS_MESSAGE
        } else {
            NO_ARTICLES_MESSAGE
        }
    }

    /// Message for a failed fetch
    pub fn error_message(&self, err: &dyn std::fmt::Display) -> String {
        if self.is_search() {
            format!("Đã xảy ra lỗi khi tìm kiếm: {}", err)
        } else {
            format!("Đã xảy ra lỗi khi tải dữ liệu: {}", err)
        }
    }

    /// Effective search query
    pub fn resolved_query(&self) -> String {
        match &self.query {
            None => self.category.default_query().to_string(),
            Some(q) if q.trim().is_empty() => FALLBACK_QUERY.to_string(),
            Some(q) => q.trim().to_string(),
        }
    }
}

/// Everything the rendering layer needs for one page
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsPage {
    /// Translated articles in source order
    pub articles: Vec<Article>,
    /// Empty unless the page has nothing to show
    pub error_message: String,
    /// Category slug
    pub active_tab: String,
    /// Vietnamese category title
    pub category_name: String,
    /// Query actually sent to the source
    pub query: String,
    /// `YYYY-MM-DD`, or empty
    pub from_date: String,
    /// Ordering used
    pub sort_by: SortBy,
    /// Fetch plus translation time
    pub load_time_ms: u64,
    /// Articles on the page
    pub total_articles: usize,
    /// Articles with a non-empty translated title
    pub translated_count: usize,
}

impl NewsPage {
    fn empty(request: &FeedRequest, query: String) -> Self {
        Self {
            articles: Vec::new(),
            error_message: String::new(),
            active_tab: request.category.slug().to_string(),
            category_name: request.category.display_name().to_string(),
            query,
            from_date: request
                .from
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            sort_by: request.sort_by,
            load_time_ms: 0,
            total_articles: 0,
            translated_count: 0,
        }
    }

    /// `true` when `error_message` is set
    pub fn has_error(&self) -> bool {
        !self.error_message.is_empty()
    }
}

/// Combines the article source with the batch translator
pub struct NewsFeed {
    source: Arc<dyn ArticleSource>,
    translator: BatchTranslator,
    page_size: usize,
}

impl NewsFeed {
    /// Feed requesting `page_size` articles per load
    pub fn new(source: Arc<dyn ArticleSource>, translator: BatchTranslator, page_size: usize) -> Self {
        Self {
            source,
            translator,
            page_size,
        }
    }

    /// Load one page; failures end up in `error_message`, never as `Err`
    pub async fn load(&self, request: &FeedRequest) -> NewsPage {
        let started = Instant::now();
        let query = request.resolved_query();
        let mut page = NewsPage::empty(request, query.clone());

        let fetched = self
            .source
            .fetch_articles(&query, request.from, request.sort_by, self.page_size)
            .await;

        let articles = match fetched {
            Ok(Some(articles)) if !articles.is_empty() => articles,
            Ok(_) => {
                warn!(
                    "No articles for category {} with query '{}'",
                    page.category_name, query
                );
                page.error_message = request.no_results_message().to_string();
                page.load_time_ms = started.elapsed().as_millis() as u64;
                return page;
            }
            Err(e) => {
                warn!("Failed to load news for {}: {}", page.category_name, e);
                page.error_message = request.error_message(&e);
                page.load_time_ms = started.elapsed().as_millis() as u64;
                return page;
            }
        };

        page.articles = self.translator.translate_all(articles).await;
        if page.articles.is_empty() {
            page.error_message = request.no_results_message().to_string();
        }

        page.total_articles = page.articles.len();
        page.translated_count = page
            .articles
            .iter()
            .filter(|a| !a.translated_title.is_empty())
            .count();
        page.load_time_ms = started.elapsed().as_millis() as u64;

        info!(
            "Loaded {} articles for {} in {}ms",
            page.total_articles, page.category_name, page.load_time_ms
        );
        page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cache::TranslationCache;
    use crate::core::chain::tests::{chain_of, Script, ScriptedProvider};
    use crate::core::client::AsyncTranslator;
    use crate::core::config::TranslatorConfig;
    use crate::core::errors::{Result, TranslationError};
    use crate::core::models::ProviderKind;
    use crate::core::rate_limiter::RateLimiter;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Canned source that records the last query
    struct StaticSource {
        reply: Mutex<Option<Result<Option<Vec<Article>>>>>,
        last_query: Mutex<String>,
    }

    impl StaticSource {
        fn new(reply: Result<Option<Vec<Article>>>) -> Arc<Self> {
            Arc::new(Self {
                reply: Mutex::new(Some(reply)),
                last_query: Mutex::new(String::new()),
            })
        }
    }

    #[async_trait]
    impl ArticleSource for StaticSource {
        async fn fetch_articles(
            &self,
            query: &str,
            _from: Option<NaiveDate>,
            _sort_by: SortBy,
            _page_size: usize,
        ) -> Result<Option<Vec<Article>>> {
            *self.last_query.lock().unwrap() = query.to_string();
            self.reply.lock().unwrap().take().unwrap_or(Ok(None))
        }
    }

    fn feed(source: Arc<StaticSource>) -> NewsFeed {
        let translator = AsyncTranslator::with_components(
            Arc::new(chain_of(vec![ScriptedProvider::new(
                ProviderKind::Google,
                1,
                Script::Reply("Tin đã dịch".into()),
            )])),
            Arc::new(TranslationCache::new()),
            RateLimiter::new(5, Duration::ZERO),
        );
        let config = TranslatorConfig::default();
        NewsFeed::new(source, BatchTranslator::new(translator, &config), 100)
    }

    #[test]
    fn test_resolved_query() {
        assert_eq!(
            FeedRequest::category(NewsCategory::KinhTe).resolved_query(),
            "vietnam economy"
        );
        assert_eq!(
            FeedRequest::category(NewsCategory::Home).with_query("   ").resolved_query(),
            "vietnam"
        );
        assert_eq!(
            FeedRequest::category(NewsCategory::Home).with_query(" hanoi metro ").resolved_query(),
            "hanoi metro"
        );
    }

    #[tokio::test]
    async fn test_load_translates_articles() {
        let source = StaticSource::new(Ok(Some(vec![Article::new("Hello world", "Some text")
            .with_published_at("2024-01-01T00:00:00Z")])));
        let page = feed(source.clone())
            .load(&FeedRequest::category(NewsCategory::TheThao))
            .await;

        assert!(!page.has_error());
        assert_eq!(*source.last_query.lock().unwrap(), "vietnam sports");
        assert_eq!(page.category_name, "Thể Thao");
        assert_eq!(page.active_tab, "thethao");
        assert_eq!(page.total_articles, 1);
        assert_eq!(page.translated_count, 1);
        assert_eq!(page.articles[0].translated_title, "Tin đã dịch");
        assert_eq!(page.articles[0].vn_published_at, "2024-01-01 07:00:00 (Giờ VN)");
    }

    #[tokio::test]
    async fn test_no_results_sets_message() {
        for reply in [Ok(None), Ok(Some(Vec::new()))] {
            let page = feed(StaticSource::new(reply))
                .load(&FeedRequest::category(NewsCategory::Home))
                .await;

            assert_eq!(page.error_message, NO_ARTICLES_MESSAGE);
            assert!(page.articles.is_empty());
        }
    }

    #[tokio::test]
    async fn test_search_uses_search_wording() {
        let page = feed(StaticSource::new(Ok(None)))
            .load(&FeedRequest::category(NewsCategory::Home).with_query("hanoi metro"))
            .await;
        assert_eq!(page.error_message, NO_SEARCH_RESULTS_MESSAGE);

        let source = StaticSource::new(Err(TranslationError::NewsSourceError {
            message: "rateLimited".to_string(),
        }));
        let page = feed(source)
            .load(&FeedRequest::category(NewsCategory::Home).with_query("hanoi metro"))
            .await;
        assert!(page.error_message.starts_with("Đã xảy ra lỗi khi tìm kiếm"));
        assert!(page.error_message.contains("rateLimited"));
    }

    #[tokio::test]
    async fn test_source_error_sets_message() {
        let source = StaticSource::new(Err(TranslationError::NewsSourceError {
            message: "rateLimited".to_string(),
        }));
        let page = feed(source).load(&FeedRequest::category(NewsCategory::Home)).await;

        assert!(page.error_message.starts_with("Đã xảy ra lỗi khi tải dữ liệu"));
        assert!(page.error_message.contains("rateLimited"));
    }
}

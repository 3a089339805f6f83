//! Batch translation of article lists

use futures::future::join_all;
use std::ops::Range;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::core::client::AsyncTranslator;
use crate::core::config::TranslatorConfig;
use crate::core::models::{Article, TranslationOrigin};
use crate::core::timestamp::LocalTimeConverter;

/// Summary of one `translate_all` pass
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Translated articles in input order
    pub articles: Vec<Article>,
    /// Sub-batches processed
    pub sub_batches: usize,
    /// Inter-batch pauses taken
    pub delays: usize,
    /// Fragments answered by a provider or the dictionary
    pub translated_fragments: usize,
    /// Fragments served from the cache
    pub cache_hits: usize,
    /// Blank, short or already-Vietnamese fragments
    pub skipped_fragments: usize,
}

/// Split `len` items into consecutive ranges of at most `batch_size`
pub fn plan_batches(len: usize, batch_size: usize) -> Vec<Range<usize>> {
    let batch_size = batch_size.max(1);
    (0..len)
        .step_by(batch_size)
        .map(|start| start..(start + batch_size).min(len))
        .collect()
}

/// Caps, partitions and paces article translation.
///
/// Sub-batches run one after another; inside a sub-batch every article is
/// translated concurrently, bounded by the shared rate limiter.
#[derive(Debug, Clone)]
pub struct BatchTranslator {
    translator: AsyncTranslator,
    converter: LocalTimeConverter,
    max_articles: usize,
    batch_size: usize,
    batch_delay: Duration,
}

impl BatchTranslator {
    /// Take batch limits and the timestamp offset from `config`
    pub fn new(translator: AsyncTranslator, config: &TranslatorConfig) -> Self {
        Self {
            translator,
            converter: LocalTimeConverter::new(
                config.utc_offset_hours,
                config.local_zone_label.clone(),
            ),
            max_articles: config.max_articles,
            batch_size: config.batch_size.max(1),
            batch_delay: config.batch_delay(),
        }
    }

    /// Underlying per-fragment translator
    pub fn translator(&self) -> &AsyncTranslator {
        &self.translator
    }

    /// Translate up to `max_articles` articles, preserving order
    pub async fn translate_all(&self, articles: Vec<Article>) -> Vec<Article> {
        self.translate_all_report(articles).await.articles
    }

    /// Same as [`translate_all`](Self::translate_all), with counters
    pub async fn translate_all_report(&self, articles: Vec<Article>) -> BatchReport {
        let capped = articles.len().min(self.max_articles);
        if articles.len() > capped {
            debug!("Capping {} articles to {}", articles.len(), capped);
        }

        let plan = plan_batches(capped, self.batch_size);
        let mut report = BatchReport {
            articles: Vec::with_capacity(capped),
            sub_batches: plan.len(),
            ..Default::default()
        };

        let mut pending = articles.into_iter().take(capped);
        for (index, range) in plan.iter().enumerate() {
            let batch: Vec<Article> = pending.by_ref().take(range.len()).collect();
            debug!("Translating sub-batch {}/{} ({} articles)", index + 1, plan.len(), batch.len());

            let results = join_all(batch.into_iter().map(|article| self.translate_one(article))).await;

            for (article, origins) in results {
                for origin in origins {
                    match origin {
                        TranslationOrigin::Cache => report.cache_hits += 1,
                        TranslationOrigin::Skipped => report.skipped_fragments += 1,
                        TranslationOrigin::Provider(_) | TranslationOrigin::Dictionary => {
                            report.translated_fragments += 1
                        }
                        TranslationOrigin::Original => {}
                    }
                }
                report.articles.push(article);
            }

            if index + 1 < plan.len() {
                sleep(self.batch_delay).await;
                report.delays += 1;
            }
        }

        info!(
            "Translated {} articles in {} sub-batches ({} fragments translated, {} cache hits)",
            report.articles.len(),
            report.sub_batches,
            report.translated_fragments,
            report.cache_hits
        );

        report
    }

    async fn translate_one(&self, mut article: Article) -> (Article, [TranslationOrigin; 2]) {
        let (title, description) = self
            .translator
            .translate_article(article.title.as_deref(), article.description.as_deref())
            .await;

        let origins = [title.origin, description.origin];
        article.translated_title = title.into_text();
        article.translated_description = description.into_text();
        article.vn_published_at = self.converter.convert(article.published_at.as_deref());

        (article, origins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cache::TranslationCache;
    use crate::core::chain::tests::{chain_of, Script, ScriptedProvider};
    use crate::core::models::ProviderKind;
    use crate::core::rate_limiter::RateLimiter;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use tokio::time::Instant;

    fn batch_translator(providers: Vec<ScriptedProvider>, permits: usize) -> BatchTranslator {
        let translator = AsyncTranslator::with_components(
            Arc::new(chain_of(providers)),
            Arc::new(TranslationCache::new()),
            RateLimiter::new(permits, Duration::ZERO),
        );
        BatchTranslator::new(translator, &TranslatorConfig::default())
    }

    fn articles(n: usize) -> Vec<Article> {
        (0..n)
            .map(|i| {
                Article::new(format!("Xyzzy item {}", i), format!("Plugh detail {}", i))
                    .with_published_at("2024-01-01T00:00:00Z")
            })
            .collect()
    }

    #[test]
    fn test_plan_batches() {
        assert_eq!(plan_batches(7, 5), vec![0..5, 5..7]);
        assert_eq!(plan_batches(10, 5), vec![0..5, 5..10]);
        assert!(plan_batches(0, 5).is_empty());
        assert_eq!(plan_batches(2, 0), vec![0..1, 1..2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_seven_articles_two_sub_batches_one_delay() {
        let translator = batch_translator(
            vec![ScriptedProvider::new(ProviderKind::Google, 1, Script::Reply("Bản tin".into()))],
            5,
        );

        let started = Instant::now();
        let report = translator.translate_all_report(articles(7)).await;

        assert_eq!(report.articles.len(), 7);
        assert_eq!(report.sub_batches, 2);
        assert_eq!(report.delays, 1);
        assert!(started.elapsed() >= Duration::from_millis(500));
        assert!(started.elapsed() < Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_output_capped_and_ordered() {
        let translator = batch_translator(vec![ScriptedProvider::new(ProviderKind::Google, 1, Script::Fail)], 5);

        let output = translator.translate_all(articles(42)).await;

        assert_eq!(output.len(), 30);
        for (i, article) in output.iter().enumerate() {
            assert_eq!(article.title.as_deref(), Some(format!("Xyzzy item {}", i).as_str()));
            // All providers failed and nothing matched the dictionary
            assert_eq!(article.translated_title, format!("Xyzzy item {}", i));
            assert_eq!(article.vn_published_at, "2024-01-01 07:00:00 (Giờ VN)");
        }
    }

    #[tokio::test]
    async fn test_empty_input() {
        let translator = batch_translator(vec![], 5);
        let report = translator.translate_all_report(Vec::new()).await;

        assert!(report.articles.is_empty());
        assert_eq!(report.sub_batches, 0);
        assert_eq!(report.delays, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_permits_bound_concurrent_provider_calls() {
        let provider = ScriptedProvider::new(ProviderKind::Google, 1, Script::Reply("Đã dịch".into()))
            .with_latency(Duration::from_millis(50));
        let peak = provider.peak.clone();
        let calls = provider.calls.clone();
        let translator = batch_translator(vec![provider], 3);

        let output = translator.translate_all(articles(30)).await;

        assert_eq!(output.len(), 30);
        assert_eq!(calls.load(Ordering::SeqCst), 60);
        assert!(peak.load(Ordering::SeqCst) <= 3);
        assert_eq!(translator.translator().rate_limiter().in_flight(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeated_headlines_hit_cache() {
        let provider = ScriptedProvider::new(ProviderKind::Google, 1, Script::Reply("Tin giống nhau".into()));
        let calls = provider.calls.clone();
        let translator = batch_translator(vec![provider], 5);

        let same: Vec<Article> = (0..6)
            .map(|_| Article::new("Same headline", "Same description"))
            .collect();

        let first = translator.translate_all_report(same.clone()).await;
        let calls_after_first = calls.load(Ordering::SeqCst);
        let second = translator.translate_all_report(same).await;

        assert_eq!(first.articles.len(), 6);
        assert_eq!(second.cache_hits, 12);
        assert_eq!(calls.load(Ordering::SeqCst), calls_after_first);
    }

    #[tokio::test]
    async fn test_unparsable_timestamp_passes_through() {
        let translator = batch_translator(vec![], 5);
        let output = translator
            .translate_all(vec![Article::new("Tin tức hôm nay", "").with_published_at("not a date")])
            .await;

        assert_eq!(output[0].vn_published_at, "not a date");
        assert_eq!(output[0].translated_title, "Tin tức hôm nay");
    }
}

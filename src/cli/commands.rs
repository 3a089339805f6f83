//! CLI command definitions and handlers

use chrono::NaiveDate;
use clap::Subcommand;
use std::sync::Arc;

use crate::core::batch::BatchTranslator;
use crate::core::client::{build_http_client, AsyncTranslator};
use crate::core::config::TranslatorConfig;
use crate::core::models::{NewsCategory, SortBy};
use crate::processors::feed::{FeedRequest, NewsFeed, NewsPage};
use crate::processors::news_source::NewsApiSource;

/// Commands for the news translator
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a news page and print it translated to Vietnamese
    News {
        /// Category slug (vietnam, thoisu, kinhte, thegioi, thethao, giaitri)
        #[arg(short, long, default_value = "vietnam")]
        category: String,

        /// Search query (defaults to the category's query)
        #[arg(short, long)]
        query: Option<String>,

        /// Only articles published since this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Sort mode: relevancy, popularity, publishedAt
        #[arg(long, default_value = "relevancy")]
        sort_by: SortBy,

        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },

    /// Translate text fragments through the engine
    Translate {
        /// Text to translate
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// List news categories
    Categories,
}

/// Handle news command
pub async fn handle_news(
    config: TranslatorConfig,
    category: String,
    query: Option<String>,
    from: Option<NaiveDate>,
    sort_by: SortBy,
    json: bool,
) -> anyhow::Result<()> {
    use indicatif::{ProgressBar, ProgressStyle};
    use std::time::Duration;
    use tracing::info;

    let category = NewsCategory::from_slug(&category)
        .ok_or_else(|| anyhow::anyhow!("Unknown category: {}", category))?;

    let mut request = FeedRequest::category(category).with_sort_by(sort_by);
    if let Some(query) = query {
        request = request.with_query(query);
    }
    if let Some(from) = from {
        request = request.with_from(from);
    }

    info!("Loading {} with query '{}'", category.display_name(), request.resolved_query());

    let client = build_http_client()?;
    let translator = AsyncTranslator::with_client(&config, &client)?;
    let source = NewsApiSource::from_config(&config, client);
    let feed = NewsFeed::new(
        Arc::new(source),
        BatchTranslator::new(translator, &config),
        config.news_page_size,
    );

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message(format!("Đang tải {}...", category.display_name()));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let page = feed.load(&request).await;
    spinner.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        print_page(&page);
    }

    Ok(())
}

fn print_page(page: &NewsPage) {
    println!("\n📰 {} | \"{}\"", page.category_name, page.query);

    if page.has_error() {
        println!("\n⚠️  {}", page.error_message);
        return;
    }

    for (i, article) in page.articles.iter().enumerate() {
        println!("\n{}. {}", i + 1, article.translated_title);
        if !article.vn_published_at.is_empty() {
            println!("   🕒 {}", article.vn_published_at);
        }
        if !article.translated_description.is_empty() {
            println!("   {}", article.translated_description);
        }
        if let Some(url) = &article.url {
            println!("   🔗 {}", url);
        }
    }

    println!(
        "\n✅ {} bài viết, {} đã dịch, {}ms",
        page.total_articles, page.translated_count, page.load_time_ms
    );
}

/// Handle translate command
pub async fn handle_translate(config: TranslatorConfig, text: Vec<String>) -> anyhow::Result<()> {
    let translator = AsyncTranslator::new(&config)?;

    let units = futures::future::join_all(text.iter().map(|t| translator.translate_unit(t))).await;

    for unit in units {
        println!("{} -> {} [{:?}]", unit.source, unit.text(), unit.origin);
    }

    Ok(())
}

/// Handle categories command
pub fn handle_categories() {
    for category in NewsCategory::ALL {
        println!(
            "{:<10} {:<12} {}",
            category.slug(),
            category.display_name(),
            category.default_query()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(subcommand)]
        command: Commands,
    }

    #[test]
    fn test_parse_news_command() {
        let cli = TestCli::try_parse_from([
            "vtv-news",
            "news",
            "--category",
            "kinhte",
            "--from",
            "2024-01-15",
            "--sort-by",
            "publishedAt",
        ])
        .unwrap();

        match cli.command {
            Commands::News {
                category,
                from,
                sort_by,
                json,
                ..
            } => {
                assert_eq!(category, "kinhte");
                assert_eq!(from, NaiveDate::from_ymd_opt(2024, 1, 15));
                assert_eq!(sort_by, SortBy::PublishedAt);
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_translate_requires_text() {
        assert!(TestCli::try_parse_from(["vtv-news", "translate"]).is_err());
    }
}

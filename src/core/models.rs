//! Core data models for translation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Translation backend family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// translate.googleapis.com `gtx` endpoint, nested segment arrays
    Google,
    /// api.mymemory.translated.net, `responseData.translatedText`
    MyMemory,
    /// LibreTranslate POST endpoint, flat `translatedText`
    Libre,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Google => write!(f, "google"),
            ProviderKind::MyMemory => write!(f, "mymemory"),
            ProviderKind::Libre => write!(f, "libre"),
        }
    }
}

/// Static description of one provider in the chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
    /// Which backend this is
    pub kind: ProviderKind,
    /// Lower runs first
    pub priority: u32,
    /// Request URL
    pub endpoint: String,
    /// Per-call timeout in milliseconds
    pub timeout_ms: u64,
    /// Input is cut to this many characters before sending
    pub max_input_chars: usize,
    /// Disabled providers are left out of the chain
    pub enabled: bool,
}

impl ProviderDescriptor {
    /// Per-call timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Cut `text` to `max_input_chars` characters, respecting char boundaries
    pub fn truncate<'a>(&self, text: &'a str) -> &'a str {
        match text.char_indices().nth(self.max_input_chars) {
            Some((idx, _)) => &text[..idx],
            None => text,
        }
    }
}

/// Where the text of a translated fragment came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranslationOrigin {
    /// Served from the translation cache
    Cache,
    /// Too short, or already in the target language
    Skipped,
    /// Returned by a network provider
    Provider(ProviderKind),
    /// Produced by fallback dictionary substitution
    Dictionary,
    /// Nothing worked; the source text is passed through
    Original,
}

/// One fragment (title or description) going through the engine
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationUnit {
    /// Exact source text
    pub source: String,
    /// `None` until resolved
    pub translated: Option<String>,
    /// Set when the engine decided not to translate
    pub skipped: bool,
    /// Where the text came from
    pub origin: TranslationOrigin,
}

impl TranslationUnit {
    /// Unresolved unit for `source`
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            translated: None,
            skipped: false,
            origin: TranslationOrigin::Original,
        }
    }

    /// Record the outcome of a translation attempt
    pub fn resolve(mut self, text: String, origin: TranslationOrigin) -> Self {
        self.skipped = origin == TranslationOrigin::Skipped;
        self.translated = Some(text);
        self.origin = origin;
        self
    }

    /// Translated text, or the source when nothing usable came back
    pub fn text(&self) -> &str {
        match &self.translated {
            Some(t) if !t.trim().is_empty() => t,
            _ => &self.source,
        }
    }

    /// Consume into the final text
    pub fn into_text(self) -> String {
        match self.translated {
            Some(t) if !t.trim().is_empty() => t,
            _ => self.source,
        }
    }
}

/// Publisher information attached to an article
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticlePublisher {
    /// Source identifier, often null
    pub id: Option<String>,
    /// Display name of the outlet
    pub name: Option<String>,
}

/// News article as delivered by the upstream source, plus localized fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Publishing outlet
    #[serde(default)]
    pub source: Option<ArticlePublisher>,
    /// Byline
    #[serde(default)]
    pub author: Option<String>,
    /// Headline in the source language
    #[serde(default)]
    pub title: Option<String>,
    /// Summary in the source language
    #[serde(default)]
    pub description: Option<String>,
    /// Link to the full article
    #[serde(default)]
    pub url: Option<String>,
    /// Lead image URL
    #[serde(default)]
    pub url_to_image: Option<String>,
    /// Timestamp exactly as the source sent it
    #[serde(default)]
    pub published_at: Option<String>,
    /// Truncated body text
    #[serde(default)]
    pub content: Option<String>,
    /// Vietnamese headline, or the original when translation failed
    #[serde(default)]
    pub translated_title: String,
    /// Vietnamese summary
    #[serde(default)]
    pub translated_description: String,
    /// `YYYY-MM-DD HH:MM:SS (Giờ VN)`, or the raw timestamp if unparsable
    #[serde(default)]
    pub vn_published_at: String,
}

impl Article {
    /// Article with just a title and description
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            ..Default::default()
        }
    }

    /// Set the source timestamp
    pub fn with_published_at(mut self, published_at: impl Into<String>) -> Self {
        self.published_at = Some(published_at.into());
        self
    }
}

/// Ordering requested from the article source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortBy {
    /// Closest match first
    #[default]
    #[serde(rename = "relevancy")]
    Relevancy,
    /// Most popular outlets first
    #[serde(rename = "popularity")]
    Popularity,
    /// Newest first
    #[serde(rename = "publishedAt")]
    PublishedAt,
}

impl SortBy {
    /// Wire value of the `sortBy` parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Relevancy => "relevancy",
            SortBy::Popularity => "popularity",
            SortBy::PublishedAt => "publishedAt",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "relevancy" => Ok(SortBy::Relevancy),
            "popularity" => Ok(SortBy::Popularity),
            "publishedat" | "published_at" => Ok(SortBy::PublishedAt),
            other => Err(format!("unknown sort mode: {}", other)),
        }
    }
}

/// News section shown to readers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NewsCategory {
    /// Front page
    Home,
    /// Current affairs
    ThoiSu,
    /// Economy
    KinhTe,
    /// World
    TheGioi,
    /// Sports
    TheThao,
    /// Entertainment
    GiaiTri,
}

impl NewsCategory {
    /// Tabs in display order
    pub const ALL: [NewsCategory; 6] = [
        NewsCategory::Home,
        NewsCategory::ThoiSu,
        NewsCategory::KinhTe,
        NewsCategory::TheGioi,
        NewsCategory::TheThao,
        NewsCategory::GiaiTri,
    ];

    /// Tab identifier
    pub fn slug(&self) -> &'static str {
        match self {
            NewsCategory::Home => "vietnam",
            NewsCategory::ThoiSu => "thoisu",
            NewsCategory::KinhTe => "kinhte",
            NewsCategory::TheGioi => "thegioi",
            NewsCategory::TheThao => "thethao",
            NewsCategory::GiaiTri => "giaitri",
        }
    }

    /// Vietnamese tab title
    pub fn display_name(&self) -> &'static str {
        match self {
            NewsCategory::Home => "Trang Chủ",
            NewsCategory::ThoiSu => "Thời Sự",
            NewsCategory::KinhTe => "Kinh Tế",
            NewsCategory::TheGioi => "Thế Giới",
            NewsCategory::TheThao => "Thể Thao",
            NewsCategory::GiaiTri => "Giải Trí",
        }
    }

    /// Search query used when the reader did not type one
    pub fn default_query(&self) -> &'static str {
        match self {
            NewsCategory::Home => "vietnam news latest",
            NewsCategory::ThoiSu => "vietnam politics",
            NewsCategory::KinhTe => "vietnam economy",
            NewsCategory::TheGioi => "vietnam international",
            NewsCategory::TheThao => "vietnam sports",
            NewsCategory::GiaiTri => "vietnam entertainment",
        }
    }

    /// Look up a category by slug; `home` is accepted for the front page
    pub fn from_slug(slug: &str) -> Option<Self> {
        let slug = slug.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.slug() == slug || (slug == "home" && *c == NewsCategory::Home))
    }
}

//! News processing on top of the translation engine

pub mod feed;
pub mod news_source;

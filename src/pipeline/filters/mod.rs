// src/pipeline/filters/mod.rs

mod blacklist;
mod dedup;
mod language_filter;
mod length;
mod patterns;
mod sentiment_filter;

pub use blacklist::BlacklistFilter;
pub use dedup::DedupFilter;
pub use language_filter::LanguageDetectionFilter;
pub use length::{MinAlphaFilter, MinCharsFilter, MinWordsFilter};
pub use patterns::{
    EmojiOnlyFilter, RepeatedCharFilter, TimestampOnlyFilter, UrlOnlyFilter, REPEATED_CHAR_RUN,
};
pub use sentiment_filter::SentimentFilter;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One YouTube comment as handed over by the comment source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub like_count: i64,
    /// Unix epoch seconds, when known.
    #[serde(default)]
    pub timestamp: Option<i64>,
}

impl Comment {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Comment {
            id: id.into(),
            text: text.into(),
            author: String::new(),
            like_count: 0,
            timestamp: None,
        }
    }

    pub fn with_likes(mut self, like_count: i64) -> Self {
        self.like_count = like_count;
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
    }
}

/// Why a comment was dropped. The labels are a fixed vocabulary that
/// downstream consumers (the auto-blacklist among them) match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RemovalReason {
    #[serde(rename = "Too Short")]
    TooShort,
    #[serde(rename = "No Alpha")]
    NoAlpha,
    #[serde(rename = "Too Few Words")]
    TooFewWords,
    #[serde(rename = "Blacklisted")]
    Blacklisted,
    #[serde(rename = "Emoji Only")]
    EmojiOnly,
    #[serde(rename = "URL Only")]
    UrlOnly,
    #[serde(rename = "Timestamp")]
    Timestamp,
    #[serde(rename = "Repeated Chars")]
    RepeatedChars,
    #[serde(rename = "Non-English")]
    NonEnglish,
    #[serde(rename = "Negative Sentiment")]
    NegativeSentiment,
    #[serde(rename = "Duplicate")]
    Duplicate,
}

impl RemovalReason {
    pub const ALL: [RemovalReason; 11] = [
        RemovalReason::TooShort,
        RemovalReason::NoAlpha,
        RemovalReason::TooFewWords,
        RemovalReason::Blacklisted,
        RemovalReason::EmojiOnly,
        RemovalReason::UrlOnly,
        RemovalReason::Timestamp,
        RemovalReason::RepeatedChars,
        RemovalReason::NonEnglish,
        RemovalReason::NegativeSentiment,
        RemovalReason::Duplicate,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RemovalReason::TooShort => "Too Short",
            RemovalReason::NoAlpha => "No Alpha",
            RemovalReason::TooFewWords => "Too Few Words",
            RemovalReason::Blacklisted => "Blacklisted",
            RemovalReason::EmojiOnly => "Emoji Only",
            RemovalReason::UrlOnly => "URL Only",
            RemovalReason::Timestamp => "Timestamp",
            RemovalReason::RepeatedChars => "Repeated Chars",
            RemovalReason::NonEnglish => "Non-English",
            RemovalReason::NegativeSentiment => "Negative Sentiment",
            RemovalReason::Duplicate => "Duplicate",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|reason| reason.label() == label)
    }
}

impl fmt::Display for RemovalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemovedComment {
    pub comment: Comment,
    pub reason: RemovalReason,
}

/// Result of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOutcome {
    /// Surviving comments, in input order.
    pub retained: Vec<Comment>,
    /// Dropped comments with the first stage that dropped them, in input order.
    pub removed: Vec<RemovedComment>,
    /// `id -> reason` for every dropped comment.
    pub reasons: BTreeMap<String, RemovalReason>,
    /// Stages that were enabled but could not run.
    pub warnings: Vec<String>,
}

impl FilterOutcome {
    pub fn input_len(&self) -> usize {
        self.retained.len() + self.removed.len()
    }

    /// Number of removals per reason, in vocabulary order.
    pub fn reason_counts(&self) -> BTreeMap<RemovalReason, usize> {
        let mut counts = BTreeMap::new();
        for reason in self.reasons.values() {
            *counts.entry(*reason).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip_through_from_label() {
        for reason in RemovalReason::ALL {
            assert_eq!(RemovalReason::from_label(reason.label()), Some(reason));
        }
        assert_eq!(RemovalReason::from_label("Low Value"), None);
    }

    #[test]
    fn test_reason_serializes_as_label() {
        let json = serde_json::to_string(&RemovalReason::TooFewWords).unwrap();
        assert_eq!(json, "\"Too Few Words\"");
        let back: RemovalReason = serde_json::from_str("\"Non-English\"").unwrap();
        assert_eq!(back, RemovalReason::NonEnglish);
    }

    #[test]
    fn test_comment_defaults_missing_fields() {
        let comment: Comment = serde_json::from_str(r#"{"id": "abc"}"#).unwrap();
        assert_eq!(comment.text, "");
        assert_eq!(comment.like_count, 0);
        assert!(comment.published_at().is_none());
    }

    #[test]
    fn test_published_at() {
        let comment = Comment {
            timestamp: Some(1_700_000_000),
            ..Comment::new("c1", "hello")
        };
        assert_eq!(
            comment.published_at().map(|dt| dt.timestamp()),
            Some(1_700_000_000)
        );
    }
}

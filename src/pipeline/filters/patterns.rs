// src/pipeline/filters/patterns.rs
//! Shape checks driven by a single regex or scan per comment.

use crate::data_model::{Comment, RemovalReason};
use crate::executor::{partition_with, FilterStage, StageOutput};
use crate::utils::text::{char_len, has_repeated_char, is_bare_timestamp, strip_emoji, strip_urls};

/// Residue shorter than this after stripping means nothing else was said.
const MIN_RESIDUE_CHARS: usize = 2;

/// Consecutive repeats of one character that mark keyboard mashing.
pub const REPEATED_CHAR_RUN: usize = 5;

pub struct EmojiOnlyFilter;

impl FilterStage for EmojiOnlyFilter {
    fn name(&self) -> &'static str {
        "EmojiOnlyFilter"
    }

    fn apply(&self, comments: Vec<Comment>) -> StageOutput {
        partition_with(comments, |c| {
            (char_len(&strip_emoji(&c.text)) < MIN_RESIDUE_CHARS).then_some(RemovalReason::EmojiOnly)
        })
    }
}

pub struct UrlOnlyFilter;

impl FilterStage for UrlOnlyFilter {
    fn name(&self) -> &'static str {
        "UrlOnlyFilter"
    }

    fn apply(&self, comments: Vec<Comment>) -> StageOutput {
        partition_with(comments, |c| {
            (char_len(&strip_urls(&c.text)) < MIN_RESIDUE_CHARS).then_some(RemovalReason::UrlOnly)
        })
    }
}

/// Drops comments that are nothing but a video timecode (`1:23`, `1:02:03`).
pub struct TimestampOnlyFilter;

impl FilterStage for TimestampOnlyFilter {
    fn name(&self) -> &'static str {
        "TimestampOnlyFilter"
    }

    fn apply(&self, comments: Vec<Comment>) -> StageOutput {
        partition_with(comments, |c| {
            is_bare_timestamp(&c.text).then_some(RemovalReason::Timestamp)
        })
    }
}

/// Drops comments containing one letter or digit repeated
/// [`REPEATED_CHAR_RUN`] or more times in a row. Punctuation runs such as
/// `!!!!!` are not counted.
pub struct RepeatedCharFilter;

impl FilterStage for RepeatedCharFilter {
    fn name(&self) -> &'static str {
        "RepeatedCharFilter"
    }

    fn apply(&self, comments: Vec<Comment>) -> StageOutput {
        partition_with(comments, |c| {
            has_repeated_char(&c.text, REPEATED_CHAR_RUN).then_some(RemovalReason::RepeatedChars)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn removed_ids(output: &StageOutput) -> Vec<&str> {
        output.removed.iter().map(|(c, _)| c.id.as_str()).collect()
    }

    #[test]
    fn test_emoji_only() {
        let output = EmojiOnlyFilter.apply(vec![
            Comment::new("fire", "🔥🔥🔥"),
            Comment::new("one_letter", "😂 k"),
            Comment::new("words", "😂 so good"),
            Comment::new("empty", ""),
        ]);
        assert_eq!(removed_ids(&output), vec!["fire", "one_letter", "empty"]);
        assert_eq!(output.kept[0].id, "words");
        assert!(output.removed.iter().all(|(_, r)| *r == RemovalReason::EmojiOnly));
    }

    #[test]
    fn test_url_only() {
        let output = UrlOnlyFilter.apply(vec![
            Comment::new("bare", "https://example.com/watch?v=1"),
            Comment::new("www", "  WWW.example.com  "),
            Comment::new("context", "source: https://example.com"),
        ]);
        assert_eq!(removed_ids(&output), vec!["bare", "www"]);
        assert_eq!(output.kept[0].id, "context");
    }

    #[test]
    fn test_timestamp_only_requires_whole_comment() {
        let output = TimestampOnlyFilter.apply(vec![
            Comment::new("bare", "12:34"),
            Comment::new("hour", "1:02:03"),
            Comment::new("sentence", "check 1:23 for the best part"),
        ]);
        assert_eq!(removed_ids(&output), vec!["bare", "hour"]);
        assert_eq!(output.removed[0].1, RemovalReason::Timestamp);
    }

    #[test]
    fn test_repeated_char_ignores_punctuation() {
        let output = RepeatedCharFilter.apply(vec![
            Comment::new("mash", "aaaaaaaaaa"),
            Comment::new("shout", "wow that was great!!!!!!"),
            Comment::new("noo", "nooooooo why"),
            Comment::new("four", "hmmm okay"),
        ]);
        assert_eq!(removed_ids(&output), vec!["mash", "noo"]);
        assert_eq!(output.kept.len(), 2);
    }
}

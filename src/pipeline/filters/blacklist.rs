// src/pipeline/filters/blacklist.rs

use std::collections::HashSet;

use crate::data_model::{Comment, RemovalReason};
use crate::executor::{partition_with, FilterStage, StageOutput};
use crate::utils::text::normalize;

/// Drops comments whose normalized text was rejected before.
///
/// The set holds normalized strings (see [`normalize`]); entries are
/// normalized again on construction so callers may pass raw text.
pub struct BlacklistFilter {
    blacklist: HashSet<String>,
}

impl BlacklistFilter {
    pub fn new<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let blacklist = texts
            .into_iter()
            .map(|t| normalize(t.as_ref()))
            .filter(|t| !t.is_empty())
            .collect();
        BlacklistFilter { blacklist }
    }
}

impl FilterStage for BlacklistFilter {
    fn name(&self) -> &'static str {
        "BlacklistFilter"
    }

    fn apply(&self, comments: Vec<Comment>) -> StageOutput {
        if self.blacklist.is_empty() {
            return StageOutput {
                kept: comments,
                removed: Vec::new(),
            };
        }
        partition_with(comments, |c| {
            self.blacklist
                .contains(&normalize(&c.text))
                .then_some(RemovalReason::Blacklisted)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_is_case_and_whitespace_insensitive() {
        let filter = BlacklistFilter::new(["subscribe now"]);
        let output = filter.apply(vec![
            Comment::new("a", "  Subscribe Now "),
            Comment::new("b", "subscribe now please"),
        ]);
        assert_eq!(output.kept.len(), 1);
        assert_eq!(output.kept[0].id, "b");
        assert_eq!(output.removed[0].1, RemovalReason::Blacklisted);
    }

    #[test]
    fn test_empty_blacklist_keeps_everything() {
        let filter = BlacklistFilter::new(Vec::<String>::new());
        let output = filter.apply(vec![Comment::new("a", ""), Comment::new("b", "x")]);
        assert_eq!(output.kept.len(), 2);
    }

    #[test]
    fn test_entries_are_normalized_and_blank_ones_dropped() {
        let filter = BlacklistFilter::new(["  FIRST!  ", "   ", ""]);
        let output = filter.apply(vec![Comment::new("a", "first!"), Comment::new("b", "  ")]);
        assert_eq!(output.removed.len(), 1);
        assert_eq!(output.removed[0].0.id, "a");
        assert_eq!(output.kept[0].id, "b");
    }
}

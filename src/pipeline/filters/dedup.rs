// src/pipeline/filters/dedup.rs

use itertools::Itertools;
use rayon::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

use crate::data_model::{Comment, RemovalReason};
use crate::executor::{FilterStage, StageOutput};
use crate::pipeline::models::SimilarityScorer;
use crate::utils::text::normalize;
use crate::utils::DisjointSet;

// Rounding room so a pair sitting exactly on the threshold is still scored.
const BOUND_SLACK: f64 = 1e-9;

/// Removes exact and near-duplicate comments.
///
/// Duplicates are removed as whole groups: no copy survives. Exact copies
/// (same normalized text) go first, unless the threshold is 100, in which
/// case the near-duplicate pass covers them. Remaining comments are compared
/// pairwise and joined transitively whenever their similarity reaches the
/// threshold; every cluster of two or more is removed.
///
/// Without a similarity scorer only the exact pass runs.
pub struct DedupFilter {
    similarity: Option<Arc<dyn SimilarityScorer>>,
    threshold: u32,
}

impl DedupFilter {
    pub fn new(similarity: Option<Arc<dyn SimilarityScorer>>, threshold: u32) -> Self {
        DedupFilter {
            similarity,
            threshold,
        }
    }

    /// Working-set positions ordered by likes, highest first. Ties keep
    /// their input order.
    fn by_engagement(comments: &[Comment]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..comments.len()).collect();
        order.sort_by_key(|&i| std::cmp::Reverse(comments[i].like_count));
        order
    }

    fn exact_duplicates(normalized: &[String], order: &[usize]) -> HashSet<usize> {
        order
            .iter()
            .map(|&i| (normalized[i].as_str(), i))
            .into_group_map()
            .into_values()
            .filter(|members| members.len() > 1)
            .flatten()
            .collect()
    }

    fn near_duplicates(
        &self,
        scorer: &dyn SimilarityScorer,
        normalized: &[String],
        candidates: &[usize],
    ) -> HashSet<usize> {
        let threshold = f64::from(self.threshold);
        let lengths: Vec<usize> = candidates
            .iter()
            .map(|&i| normalized[i].chars().count())
            .collect();

        let n = candidates.len();
        let (mut clusters, merges) = (0..n)
            .into_par_iter()
            .fold(
                || (DisjointSet::new(n), 0usize),
                |(mut clusters, mut merges), a| {
                    for b in a + 1..n {
                        if scorer.upper_bound(lengths[a], lengths[b]) + BOUND_SLACK < threshold {
                            continue;
                        }
                        // Already joined through another pair on this thread.
                        if clusters.find(a) == clusters.find(b) {
                            continue;
                        }
                        if scorer.ratio(&normalized[candidates[a]], &normalized[candidates[b]])
                            >= threshold
                        {
                            clusters.union(a, b);
                            merges += 1;
                        }
                    }
                    (clusters, merges)
                },
            )
            .reduce(
                || (DisjointSet::new(n), 0usize),
                |(mut left, left_merges), (mut right, right_merges)| {
                    left.absorb(&mut right);
                    (left, left_merges + right_merges)
                },
            );

        let groups = clusters.groups(2);
        debug!(
            candidates = n,
            merges,
            clusters = groups.len(),
            "Near-duplicate clustering"
        );
        groups
            .into_iter()
            .flatten()
            .map(|slot| candidates[slot])
            .collect()
    }
}

impl FilterStage for DedupFilter {
    fn name(&self) -> &'static str {
        "DedupFilter"
    }

    fn apply(&self, comments: Vec<Comment>) -> StageOutput {
        let normalized: Vec<String> = comments.iter().map(|c| normalize(&c.text)).collect();
        let order = Self::by_engagement(&comments);

        let mut duplicates = if self.threshold < 100 {
            Self::exact_duplicates(&normalized, &order)
        } else {
            HashSet::new()
        };
        debug!(exact = duplicates.len(), "Exact duplicates");

        if let Some(scorer) = &self.similarity {
            let candidates: Vec<usize> = order
                .iter()
                .copied()
                .filter(|i| !duplicates.contains(i))
                .collect();
            let near = self.near_duplicates(scorer.as_ref(), &normalized, &candidates);
            duplicates.extend(near);
        }

        let mut output = StageOutput::default();
        for (i, comment) in comments.into_iter().enumerate() {
            if duplicates.contains(&i) {
                output.removed.push((comment, RemovalReason::Duplicate));
            } else {
                output.kept.push(comment);
            }
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::models::LevenshteinRatio;

    fn ids(comments: &[Comment]) -> Vec<&str> {
        comments.iter().map(|c| c.id.as_str()).collect()
    }

    fn removed_ids(output: &StageOutput) -> Vec<&str> {
        output.removed.iter().map(|(c, _)| c.id.as_str()).collect()
    }

    #[test]
    fn test_exact_duplicates_all_removed() {
        let filter = DedupFilter::new(None, 85);
        let output = filter.apply(vec![
            Comment::new("a", "First!"),
            Comment::new("b", "something original"),
            Comment::new("c", "  first! ").with_likes(40),
            Comment::new("d", "FIRST!"),
        ]);
        assert_eq!(ids(&output.kept), vec!["b"]);
        assert_eq!(removed_ids(&output), vec!["a", "c", "d"]);
        assert!(output.removed.iter().all(|(_, r)| *r == RemovalReason::Duplicate));
    }

    #[test]
    fn test_near_duplicates_cluster_removed() {
        let filter = DedupFilter::new(Some(Arc::new(LevenshteinRatio)), 85);
        let output = filter.apply(vec![
            Comment::new("a", "this is a great video thanks"),
            Comment::new("b", "completely unrelated remark about the audio"),
            Comment::new("c", "this is a great video thanks!!"),
        ]);
        assert_eq!(ids(&output.kept), vec!["b"]);
        assert_eq!(removed_ids(&output), vec!["a", "c"]);
    }

    /// Similar when the texts share their first character.
    struct FirstChar;

    impl SimilarityScorer for FirstChar {
        fn ratio(&self, a: &str, b: &str) -> f64 {
            if a.chars().next() == b.chars().next() {
                100.0
            } else {
                0.0
            }
        }
    }

    #[test]
    fn test_threshold_100_skips_exact_pass_but_clusters_identical_text() {
        let filter = DedupFilter::new(Some(Arc::new(FirstChar)), 100);
        let output = filter.apply(vec![
            Comment::new("a", "same"),
            Comment::new("b", "same"),
            Comment::new("c", "other"),
        ]);
        assert_eq!(ids(&output.kept), vec!["c"]);
        assert_eq!(removed_ids(&output), vec!["a", "b"]);
    }

    #[test]
    fn test_large_cluster_split_across_threads_is_removed_whole() {
        let mut input: Vec<Comment> = (0..500)
            .map(|i| Comment::new(format!("s{}", i), format!("spam variant {}", i)))
            .collect();
        input.push(Comment::new("keep", "a genuine question"));
        let output = DedupFilter::new(Some(Arc::new(FirstChar)), 85).apply(input);
        assert_eq!(ids(&output.kept), vec!["keep"]);
        assert_eq!(output.removed.len(), 500);
    }

    #[test]
    fn test_threshold_100_without_scorer_keeps_exact_copies() {
        let filter = DedupFilter::new(None, 100);
        let output = filter.apply(vec![Comment::new("a", "same"), Comment::new("b", "same")]);
        assert_eq!(output.kept.len(), 2);
    }

    #[test]
    fn test_engagement_order_is_stable() {
        let comments = vec![
            Comment::new("a", "x").with_likes(1),
            Comment::new("b", "y").with_likes(5),
            Comment::new("c", "z").with_likes(1),
        ];
        assert_eq!(DedupFilter::by_engagement(&comments), vec![1, 0, 2]);
    }

    #[test]
    fn test_empty_input() {
        let filter = DedupFilter::new(Some(Arc::new(LevenshteinRatio)), 85);
        let output = filter.apply(Vec::new());
        assert!(output.kept.is_empty());
        assert!(output.removed.is_empty());
    }
}

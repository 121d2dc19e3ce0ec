use crate::data_model::{Comment, FilterOutcome, RemovalReason, RemovedComment};
use crate::utils::prometheus_metrics::{
    COMMENTS_RECEIVED_TOTAL, COMMENTS_REMOVED_TOTAL, COMMENTS_RETAINED_TOTAL,
    STAGE_DURATION_SECONDS,
};
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, instrument, warn};

/// What one stage did to the working set.
#[derive(Debug, Default)]
pub struct StageOutput {
    /// Survivors, in the order they were received.
    pub kept: Vec<Comment>,
    pub removed: Vec<(Comment, RemovalReason)>,
}

/// One filtering rule in the chain. Stages see only what earlier stages kept.
pub trait FilterStage: Send + Sync {
    fn name(&self) -> &'static str; // For logging/metrics

    fn apply(&self, comments: Vec<Comment>) -> StageOutput;
}

/// Splits `comments` with a per-comment verdict evaluated in parallel.
/// Order is preserved on both sides.
pub fn partition_with<F>(comments: Vec<Comment>, verdict: F) -> StageOutput
where
    F: Fn(&Comment) -> Option<RemovalReason> + Send + Sync,
{
    let verdicts: Vec<Option<RemovalReason>> = comments.par_iter().map(|c| verdict(c)).collect();

    let mut output = StageOutput {
        kept: Vec::with_capacity(comments.len()),
        removed: Vec::new(),
    };
    for (comment, verdict) in comments.into_iter().zip(verdicts) {
        match verdict {
            Some(reason) => output.removed.push((comment, reason)),
            None => output.kept.push(comment),
        }
    }
    output
}

/// Runs an ordered chain of stages and records the first reason each comment
/// was dropped for.
pub struct PipelineExecutor {
    pub(crate) stages: Vec<Box<dyn FilterStage>>,
    warnings: Vec<String>,
}

impl PipelineExecutor {
    pub fn new(stages: Vec<Box<dyn FilterStage>>) -> Self {
        if stages.is_empty() {
            warn!("Pipeline created with no stages.");
        }
        PipelineExecutor {
            stages,
            warnings: Vec::new(),
        }
    }

    /// Carries warnings collected while building the chain into every outcome.
    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    #[instrument(skip_all, fields(comments = comments.len(), stages = self.stages.len()))]
    pub fn run(&self, comments: Vec<Comment>) -> FilterOutcome {
        let input_len = comments.len();
        COMMENTS_RECEIVED_TOTAL.inc_by(input_len as f64);

        // Remember input positions so removals can be reported in input order.
        let positions: HashMap<String, usize> = comments
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id.clone(), i))
            .collect();

        let mut working = comments;
        let mut removed: Vec<(Comment, RemovalReason)> = Vec::new();

        for stage in &self.stages {
            if working.is_empty() {
                debug!(stage = stage.name(), "Working set empty; skipping remaining stages");
                break;
            }
            let before = working.len();
            let timer = STAGE_DURATION_SECONDS
                .with_label_values(&[stage.name()])
                .start_timer();
            let output = stage.apply(working);
            timer.observe_duration();

            debug!(
                stage = stage.name(),
                before,
                kept = output.kept.len(),
                removed = output.removed.len(),
                "Stage finished"
            );
            working = output.kept;
            removed.extend(output.removed);
        }

        removed.sort_by_key(|(comment, _)| positions.get(&comment.id).copied().unwrap_or(usize::MAX));

        let mut reasons = BTreeMap::new();
        for (comment, reason) in &removed {
            COMMENTS_REMOVED_TOTAL
                .with_label_values(&[reason.label()])
                .inc();
            reasons.entry(comment.id.clone()).or_insert(*reason);
        }
        COMMENTS_RETAINED_TOTAL.inc_by(working.len() as f64);

        info!(
            input = input_len,
            retained = working.len(),
            removed = removed.len(),
            "Filtering complete"
        );

        FilterOutcome {
            retained: working,
            removed: removed
                .into_iter()
                .map(|(comment, reason)| RemovedComment { comment, reason })
                .collect(),
            reasons,
            warnings: self.warnings.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DropContaining {
        name: &'static str,
        needle: &'static str,
        reason: RemovalReason,
    }

    impl FilterStage for DropContaining {
        fn name(&self) -> &'static str {
            self.name
        }

        fn apply(&self, comments: Vec<Comment>) -> StageOutput {
            partition_with(comments, |c| c.text.contains(self.needle).then_some(self.reason))
        }
    }

    fn comments(texts: &[&str]) -> Vec<Comment> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Comment::new(format!("c{}", i), *t))
            .collect()
    }

    #[test]
    fn test_new_executor_with_empty_stages() {
        let executor = PipelineExecutor::new(vec![]);
        assert_eq!(executor.stages.len(), 0);
        let outcome = executor.run(comments(&["a", "b"]));
        assert_eq!(outcome.retained.len(), 2);
        assert!(outcome.reasons.is_empty());
    }

    #[test]
    fn test_first_stage_reason_wins() {
        let executor = PipelineExecutor::new(vec![
            Box::new(DropContaining {
                name: "first",
                needle: "x",
                reason: RemovalReason::TooShort,
            }),
            Box::new(DropContaining {
                name: "second",
                needle: "x",
                reason: RemovalReason::Duplicate,
            }),
        ]);
        let outcome = executor.run(comments(&["xx", "keep"]));
        assert_eq!(outcome.reasons.get("c0"), Some(&RemovalReason::TooShort));
        assert_eq!(outcome.retained.len(), 1);
    }

    #[test]
    fn test_removed_are_reported_in_input_order() {
        let executor = PipelineExecutor::new(vec![
            Box::new(DropContaining {
                name: "b",
                needle: "b",
                reason: RemovalReason::Blacklisted,
            }),
            Box::new(DropContaining {
                name: "a",
                needle: "a",
                reason: RemovalReason::NoAlpha,
            }),
        ]);
        let outcome = executor.run(comments(&["a1", "b1", "keep", "a2"]));
        let ids: Vec<&str> = outcome.removed.iter().map(|r| r.comment.id.as_str()).collect();
        assert_eq!(ids, vec!["c0", "c1", "c3"]);
        let kept: Vec<&str> = outcome.retained.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(kept, vec!["c2"]);
    }

    #[test]
    fn test_partition_with_preserves_order() {
        let output = partition_with(comments(&["a", "b", "c", "d"]), |c| {
            (c.text == "b" || c.text == "d").then_some(RemovalReason::TooShort)
        });
        let kept: Vec<&str> = output.kept.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(kept, vec!["a", "c"]);
        assert_eq!(output.removed.len(), 2);
    }
}

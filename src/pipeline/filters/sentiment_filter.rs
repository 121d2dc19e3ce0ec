// src/pipeline/filters/sentiment_filter.rs

use std::sync::Arc;
use tracing::warn;

use crate::data_model::{Comment, RemovalReason};
use crate::executor::{partition_with, FilterStage, StageOutput};
use crate::pipeline::models::SentimentScorer;
use crate::utils::prometheus_metrics::CAPABILITY_FAILURES_TOTAL;

/// Drops comments whose compound sentiment is at or below `threshold`.
pub struct SentimentFilter {
    scorer: Arc<dyn SentimentScorer>,
    threshold: f64,
}

impl SentimentFilter {
    pub fn new(scorer: Arc<dyn SentimentScorer>, threshold: f64) -> Self {
        SentimentFilter { scorer, threshold }
    }
}

impl FilterStage for SentimentFilter {
    fn name(&self) -> &'static str {
        "SentimentFilter"
    }

    fn apply(&self, comments: Vec<Comment>) -> StageOutput {
        partition_with(comments, |c| match self.scorer.compound(&c.text) {
            Ok(score) => (score <= self.threshold).then_some(RemovalReason::NegativeSentiment),
            Err(e) => {
                CAPABILITY_FAILURES_TOTAL
                    .with_label_values(&[self.name()])
                    .inc();
                warn!(id = %c.id, error = %e, "Sentiment scoring failed; keeping comment");
                None
            }
        })
    }
}

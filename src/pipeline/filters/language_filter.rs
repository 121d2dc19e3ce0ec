// src/pipeline/filters/language_filter.rs

use std::sync::Arc;
use tracing::{debug, warn};

use crate::data_model::{Comment, RemovalReason};
use crate::executor::{partition_with, FilterStage, StageOutput};
use crate::pipeline::models::LanguageIdentifier;
use crate::utils::prometheus_metrics::CAPABILITY_FAILURES_TOTAL;

/// Drops comments the language model is not confident enough are English.
/// When the model fails on a comment, the comment is kept.
pub struct LanguageDetectionFilter {
    identifier: Arc<dyn LanguageIdentifier>,
    min_confidence: f64,
}

impl LanguageDetectionFilter {
    pub fn new(identifier: Arc<dyn LanguageIdentifier>, min_confidence: f64) -> Self {
        LanguageDetectionFilter {
            identifier,
            min_confidence,
        }
    }
}

impl FilterStage for LanguageDetectionFilter {
    fn name(&self) -> &'static str {
        "LanguageDetectionFilter"
    }

    fn apply(&self, comments: Vec<Comment>) -> StageOutput {
        partition_with(comments, |c| match self.identifier.english_confidence(&c.text) {
            Ok(confidence) => {
                debug!(id = %c.id, confidence, "English confidence");
                (confidence < self.min_confidence).then_some(RemovalReason::NonEnglish)
            }
            Err(e) => {
                CAPABILITY_FAILURES_TOTAL
                    .with_label_values(&[self.name()])
                    .inc();
                warn!(id = %c.id, error = %e, "Language identification failed; keeping comment");
                None
            }
        })
    }
}

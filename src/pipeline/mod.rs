// src/pipeline/mod.rs

pub mod filters;
pub mod models;
pub mod readers;
pub mod writers;

use std::collections::HashSet;
use tracing::{info, instrument, warn};

use crate::config::FilterConfiguration;
use crate::data_model::{Comment, FilterOutcome};
use crate::executor::{FilterStage, PipelineExecutor};
use crate::utils::prometheus_metrics::STAGES_SKIPPED_TOTAL;
use filters::{
    BlacklistFilter, DedupFilter, EmojiOnlyFilter, LanguageDetectionFilter, MinAlphaFilter,
    MinCharsFilter, MinWordsFilter, RepeatedCharFilter, SentimentFilter, TimestampOnlyFilter,
    UrlOnlyFilter,
};
use models::Capabilities;

/// Filters a batch of comments with the bundled models.
///
/// `blacklist` holds previously rejected texts; they are matched after
/// lowercasing and trimming.
pub fn filter(
    comments: Vec<Comment>,
    config: &FilterConfiguration,
    blacklist: &HashSet<String>,
) -> FilterOutcome {
    CommentFilterPipeline::new(config.clone(), Capabilities::default()).filter(comments, blacklist)
}

/// The comment filter: a fixed chain of stages, cheapest first, built from a
/// configuration and whatever model capabilities are available.
///
/// Disabled stages are left out of the chain entirely. An enabled stage whose
/// capability is missing is skipped as well, and the outcome carries a
/// warning saying so.
#[derive(Debug, Clone)]
pub struct CommentFilterPipeline {
    config: FilterConfiguration,
    capabilities: Capabilities,
}

impl CommentFilterPipeline {
    pub fn new(config: FilterConfiguration, capabilities: Capabilities) -> Self {
        CommentFilterPipeline {
            config: config.clamped(),
            capabilities,
        }
    }

    pub fn config(&self) -> &FilterConfiguration {
        &self.config
    }

    fn skip_stage(stage: &'static str, capability: &str, warnings: &mut Vec<String>) {
        let message = format!("{} skipped: no {} capability available", stage, capability);
        warn!(stage, capability, "Stage enabled but capability missing; skipping");
        STAGES_SKIPPED_TOTAL.with_label_values(&[stage]).inc();
        warnings.push(message);
    }

    /// Builds the executor for one run. The blacklist is only known per call.
    pub fn executor(&self, blacklist: &HashSet<String>) -> PipelineExecutor {
        let config = &self.config;
        let mut stages: Vec<Box<dyn FilterStage>> = Vec::new();
        let mut warnings = Vec::new();

        if config.min_chars {
            stages.push(Box::new(MinCharsFilter::new(config.min_chars_threshold)));
        }
        if config.min_alpha {
            stages.push(Box::new(MinAlphaFilter));
        }
        if config.min_words {
            stages.push(Box::new(MinWordsFilter::new(config.min_words_threshold)));
        }
        if config.blacklist_match && !blacklist.is_empty() {
            stages.push(Box::new(BlacklistFilter::new(blacklist)));
        }
        if config.emoji_only {
            stages.push(Box::new(EmojiOnlyFilter));
        }
        if config.url_only {
            stages.push(Box::new(UrlOnlyFilter));
        }
        if config.timestamp_only {
            stages.push(Box::new(TimestampOnlyFilter));
        }
        if config.repeat_char {
            stages.push(Box::new(RepeatedCharFilter));
        }
        if config.english_only {
            match &self.capabilities.language {
                Some(language) => stages.push(Box::new(LanguageDetectionFilter::new(
                    language.clone(),
                    config.english_confidence,
                ))),
                None => Self::skip_stage(
                    "LanguageDetectionFilter",
                    "language identification",
                    &mut warnings,
                ),
            }
        }
        if config.sentiment_filter {
            match &self.capabilities.sentiment {
                Some(sentiment) => stages.push(Box::new(SentimentFilter::new(
                    sentiment.clone(),
                    config.sentiment_threshold,
                ))),
                None => Self::skip_stage("SentimentFilter", "sentiment", &mut warnings),
            }
        }
        if config.dedup {
            if self.capabilities.similarity.is_none() {
                let message = "Near-duplicate detection skipped: no similarity capability available"
                    .to_string();
                warn!("Similarity capability missing; deduplicating exact copies only");
                STAGES_SKIPPED_TOTAL.with_label_values(&["NearDuplicates"]).inc();
                warnings.push(message);
            }
            stages.push(Box::new(DedupFilter::new(
                self.capabilities.similarity.clone(),
                config.dedup_threshold,
            )));
        }

        PipelineExecutor::new(stages).with_warnings(warnings)
    }

    #[instrument(skip_all, fields(comments = comments.len(), blacklist = blacklist.len()))]
    pub fn filter(&self, comments: Vec<Comment>, blacklist: &HashSet<String>) -> FilterOutcome {
        let executor = self.executor(blacklist);
        info!(stages = ?executor.stage_names(), "Running comment filter");
        executor.run(comments)
    }
}

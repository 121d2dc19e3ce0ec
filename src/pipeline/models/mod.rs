// src/pipeline/models/mod.rs
//! Model capabilities the expensive stages depend on.
//!
//! Each capability is a trait object handed to the pipeline at construction
//! time. A missing capability disables its stage with a warning instead of
//! failing the run.

mod language;
mod sentiment;
mod similarity;

pub use language::{EnglishIdentifier, LanguageIdentifier};
pub use sentiment::{LexiconSentiment, SentimentScorer};
pub use similarity::{LevenshteinRatio, SimilarityScorer};

use std::sync::Arc;

#[derive(Clone)]
pub struct Capabilities {
    pub language: Option<Arc<dyn LanguageIdentifier>>,
    pub sentiment: Option<Arc<dyn SentimentScorer>>,
    pub similarity: Option<Arc<dyn SimilarityScorer>>,
}

impl Capabilities {
    /// No models at all; the language, sentiment and near-duplicate stages are skipped.
    pub fn none() -> Self {
        Capabilities {
            language: None,
            sentiment: None,
            similarity: None,
        }
    }

    pub fn with_language(mut self, language: Arc<dyn LanguageIdentifier>) -> Self {
        self.language = Some(language);
        self
    }

    pub fn with_sentiment(mut self, sentiment: Arc<dyn SentimentScorer>) -> Self {
        self.sentiment = Some(sentiment);
        self
    }

    pub fn with_similarity(mut self, similarity: Arc<dyn SimilarityScorer>) -> Self {
        self.similarity = Some(similarity);
        self
    }
}

impl Default for Capabilities {
    /// The in-process implementations bundled with the crate.
    fn default() -> Self {
        Capabilities::none()
            .with_language(Arc::new(EnglishIdentifier::new()))
            .with_sentiment(Arc::new(LexiconSentiment::new()))
            .with_similarity(Arc::new(LevenshteinRatio))
    }
}

impl std::fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capabilities")
            .field("language", &self.language.is_some())
            .field("sentiment", &self.sentiment.is_some())
            .field("similarity", &self.similarity.is_some())
            .finish()
    }
}

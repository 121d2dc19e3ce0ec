// src/pipeline/filters/length.rs

use crate::data_model::{Comment, RemovalReason};
use crate::executor::{partition_with, FilterStage, StageOutput};
use crate::utils::text::{ascii_letter_count, char_len, word_count};

/// Comments with fewer ASCII letters than this carry no readable text.
const MIN_ALPHA_LETTERS: usize = 2;

/// Drops comments whose trimmed text is shorter than `min_chars` characters.
/// A comment of exactly `min_chars` characters is kept.
pub struct MinCharsFilter {
    min_chars: usize,
}

impl MinCharsFilter {
    pub fn new(min_chars: usize) -> Self {
        MinCharsFilter { min_chars }
    }
}

impl FilterStage for MinCharsFilter {
    fn name(&self) -> &'static str {
        "MinCharsFilter"
    }

    fn apply(&self, comments: Vec<Comment>) -> StageOutput {
        partition_with(comments, |c| {
            (char_len(&c.text) < self.min_chars).then_some(RemovalReason::TooShort)
        })
    }
}

pub struct MinAlphaFilter;

impl FilterStage for MinAlphaFilter {
    fn name(&self) -> &'static str {
        "MinAlphaFilter"
    }

    fn apply(&self, comments: Vec<Comment>) -> StageOutput {
        partition_with(comments, |c| {
            (ascii_letter_count(&c.text) < MIN_ALPHA_LETTERS).then_some(RemovalReason::NoAlpha)
        })
    }
}

pub struct MinWordsFilter {
    min_words: usize,
}

impl MinWordsFilter {
    pub fn new(min_words: usize) -> Self {
        MinWordsFilter { min_words }
    }
}

impl FilterStage for MinWordsFilter {
    fn name(&self) -> &'static str {
        "MinWordsFilter"
    }

    fn apply(&self, comments: Vec<Comment>) -> StageOutput {
        partition_with(comments, |c| {
            (word_count(&c.text) < self.min_words).then_some(RemovalReason::TooFewWords)
        })
    }
}

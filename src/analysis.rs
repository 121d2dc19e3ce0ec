// src/analysis.rs
//! Phrase mining over the comments that survive filtering.

use itertools::Itertools;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::utils::text::{phrase_tokens, ENGLISH_STOP_WORDS};

static STOP_WORDS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ENGLISH_STOP_WORDS.iter().copied().collect());

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepeatedPhrase {
    pub phrase: String,
    pub count: usize,
}

fn content_tokens(text: &str) -> Vec<String> {
    phrase_tokens(text)
        .into_iter()
        .filter(|t| t.chars().count() > 2 && !STOP_WORDS.contains(t.as_str()))
        .collect()
}

/// Phrases of `min_n..=max_n` content words that occur more than once across
/// `texts`, most frequent first.
///
/// Longer phrases are preferred: once a phrase is taken, its sub-phrases are
/// dropped unless they occur more often than it does on their own.
pub fn repeated_phrases<S: AsRef<str>>(
    texts: &[S],
    min_n: usize,
    max_n: usize,
    top_n: usize,
) -> Vec<RepeatedPhrase> {
    let min_n = min_n.max(1);
    let mut counts: HashMap<String, usize> = HashMap::new();
    for text in texts {
        let tokens = content_tokens(text.as_ref());
        for n in min_n..=max_n.min(tokens.len()) {
            for window in tokens.windows(n) {
                *counts.entry(window.join(" ")).or_insert(0) += 1;
            }
        }
    }
    counts.retain(|_, count| *count > 1);

    let candidates = counts
        .iter()
        .map(|(phrase, &count)| (phrase.as_str(), phrase.split(' ').count(), count))
        .sorted_by(|a, b| b.1.cmp(&a.1).then(b.2.cmp(&a.2)).then(a.0.cmp(b.0)));

    let mut suppressed: HashSet<String> = HashSet::new();
    let mut result = Vec::new();
    for (phrase, words, count) in candidates {
        if suppressed.contains(phrase) {
            continue;
        }
        result.push(RepeatedPhrase {
            phrase: phrase.to_string(),
            count,
        });
        let tokens: Vec<&str> = phrase.split(' ').collect();
        for n in min_n..words {
            for window in tokens.windows(n) {
                let sub = window.join(" ");
                if counts.get(&sub).copied().unwrap_or(0) <= count {
                    suppressed.insert(sub);
                }
            }
        }
    }

    result.sort_by(|a, b| b.count.cmp(&a.count));
    result.truncate(top_n);
    result
}

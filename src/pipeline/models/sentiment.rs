use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

use crate::error::Result;

pub trait SentimentScorer: Send + Sync {
    /// Compound polarity in `[-1, 1]`; negative means negative sentiment.
    fn compound(&self, text: &str) -> Result<f64>;
}

// Scalars follow the usual valence-aware lexicon approach: boosters shift a
// word's valence, negations flip and damp it, and the summed valence is
// squashed into [-1, 1].
const BOOSTER_INCREMENT: f64 = 0.293;
const CAPS_INCREMENT: f64 = 0.733;
const NEGATION_SCALAR: f64 = -0.74;
const EXCLAMATION_INCREMENT: f64 = 0.292;
const QUESTION_INCREMENT: f64 = 0.18;
const NORMALIZATION_ALPHA: f64 = 15.0;

static VALENCE: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    [
        // positive
        ("amazing", 2.8), ("awesome", 3.1), ("beautiful", 2.9), ("best", 3.2),
        ("brilliant", 2.8), ("clear", 1.6), ("cool", 1.3), ("enjoy", 2.2),
        ("enjoyed", 2.3), ("excellent", 2.7), ("fantastic", 2.6), ("fun", 2.3),
        ("funny", 1.9), ("glad", 2.0), ("good", 1.9), ("great", 3.1),
        ("happy", 2.7), ("helpful", 1.9), ("incredible", 2.5), ("informative", 1.5),
        ("inspiring", 2.2), ("interesting", 1.7), ("like", 1.5), ("liked", 1.8),
        ("love", 3.2), ("loved", 2.9), ("lovely", 2.8), ("masterpiece", 3.0),
        ("nice", 1.8), ("perfect", 2.7), ("recommend", 1.5), ("respect", 2.1),
        ("superb", 3.1), ("thank", 1.5), ("thanks", 1.9), ("useful", 1.9),
        ("win", 2.8), ("wonderful", 2.7), ("wow", 2.8), ("yes", 1.7),
        ("agree", 1.5), ("appreciate", 1.7), ("bless", 1.8), ("blessed", 2.9),
        ("calm", 1.3), ("excited", 1.4), ("genius", 2.4), ("gorgeous", 3.0),
        ("hilarious", 1.7), ("hope", 1.9), ("legend", 1.8), ("lol", 1.8),
        ("outstanding", 3.0), ("proud", 2.1), ("smart", 1.7), ("solid", 1.2),
        ("sweet", 2.0), ("wholesome", 2.0), ("underrated", 1.0), ("valuable", 2.1),
        // negative
        ("angry", -2.3), ("annoying", -1.7), ("awful", -2.0), ("bad", -2.5),
        ("boring", -1.3), ("broken", -1.4), ("clickbait", -1.8), ("crap", -1.6),
        ("cringe", -1.9), ("dead", -3.3), ("disappointed", -1.9), ("disappointing", -2.2),
        ("disgusting", -2.4), ("dislike", -1.6), ("dumb", -2.3), ("fail", -2.5),
        ("failed", -2.3), ("fake", -2.1), ("garbage", -2.1), ("hate", -2.7),
        ("hated", -3.2), ("horrible", -2.5), ("idiot", -2.3), ("ignorant", -1.1),
        ("lame", -1.8), ("liar", -2.7), ("lie", -1.6), ("lies", -1.8),
        ("misleading", -1.7), ("pathetic", -2.2), ("poor", -2.1), ("ridiculous", -1.5),
        ("sad", -2.1), ("scam", -2.7), ("shame", -2.1), ("sick", -2.3),
        ("stupid", -2.4), ("sucks", -1.5), ("terrible", -2.5), ("trash", -2.0),
        ("ugly", -2.3), ("unwatchable", -2.3), ("useless", -1.8), ("waste", -1.8),
        ("worse", -2.1), ("worst", -3.1), ("wrong", -2.1), ("wtf", -2.8),
        ("annoyed", -1.6), ("disgrace", -2.2), ("evil", -3.4), ("kill", -3.7),
        ("loser", -2.4), ("nonsense", -1.7), ("pointless", -1.7), ("racist", -3.1),
        ("rubbish", -1.9), ("shit", -2.6), ("toxic", -2.4), ("unfortunately", -1.4),
    ]
    .into_iter()
    .collect()
});

static BOOSTERS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    [
        ("absolutely", BOOSTER_INCREMENT), ("amazingly", BOOSTER_INCREMENT),
        ("completely", BOOSTER_INCREMENT), ("extremely", BOOSTER_INCREMENT),
        ("incredibly", BOOSTER_INCREMENT), ("really", BOOSTER_INCREMENT),
        ("so", BOOSTER_INCREMENT), ("super", BOOSTER_INCREMENT),
        ("totally", BOOSTER_INCREMENT), ("truly", BOOSTER_INCREMENT),
        ("very", BOOSTER_INCREMENT), ("most", BOOSTER_INCREMENT),
        ("barely", -BOOSTER_INCREMENT), ("hardly", -BOOSTER_INCREMENT),
        ("kinda", -BOOSTER_INCREMENT), ("slightly", -BOOSTER_INCREMENT),
        ("somewhat", -BOOSTER_INCREMENT), ("sorta", -BOOSTER_INCREMENT),
    ]
    .into_iter()
    .collect()
});

static NEGATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "not", "no", "never", "none", "nobody", "nothing", "neither", "nor", "nowhere",
        "cannot", "without", "aint", "dont", "cant", "wont", "isnt", "arent", "wasnt",
        "werent", "doesnt", "didnt", "couldnt", "shouldnt", "wouldnt", "hasnt", "havent",
    ]
    .into_iter()
    .collect()
});

struct Token<'a> {
    raw: &'a str,
    lower: String,
}

impl Token<'_> {
    fn is_shouting(&self) -> bool {
        self.raw.chars().filter(|c| c.is_alphabetic()).count() > 1
            && self.raw.chars().all(|c| !c.is_lowercase())
    }

    fn is_negation(&self) -> bool {
        NEGATIONS.contains(self.lower.as_str()) || self.lower.ends_with("n't")
    }
}

/// Lexicon-based sentiment scorer.
///
/// Looks every word up in a valence table, shifts valence for boosters and
/// all-caps emphasis in a mixed-case comment, flips it after a negation, weighs
/// the clause after "but" more heavily, and amplifies by trailing `!`/`?`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconSentiment;

impl LexiconSentiment {
    pub fn new() -> Self {
        LexiconSentiment
    }

    fn tokens(text: &str) -> Vec<Token<'_>> {
        text.split_whitespace()
            .filter_map(|word| {
                let raw = word.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'');
                let raw = raw.trim_matches('\'');
                if raw.is_empty() {
                    return None;
                }
                Some(Token {
                    raw,
                    lower: raw.to_lowercase(),
                })
            })
            .collect()
    }

    fn word_valences(tokens: &[Token<'_>]) -> Vec<f64> {
        let shouting = tokens.iter().filter(|t| t.is_shouting()).count();
        let caps_differential = shouting > 0 && shouting < tokens.len();

        let mut valences = Vec::with_capacity(tokens.len());
        for (i, token) in tokens.iter().enumerate() {
            let Some(&base) = VALENCE.get(token.lower.as_str()) else {
                valences.push(0.0);
                continue;
            };
            let mut valence = base;
            if caps_differential && token.is_shouting() {
                valence += CAPS_INCREMENT * base.signum();
            }

            for (distance, decay) in [(1usize, 1.0), (2, 0.95), (3, 0.9)] {
                if i < distance {
                    break;
                }
                let previous = &tokens[i - distance];
                if let Some(&boost) = BOOSTERS.get(previous.lower.as_str()) {
                    valence += boost * base.signum() * decay;
                }
            }

            let negated = tokens[i.saturating_sub(3)..i].iter().any(Token::is_negation);
            if negated {
                valence *= NEGATION_SCALAR;
            }
            valences.push(valence);
        }

        if let Some(but_at) = tokens.iter().position(|t| t.lower == "but") {
            for (i, valence) in valences.iter_mut().enumerate() {
                if i < but_at {
                    *valence *= 0.5;
                } else if i > but_at {
                    *valence *= 1.5;
                }
            }
        }
        valences
    }

    fn punctuation_emphasis(text: &str) -> f64 {
        let exclamations = text.chars().filter(|&c| c == '!').count().min(4);
        let questions = text.chars().filter(|&c| c == '?').count();
        let question_emphasis = match questions {
            0 | 1 => 0.0,
            2 | 3 => questions as f64 * QUESTION_INCREMENT,
            _ => 0.96,
        };
        exclamations as f64 * EXCLAMATION_INCREMENT + question_emphasis
    }
}

impl SentimentScorer for LexiconSentiment {
    fn compound(&self, text: &str) -> Result<f64> {
        let tokens = Self::tokens(text);
        let sum: f64 = Self::word_valences(&tokens).iter().sum();
        if sum == 0.0 {
            return Ok(0.0);
        }
        let emphasis = Self::punctuation_emphasis(text);
        let sum = sum + emphasis * sum.signum();
        let compound = sum / (sum * sum + NORMALIZATION_ALPHA).sqrt();
        Ok(compound.clamp(-1.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(text: &str) -> f64 {
        LexiconSentiment::new().compound(text).unwrap()
    }

    #[test]
    fn test_neutral_and_empty_text_score_zero() {
        assert_eq!(score(""), 0.0);
        assert_eq!(score("the video is twelve minutes long"), 0.0);
    }

    #[test]
    fn test_polarity_direction() {
        assert!(score("this is a great video thanks") > 0.5);
        assert!(score("this video is bad") < 0.0);
    }

    #[test]
    fn test_strongly_negative_crosses_default_threshold() {
        assert!(score("I hate this, worst video ever, absolutely terrible garbage") <= -0.8);
    }

    #[test]
    fn test_negation_flips_polarity() {
        assert!(score("not bad at all") > 0.0);
        assert!(score("this isn't good") < 0.0);
    }

    #[test]
    fn test_boosters_caps_and_exclamations_intensify() {
        let plain = score("the ending was good");
        assert!(score("the ending was very good") > plain);
        assert!(score("the ending was GOOD") > plain);
        assert!(score("the ending was good!!!") > plain);
    }

    #[test]
    fn test_but_weights_the_second_clause() {
        assert!(score("the intro was good but the rest was terrible") < 0.0);
    }

    #[test]
    fn test_compound_stays_in_range() {
        let text = "worst worst worst worst worst worst worst worst hate hate hate!!!!!!";
        let value = score(text);
        assert!((-1.0..=1.0).contains(&value));
    }
}

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

pub const MIN_CHARS_BOUNDS: (usize, usize) = (1, 50);
pub const MIN_WORDS_BOUNDS: (usize, usize) = (1, 10);
pub const ENGLISH_CONFIDENCE_BOUNDS: (f64, f64) = (0.0, 1.0);
pub const SENTIMENT_THRESHOLD_BOUNDS: (f64, f64) = (-1.0, 0.0);
pub const DEDUP_THRESHOLD_BOUNDS: (u32, u32) = (50, 100);

/// Which filter stages run, and their thresholds.
///
/// Every gate is independent. Numeric values outside their bounds are clamped,
/// never rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfiguration {
    pub min_chars: bool,
    pub min_alpha: bool,
    pub min_words: bool,
    pub blacklist_match: bool,
    pub emoji_only: bool,
    pub url_only: bool,
    pub timestamp_only: bool,
    pub repeat_char: bool,
    pub english_only: bool,
    pub sentiment_filter: bool,
    pub dedup: bool,

    pub min_chars_threshold: usize,
    pub min_words_threshold: usize,
    pub english_confidence: f64,
    pub sentiment_threshold: f64,
    pub dedup_threshold: u32,
}

impl Default for FilterConfiguration {
    fn default() -> Self {
        FilterConfiguration {
            min_chars: true,
            min_alpha: true,
            min_words: true,
            blacklist_match: true,
            emoji_only: true,
            url_only: true,
            timestamp_only: true,
            repeat_char: true,
            english_only: true,
            sentiment_filter: true,
            dedup: true,
            min_chars_threshold: 20,
            min_words_threshold: 3,
            english_confidence: 0.5,
            sentiment_threshold: -0.8,
            dedup_threshold: 85,
        }
    }
}

impl FilterConfiguration {
    /// A configuration with every gate switched off and default thresholds.
    pub fn disabled() -> Self {
        FilterConfiguration {
            min_chars: false,
            min_alpha: false,
            min_words: false,
            blacklist_match: false,
            emoji_only: false,
            url_only: false,
            timestamp_only: false,
            repeat_char: false,
            english_only: false,
            sentiment_filter: false,
            dedup: false,
            ..FilterConfiguration::default()
        }
    }

    /// Pulls every numeric threshold back inside its declared bounds.
    pub fn clamped(mut self) -> Self {
        self.min_chars_threshold = self
            .min_chars_threshold
            .clamp(MIN_CHARS_BOUNDS.0, MIN_CHARS_BOUNDS.1);
        self.min_words_threshold = self
            .min_words_threshold
            .clamp(MIN_WORDS_BOUNDS.0, MIN_WORDS_BOUNDS.1);
        self.english_confidence = clamp_f64(
            self.english_confidence,
            ENGLISH_CONFIDENCE_BOUNDS,
            FilterConfiguration::default().english_confidence,
        );
        self.sentiment_threshold = clamp_f64(
            self.sentiment_threshold,
            SENTIMENT_THRESHOLD_BOUNDS,
            FilterConfiguration::default().sentiment_threshold,
        );
        self.dedup_threshold = self
            .dedup_threshold
            .clamp(DEDUP_THRESHOLD_BOUNDS.0, DEDUP_THRESHOLD_BOUNDS.1);
        self
    }

    /// Builds a configuration from a loose settings object, e.g. what a
    /// dashboard form posts.
    ///
    /// Unknown keys are ignored. Gates accept booleans, numbers and the usual
    /// truthy strings. Thresholds accept numbers or numeric strings and are
    /// clamped. Values that cannot be interpreted keep their default. A
    /// top-level `filters` object is unwrapped first.
    pub fn from_settings(settings: &Value) -> Self {
        let mut config = FilterConfiguration::default();
        let settings = match settings.get("filters") {
            Some(inner @ Value::Object(_)) => inner,
            _ => settings,
        };
        let Value::Object(map) = settings else {
            if !settings.is_null() {
                warn!("Filter settings are not an object; using defaults");
            }
            return config;
        };

        for (key, value) in map {
            let gate = match key.as_str() {
                "min_chars" => Some(&mut config.min_chars),
                "min_alpha" => Some(&mut config.min_alpha),
                "min_words" => Some(&mut config.min_words),
                "blacklist_match" => Some(&mut config.blacklist_match),
                "emoji_only" => Some(&mut config.emoji_only),
                "url_only" => Some(&mut config.url_only),
                "timestamp_only" => Some(&mut config.timestamp_only),
                "repeat_char" => Some(&mut config.repeat_char),
                "english_only" => Some(&mut config.english_only),
                "sentiment_filter" => Some(&mut config.sentiment_filter),
                "dedup" => Some(&mut config.dedup),
                _ => None,
            };
            if let Some(gate) = gate {
                match coerce_bool(value) {
                    Some(flag) => *gate = flag,
                    None => warn!(key = %key, value = %value, "Ignoring unreadable filter toggle"),
                }
                continue;
            }

            let numeric = match key.as_str() {
                "min_chars_threshold"
                | "min_words_threshold"
                | "english_confidence"
                | "sentiment_threshold"
                | "dedup_threshold" => coerce_number(value),
                _ => continue,
            };
            let Some(number) = numeric else {
                warn!(key = %key, value = %value, "Ignoring unreadable filter threshold");
                continue;
            };
            match key.as_str() {
                "min_chars_threshold" => config.min_chars_threshold = clamp_int(number, MIN_CHARS_BOUNDS),
                "min_words_threshold" => config.min_words_threshold = clamp_int(number, MIN_WORDS_BOUNDS),
                "english_confidence" => config.english_confidence = number,
                "sentiment_threshold" => config.sentiment_threshold = number,
                "dedup_threshold" => {
                    let (lo, hi) = DEDUP_THRESHOLD_BOUNDS;
                    config.dedup_threshold = clamp_int(number, (lo as usize, hi as usize)) as u32;
                }
                _ => {}
            }
        }

        config.clamped()
    }
}

fn clamp_f64(value: f64, (lo, hi): (f64, f64), fallback: f64) -> f64 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(lo, hi)
    }
}

fn clamp_int(value: f64, (lo, hi): (usize, usize)) -> usize {
    let truncated = value.trunc();
    if truncated <= lo as f64 {
        lo
    } else if truncated >= hi as f64 {
        hi
    } else {
        truncated as usize
    }
}

fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::Null => Some(false),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" | "" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

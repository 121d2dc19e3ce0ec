use lingua::{Language, LanguageDetector, LanguageDetectorBuilder};
use whatlang::Script;

use crate::error::{PipelineError, Result};

pub trait LanguageIdentifier: Send + Sync {
    /// Confidence in `[0, 1]` that `text` is English.
    fn english_confidence(&self, text: &str) -> Result<f64>;
}

/// Languages English is weighed against. Confidence values are relative to
/// this set.
const CANDIDATE_LANGUAGES: [Language; 17] = [
    Language::English,
    Language::Spanish,
    Language::Portuguese,
    Language::French,
    Language::German,
    Language::Italian,
    Language::Dutch,
    Language::Polish,
    Language::Turkish,
    Language::Indonesian,
    Language::Vietnamese,
    Language::Russian,
    Language::Arabic,
    Language::Hindi,
    Language::Chinese,
    Language::Japanese,
    Language::Korean,
];

/// Language identification for short comments.
///
/// `whatlang` classifies the script first: anything not written in Latin
/// script scores 0 without touching the n-gram models. Latin text is scored
/// by `lingua`, which yields a probability per candidate language rather than
/// a single best guess, so a four-word English comment still scores high.
///
/// Text with no letters at all is an error, which the language stage treats
/// as "keep".
pub struct EnglishIdentifier {
    detector: LanguageDetector,
}

impl EnglishIdentifier {
    pub fn new() -> Self {
        EnglishIdentifier {
            detector: LanguageDetectorBuilder::from_languages(&CANDIDATE_LANGUAGES).build(),
        }
    }
}

impl Default for EnglishIdentifier {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageIdentifier for EnglishIdentifier {
    fn english_confidence(&self, text: &str) -> Result<f64> {
        if let Some(script) = whatlang::detect_script(text) {
            if script != Script::Latin {
                return Ok(0.0);
            }
        }
        let values = self.detector.compute_language_confidence_values(text);
        if values.iter().all(|(_, confidence)| *confidence <= 0.0) {
            return Err(PipelineError::capability(
                "language",
                "no language could be detected",
            ));
        }
        Ok(values
            .into_iter()
            .find(|(language, _)| *language == Language::English)
            .map_or(0.0, |(_, confidence)| confidence.clamp(0.0, 1.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_english_comments_pass_default_threshold() {
        let identifier = EnglishIdentifier::new();
        for text in [
            "what camera do you use",
            "thanks for explaining this so clearly",
            "Great explanation, finally understand it",
            "this is a great video thanks",
            "check 1:23 for the best part",
        ] {
            let confidence = identifier.english_confidence(text).unwrap();
            assert!(confidence >= 0.5, "{:?} scored {}", text, confidence);
        }
    }

    #[test]
    fn test_other_languages_score_low() {
        let identifier = EnglishIdentifier::new();
        let german = identifier
            .english_confidence(
                "Das ist wirklich eines der besten Videos, die ich je über Möbelbau gesehen \
                 habe, und die Erklärung der Holzverbindungen war sehr verständlich.",
            )
            .unwrap();
        let spanish = identifier
            .english_confidence("muchas gracias por el video, me ayudó bastante")
            .unwrap();
        assert!(german < 0.5, "german scored {}", german);
        assert!(spanish < 0.5, "spanish scored {}", spanish);
    }

    #[test]
    fn test_non_latin_script_scores_zero() {
        let identifier = EnglishIdentifier::new();
        assert_eq!(
            identifier.english_confidence("Спасибо за отличное видео").unwrap(),
            0.0
        );
        assert_eq!(identifier.english_confidence("とても分かりやすい動画でした").unwrap(), 0.0);
    }

    #[test]
    fn test_undetectable_text_is_an_error() {
        let identifier = EnglishIdentifier::new();
        assert!(identifier.english_confidence("12345 !!! ???").is_err());
    }
}

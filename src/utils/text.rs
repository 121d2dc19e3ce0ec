// Text utils
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// Main emoji blocks plus the joiners, selectors and tag characters that glue
/// emoji sequences together. Not exhaustive, but covers what shows up in
/// comment sections.
static EMOJI_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        "[",
        r"\x{1F000}-\x{1FAFF}", // mahjong .. symbols & pictographs ext-A, incl. flags and skin tones
        r"\x{2600}-\x{27BF}",   // misc symbols, dingbats
        r"\x{2300}-\x{23FF}",   // misc technical (watch, hourglass, ...)
        r"\x{2B00}-\x{2BFF}",   // arrows & stars
        r"\x{2190}-\x{21FF}",
        r"\x{25A0}-\x{25FF}",   // geometric shapes
        r"\x{2100}-\x{214F}",   // letterlike (tm, info)
        r"\x{3030}\x{303D}\x{3297}\x{3299}",
        r"\x{00A9}\x{00AE}\x{203C}\x{2049}\x{24C2}",
        r"\x{FE00}-\x{FE0F}",   // variation selectors
        r"\x{200D}\x{20E3}",    // ZWJ, keycap
        r"\x{E0020}-\x{E007F}", // tag sequences
        "]"
    ))
    .expect("emoji pattern is valid")
});

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:https?://|www\.)\S+").expect("url pattern is valid"));

// H:MM:SS or MM:SS, nothing else
static TIMESTAMP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\d+:)?\d{1,2}:\d{2}$").expect("timestamp pattern is valid"));

static PHRASE_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z']+").expect("token pattern is valid"));

/// Comparison key for blacklist and exact-duplicate matching.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Character count of the trimmed text.
pub fn char_len(text: &str) -> usize {
    text.trim().chars().count()
}

pub fn ascii_letter_count(text: &str) -> usize {
    text.chars().filter(|c| c.is_ascii_alphabetic()).count()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn strip_emoji(text: &str) -> Cow<'_, str> {
    EMOJI_RE.replace_all(text, "")
}

pub fn strip_urls(text: &str) -> Cow<'_, str> {
    URL_RE.replace_all(text, "")
}

/// True when the whole comment is a bare video timecode like `1:23` or `1:02:03`.
pub fn is_bare_timestamp(text: &str) -> bool {
    TIMESTAMP_RE.is_match(text.trim())
}

/// True when one alphanumeric character occurs `min_run` or more times in a row.
pub fn has_repeated_char(text: &str, min_run: usize) -> bool {
    let mut previous: Option<char> = None;
    let mut run = 0usize;
    for ch in text.chars() {
        if !ch.is_alphanumeric() {
            previous = None;
            run = 0;
            continue;
        }
        if previous == Some(ch) {
            run += 1;
        } else {
            previous = Some(ch);
            run = 1;
        }
        if run >= min_run {
            return true;
        }
    }
    false
}

/// Lowercase word tokens used for phrase mining (letters and apostrophes).
pub fn phrase_tokens(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    PHRASE_TOKEN_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "arent", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "cant", "cannot", "could", "couldnt", "did", "didnt", "do", "does",
    "doesnt", "doing", "dont", "down", "during", "each", "even", "few", "for", "from", "further",
    "get", "got", "had", "hadnt", "has", "hasnt", "have", "havent", "having", "he", "hed", "hell",
    "hes", "her", "here", "heres", "hers", "herself", "him", "himself", "his", "how", "hows", "i",
    "id", "ill", "im", "ive", "if", "in", "into", "is", "isnt", "it", "its", "itself", "just",
    "lets", "me", "more", "most", "mustnt", "my", "myself", "no", "nor", "not", "of", "off", "on",
    "once", "only", "or", "other", "ought", "our", "ours", "ourselves", "out", "over", "own",
    "really", "same", "shant", "she", "shed", "shell", "shes", "should", "shouldnt", "so", "some",
    "still", "such", "than", "that", "thats", "the", "their", "theirs", "them", "themselves",
    "then", "there", "theres", "these", "they", "theyd", "theyll", "theyre", "theyve", "this",
    "those", "through", "to", "too", "under", "until", "up", "very", "was", "wasnt", "we", "wed",
    "well", "were", "weve", "werent", "what", "whats", "when", "whens", "where", "wheres",
    "which", "while", "who", "whos", "whom", "why", "whys", "will", "with", "wont", "would",
    "wouldnt", "you", "youd", "youll", "youre", "youve", "your", "yours", "yourself",
    "yourselves", "s", "t", "u", "r",
];

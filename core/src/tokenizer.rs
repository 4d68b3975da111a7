use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref DIGIT: Regex = Regex::new(r"\d").expect("valid regex");
    static ref NON_WORD: Regex = Regex::new(r"[^\w\s]").expect("valid regex");
}

/// How raw document text is cut into terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenizeMode {
    /// Lower-case, blank out digits and punctuation, then split.
    NormalizeThenSplit,
    /// Blank out punctuation only; case and digits survive.
    PunctuationOnly,
}

/// Split `text` on single spaces after the mode's rewrites.
///
/// Consecutive separators produce empty strings; callers decide whether to keep them.
pub fn tokenize(text: &str, mode: TokenizeMode) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let cleaned = match mode {
        TokenizeMode::NormalizeThenSplit => {
            let lowered = text.to_lowercase();
            let no_digits = DIGIT.replace_all(&lowered, " ");
            NON_WORD.replace_all(&no_digits, " ").into_owned()
        }
        TokenizeMode::PunctuationOnly => NON_WORD.replace_all(text, " ").into_owned(),
    };
    cleaned.split(' ').map(str::to_owned).collect()
}

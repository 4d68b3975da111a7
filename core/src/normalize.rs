//! Dictionary compression: term rewrites that fold equivalent terms together.

use crate::IndexError;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

const STOPWORDS_SMALL: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "is", "are", "was", "were", "be", "been", "have", "has", "had", "do", "does", "did",
    "will", "would", "could", "should",
];

// Added on top of STOPWORDS_SMALL to form the large set.
const STOPWORDS_LARGE_EXTRA: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers",
    "herself", "it", "its", "itself", "they", "them", "their", "theirs", "themselves",
    "what", "which", "who", "whom", "this", "that", "these", "those", "am", "being",
    "having", "doing", "if", "because", "as", "until", "while", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "up",
    "down", "out", "off", "over", "under", "again", "further", "then", "once", "here",
    "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so",
    "than", "too", "very", "s", "t", "can", "just", "don", "now", "d", "ll", "m", "o",
    "re", "ve", "y", "ain", "aren", "couldn", "didn", "doesn", "hadn", "hasn", "haven",
    "isn", "ma", "mightn", "mustn", "needn", "shan", "shouldn", "wasn", "weren", "won",
    "wouldn",
];

// Order matters: the first suffix that fits wins.
const SUFFIXES: &[&str] = &[
    "ing", "ed", "er", "est", "ly", "tion", "sion", "ness", "ment", "able", "ible",
];

lazy_static! {
    static ref DEFAULT_TABLES: NormalizerTables = NormalizerTables::english();
    // Decimal digits only (Unicode Nd), the same class the tokenizer blanks out.
    static ref ALL_DIGITS: Regex = Regex::new(r"^\d+$").expect("valid regex");
}

/// Immutable lookup data shared by every normalizer.
#[derive(Debug, Clone)]
pub struct NormalizerTables {
    pub stopwords_small: HashSet<String>,
    pub stopwords_large: HashSet<String>,
    pub suffixes: Vec<String>,
}

impl NormalizerTables {
    pub fn english() -> Self {
        let stopwords_small: HashSet<String> = STOPWORDS_SMALL.iter().map(|w| w.to_string()).collect();
        let stopwords_large = stopwords_small
            .iter()
            .cloned()
            .chain(STOPWORDS_LARGE_EXTRA.iter().map(|w| w.to_string()))
            .collect();
        Self {
            stopwords_small,
            stopwords_large,
            suffixes: SUFFIXES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// The process-wide English tables.
    pub fn shared() -> &'static NormalizerTables {
        &DEFAULT_TABLES
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompressionStrategy {
    None,
    DropNumeric,
    CaseFold,
    StopwordsSmall,
    StopwordsLarge,
    Stem,
    ComposeAll,
}

impl CompressionStrategy {
    pub const ALL: [CompressionStrategy; 7] = [
        CompressionStrategy::None,
        CompressionStrategy::DropNumeric,
        CompressionStrategy::CaseFold,
        CompressionStrategy::StopwordsSmall,
        CompressionStrategy::StopwordsLarge,
        CompressionStrategy::Stem,
        CompressionStrategy::ComposeAll,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CompressionStrategy::None => "none",
            CompressionStrategy::DropNumeric => "drop-numeric",
            CompressionStrategy::CaseFold => "case-fold",
            CompressionStrategy::StopwordsSmall => "stopwords-small",
            CompressionStrategy::StopwordsLarge => "stopwords-large",
            CompressionStrategy::Stem => "stem",
            CompressionStrategy::ComposeAll => "compose-all",
        }
    }
}

impl fmt::Display for CompressionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CompressionStrategy {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let strategy = match s.trim() {
            "none" | "unfiltered" => CompressionStrategy::None,
            "drop-numeric" | "no_numbers" => CompressionStrategy::DropNumeric,
            "case-fold" | "case_folding" => CompressionStrategy::CaseFold,
            "stopwords-small" | "stop_words_30" => CompressionStrategy::StopwordsSmall,
            "stopwords-large" | "stop_words_150" => CompressionStrategy::StopwordsLarge,
            "stem" | "stemming" => CompressionStrategy::Stem,
            "compose-all" | "all" => CompressionStrategy::ComposeAll,
            other => return Err(IndexError::UnknownStrategy(other.to_string())),
        };
        Ok(strategy)
    }
}

/// Maps a raw term to at most one canonical term under a fixed strategy.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer<'t> {
    strategy: CompressionStrategy,
    tables: &'t NormalizerTables,
}

impl Normalizer<'static> {
    pub fn new(strategy: CompressionStrategy) -> Self {
        Self::with_tables(strategy, NormalizerTables::shared())
    }
}

impl<'t> Normalizer<'t> {
    pub fn with_tables(strategy: CompressionStrategy, tables: &'t NormalizerTables) -> Self {
        Self { strategy, tables }
    }

    pub fn strategy(&self) -> CompressionStrategy {
        self.strategy
    }

    /// `None` means the term is dropped from the vocabulary.
    pub fn normalize(&self, term: &str) -> Option<String> {
        match self.strategy {
            CompressionStrategy::None => Some(term.to_string()),
            CompressionStrategy::DropNumeric => drop_numeric(term).map(str::to_string),
            CompressionStrategy::CaseFold => Some(term.to_lowercase()),
            CompressionStrategy::StopwordsSmall => {
                drop_stopword(term, &self.tables.stopwords_small).map(str::to_string)
            }
            CompressionStrategy::StopwordsLarge => {
                drop_stopword(term, &self.tables.stopwords_large).map(str::to_string)
            }
            CompressionStrategy::Stem => Some(stem(term, &self.tables.suffixes).to_string()),
            CompressionStrategy::ComposeAll => {
                let term = drop_numeric(term)?.to_lowercase();
                let term = drop_stopword(&term, &self.tables.stopwords_large)?;
                Some(stem(term, &self.tables.suffixes).to_string())
            }
        }
    }
}

fn drop_numeric(term: &str) -> Option<&str> {
    (!ALL_DIGITS.is_match(term)).then_some(term)
}

fn drop_stopword<'a>(term: &'a str, stopwords: &HashSet<String>) -> Option<&'a str> {
    (!stopwords.contains(&term.to_lowercase())).then_some(term)
}

/// Strip at most one suffix. Lengths are counted in characters.
pub fn stem<'a, S: AsRef<str>>(word: &'a str, suffixes: &[S]) -> &'a str {
    let len = word.chars().count();
    if len <= 3 {
        return word;
    }
    for suffix in suffixes {
        let suffix = suffix.as_ref();
        if word.ends_with(suffix) && len > suffix.chars().count() + 2 {
            return &word[..word.len() - suffix.len()];
        }
    }
    if word.ends_with('s') && !word.ends_with("ss") {
        return &word[..word.len() - 1];
    }
    word
}

use crate::tokenizer::{tokenize, TokenizeMode};
use crate::{DocId, Document, IndexError, InvertedIndex, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

/// Which construction algorithm produced an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Construction {
    /// Sort-then-group over all (term, doc) pairs.
    Naive,
    /// Single pass, appending doc ids as tokens stream by.
    Spimi,
}

impl Construction {
    pub fn tokenize_mode(&self) -> TokenizeMode {
        match self {
            Construction::Naive => TokenizeMode::NormalizeThenSplit,
            Construction::Spimi => TokenizeMode::PunctuationOnly,
        }
    }

    pub fn builder(&self) -> Box<dyn IndexBuilder> {
        match self {
            Construction::Naive => Box::new(NaiveBuilder),
            Construction::Spimi => Box::new(SpimiBuilder),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Construction::Naive => "naive",
            Construction::Spimi => "spimi",
        }
    }
}

impl fmt::Display for Construction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Construction {
    type Err = IndexError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "naive" => Ok(Construction::Naive),
            "spimi" => Ok(Construction::Spimi),
            other => Err(IndexError::UnknownConstruction(other.to_string())),
        }
    }
}

pub trait IndexBuilder {
    fn construction(&self) -> Construction;
    fn build(&self, documents: &[Document]) -> Result<InvertedIndex>;
}

/// One token occurrence. Ordered by term, then doc id; equality agrees with that order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TermDocPair {
    pub term: String,
    pub doc_id: DocId,
}

impl TermDocPair {
    pub fn new(term: impl Into<String>, doc_id: DocId) -> Self {
        Self { term: term.into(), doc_id }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NaiveBuilder;

impl NaiveBuilder {
    /// Every token occurrence, duplicates and empty tokens included.
    pub fn term_doc_pairs(&self, documents: &[Document]) -> Vec<TermDocPair> {
        let mode = self.construction().tokenize_mode();
        documents
            .iter()
            .flat_map(|doc| {
                tokenize(&doc.content, mode)
                    .into_iter()
                    .map(move |term| TermDocPair::new(term, doc.id))
            })
            .collect()
    }
}

impl IndexBuilder for NaiveBuilder {
    fn construction(&self) -> Construction {
        Construction::Naive
    }

    fn build(&self, documents: &[Document]) -> Result<InvertedIndex> {
        let pairs = self.term_doc_pairs(documents);
        let raw_pairs = pairs.len();

        let mut pairs: Vec<TermDocPair> = pairs.into_iter().collect::<HashSet<_>>().into_iter().collect();
        pairs.sort_unstable();
        debug!(raw_pairs, unique_pairs = pairs.len(), "sorted term-document pairs");

        let mut postings: HashMap<String, Vec<DocId>> = HashMap::new();
        for TermDocPair { term, doc_id } in pairs {
            postings.entry(term).or_default().push(doc_id);
        }

        let index = InvertedIndex::from_postings(Construction::Naive, documents.len(), postings);
        info!(
            num_docs = index.document_count(),
            vocabulary_size = index.vocabulary_size(),
            "naive index built"
        );
        Ok(index)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SpimiBuilder;

impl IndexBuilder for SpimiBuilder {
    fn construction(&self) -> Construction {
        Construction::Spimi
    }

    /// Documents must arrive in non-decreasing id order.
    fn build(&self, documents: &[Document]) -> Result<InvertedIndex> {
        let mode = self.construction().tokenize_mode();
        let mut postings: HashMap<String, Vec<DocId>> = HashMap::new();
        let mut previous: Option<DocId> = None;
        let mut tokens_seen = 0usize;

        for doc in documents {
            if let Some(prev) = previous {
                if doc.id < prev {
                    return Err(IndexError::OutOfOrderDocument { previous: prev, current: doc.id });
                }
            }
            previous = Some(doc.id);

            for token in tokenize(&doc.content, mode) {
                if token.trim().is_empty() {
                    continue;
                }
                tokens_seen += 1;
                let list = postings.entry(token).or_default();
                if list.last() != Some(&doc.id) {
                    list.push(doc.id);
                }
            }
        }
        debug!(tokens_seen, "streamed tokens");

        let index = InvertedIndex::from_postings(Construction::Spimi, documents.len(), postings);
        info!(
            num_docs = index.document_count(),
            vocabulary_size = index.vocabulary_size(),
            "spimi index built"
        );
        Ok(index)
    }
}

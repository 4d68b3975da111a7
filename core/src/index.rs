use crate::builder::Construction;
use crate::query::{self, PostingsSource};
use crate::DocId;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;

/// Summary counters over an index, used by reports and comparison tables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexStatistics {
    pub document_count: usize,
    pub vocabulary_size: usize,
    pub total_postings: usize,
    pub average_postings_length: f64,
}

/// Term -> postings list. Every list is strictly increasing by doc id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvertedIndex {
    construction: Construction,
    document_count: usize,
    postings: HashMap<String, Vec<DocId>>, // each list sorted, no duplicates
}

impl InvertedIndex {
    /// Callers must hand over strictly increasing postings lists.
    pub fn from_postings(
        construction: Construction,
        document_count: usize,
        postings: HashMap<String, Vec<DocId>>,
    ) -> Self {
        debug_assert!(postings.values().all(|p| is_strictly_increasing(p)));
        Self { construction, document_count, postings }
    }

    pub fn construction(&self) -> Construction {
        self.construction
    }

    pub fn document_count(&self) -> usize {
        self.document_count
    }

    pub fn vocabulary_size(&self) -> usize {
        self.postings.len()
    }

    pub fn total_postings(&self) -> usize {
        self.postings.values().map(Vec::len).sum()
    }

    /// Exact lookup with no query-side normalization.
    pub fn postings(&self, term: &str) -> &[DocId] {
        self.postings.get(term).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.postings.contains_key(term)
    }

    /// Rewrite a query term the way this index's tokenizer rewrote document terms.
    pub fn query_form<'a>(&self, term: &'a str) -> Cow<'a, str> {
        let term = term.trim();
        match self.construction {
            Construction::Naive => Cow::Owned(term.to_lowercase()),
            Construction::Spimi => Cow::Borrowed(term),
        }
    }

    pub fn search_term(&self, term: &str) -> &[DocId] {
        self.postings(&self.query_form(term))
    }

    pub fn search_and_query<T: AsRef<str>>(&self, terms: &[T]) -> Vec<DocId> {
        query::and_query(self, terms)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[DocId])> {
        self.postings.iter().map(|(t, p)| (t.as_str(), p.as_slice()))
    }

    /// Terms in lexicographic order, for reproducible dumps.
    pub fn sorted_terms(&self) -> Vec<&str> {
        let mut terms: Vec<&str> = self.postings.keys().map(String::as_str).collect();
        terms.sort_unstable();
        terms
    }

    pub fn statistics(&self) -> IndexStatistics {
        let vocabulary_size = self.vocabulary_size();
        let total_postings = self.total_postings();
        let average_postings_length = if vocabulary_size > 0 {
            total_postings as f64 / vocabulary_size as f64
        } else {
            0.0
        };
        IndexStatistics {
            document_count: self.document_count,
            vocabulary_size,
            total_postings,
            average_postings_length,
        }
    }

    pub fn is_well_formed(&self) -> bool {
        self.postings.values().all(|p| is_strictly_increasing(p))
    }
}

impl PostingsSource for InvertedIndex {
    fn lookup(&self, term: &str) -> Cow<'_, [DocId]> {
        Cow::Borrowed(self.search_term(term))
    }
}

pub fn is_strictly_increasing(ids: &[DocId]) -> bool {
    ids.windows(2).all(|w| w[0] < w[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny(construction: Construction) -> InvertedIndex {
        let mut postings = HashMap::new();
        postings.insert("apple".to_string(), vec![1, 2]);
        postings.insert("Phone".to_string(), vec![1, 3]);
        InvertedIndex::from_postings(construction, 3, postings)
    }

    #[test]
    fn statistics_average() {
        let stats = tiny(Construction::Spimi).statistics();
        assert_eq!(stats.document_count, 3);
        assert_eq!(stats.vocabulary_size, 2);
        assert_eq!(stats.total_postings, 4);
        assert_eq!(stats.average_postings_length, 2.0);
    }

    #[test]
    fn empty_vocabulary_reports_zero_average() {
        let index = InvertedIndex::from_postings(Construction::Naive, 0, HashMap::new());
        let stats = index.statistics();
        assert_eq!(stats.vocabulary_size, 0);
        assert_eq!(stats.average_postings_length, 0.0);
    }

    #[test]
    fn unknown_term_is_empty() {
        let index = tiny(Construction::Spimi);
        assert!(index.postings("banana").is_empty());
        assert!(index.search_term("banana").is_empty());
    }

    #[test]
    fn query_normalization_follows_construction() {
        let spimi = tiny(Construction::Spimi);
        assert_eq!(spimi.search_term(" Phone "), &[1, 3]);
        assert!(spimi.search_term("phone").is_empty());

        let naive = tiny(Construction::Naive);
        assert_eq!(naive.search_term("APPLE"), &[1, 2]);
    }

    #[test]
    fn sorted_terms_are_lexicographic() {
        assert_eq!(tiny(Construction::Spimi).sorted_terms(), vec!["Phone", "apple"]);
    }

    #[test]
    fn strictly_increasing_check() {
        assert!(is_strictly_increasing(&[]));
        assert!(is_strictly_increasing(&[1, 4, 9]));
        assert!(!is_strictly_increasing(&[1, 1]));
        assert!(!is_strictly_increasing(&[3, 2]));
    }
}

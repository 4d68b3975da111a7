use crate::normalize::{CompressionStrategy, Normalizer};
use crate::query::{self, PostingsSource};
use crate::{DocId, IndexStatistics, InvertedIndex};
use std::borrow::Cow;
use std::collections::HashMap;
use tracing::info;

/// An index re-derived from another by folding every term through a [`Normalizer`].
#[derive(Debug, Clone)]
pub struct CompressedIndex<'t> {
    normalizer: Normalizer<'t>,
    index: InvertedIndex,
}

impl CompressedIndex<'static> {
    pub fn build(source: &InvertedIndex, strategy: CompressionStrategy) -> Self {
        Self::with_normalizer(source, Normalizer::new(strategy))
    }
}

impl<'t> CompressedIndex<'t> {
    pub fn with_normalizer(source: &InvertedIndex, normalizer: Normalizer<'t>) -> Self {
        let mut postings: HashMap<String, Vec<DocId>> = HashMap::new();
        for (term, ids) in source.iter() {
            match normalizer.normalize(term) {
                Some(folded) if !folded.is_empty() => {
                    postings.entry(folded).or_default().extend_from_slice(ids)
                }
                _ => {}
            }
        }
        for ids in postings.values_mut() {
            ids.sort_unstable();
            ids.dedup();
        }

        let index = InvertedIndex::from_postings(source.construction(), source.document_count(), postings);
        info!(
            strategy = %normalizer.strategy(),
            before = source.vocabulary_size(),
            after = index.vocabulary_size(),
            "compressed dictionary"
        );
        Self { normalizer, index }
    }

    pub fn strategy(&self) -> CompressionStrategy {
        self.normalizer.strategy()
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    /// Apply the source index's query rewrite, fold the result like the vocabulary, then look it up.
    pub fn search_term(&self, term: &str) -> &[DocId] {
        match self.normalizer.normalize(&self.index.query_form(term)) {
            Some(folded) => self.index.postings(&folded),
            None => &[],
        }
    }

    pub fn search_and_query<T: AsRef<str>>(&self, terms: &[T]) -> Vec<DocId> {
        query::and_query(self, terms)
    }

    pub fn statistics(&self) -> IndexStatistics {
        self.index.statistics()
    }
}

impl PostingsSource for CompressedIndex<'_> {
    fn lookup(&self, term: &str) -> Cow<'_, [DocId]> {
        Cow::Borrowed(self.search_term(term))
    }
}

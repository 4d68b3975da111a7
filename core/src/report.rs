//! Human-readable reports: index dumps and compression comparison tables.

use crate::normalize::CompressionStrategy;
use crate::query::Query;
use crate::{CompressedIndex, InvertedIndex};
use serde::Serialize;
use std::io::{self, Write};

pub const BASELINE: &str = "unfiltered";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompressionRow {
    pub technique: String,
    pub distinct_terms: usize,
    pub total_postings: usize,
}

/// Baseline row for the unmodified index, then one row per non-trivial strategy.
pub fn compression_table(index: &InvertedIndex) -> Vec<CompressionRow> {
    let stats = index.statistics();
    let mut rows = vec![CompressionRow {
        technique: BASELINE.to_string(),
        distinct_terms: stats.vocabulary_size,
        total_postings: stats.total_postings,
    }];
    for strategy in compared_strategies() {
        let stats = CompressedIndex::build(index, strategy).statistics();
        rows.push(CompressionRow {
            technique: strategy.to_string(),
            distinct_terms: stats.vocabulary_size,
            total_postings: stats.total_postings,
        });
    }
    rows
}

pub fn render_compression_table(rows: &[CompressionRow]) -> String {
    let mut out = format!("{:<16} {:<12} {:<12}\n", "Technique", "Terms", "Postings");
    for row in rows {
        out.push_str(&format!("{:<16} {:<12} {:<12}\n", row.technique, row.distinct_terms, row.total_postings));
    }
    out
}

/// Result counts for one query across the baseline and every compressed variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryComparison {
    pub query: String,
    pub baseline: usize,
    pub compressed: Vec<(CompressionStrategy, usize)>,
}

pub fn compare_queries(index: &InvertedIndex, queries: &[Query]) -> Vec<QueryComparison> {
    let variants: Vec<CompressedIndex<'static>> = compressed_variants(index);
    queries
        .iter()
        .map(|q| QueryComparison {
            query: q.to_string(),
            baseline: q.evaluate(index).len(),
            compressed: variants.iter().map(|c| (c.strategy(), q.evaluate(c).len())).collect(),
        })
        .collect()
}

pub fn render_query_comparison(rows: &[QueryComparison]) -> String {
    let mut out = String::new();
    for row in rows {
        out.push_str(&format!("Query: '{}'\n", row.query));
        out.push_str(&format!("  {:<16} {} documents\n", "original", row.baseline));
        for (strategy, count) in &row.compressed {
            out.push_str(&format!("  {:<16} {} documents\n", strategy.to_string(), count));
        }
    }
    out
}

/// Header line, statistics line, then `<term> -> [ids]` in lexicographic order.
pub fn write_index_dump<W: Write>(mut w: W, header: &str, index: &InvertedIndex) -> io::Result<()> {
    writeln!(w, "{header}")?;
    writeln!(w, "{}", serde_json::to_string(&index.statistics()).map_err(io::Error::from)?)?;
    for term in index.sorted_terms() {
        writeln!(w, "{term} -> {:?}", index.postings(term))?;
    }
    w.flush()
}

fn compared_strategies() -> impl Iterator<Item = CompressionStrategy> {
    CompressionStrategy::ALL.into_iter().filter(|s| *s != CompressionStrategy::None)
}

fn compressed_variants(index: &InvertedIndex) -> Vec<CompressedIndex<'static>> {
    compared_strategies().map(|s| CompressedIndex::build(index, s)).collect()
}

use sift_core::{
    CompressedIndex, CompressionStrategy, Construction, Document, InvertedIndex, Query,
};

fn corpus() -> Vec<Document> {
    vec![
        Document::new(1, "Apple released a new phone"),
        Document::new(2, "Samsung and Apple compete"),
        Document::new(3, "The phone market grew"),
    ]
}

fn build(construction: Construction) -> InvertedIndex {
    construction.builder().build(&corpus()).unwrap()
}

#[test]
fn case_fold_single_and_and_queries() {
    for construction in [Construction::Naive, Construction::Spimi] {
        let c = CompressedIndex::build(&build(construction), CompressionStrategy::CaseFold);
        assert_eq!(c.search_term("apple"), &[1, 2]);
        assert_eq!(c.search_and_query(&["apple", "phone"]), vec![1]);
    }
}

#[test]
fn small_stopwords_leave_the_vocabulary() {
    let c = CompressedIndex::build(&build(Construction::Spimi), CompressionStrategy::StopwordsSmall);
    for dropped in ["a", "and", "the", "The"] {
        assert!(!c.index().contains_term(dropped), "{dropped} should be gone");
    }
    assert!(c.search_term("the").is_empty());
    assert_eq!(c.search_term("Samsung"), &[2]);
}

#[test]
fn stemming_rewrites_released() {
    let c = CompressedIndex::build(&build(Construction::Naive), CompressionStrategy::Stem);
    assert!(c.index().contains_term("releas"));
    assert!(!c.index().contains_term("released"));
    assert_eq!(c.search_term("released"), &[1]);
}

#[test]
fn raw_indexes_differ_in_case_handling() {
    let spimi = build(Construction::Spimi);
    assert_eq!(spimi.search_term("Apple"), &[1, 2]);
    assert!(spimi.search_term("apple").is_empty());

    let naive = build(Construction::Naive);
    assert_eq!(naive.search_term("Apple"), &[1, 2]);
    assert_eq!(naive.search_and_query(&["phone", "market"]), vec![3]);
}

#[test]
fn query_strings_drive_the_engine() {
    let c = CompressedIndex::build(&build(Construction::Spimi), CompressionStrategy::ComposeAll);
    assert_eq!(Query::parse("Apple AND phone").evaluate(&c), vec![1]);
    assert_eq!(Query::parse("  phones ").evaluate(&c), vec![1, 3]);
    assert!(Query::parse("").evaluate(&c).is_empty());
    assert!(Query::parse("apple AND the AND phone").evaluate(&c).is_empty());
}

#[test]
fn statistics_for_scenario() {
    let stats = build(Construction::Spimi).statistics();
    assert_eq!(stats.document_count, 3);
    // Apple released a new phone Samsung and compete The market grew
    assert_eq!(stats.vocabulary_size, 11);
    assert_eq!(stats.total_postings, 13);
}

#[test]
fn compressed_naive_queries_are_lowercased_like_the_raw_index() {
    let naive = build(Construction::Naive);
    assert_eq!(naive.search_term("Apple"), &[1, 2]);
    for strategy in [
        CompressionStrategy::DropNumeric,
        CompressionStrategy::StopwordsSmall,
        CompressionStrategy::StopwordsLarge,
        CompressionStrategy::Stem,
    ] {
        let c = CompressedIndex::build(&naive, strategy);
        assert_eq!(c.search_term("Apple"), &[1, 2], "{strategy}");
    }
    let stem = CompressedIndex::build(&naive, CompressionStrategy::Stem);
    assert_eq!(stem.search_term("Released"), &[1]);
    assert_eq!(stem.search_and_query(&["APPLE", " Phone "]), vec![1]);
}

#[test]
fn compressed_spimi_queries_keep_their_case() {
    let c = CompressedIndex::build(&build(Construction::Spimi), CompressionStrategy::Stem);
    assert_eq!(c.search_term("Apple"), &[1, 2]);
    assert!(c.search_term("apple").is_empty());
}

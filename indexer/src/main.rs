mod corpus;

use anyhow::Result;
use clap::{Parser, Subcommand};
use sift_core::persist::{load_with_meta, save_index, save_meta, save_report, IndexPaths, MetaFile};
use sift_core::report::{compare_queries, compression_table, render_compression_table, render_query_comparison};
use sift_core::{CompressedIndex, CompressionStrategy, Construction, DocId, Query};
use tracing_subscriber::{fmt, EnvFilter};

use std::path::{Path, PathBuf};
use std::time::Instant;

const DEFAULT_QUERIES: &[&str] = &[
    "movie",
    "samsung",
    "apple",
    "movie AND oppenheimer AND viacom",
    "gold AND stock",
    "trade AND market AND oil",
];

#[derive(Parser)]
#[command(name = "sift")]
#[command(about = "Build and query Boolean inverted indexes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an index from input JSON/JSONL files or a directory
    Build {
        /// Input path (file or directory)
        #[arg(long)]
        input: String,
        /// Output index directory
        #[arg(long)]
        output: String,
        /// Construction strategy: naive (sort-then-group) or spimi (single pass)
        #[arg(long, default_value = "naive")]
        construction: Construction,
        /// Where to write the term dump; defaults to <output>/index.txt
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Run a single-term or AND query ("gold AND stock")
    Search {
        /// Index directory
        #[arg(long, default_value = "./index")]
        index: String,
        /// Dictionary compression applied before querying
        #[arg(long, default_value = "none")]
        compression: CompressionStrategy,
        query: String,
    },
    /// Print the dictionary compression table and per-strategy query counts
    Compare {
        /// Index directory
        #[arg(long, default_value = "./index")]
        index: String,
        /// Queries to compare; a fixed set is used when none are given
        #[arg(long = "query")]
        queries: Vec<String>,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output, construction, report } => {
            build_index(&input, &output, construction, report)
        }
        Commands::Search { index, compression, query } => search(&index, compression, &query),
        Commands::Compare { index, queries } => compare(&index, &queries),
    }
}

fn build_index(input: &str, output: &str, construction: Construction, report: Option<PathBuf>) -> Result<()> {
    let out_paths = IndexPaths::new(output);
    let docs = corpus::load_documents(Path::new(input))?;

    let start = Instant::now();
    let index = construction.builder().build(&docs)?;
    let stats = index.statistics();
    tracing::info!(
        %construction,
        num_docs = stats.document_count,
        vocabulary_size = stats.vocabulary_size,
        total_postings = stats.total_postings,
        average_postings_length = stats.average_postings_length,
        took_s = start.elapsed().as_secs_f64(),
        "index built"
    );

    save_index(&out_paths, &index)?;
    let created_at = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "".into());
    save_meta(&out_paths, &MetaFile::describe(&index, created_at))?;

    let report_path = report.unwrap_or_else(|| out_paths.report());
    let header = format!("# {construction} indexer results");
    save_report(&report_path, &header, &index)?;

    tracing::info!(output, report = %report_path.display(), "index build complete");
    println!("{} documents indexed", stats.document_count);
    Ok(())
}

fn search(index_dir: &str, compression: CompressionStrategy, raw_query: &str) -> Result<()> {
    let (index, meta) = load_with_meta(&IndexPaths::new(index_dir))?;
    tracing::debug!(num_docs = meta.num_docs, construction = %meta.construction, "index loaded");

    let query = Query::parse(raw_query);
    let docs = match compression {
        CompressionStrategy::None => query.evaluate(&index),
        strategy => query.evaluate(&CompressedIndex::build(&index, strategy)),
    };
    print_hits(&query, &docs);
    Ok(())
}

fn compare(index_dir: &str, raw_queries: &[String]) -> Result<()> {
    let (index, _) = load_with_meta(&IndexPaths::new(index_dir))?;

    println!("DICTIONARY COMPRESSION TABLE");
    print!("{}", render_compression_table(&compression_table(&index)));

    let queries: Vec<Query> = if raw_queries.is_empty() {
        DEFAULT_QUERIES.iter().map(|q| Query::parse(q)).collect()
    } else {
        raw_queries.iter().map(|q| Query::parse(q)).collect()
    };
    println!();
    println!("QUERY RESULTS COMPARISON");
    print!("{}", render_query_comparison(&compare_queries(&index, &queries)));
    Ok(())
}

fn print_hits(query: &Query, docs: &[DocId]) {
    if docs.is_empty() {
        match query {
            Query::Term(t) => println!("The term '{t}' was not found."),
            Query::And(_) => println!("The terms '{query}' were not found together in any document."),
        }
    } else {
        println!("'{query}': {} documents : {:?}", docs.len(), docs);
    }
}

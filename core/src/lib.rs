pub mod builder;
pub mod compression;
pub mod document;
pub mod error;
pub mod index;
pub mod normalize;
pub mod persist;
pub mod query;
pub mod report;
pub mod tokenizer;

pub use builder::{Construction, IndexBuilder, NaiveBuilder, SpimiBuilder, TermDocPair};
pub use compression::CompressedIndex;
pub use document::Document;
pub use error::{IndexError, Result};
pub use index::{IndexStatistics, InvertedIndex};
pub use normalize::{CompressionStrategy, Normalizer, NormalizerTables};
pub use query::{intersect, PostingsSource, Query};

pub type DocId = u32;

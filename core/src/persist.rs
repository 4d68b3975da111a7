use crate::report::write_index_dump;
use crate::{Construction, InvertedIndex};
use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_docs: usize,
    pub vocabulary_size: usize,
    pub construction: Construction,
    pub created_at: String,
    pub version: u32,
}

impl MetaFile {
    pub fn describe(index: &InvertedIndex, created_at: impl Into<String>) -> Self {
        Self {
            num_docs: index.document_count(),
            vocabulary_size: index.vocabulary_size(),
            construction: index.construction(),
            created_at: created_at.into(),
            version: SNAPSHOT_VERSION,
        }
    }
}

pub struct IndexPaths {
    pub root: PathBuf,
}

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    fn snapshot(&self) -> PathBuf { self.root.join("index.bin") }
    fn meta(&self) -> PathBuf { self.root.join("meta.json") }
    pub fn report(&self) -> PathBuf { self.root.join("index.txt") }
}

pub fn save_index(paths: &IndexPaths, index: &InvertedIndex) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.snapshot())?;
    let bytes = bincode::serialize(index)?;
    f.write_all(&bytes)?;
    Ok(())
}

pub fn load_index(paths: &IndexPaths) -> Result<InvertedIndex> {
    let mut f = File::open(paths.snapshot())?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)?;
    let index: InvertedIndex = bincode::deserialize(&buf)?;
    ensure!(index.is_well_formed(), "snapshot {} holds unsorted postings", paths.snapshot().display());
    Ok(index)
}

pub fn save_meta(paths: &IndexPaths, meta: &MetaFile) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.meta())?;
    let json = serde_json::to_string_pretty(meta)?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

pub fn load_meta(paths: &IndexPaths) -> Result<MetaFile> {
    let mut f = File::open(paths.meta())?;
    let mut buf = String::new();
    f.read_to_string(&mut buf)?;
    let meta: MetaFile = serde_json::from_str(&buf)?;
    ensure!(meta.version <= SNAPSHOT_VERSION, "unsupported snapshot version {}", meta.version);
    Ok(meta)
}

/// Write the human-readable term dump. Output only; there is no loader for it.
pub fn save_report<P: AsRef<Path>>(path: P, header: &str, index: &InvertedIndex) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        create_dir_all(parent)?;
    }
    let f = File::create(path.as_ref())?;
    write_index_dump(BufWriter::new(f), header, index)?;
    Ok(())
}

/// Load the snapshot and check it against its metadata.
pub fn load_with_meta(paths: &IndexPaths) -> Result<(InvertedIndex, MetaFile)> {
    let meta = load_meta(paths)?;
    let index = load_index(paths)?;
    ensure!(
        meta.construction == index.construction() && meta.num_docs == index.document_count(),
        "meta.json does not describe {}",
        paths.snapshot().display()
    );
    Ok((index, meta))
}

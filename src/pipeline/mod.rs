//! Normalize, merge, deduplicate and re-partition phone number lists.
//!
//! Files are read concurrently, then folded into a single [`Corpus`] in the
//! order they were selected, so first-seen order never depends on which read
//! finished first.

pub mod chunker;
pub mod dedup;
pub mod exporter;
pub mod normalizer;
pub mod reader;

use std::path::PathBuf;

use serde::Serialize;

use crate::error::PipelineError;
use chunker::{Chunk, Chunker};
use dedup::Corpus;
use normalizer::normalize_file;
use reader::{InputFile, read_all};

/// Summary shown after a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingStats {
    pub files_processed: usize,
    /// Data lines read across all files, before deduplication.
    pub total_records: usize,
    pub duplicates_removed: usize,
    pub unique_records: usize,
    pub chunk_count: usize,
}

/// Everything produced by one run. Replaced wholesale by the next successful run.
#[derive(Debug, Clone)]
pub struct ProcessingOutcome {
    pub sources: Vec<PathBuf>,
    pub stats: ProcessingStats,
    /// The corpus, partitioned in order.
    pub chunks: Vec<Chunk>,
}

impl ProcessingOutcome {
    /// Looks up a chunk by its 1-based index.
    pub fn chunk(&self, index: usize) -> Result<&Chunk, PipelineError> {
        index
            .checked_sub(1)
            .and_then(|i| self.chunks.get(i))
            .ok_or(PipelineError::UnknownChunk {
                index,
                count: self.chunks.len(),
            })
    }
}

/// Reads `paths` and runs the whole pipeline. Any read failure fails the run.
pub async fn process(paths: &[PathBuf]) -> Result<ProcessingOutcome, PipelineError> {
    let files = read_all(paths).await?;
    Ok(build_outcome(&files))
}

/// Folds already-read files into an outcome, in the order given.
pub fn build_outcome(files: &[InputFile]) -> ProcessingOutcome {
    let mut corpus = Corpus::new();
    for file in files {
        let records = normalize_file(&file.content);
        tracing::debug!(file = %file.name(), records = records.len(), "Normalized file");
        corpus.extend(records);
    }

    if corpus.is_empty() {
        tracing::warn!(files = files.len(), "Selection contains no data rows");
    }

    let total_records = corpus.total_lines();
    let duplicates_removed = corpus.duplicates_removed();
    let unique_records = corpus.len();
    let records = corpus.into_records();
    let chunks = Chunker::chunk(&records);

    let stats = ProcessingStats {
        files_processed: files.len(),
        total_records,
        duplicates_removed,
        unique_records,
        chunk_count: chunks.len(),
    };

    tracing::info!(
        files = stats.files_processed,
        total = stats.total_records,
        unique = stats.unique_records,
        duplicates = stats.duplicates_removed,
        chunks = stats.chunk_count,
        "Processing complete"
    );

    ProcessingOutcome {
        sources: files.iter().map(|f| f.path.clone()).collect(),
        stats,
        chunks,
    }
}

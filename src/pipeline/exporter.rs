use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tokio::fs;

use super::chunker::Chunk;
use crate::error::PipelineError;

/// Content type of exported parts.
pub const CONTENT_TYPE: &str = "text/csv";

/// File name for part `index` exported on `date`, e.g. `Numbers_170826_part_3.csv`.
pub fn export_filename(date: NaiveDate, index: usize) -> String {
    format!("Numbers_{}_part_{}.csv", date.format("%d%m%y"), index)
}

/// Writes one chunk into `dir`, named with today's local date.
///
/// The date is taken at export time. Exporting the same part twice on the
/// same day overwrites the earlier file.
pub async fn export_chunk(chunk: &Chunk, dir: &Path) -> Result<PathBuf, PipelineError> {
    export_chunk_on(chunk, dir, Local::now().date_naive()).await
}

pub async fn export_chunk_on(
    chunk: &Chunk,
    dir: &Path,
    date: NaiveDate,
) -> Result<PathBuf, PipelineError> {
    fs::create_dir_all(dir)
        .await
        .map_err(|source| PipelineError::Export {
            path: dir.to_path_buf(),
            source,
        })?;

    let path = dir.join(export_filename(date, chunk.index));
    fs::write(&path, chunk.to_text())
        .await
        .map_err(|source| PipelineError::Export {
            path: path.clone(),
            source,
        })?;

    tracing::info!(
        path = %path.display(),
        content_type = CONTENT_TYPE,
        records = chunk.len(),
        bytes = chunk.size_bytes,
        "Exported chunk"
    );
    Ok(path)
}

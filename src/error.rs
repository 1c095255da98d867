use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the processing pipeline and the chunk exporter.
#[derive(Debug, Error)]
pub enum PipelineError {
    // ── Input ─────────────────────────────────────────────────────────────────
    #[error("No input files selected")]
    NoInput,

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8 text", path.display())]
    Decode { path: PathBuf },

    // ── Export ────────────────────────────────────────────────────────────────
    #[error("Chunk {index} does not exist (valid range: 1..={count})")]
    UnknownChunk { index: usize, count: usize },

    #[error("Failed to write {}: {source}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    /// Path of the file the error is about, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            PipelineError::Read { path, .. }
            | PipelineError::Decode { path }
            | PipelineError::Export { path, .. } => Some(path),
            PipelineError::NoInput | PipelineError::UnknownChunk { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_mentions_path() {
        let err = PipelineError::Read {
            path: PathBuf::from("contacts.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        let msg = err.to_string();
        assert!(msg.contains("contacts.csv"));
        assert!(msg.contains("gone"));
        assert_eq!(err.path(), Some(&PathBuf::from("contacts.csv")));
    }

    #[test]
    fn test_unknown_chunk_message() {
        let err = PipelineError::UnknownChunk { index: 4, count: 2 };
        assert_eq!(err.to_string(), "Chunk 4 does not exist (valid range: 1..=2)");
        assert!(err.path().is_none());
    }
}

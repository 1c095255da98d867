use std::path::{Path, PathBuf};

use futures_util::future::try_join_all;
use glob::glob;
use ignore::WalkBuilder;
use mime_guess::from_path;

use crate::error::PipelineError;

const CSV_MIME: &str = "text/csv";

/// One selected file and its decoded text.
#[derive(Debug, Clone)]
pub struct InputFile {
    pub path: PathBuf,
    pub content: String,
}

impl InputFile {
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }
}

/// Expands command-line arguments into the ordered list of files to read.
///
/// Directories are walked for `*.csv` files and glob patterns are expanded;
/// both expansions are sorted. Plain paths are kept even if they do not
/// exist so the read reports them.
pub fn collect_inputs(args: &[String]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for arg in args {
        let path = Path::new(arg);
        if path.is_dir() {
            files.extend(walk_csv_files(path));
            continue;
        }

        if is_glob_pattern(arg) {
            match glob(arg) {
                Ok(paths) => {
                    let mut matched: Vec<PathBuf> = paths
                        .filter_map(|entry| match entry {
                            Ok(p) => Some(p),
                            Err(e) => {
                                tracing::warn!(error = %e, "Skipping unreadable glob match");
                                None
                            }
                        })
                        .filter(|p| p.is_file())
                        .collect();
                    matched.sort();
                    if matched.is_empty() {
                        tracing::warn!(pattern = %arg, "Glob pattern matched no files");
                    }
                    files.extend(matched);
                }
                Err(e) => {
                    tracing::warn!(pattern = %arg, error = %e, "Invalid glob pattern, using it as a path");
                    files.push(path.to_path_buf());
                }
            }
            continue;
        }

        files.push(path.to_path_buf());
    }

    for file in &files {
        if !looks_like_csv(file) {
            tracing::warn!(path = %file.display(), "File does not look like CSV, reading it anyway");
        }
    }

    files
}

/// Reads every file concurrently. The first failure aborts the batch and
/// no partial result is returned. Output order matches `paths`.
pub async fn read_all(paths: &[PathBuf]) -> Result<Vec<InputFile>, PipelineError> {
    if paths.is_empty() {
        return Err(PipelineError::NoInput);
    }

    let reads = paths.iter().map(|path| read_one(path.clone()));
    try_join_all(reads).await
}

async fn read_one(path: PathBuf) -> Result<InputFile, PipelineError> {
    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(source) => return Err(PipelineError::Read { path, source }),
    };

    let content = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(_) => return Err(PipelineError::Decode { path }),
    };
    let content = match content.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => content,
    };

    tracing::debug!(path = %path.display(), bytes = content.len(), "Read input file");
    Ok(InputFile { path, content })
}

fn walk_csv_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let walker = WalkBuilder::new(dir).git_ignore(true).build();

    for result in walker {
        match result {
            Ok(entry) => {
                let is_file = entry.file_type().is_some_and(|ft| ft.is_file());
                if is_file && has_csv_extension(entry.path()) {
                    files.push(entry.into_path());
                }
            }
            Err(err) => tracing::warn!(error = %err, "Walk error"),
        }
    }

    files.sort();
    files
}

fn is_glob_pattern(arg: &str) -> bool {
    arg.contains(['*', '?', '['])
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

fn looks_like_csv(path: &Path) -> bool {
    from_path(path).iter().any(|mime| mime.essence_str() == CSV_MIME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    fn as_args(paths: &[PathBuf]) -> Vec<String> {
        paths.iter().map(|p| p.to_string_lossy().to_string()).collect()
    }

    #[tokio::test]
    async fn test_read_all_keeps_input_order() {
        let dir = TempDir::new().unwrap();
        let b = write_file(&dir, "b.csv", b"phone\n0501\n");
        let a = write_file(&dir, "a.csv", b"phone\n0502\n");

        let files = read_all(&[b.clone(), a.clone()]).await.expect("read_all failed");
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, b);
        assert_eq!(files[1].path, a);
        assert_eq!(files[0].name(), "b.csv");
        assert_eq!(files[1].content, "phone\n0502\n");
    }

    #[tokio::test]
    async fn test_read_all_empty_selection() {
        let err = read_all(&[]).await.unwrap_err();
        assert!(matches!(err, PipelineError::NoInput));
    }

    #[tokio::test]
    async fn test_one_missing_file_fails_the_batch() {
        let dir = TempDir::new().unwrap();
        let ok = write_file(&dir, "ok.csv", b"phone\n0501\n");
        let missing = dir.path().join("missing.csv");

        let err = read_all(&[ok, missing.clone()]).await.unwrap_err();
        match err {
            PipelineError::Read { path, .. } => assert_eq!(path, missing),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_a_decode_failure() {
        let dir = TempDir::new().unwrap();
        let bad = write_file(&dir, "bad.csv", &[b'p', 0xff, 0xfe, b'\n']);

        let err = read_all(&[bad.clone()]).await.unwrap_err();
        assert!(matches!(err, PipelineError::Decode { path } if path == bad));
    }

    #[tokio::test]
    async fn test_byte_order_mark_is_dropped() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "bom.csv", "\u{feff}phone\n0501\n".as_bytes());

        let files = read_all(&[path]).await.unwrap();
        assert_eq!(files[0].content, "phone\n0501\n");
    }

    #[test]
    fn test_collect_inputs_walks_directories_for_csv() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "b.csv", b"phone\n");
        write_file(&dir, "a.CSV", b"phone\n");
        write_file(&dir, "notes.txt", b"hello\n");

        let collected = collect_inputs(&as_args(&[dir.path().to_path_buf()]));
        let names: Vec<String> = collected
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.CSV", "b.csv"]);
    }

    #[test]
    fn test_collect_inputs_expands_globs_sorted() {
        let dir = TempDir::new().unwrap();
        let second = write_file(&dir, "part2.csv", b"phone\n");
        let first = write_file(&dir, "part1.csv", b"phone\n");
        let pattern = dir.path().join("part*.csv").to_string_lossy().to_string();

        let collected = collect_inputs(&[pattern]);
        assert_eq!(collected, vec![first, second]);
    }

    #[test]
    fn test_collect_inputs_keeps_plain_paths_in_argument_order() {
        let dir = TempDir::new().unwrap();
        let z = write_file(&dir, "z.csv", b"phone\n");
        let a = write_file(&dir, "a.txt", b"phone\n");
        let missing = dir.path().join("missing.csv");

        let collected = collect_inputs(&as_args(&[z.clone(), a.clone(), missing.clone()]));
        assert_eq!(collected, vec![z, a, missing]);
    }

    #[test]
    fn test_csv_detection() {
        assert!(looks_like_csv(Path::new("numbers.csv")));
        assert!(!looks_like_csv(Path::new("numbers.txt")));
    }
}

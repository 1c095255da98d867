pub mod commands;
pub mod doctor;

use std::path::{Path, PathBuf};

use colored::Colorize;
use rust_i18n::t;

use crate::error::PipelineError;
use crate::pipeline::exporter::export_chunk;
use crate::pipeline::reader::collect_inputs;
use crate::pipeline::{ProcessingOutcome, process};

/// Which parts to export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportSelection {
    All,
    Parts(Vec<usize>),
}

impl ExportSelection {
    /// Parses `all`, `2`, `1,3` or `1 3`. Returns `None` for anything else.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.eq_ignore_ascii_case("all") {
            return Some(ExportSelection::All);
        }

        let parts: Option<Vec<usize>> = input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(|s| s.parse().ok())
            .collect();

        match parts {
            Some(parts) if !parts.is_empty() => Some(ExportSelection::Parts(parts)),
            _ => None,
        }
    }

    fn indices(&self, outcome: &ProcessingOutcome) -> Vec<usize> {
        match self {
            ExportSelection::All => outcome.chunks.iter().map(|c| c.index).collect(),
            ExportSelection::Parts(parts) => parts.clone(),
        }
    }
}

/// Collects the files named by `args` and runs the pipeline on them.
pub async fn load(args: &[String]) -> Result<ProcessingOutcome, PipelineError> {
    let paths = collect_inputs(args);
    tracing::info!(files = paths.len(), "Processing selection");
    process(&paths).await
}

/// What an export run wrote and what it could not.
#[derive(Debug, Default)]
pub struct ExportReport {
    pub written: Vec<PathBuf>,
    pub failures: Vec<PipelineError>,
}

impl ExportReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Status lines for the user: saved paths on stdout, alerts on stderr.
    pub fn print(&self) {
        for path in &self.written {
            println!("{} {}", "✓".green(), t!("exported", path = path.display()));
        }
        for err in &self.failures {
            alert(err);
        }
    }
}

/// Exports the selected parts one by one. A failed part is recorded and the
/// rest still run. Nothing is printed here.
pub async fn export_selected(
    outcome: &ProcessingOutcome,
    selection: &ExportSelection,
    dir: &Path,
) -> ExportReport {
    let mut report = ExportReport::default();
    for index in selection.indices(outcome) {
        let result = match outcome.chunk(index) {
            Ok(chunk) => export_chunk(chunk, dir).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(path) => report.written.push(path),
            Err(e) => report.failures.push(e),
        }
    }
    report
}

/// Prints the user-facing message for a pipeline error.
pub fn alert(err: &PipelineError) {
    tracing::debug!(error = ?err, "Pipeline error");
    let message = match err {
        PipelineError::NoInput => t!("alert_no_input"),
        PipelineError::Read { .. } | PipelineError::Decode { .. } => {
            t!("alert_read_failed", error = err)
        }
        PipelineError::UnknownChunk { index, count } => {
            t!("alert_unknown_chunk", index = index, count = count)
        }
        PipelineError::Export { .. } => t!("alert_export_failed", error = err),
    };
    eprintln!("{} {}", "✗".red(), message.red());
    if let Some(path) = err.path() {
        tracing::warn!(path = %path.display(), "Operation failed for file");
    }
}

use chrono::NaiveDate;
use rust_i18n::t;
use serde::Serialize;
use std::path::PathBuf;

use crate::pipeline::{ProcessingOutcome, ProcessingStats};
use crate::session::ExportReport;
use crate::pipeline::exporter::export_filename;

/// Human readable byte size, e.g. `87.89 KB`.
pub fn format_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;

    let bytes_f = bytes as f64;
    if bytes_f >= MB {
        format!("{:.2} MB", bytes_f / MB)
    } else if bytes_f >= KB {
        format!("{:.2} KB", bytes_f / KB)
    } else {
        format!("{} B", bytes)
    }
}

#[derive(Debug, Serialize)]
struct JsonSummary<'a> {
    stats: &'a ProcessingStats,
    exported: &'a [PathBuf],
    failed: usize,
}

/// Machine readable summary: `{"stats": .., "exported": [..], "failed": n}`.
pub fn render_json(
    stats: &ProcessingStats,
    report: Option<&ExportReport>,
) -> serde_json::Result<String> {
    let summary = JsonSummary {
        stats,
        exported: report.map(|r| r.written.as_slice()).unwrap_or_default(),
        failed: report.map_or(0, ExportReport::failed),
    };
    serde_json::to_string_pretty(&summary)
}

/// Markdown summary of a run. File names use `date`, the day they would be
/// exported on.
pub fn render_summary(outcome: &ProcessingOutcome, date: NaiveDate) -> String {
    let stats = &outcome.stats;
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", t!("summary_title")));
    let names: Vec<String> = outcome
        .sources
        .iter()
        .map(|p| format!("`{}`", p.file_name().unwrap_or_default().to_string_lossy()))
        .collect();
    md.push_str(&format!(
        "* {}: **{}** {}\n",
        t!("stat_files"),
        stats.files_processed,
        names.join(" ")
    ));
    md.push_str(&format!("* {}: **{}**\n", t!("stat_total"), stats.total_records));
    md.push_str(&format!("* {}: **{}**\n", t!("stat_duplicates"), stats.duplicates_removed));
    md.push_str(&format!("* {}: **{}**\n\n", t!("stat_unique"), stats.unique_records));
    md.push_str(&render_chunks(outcome, date));
    md
}

/// Markdown table of the chunks, or a note when there is nothing to export.
pub fn render_chunks(outcome: &ProcessingOutcome, date: NaiveDate) -> String {
    if outcome.chunks.is_empty() {
        return format!("*{}*\n", t!("no_records"));
    }

    let mut md = format!(
        "## {}\n\n|{}|{}|{}|{}|\n|-:|-:|-:|:-|\n",
        t!("parts_title"),
        t!("column_part"),
        t!("column_records"),
        t!("column_size"),
        t!("column_file")
    );
    for chunk in &outcome.chunks {
        md.push_str(&format!(
            "|{}|{}|{}|`{}`|\n",
            chunk.index,
            chunk.len(),
            format_size(chunk.size_bytes),
            export_filename(date, chunk.index)
        ));
    }
    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::build_outcome;
    use crate::pipeline::reader::InputFile;
    use crate::session::{ExportSelection, export_selected};
    use std::path::PathBuf;

    fn outcome(content: &str) -> ProcessingOutcome {
        build_outcome(&[InputFile {
            path: PathBuf::from("a.csv"),
            content: content.to_string(),
        }])
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.00 MB");
    }

    #[test]
    fn test_summary_lists_stats_and_parts() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let md = render_summary(&outcome("phone\n0501\n0501\n0502\n"), date);

        assert!(md.contains("Files processed: **1** `a.csv`"));
        assert!(md.contains("Total records: **3**"));
        assert!(md.contains("Duplicates removed: **1**"));
        assert!(md.contains("|1|2|13 B|`Numbers_171026_part_1.csv`|"));
    }

    #[tokio::test]
    async fn test_json_with_exports_is_one_document() {
        let dir = tempfile::TempDir::new().unwrap();
        let outcome = outcome("phone\n0501\n0502\n");
        let report = export_selected(&outcome, &ExportSelection::All, dir.path()).await;

        let json = render_json(&outcome.stats, Some(&report)).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["stats"]["totalRecords"], 2);
        assert_eq!(parsed["stats"]["duplicatesRemoved"], 0);
        assert_eq!(parsed["failed"], 0);
        let exported = parsed["exported"].as_array().unwrap();
        assert_eq!(exported.len(), 1);
        assert!(exported[0].as_str().unwrap().ends_with("_part_1.csv"));
    }

    #[test]
    fn test_json_without_exports() {
        let outcome = outcome("phone\n0501\n0501\n");
        let json = render_json(&outcome.stats, None).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["stats"]["uniqueRecords"], 1);
        assert_eq!(parsed["exported"], serde_json::json!([]));
        assert_eq!(parsed["failed"], 0);
    }

    #[test]
    fn test_summary_without_records() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let md = render_summary(&outcome("phone\n"), date);

        assert!(md.contains("Files processed: **1**"));
        assert!(md.contains("No records to export"));
    }
}

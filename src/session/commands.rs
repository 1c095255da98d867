use crate::config::Settings;
use crate::pipeline::ProcessingOutcome;
use crate::session::doctor::Doctor;
use crate::session::{ExportSelection, alert, export_selected, load};
use crate::ui::report::{render_chunks, render_summary};
use chrono::Local;
use colored::Colorize;
use rust_i18n::t;
use std::path::PathBuf;
use termimad::MadSkin;

pub struct AppState<'a> {
    pub settings: &'a Settings,
    pub output_dir: PathBuf,
    pub skin: &'a MadSkin,
    /// Result of the last successful run. Kept when a later run fails.
    pub outcome: Option<ProcessingOutcome>,
}

/// Handles one `/command` line. Returns `false` when the session should end.
pub async fn handle_command(line: &str, state: &mut AppState<'_>) -> bool {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.is_empty() { return true; }

    let command = parts[0];
    let args = &parts[1..];

    match command {
        "/help" => {
            println!("{}", t!("command_help_desc").yellow());
            println!("  /stats          - {}", t!("command_stats_desc"));
            println!("  /chunks         - {}", t!("command_chunks_desc"));
            println!("  /export <n|all> - {}", t!("command_export_desc"));
            println!("  /load <paths>   - {}", t!("command_load_desc"));
            println!("  /doctor         - {}", t!("command_doctor_desc"));
            println!("  /exit           - {}", t!("command_exit_desc"));
        }
        "/exit" | "/quit" => {
            return false;
        }
        "/stats" => match &state.outcome {
            Some(outcome) => state.skin.print_text(&render_summary(outcome, Local::now().date_naive())),
            None => println!("{}", t!("nothing_loaded").yellow()),
        },
        "/chunks" => match &state.outcome {
            Some(outcome) => state.skin.print_text(&render_chunks(outcome, Local::now().date_naive())),
            None => println!("{}", t!("nothing_loaded").yellow()),
        },
        "/export" => {
            let Some(outcome) = &state.outcome else {
                println!("{}", t!("nothing_loaded").yellow());
                return true;
            };
            match ExportSelection::parse(&args.join(" ")) {
                Some(selection) => {
                    export_selected(outcome, &selection, &state.output_dir).await.print();
                }
                None => println!("{}", "Usage: /export <n[,n..]|all>".red()),
            }
        }
        "/load" => {
            let paths: Vec<String> = args.iter().map(|s| s.to_string()).collect();
            match load(&paths).await {
                Ok(outcome) => {
                    state.skin.print_text(&render_summary(&outcome, Local::now().date_naive()));
                    state.outcome = Some(outcome);
                }
                Err(e) => alert(&e),
            }
        }
        "/doctor" => {
            if let Err(e) = Doctor::check(state.settings, &state.output_dir).await {
                eprintln!("{} {}", "✗".red(), e);
            }
        }
        _ => {
            println!("{}", t!("unknown_command", command = command.red()));
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackgroundConfig;
    use crate::pipeline::exporter::export_filename;
    use std::fs;
    use tempfile::TempDir;

    fn settings() -> Settings {
        Settings {
            language: "en".to_string(),
            output_dir: None,
            background: BackgroundConfig::default(),
        }
    }

    #[tokio::test]
    async fn test_exit_ends_session() {
        let settings = settings();
        let skin = MadSkin::default();
        let mut state = AppState {
            settings: &settings,
            output_dir: PathBuf::from("."),
            skin: &skin,
            outcome: None,
        };

        assert!(!handle_command("/exit", &mut state).await);
        assert!(handle_command("/bogus", &mut state).await);
        assert!(handle_command("   ", &mut state).await);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_outcome() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.csv");
        fs::write(&good, "phone\n0501234567\n").unwrap();
        let missing = dir.path().join("missing.csv");

        let settings = settings();
        let skin = MadSkin::default();
        let mut state = AppState {
            settings: &settings,
            output_dir: dir.path().join("out"),
            skin: &skin,
            outcome: None,
        };

        handle_command(&format!("/load {}", good.display()), &mut state).await;
        let first = state.outcome.as_ref().expect("first load").chunks[0].records.clone();
        assert_eq!(first, vec!["971501234567"]);

        handle_command(&format!("/load {} {}", good.display(), missing.display()), &mut state).await;
        assert_eq!(state.outcome.as_ref().unwrap().chunks[0].records, first);
    }

    #[tokio::test]
    async fn test_export_command_writes_into_output_dir() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("numbers.csv");
        fs::write(&source, "phone\n0501234567\n0501234567\n").unwrap();
        let out = dir.path().join("out");

        let settings = settings();
        let skin = MadSkin::default();
        let mut state = AppState {
            settings: &settings,
            output_dir: out.clone(),
            skin: &skin,
            outcome: None,
        };

        handle_command(&format!("/load {}", source.display()), &mut state).await;
        handle_command("/export 1", &mut state).await;

        let today = Local::now().date_naive();
        let yesterday = today.pred_opt().unwrap();
        let written = [today, yesterday]
            .iter()
            .any(|date| out.join(export_filename(*date, 1)).is_file());
        assert!(written, "part 1 missing from {}", out.display());
    }
}

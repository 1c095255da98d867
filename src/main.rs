use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;
use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use colored::Colorize;
use rust_i18n::i18n;
use rust_i18n::t;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod config;
mod client;
mod error;
mod pipeline;
mod session;
mod ui;

use config::Settings;
use client::background::{BackgroundPhoto, spawn_fetch};
use session::commands::{handle_command, AppState};
use session::doctor::Doctor;
use session::{ExportSelection, alert, export_selected, load};
use ui::prompt::Repl;
use ui::report::{render_json, render_summary};
use ui::theme::create_skin;

// Define locales
i18n!("locales", fallback = "en");

const BANNER_WAIT: Duration = Duration::from_secs(3);

#[derive(Debug, Parser)]
#[command(name = "numbers_splitter", version, about = "Merge, deduplicate and split phone number lists")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Read CSV files, normalize and deduplicate the numbers, split into parts
    Process {
        /// Files, directories or glob patterns
        files: Vec<String>,

        /// Parts to export right away: `all` or `1,3`
        #[arg(short, long, value_parser = parse_selection)]
        export: Option<ExportSelection>,

        /// Directory for exported parts (overrides the configured one)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Print the statistics as JSON
        #[arg(long)]
        json: bool,

        /// Do not open the interactive prompt
        #[arg(long)]
        no_interactive: bool,
    },
    /// Check the output directory and the photo service
    Doctor,
}

fn parse_selection(value: &str) -> Result<ExportSelection, String> {
    ExportSelection::parse(value).ok_or_else(|| format!("expected `all` or part numbers, got `{}`", value))
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .ok();
}

async fn print_banner(fetch: Option<tokio::task::JoinHandle<Option<BackgroundPhoto>>>) {
    println!("{}", t!("welcome").yellow().bold());

    let Some(handle) = fetch else { return };
    match tokio::time::timeout(BANNER_WAIT, handle).await {
        Ok(Ok(Some(photo))) => {
            println!("{}", t!("photo_credit", author = photo.author, url = photo.page_url).dimmed());
            tracing::debug!(image = %photo.image_url, description = ?photo.description, "Background photo");
        }
        Ok(Ok(None)) => {}
        Ok(Err(e)) => tracing::warn!(error = %e, "Background photo task failed"),
        Err(_) => tracing::debug!("Background photo not ready, skipping"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // 1. Settings
    let settings = Settings::new().context("Config Error")?;

    let available = rust_i18n::available_locales!();
    if available.iter().any(|l| *l == settings.language) {
        rust_i18n::set_locale(&settings.language);
    } else {
        tracing::warn!(language = %settings.language, "Unsupported language, using en");
        rust_i18n::set_locale("en");
    }

    let skin = create_skin();

    match cli.command {
        Command::Doctor => {
            Doctor::check(&settings, &settings.output_dir()).await?;
        }
        Command::Process { files, export, output_dir, json, no_interactive } => {
            let output_dir = output_dir.unwrap_or_else(|| settings.output_dir());
            let interactive = export.is_none() && !json && !no_interactive && std::io::stdin().is_terminal();

            // Decorative only; started before the reads so it overlaps them
            let fetch = if interactive { spawn_fetch(&settings) } else { None };

            let outcome = match load(&files).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    alert(&e);
                    std::process::exit(1);
                }
            };

            let report = match &export {
                Some(selection) => Some(export_selected(&outcome, selection, &output_dir).await),
                None => None,
            };

            if json {
                // stdout carries only the JSON document
                println!("{}", render_json(&outcome.stats, report.as_ref())?);
                if let Some(report) = &report {
                    report.failures.iter().for_each(alert);
                }
            } else {
                if interactive {
                    print_banner(fetch).await;
                }
                skin.print_text(&render_summary(&outcome, Local::now().date_naive()));
                if let Some(report) = &report {
                    report.print();
                }
            }

            if report.as_ref().is_some_and(|r| r.failed() > 0) {
                std::process::exit(1);
            }

            if interactive {
                run_session(&settings, output_dir, &skin, outcome).await?;
            }
        }
    }

    Ok(())
}

async fn run_session(
    settings: &Settings,
    output_dir: PathBuf,
    skin: &termimad::MadSkin,
    outcome: pipeline::ProcessingOutcome,
) -> anyhow::Result<()> {
    let mut repl = Repl::new();
    let mut state = AppState {
        settings,
        output_dir,
        skin,
        outcome: Some(outcome),
    };

    println!("{}", t!("output_dir", path = state.output_dir.display()).cyan());
    println!("{}\n", t!("exit_hint"));

    loop {
        match repl.read_line() {
            Ok(Some(line_buffer)) => {
                let line = line_buffer.trim();
                if line.is_empty() { continue; }

                // Bare numbers and `all` export directly
                let line = if line.starts_with('/') {
                    line.to_string()
                } else {
                    format!("/export {}", line)
                };

                if !handle_command(&line, &mut state).await {
                    break;
                }
            }
            Ok(None) => break,
            Err(e) => {
                eprintln!("{}", t!("error_read_input", error = e));
                break;
            }
        }
    }

    Ok(())
}

use colored::Colorize;
use std::path::Path;
use anyhow::Result;
use rust_i18n::t;
use crate::client::background::BackgroundClient;
use crate::config::Settings;

pub struct Doctor;

impl Doctor {
    pub async fn check(settings: &Settings, output_dir: &Path) -> Result<()> {
        println!("{}", t!("doctor_title").yellow().bold());
        println!("{}", "─".repeat(40).dimmed());

        // 1. Output directory
        print!("• {} ({}) ... ", t!("doctor_output_dir"), output_dir.display());
        if output_dir.exists() {
            if output_dir.metadata()?.permissions().readonly() {
                println!("{}", "READ-ONLY".red());
            } else {
                println!("{}", "OK".green());
            }
        } else {
            match tokio::fs::create_dir_all(output_dir).await {
                Ok(_) => println!("{}", "CREATED".yellow()),
                Err(e) => println!("{} ({})", "FAIL".red(), e),
            }
        }

        // 2. Background photo service
        print!("• {} ... ", t!("doctor_background"));
        match BackgroundClient::from_settings(settings)? {
            None => println!("{}", "SKIPPED".dimmed()),
            Some(client) => match client.fetch_random().await {
                Ok(photo) => println!("{} ({})", "OK".green(), photo.author),
                Err(e) => println!("{} ({})", "FAIL".red(), e),
            },
        }

        // 3. Locale
        print!("• {} ... ", t!("doctor_language"));
        let available = rust_i18n::available_locales!();
        if available.iter().any(|l| *l == settings.language) {
            println!("{} ({})", "OK".green(), settings.language);
        } else {
            println!("{} ({} → en)", "FALLBACK".yellow(), settings.language);
        }

        println!("\n{}", t!("doctor_done"));
        Ok(())
    }
}

use config::{Config, ConfigError, Environment, File};
use dotenvy::dotenv;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub language: String,
    /// Where exported parts are written. Falls back to the download directory.
    pub output_dir: Option<String>,

    #[serde(default)]
    pub background: BackgroundConfig,
}

/// Decorative photo shown in the banner.
#[derive(Debug, Deserialize, Clone)]
pub struct BackgroundConfig {
    pub enabled: bool,
    pub access_key: Option<String>, // Unsplash client id
    pub query: String,
    pub api_url: String,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            access_key: None,
            query: "abstract".to_string(),
            api_url: "https://api.unsplash.com".to_string(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let builder = Config::builder()
            .set_default("language", "en")?
            .set_default("output_dir", None::<String>)?
            .set_default("background.enabled", true)?
            .set_default("background.access_key", None::<String>)?
            .set_default("background.query", "abstract")?
            .set_default("background.api_url", "https://api.unsplash.com")?
            .add_source(File::with_name("numbers_splitter").required(false))
            .add_source(
                Environment::with_prefix("NUMBERS")
                    .prefix_separator("_")
                    .separator("__"),
            );

        let config = builder.build()?;
        let mut settings: Settings = config.try_deserialize()?;

        if settings.background.access_key.is_none() {
            if let Ok(key) = std::env::var("UNSPLASH_ACCESS_KEY") {
                settings.background.access_key = Some(key);
            }
        }

        Ok(settings)
    }

    /// Output directory for exports: explicit setting, then the user's
    /// download directory, then the working directory.
    pub fn output_dir(&self) -> PathBuf {
        match &self.output_dir {
            Some(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ => dirs::download_dir().unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    /// The photo service client id, when the fetch should run at all.
    pub fn background_key(&self) -> Option<&str> {
        if !self.background.enabled {
            return None;
        }
        self.background
            .access_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

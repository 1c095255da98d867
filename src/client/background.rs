use anyhow::{Context, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;

use crate::config::Settings;

#[derive(Debug, Deserialize)]
struct RandomPhotoResponse {
    urls: PhotoUrls,
    user: PhotoUser,
    links: PhotoLinks,
    alt_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    regular: String,
}

#[derive(Debug, Deserialize)]
struct PhotoUser {
    name: String,
}

#[derive(Debug, Deserialize)]
struct PhotoLinks {
    html: String,
}

/// Decorative photo picked for the banner.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundPhoto {
    pub image_url: String,
    pub page_url: String,
    pub author: String,
    pub description: Option<String>,
}

pub struct BackgroundClient {
    client: Client,
    api_url: String,
    query: String,
}

impl BackgroundClient {
    /// Returns `None` when the fetch is disabled or no client id is configured.
    pub fn from_settings(settings: &Settings) -> Result<Option<Self>> {
        let Some(key) = settings.background_key() else {
            return Ok(None);
        };

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert("Accept-Version", HeaderValue::from_static("v1"));

        let mut auth_value = HeaderValue::from_str(&format!("Client-ID {}", key))
            .context("Invalid photo service client id")?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Some(Self {
            client,
            api_url: settings.background.api_url.trim_end_matches('/').to_string(),
            query: settings.background.query.clone(),
        }))
    }

    fn random_photo_url(&self) -> Result<Url> {
        let base = format!("{}/photos/random", self.api_url);
        Url::parse_with_params(
            &base,
            &[("query", self.query.as_str()), ("orientation", "landscape")],
        )
        .with_context(|| format!("Invalid photo service URL: {}", base))
    }

    pub async fn fetch_random(&self) -> Result<BackgroundPhoto> {
        let url = self.random_photo_url()?;

        let res = self.client.get(url).send().await?;
        let response: RandomPhotoResponse = res.error_for_status()?.json().await?;

        Ok(BackgroundPhoto {
            image_url: response.urls.regular,
            page_url: response.links.html,
            author: response.user.name,
            description: response.alt_description,
        })
    }
}

/// Fetches a banner photo in the background. Failures are logged and dropped.
pub fn spawn_fetch(settings: &Settings) -> Option<tokio::task::JoinHandle<Option<BackgroundPhoto>>> {
    let client = match BackgroundClient::from_settings(settings) {
        Ok(Some(client)) => client,
        Ok(None) => {
            tracing::debug!("Background photo disabled or no client id configured");
            return None;
        }
        Err(e) => {
            tracing::warn!(error = %e, "Background photo client unavailable");
            return None;
        }
    };

    Some(tokio::spawn(async move {
        match client.fetch_random().await {
            Ok(photo) => Some(photo),
            Err(e) => {
                tracing::warn!(error = %e, "Background photo fetch failed");
                None
            }
        }
    }))
}

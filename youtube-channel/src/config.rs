//! Process configuration for talking to the YouTube Data API.
//!
//! The configuration is read once, normally at process start through
//! [`Config::from_env`], and then handed explicitly to
//! [`crate::youtube_api::YouTubeClient::new`]. Nothing here is global.

use eyre::Context;
use std::fmt;

/// Environment variable holding the YouTube Data API key.
pub const API_KEY_VAR: &str = "YT_API_KEY";

/// Environment variable that overrides the API base URL.
pub const API_BASE_URL_VAR: &str = "YT_API_BASE_URL";

/// Base URL of the YouTube Data API v3.
pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Immutable settings used by [`crate::youtube_api::YouTubeClient`].
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    api_key: String,
    api_base_url: String,
}

impl Config {
    /// Creates a configuration for the public YouTube Data API endpoint.
    ///
    /// Fails if `api_key` is empty or only whitespace.
    pub fn new(api_key: impl Into<String>) -> eyre::Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            eyre::bail!("YouTube API key must not be empty");
        }
        Ok(Self {
            api_key,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        })
    }

    /// Points the configuration at a different API root.
    ///
    /// Any trailing `/` is dropped so endpoint paths can be appended directly.
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Reads the configuration from the process environment.
    ///
    /// A `.env` file in the working directory (or any parent) is loaded first if one
    /// exists; variables already set in the environment take precedence over it.
    pub fn from_env() -> eyre::Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded .env file"),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e).context("load .env file"),
        }

        let api_key = std::env::var(API_KEY_VAR)
            .with_context(|| format!("read {API_KEY_VAR} from the environment"))?;
        let config = Self::new(api_key).with_context(|| format!("validate {API_KEY_VAR}"))?;

        Ok(match std::env::var(API_BASE_URL_VAR) {
            Ok(url) if !url.trim().is_empty() => config.with_api_base_url(url),
            _ => config,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

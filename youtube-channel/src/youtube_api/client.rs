//! Core YouTube API client functionality.

use crate::config::Config;
use crate::youtube_api::channels::{ChannelListResponse, ChannelResource};
use eyre::Context;
use http::Method;
use tracing::instrument;

/// Client for interacting with the YouTube Data API v3.
///
/// Every request is authenticated by appending the configured API key as the `key`
/// query parameter, which is enough for public, read-only resources such as
/// channel statistics.
///
/// Cloning is cheap: the underlying [`reqwest::Client`] is reference counted.
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    config: Config,
    client: reqwest::Client,
}

impl YouTubeClient {
    /// Creates a new client with its own HTTP connection pool.
    pub fn new(config: Config) -> eyre::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build HTTP client")?;
        Ok(Self::with_http_client(config, client))
    }

    /// Creates a new client that shares an existing HTTP client.
    pub fn with_http_client(config: Config, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Makes a request against the YouTube API with common error handling.
    ///
    /// `path` is appended to the configured base URL. The API key is added to
    /// `query_params`, and any non-success status is turned into an error carrying
    /// the status and the response body (which holds YouTube's error reason, such
    /// as `quotaExceeded` or `keyInvalid`).
    ///
    /// # Returns
    ///
    /// The raw [`reqwest::Response`] for method-specific JSON parsing.
    #[instrument(skip(self, query_params), level = tracing::Level::TRACE)]
    pub(crate) async fn make_request(
        &self,
        method: Method,
        path: &str,
        query_params: &[(&str, &str)],
    ) -> eyre::Result<reqwest::Response> {
        let url = format!("{}/{}", self.config.api_base_url(), path);

        let response = self
            .client
            .request(method.clone(), &url)
            .query(query_params)
            .query(&[("key", self.config.api_key())])
            .send()
            .await
            // the request URL carries the API key
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("send {} request to YouTube API: {}", method, url))?;

        let status_code = response.status();
        if !status_code.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(eyre::eyre!(
                "YouTube API {} request to {} failed with status {}: {}",
                method,
                url,
                status_code,
                error_text
            ));
        }

        Ok(response)
    }

    /// Gets the snippet and statistics of a single channel by its ID.
    ///
    /// Uses the `channels.list` API with `part=snippet,statistics` and takes the
    /// first returned item.
    ///
    /// # Errors
    ///
    /// * `channel_id` is empty (no request is made)
    /// * the request fails (network, invalid key, exhausted quota, ...)
    /// * the response lists no channel for `channel_id`
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/channels/list>
    #[instrument(skip(self))]
    pub async fn get_channel(&self, channel_id: &str) -> eyre::Result<ChannelResource> {
        if channel_id.is_empty() {
            eyre::bail!("channel id must not be empty");
        }

        let query_params = [("part", "snippet,statistics"), ("id", channel_id)];

        let response = self
            .make_request(Method::GET, "channels", &query_params)
            .await
            .with_context(|| format!("fetch YouTube channel {channel_id}"))?;

        let mut channels: ChannelListResponse = response
            .json()
            .await
            .context("parse YouTube channels API response as JSON")?;

        tracing::debug!(
            total_results = channels.page_info.total_results,
            returned_items = channels.items.len(),
            "fetched channels"
        );

        channels
            .items
            .pop_front()
            .ok_or_else(|| eyre::eyre!("YouTube returned no channel with id {channel_id}"))
    }
}

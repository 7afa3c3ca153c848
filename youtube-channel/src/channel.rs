//! A read-only snapshot of one YouTube channel's public metadata and statistics.

use crate::youtube_api::{ChannelResource, YouTubeClient};
use eyre::Context;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};
use std::path::Path;
use tracing::instrument;

/// Prefix that every channel URL is built from.
pub const CHANNEL_URL_BASE: &str = "https://www.youtube.com";

/// A YouTube channel's title, description, and statistics as of construction time.
///
/// A `Channel` is only ever produced from one complete API response; there is no way
/// to build a partially filled one, and it cannot be modified afterwards.
///
/// Equality and ordering consider the subscriber count *only*, so two different
/// channels with the same number of subscribers compare equal. The same count is
/// what `+` and `-` combine:
///
/// ```
/// # use youtube_channel::Channel;
/// # fn check(big: &Channel, small: &Channel) {
/// assert!(big > small);
/// assert_eq!(big - small, i128::from(big.subscribers()) - i128::from(small.subscribers()));
/// # }
/// ```
///
/// Only channels take part; comparing or combining with anything else is rejected by
/// the compiler:
///
/// ```compile_fail
/// # use youtube_channel::Channel;
/// # fn check(channel: &Channel) {
/// let _ = *channel == 5;
/// # }
/// ```
///
/// ```compile_fail
/// # use youtube_channel::Channel;
/// # fn check(channel: &Channel) {
/// let _ = *channel < "x";
/// # }
/// ```
///
/// ```compile_fail
/// # use youtube_channel::Channel;
/// # fn check(channel: &Channel) {
/// let _ = channel + 1;
/// # }
/// ```
///
/// ```compile_fail
/// # use youtube_channel::Channel;
/// # fn check(channel: &Channel) {
/// let _ = channel - 1i64;
/// # }
/// ```
///
/// The counts keep the exact text YouTube returned so that [`Channel::to_json`]
/// passes them through unchanged.
#[derive(Debug, Clone, Serialize)]
pub struct Channel {
    channel_id: String,
    title: String,
    description: String,
    url: String,
    subscriber_count: String,
    video_count: String,
    view_count: String,
    #[serde(skip)]
    subscribers: i64,
}

impl Channel {
    /// Fetches the channel with the given ID from YouTube.
    ///
    /// Issues exactly one `channels.list` request. Fails if the request fails, if
    /// YouTube knows no channel with that ID, or if the response lacks any of the
    /// statistics a `Channel` holds.
    #[instrument(skip(client))]
    pub async fn fetch(client: &YouTubeClient, channel_id: &str) -> eyre::Result<Self> {
        let resource = client.get_channel(channel_id).await?;
        let channel = Self::from_resource(channel_id, resource)
            .with_context(|| format!("read statistics of YouTube channel {channel_id}"))?;
        tracing::debug!(title = %channel.title, subscribers = channel.subscribers, "fetched channel");
        Ok(channel)
    }

    /// Builds a channel from an already fetched `channels.list` item.
    ///
    /// `channel_id` is the identifier the caller asked for; the URL is derived from it.
    pub fn from_resource(
        channel_id: impl Into<String>,
        resource: ChannelResource,
    ) -> eyre::Result<Self> {
        let channel_id = channel_id.into();
        if channel_id.is_empty() {
            eyre::bail!("channel id must not be empty");
        }

        let ChannelResource {
            snippet,
            statistics,
            ..
        } = resource;

        let subscriber_count = statistics.subscriber_count.ok_or_else(|| {
            if statistics.hidden_subscriber_count {
                eyre::eyre!("channel {channel_id} hides its subscriber count")
            } else {
                eyre::eyre!("response has no subscriberCount")
            }
        })?;
        let video_count = statistics
            .video_count
            .ok_or_else(|| eyre::eyre!("response has no videoCount"))?;
        let view_count = statistics
            .view_count
            .ok_or_else(|| eyre::eyre!("response has no viewCount"))?;

        let subscribers = subscriber_count
            .parse::<i64>()
            .with_context(|| format!("parse subscriber count {subscriber_count:?}"))?;

        Ok(Self {
            url: format!("{CHANNEL_URL_BASE}/channel/{channel_id}"),
            channel_id,
            title: snippet.title,
            description: snippet.description,
            subscriber_count,
            video_count,
            view_count,
            subscribers,
        })
    }

    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The public URL of the channel, `https://www.youtube.com/channel/<id>`.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The subscriber count exactly as YouTube returned it.
    pub fn subscriber_count(&self) -> &str {
        &self.subscriber_count
    }

    pub fn video_count(&self) -> &str {
        &self.video_count
    }

    pub fn view_count(&self) -> &str {
        &self.view_count
    }

    /// The subscriber count as an integer.
    pub fn subscribers(&self) -> i64 {
        self.subscribers
    }

    /// Orders two channels by subscriber count.
    pub fn compare_subscribers(&self, other: &Channel) -> Ordering {
        self.subscribers.cmp(&other.subscribers)
    }

    /// The total number of subscribers of both channels.
    ///
    /// Widened to `i128` so that any two parsed counts add without overflow.
    pub fn combine_subscribers(&self, other: &Channel) -> i128 {
        i128::from(self.subscribers) + i128::from(other.subscribers)
    }

    /// How many more subscribers `self` has than `other` (negative if fewer).
    pub fn subscriber_difference(&self, other: &Channel) -> i128 {
        i128::from(self.subscribers) - i128::from(other.subscribers)
    }

    /// Writes the channel to `path` as 2-space indented JSON, replacing any existing file.
    ///
    /// The object has the keys `channel_id`, `title`, `description`, `url`,
    /// `subscriber_count`, `video_count`, and `view_count`, in that order.
    ///
    /// The file is UTF-8 and non-ASCII text is written as-is rather than as `\uXXXX`
    /// escapes, so a title like `Канал` appears verbatim.
    #[instrument(skip(self), fields(channel_id = %self.channel_id))]
    pub fn to_json(&self, path: impl AsRef<Path> + fmt::Debug) -> eyre::Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("serialize channel as JSON")?;
        std::fs::write(path, json)
            .with_context(|| format!("write channel JSON to {}", path.display()))?;
        tracing::debug!(path = %path.display(), "exported channel");
        Ok(())
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.url)
    }
}

impl PartialEq for Channel {
    fn eq(&self, other: &Self) -> bool {
        self.subscribers == other.subscribers
    }
}

impl Eq for Channel {}

impl PartialOrd for Channel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Channel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_subscribers(other)
    }
}

impl Add for &Channel {
    type Output = i128;

    fn add(self, other: &Channel) -> i128 {
        self.combine_subscribers(other)
    }
}

impl Sub for &Channel {
    type Output = i128;

    fn sub(self, other: &Channel) -> i128 {
        self.subscriber_difference(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::youtube_api::{ChannelSnippet, ChannelStatistics};
    use pretty_assertions::assert_eq;

    fn resource(title: &str, subscribers: Option<&str>) -> ChannelResource {
        ChannelResource {
            id: "ignored".to_string(),
            snippet: ChannelSnippet {
                title: title.to_string(),
                description: "d".to_string(),
                published_at: None,
            },
            statistics: ChannelStatistics {
                view_count: Some("5000".to_string()),
                subscriber_count: subscribers.map(str::to_string),
                hidden_subscriber_count: false,
                video_count: Some("10".to_string()),
            },
        }
    }

    fn channel(id: &str, subscribers: &str) -> Channel {
        Channel::from_resource(id, resource("Test", Some(subscribers))).unwrap()
    }

    #[test]
    fn url_is_derived_from_channel_id() {
        let c = channel("UC1", "1000");
        assert_eq!(c.channel_id(), "UC1");
        assert_eq!(c.url(), "https://www.youtube.com/channel/UC1");
    }

    #[test]
    fn display_shows_title_and_url() {
        assert_eq!(
            channel("UC1", "1000").to_string(),
            "Test (https://www.youtube.com/channel/UC1)"
        );
    }

    #[test]
    fn to_json_writes_fixed_key_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("UC1.json");
        channel("UC1", "1000").to_json(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        insta::assert_snapshot!(written, @r#"
        {
          "channel_id": "UC1",
          "title": "Test",
          "description": "d",
          "url": "https://www.youtube.com/channel/UC1",
          "subscriber_count": "1000",
          "video_count": "10",
          "view_count": "5000"
        }
        "#);
    }

    #[test]
    fn to_json_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        std::fs::write(&path, "x".repeat(4096)).unwrap();

        channel("UC1", "1000").to_json(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["subscriber_count"], "1000");
    }

    #[test]
    fn to_json_surfaces_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.json");
        let err = channel("UC1", "1000").to_json(&path).unwrap_err();
        assert!(
            err.root_cause().downcast_ref::<std::io::Error>().is_some(),
            "{err:?}"
        );
    }

    #[test]
    fn comparisons_follow_subscriber_counts() {
        let small = channel("UCsmall", "10");
        let big = channel("UCbig", "1000");
        let twin = channel("UCtwin", "10");

        assert!(small == small.clone());
        assert!(small == twin);
        assert!(small != big);
        assert!(small < big);
        assert!(small <= twin);
        assert!(big > small);
        assert!(big >= small);
        assert_eq!(small.compare_subscribers(&big), Ordering::Less);
        assert_eq!(big.compare_subscribers(&small), Ordering::Greater);
        assert_eq!(small.compare_subscribers(&twin), Ordering::Equal);
    }

    #[test]
    fn exactly_one_ordering_holds() {
        let channels = [
            channel("UCa", "0"),
            channel("UCb", "7"),
            channel("UCc", "7"),
            channel("UCd", "123456789"),
        ];
        for a in &channels {
            for b in &channels {
                let holds = [a < b, a == b, a > b];
                assert_eq!(holds.iter().filter(|&&h| h).count(), 1);
                assert_eq!(a != b, !(a == b));
            }
        }
    }

    #[test]
    fn add_and_sub_combine_subscriber_counts() {
        let a = channel("UCa", "1000");
        let b = channel("UCb", "250");

        assert_eq!(&a + &b, 1250);
        assert_eq!(&b + &a, 1250);
        assert_eq!(&a - &b, 750);
        assert_eq!(&b - &a, -750);
        assert_eq!(a.combine_subscribers(&b), 1250);
        assert_eq!(b.subscriber_difference(&a), -750);
    }

    #[test]
    fn add_and_sub_do_not_overflow_at_extremes() {
        let max = channel("UCmax", "9223372036854775807");
        let min = channel("UCmin", "-9223372036854775808");

        assert_eq!(&max + &max, 2 * i128::from(i64::MAX));
        assert_eq!(&max - &min, i128::from(i64::MAX) - i128::from(i64::MIN));
        assert_eq!(&min - &max, i128::from(i64::MIN) - i128::from(i64::MAX));
        assert_eq!(&min + &min, 2 * i128::from(i64::MIN));
    }

    #[test]
    fn to_json_keeps_non_ascii_text_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ru.json");
        Channel::from_resource("UCru", resource("Канал", Some("1")))
            .unwrap()
            .to_json(&path)
            .unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains(r#""title": "Канал""#), "{written}");
        assert!(!written.contains("\\u"), "{written}");
    }

    #[test]
    fn non_numeric_subscriber_count_fails_construction() {
        let err = Channel::from_resource("UC1", resource("Test", Some("lots"))).unwrap_err();
        assert!(format!("{err:?}").contains("lots"), "{err:?}");
    }

    #[test]
    fn hidden_subscriber_count_fails_construction() {
        let mut hidden = resource("Test", None);
        hidden.statistics.hidden_subscriber_count = true;
        let err = Channel::from_resource("UC1", hidden).unwrap_err();
        assert!(err.to_string().contains("hides its subscriber count"), "{err:?}");

        let err = Channel::from_resource("UC1", resource("Test", None)).unwrap_err();
        assert!(err.to_string().contains("no subscriberCount"), "{err:?}");
    }

    #[test]
    fn empty_channel_id_is_rejected() {
        assert!(Channel::from_resource("", resource("Test", Some("1"))).is_err());
    }

    #[tokio::test]
    async fn fetch_builds_channel_from_api() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/channels")
            .match_query(mockito::Matcher::UrlEncoded("id".into(), "UC1".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!({
                    "kind": "youtube#channelListResponse",
                    "pageInfo": { "totalResults": 1, "resultsPerPage": 5 },
                    "items": [{
                        "id": "UC1",
                        "snippet": { "title": "Test", "description": "d" },
                        "statistics": {
                            "subscriberCount": "1000",
                            "videoCount": "10",
                            "viewCount": "5000"
                        }
                    }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let config = Config::new("test-key")
            .unwrap()
            .with_api_base_url(server.url());
        let client = YouTubeClient::new(config).unwrap();
        let fetched = Channel::fetch(&client, "UC1").await.unwrap();
        mock.assert_async().await;

        assert_eq!(fetched.title(), "Test");
        assert_eq!(fetched.description(), "d");
        assert_eq!(fetched.subscriber_count(), "1000");
        assert_eq!(fetched.video_count(), "10");
        assert_eq!(fetched.view_count(), "5000");
        assert_eq!(fetched.subscribers(), 1000);
    }

    #[tokio::test]
    async fn fetch_fails_when_no_items_are_returned() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/channels")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"kind":"youtube#channelListResponse","items":[]}"#)
            .create_async()
            .await;

        let config = Config::new("test-key")
            .unwrap()
            .with_api_base_url(server.url());
        let client = YouTubeClient::new(config).unwrap();
        assert!(Channel::fetch(&client, "UC1").await.is_err());
    }
}

//! YouTube Data API v3 client library.
//!
//! Only the read-only `channels.list` endpoint is wrapped. Requests are
//! authenticated with a plain API key taken from [`crate::config::Config`],
//! so no OAuth flow is involved.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use youtube_channel::config::Config;
//! use youtube_channel::youtube_api::YouTubeClient;
//!
//! # async fn example() -> eyre::Result<()> {
//! let client = YouTubeClient::new(Config::from_env()?)?;
//! let channel = client.get_channel("UC_x5XG1OV2P6uZZ5FSM9Ttw").await?;
//! println!("{} has {:?} subscribers", channel.snippet.title, channel.statistics.subscriber_count);
//! # Ok(())
//! # }
//! ```

pub mod channels;
pub mod client;
pub mod types;

pub use client::YouTubeClient;
pub use types::PageInfo;

pub use channels::{ChannelListResponse, ChannelResource, ChannelSnippet, ChannelStatistics};

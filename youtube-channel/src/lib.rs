//! Read-only YouTube channel statistics.
//!
//! A [`Channel`] is fetched once through a [`YouTubeClient`] and then behaves as a
//! plain value: it can be displayed, ordered against other channels by subscriber
//! count, combined with them into subscriber totals, and exported as JSON.

pub mod channel;
pub mod config;
pub mod youtube_api;

pub use channel::Channel;
pub use config::Config;
pub use youtube_api::YouTubeClient;

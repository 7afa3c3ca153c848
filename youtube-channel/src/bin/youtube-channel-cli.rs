use clap::Parser;
use eyre::Context;
use std::cmp::Ordering;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use youtube_channel::{Channel, Config, YouTubeClient};

/// Show statistics for YouTube channels.
///
/// The API key is read from `YT_API_KEY` (a `.env` file is honoured).
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// IDs of the channels to look up.
    #[arg(required = true)]
    channel_ids: Vec<String>,

    /// Write each channel to `<DIR>/<channel id>.json`.
    #[arg(long, value_name = "DIR")]
    json: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::from_env().context("load configuration")?;
    let yt = YouTubeClient::new(config)?;

    let mut channels = Vec::with_capacity(args.channel_ids.len());
    for id in &args.channel_ids {
        let channel = Channel::fetch(&yt, id)
            .await
            .with_context(|| format!("look up channel {id}"))?;

        println!("==> {channel}");
        println!("  Subscribers: {}", channel.subscriber_count());
        println!("  Videos: {}", channel.video_count());
        println!("  Views: {}", channel.view_count());

        if let Some(dir) = &args.json {
            let path = dir.join(format!("{}.json", channel.channel_id()));
            channel.to_json(&path)?;
            tracing::info!(path = %path.display(), "wrote channel JSON");
        }

        channels.push(channel);
    }

    if let [a, b, ..] = channels.as_slice() {
        let relation = match a.compare_subscribers(b) {
            Ordering::Less => "fewer subscribers than",
            Ordering::Equal => "as many subscribers as",
            Ordering::Greater => "more subscribers than",
        };
        println!("==> {} has {relation} {}", a.title(), b.title());
        println!("  Combined: {}", a + b);
        println!("  Difference: {}", a - b);
    }

    Ok(())
}

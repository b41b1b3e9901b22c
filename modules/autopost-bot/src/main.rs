use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use autopost_bot::media::MediaFetcher;
use autopost_bot::pipeline::{Pipeline, RunOutcome};
use autopost_bot::records;
use autopost_common::Config;
use trends_client::TrendsClient;
use twitter_client::{Credentials, TwitterClient};

#[derive(Parser, Debug)]
#[command(name = "autopost", about = "Post one random pre-authored post with trending tags")]
struct Args {
    /// Posts file to read (overrides POSTS_FILE)
    #[arg(long)]
    file: Option<String>,

    /// Simulate the final create call (same as DEBUG_MODE=true)
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("autopost=info".parse()?))
        .init();

    let args = Args::parse();

    let mut config = Config::from_env()?;
    if args.dry_run {
        config.debug_mode = true;
    }
    if let Some(file) = args.file {
        config.posts_file = file;
    }
    config.log_redacted();

    let twitter = TwitterClient::new(Credentials {
        api_key: config.api_key.clone(),
        api_secret: config.api_secret.clone(),
        access_token: config.access_token.clone(),
        access_token_secret: config.access_token_secret.clone(),
    });

    // Auth failure is fatal; everything downstream degrades instead.
    let me = twitter
        .verify_credentials()
        .await
        .context("Twitter authentication failed")?;
    info!(user = me.screen_name.as_str(), "Authenticated");

    let posts = records::load_records(Path::new(&config.posts_file))?;

    let trends = TrendsClient::new(&config.trends_url);
    let fetcher = MediaFetcher::new();
    let pipeline = Pipeline::new(&trends, &fetcher, &twitter, &twitter, config.debug_mode);

    match pipeline.run(&posts, &mut rand::rng()).await? {
        RunOutcome::Posted { id, .. } => info!(id = id.as_str(), "Success"),
        RunOutcome::Simulated { post } => {
            info!(text = post.text.as_str(), "Success (simulated)")
        }
    }

    Ok(())
}

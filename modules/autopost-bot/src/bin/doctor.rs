//! Credential diagnostic: reports which credential variables are set,
//! verifies authentication, then performs a test post.

use std::env;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use autopost_common::Config;
use twitter_client::{Credentials, TwitterClient};

const CREDENTIAL_VARS: [&str; 4] = [
    "TWITTER_API_KEY",
    "TWITTER_API_SECRET",
    "TWITTER_ACCESS_TOKEN",
    "TWITTER_ACCESS_TOKEN_SECRET",
];

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Checking environment variables...");
    for key in CREDENTIAL_VARS {
        println!("{key}: {}", env::var(key).is_ok());
    }

    let config = Config::from_env()?;
    let client = TwitterClient::new(Credentials {
        api_key: config.api_key,
        api_secret: config.api_secret,
        access_token: config.access_token,
        access_token_secret: config.access_token_secret,
    });

    let me = client
        .verify_credentials()
        .await
        .context("Authentication failed")?;
    println!("Auth success! User: {}", me.screen_name);

    let tweet = client
        .create_tweet("Test post from autopost doctor", None)
        .await
        .context("Test post failed")?;
    println!("Test post created: {}", tweet.id);

    Ok(())
}

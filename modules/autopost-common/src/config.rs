use std::env;

use tracing::info;

use crate::error::AutopostError;

/// Application configuration loaded from environment variables.
///
/// Loaded once at startup and passed explicitly into client constructors.
/// Nothing below `main` reads the environment directly.
#[derive(Debug, Clone)]
pub struct Config {
    // Twitter credentials (OAuth 1.0a user context)
    pub api_key: String,
    pub api_secret: String,
    pub access_token: String,
    pub access_token_secret: String,

    /// When true, skip the final create-tweet call and print a simulation.
    pub debug_mode: bool,

    /// Path to the delimited posts file.
    pub posts_file: String,

    /// Trending-topics page to scrape.
    pub trends_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    /// Missing credentials are a fatal startup error.
    pub fn from_env() -> Result<Self, AutopostError> {
        Ok(Self {
            api_key: required_env("TWITTER_API_KEY")?,
            api_secret: required_env("TWITTER_API_SECRET")?,
            access_token: required_env("TWITTER_ACCESS_TOKEN")?,
            access_token_secret: required_env("TWITTER_ACCESS_TOKEN_SECRET")?,
            debug_mode: env::var("DEBUG_MODE")
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            posts_file: env::var("POSTS_FILE").unwrap_or_else(|_| "posts.txt".to_string()),
            trends_url: env::var("TRENDS_URL")
                .unwrap_or_else(|_| "https://trends24.in/indonesia/".to_string()),
        })
    }

    /// Log which settings are present without exposing credential values.
    pub fn log_redacted(&self) {
        info!(
            api_key = !self.api_key.is_empty(),
            api_secret = !self.api_secret.is_empty(),
            access_token = !self.access_token.is_empty(),
            access_token_secret = !self.access_token_secret.is_empty(),
            debug_mode = self.debug_mode,
            posts_file = self.posts_file.as_str(),
            trends_url = self.trends_url.as_str(),
            "Config loaded"
        );
    }
}

fn required_env(key: &str) -> Result<String, AutopostError> {
    env::var(key).map_err(|_| AutopostError::Config(format!("{key} environment variable is required")))
}

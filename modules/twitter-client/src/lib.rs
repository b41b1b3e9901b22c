pub mod error;
pub mod oauth;
pub mod types;

pub use error::{Result, TwitterError};
pub use oauth::Credentials;
pub use types::{CreatedTweet, VerifiedUser};

use std::time::Duration;

use types::{MediaUploadResponse, TweetResponseWrapper};

const VERIFY_URL: &str = "https://api.twitter.com/1.1/account/verify_credentials.json";
const MEDIA_UPLOAD_URL: &str = "https://upload.twitter.com/1.1/media/upload.json";
const TWEETS_URL: &str = "https://api.twitter.com/2/tweets";

pub struct TwitterClient {
    client: reqwest::Client,
    creds: Credentials,
}

impl TwitterClient {
    pub fn new(creds: Credentials) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .expect("Failed to build HTTP client");

        Self { client, creds }
    }

    /// Check that the credentials resolve to an account. Callers treat
    /// failure here as fatal.
    pub async fn verify_credentials(&self) -> Result<VerifiedUser> {
        let auth = oauth::authorization_header(&self.creds, "GET", VERIFY_URL, &[]);

        let resp = self
            .client
            .get(VERIFY_URL)
            .header("Authorization", auth)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(TwitterError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp.json().await?)
    }

    /// Upload an image/gif via the v1.1 media endpoint. Returns the opaque
    /// media identifier used to attach it to a tweet.
    pub async fn upload_media(&self, data: Vec<u8>, mime: &str) -> Result<String> {
        // Multipart bodies do not participate in the OAuth signature.
        let auth = oauth::authorization_header(&self.creds, "POST", MEDIA_UPLOAD_URL, &[]);

        let part = reqwest::multipart::Part::bytes(data)
            .mime_str(mime)
            .map_err(|e| TwitterError::Media(format!("invalid mime type {mime}: {e}")))?;
        let form = reqwest::multipart::Form::new().part("media", part);

        let resp = self
            .client
            .post(MEDIA_UPLOAD_URL)
            .header("Authorization", auth)
            .multipart(form)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(TwitterError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let upload: MediaUploadResponse = resp.json().await?;
        tracing::debug!(media_id = %upload.media_id_string, "Media uploaded");
        Ok(upload.media_id_string)
    }

    /// Create a tweet via the v2 endpoint, optionally attaching one media id.
    pub async fn create_tweet(&self, text: &str, media_id: Option<&str>) -> Result<CreatedTweet> {
        let mut body = serde_json::json!({ "text": text });
        if let Some(id) = media_id {
            body["media"] = serde_json::json!({ "media_ids": [id] });
        }

        let auth = oauth::authorization_header(&self.creds, "POST", TWEETS_URL, &[]);

        let resp = self
            .client
            .post(TWEETS_URL)
            .header("Authorization", auth)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(TwitterError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let wrapper: TweetResponseWrapper = resp.json().await?;
        Ok(wrapper.data)
    }
}

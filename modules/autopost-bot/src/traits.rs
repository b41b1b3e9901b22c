// Trait seams for the posting pipeline.
//
// TrendSource — scraped trending tags.
// MediaFetch — download a media URL to a staged temp file.
// MediaStore — upload staged bytes, returning an opaque media id.
// PostSink — create the final post.
//
// Real impls delegate to trends-client / twitter-client; mocks in
// `testing` make the pipeline testable with no network.

use anyhow::Result;
use async_trait::async_trait;

use crate::media::{MediaFetcher, StagedMedia};

#[async_trait]
pub trait TrendSource: Send + Sync {
    /// Up to `limit` hashtag/mention strings, in source order.
    async fn trending(&self, limit: usize) -> Result<Vec<String>>;
}

#[async_trait]
impl TrendSource for trends_client::TrendsClient {
    async fn trending(&self, limit: usize) -> Result<Vec<String>> {
        Ok(self.trending(limit).await?)
    }
}

#[async_trait]
pub trait MediaFetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<StagedMedia>;
}

#[async_trait]
impl MediaFetch for MediaFetcher {
    async fn fetch(&self, url: &str) -> Result<StagedMedia> {
        self.download(url).await
    }
}

#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Upload media bytes, returning the service's opaque media identifier.
    async fn upload(&self, data: Vec<u8>, mime: &str) -> Result<String>;
}

#[async_trait]
impl MediaStore for twitter_client::TwitterClient {
    async fn upload(&self, data: Vec<u8>, mime: &str) -> Result<String> {
        Ok(self.upload_media(data, mime).await?)
    }
}

#[async_trait]
pub trait PostSink: Send + Sync {
    /// Create a post with optional attached media; returns the post id.
    async fn create_post(&self, text: &str, media_id: Option<&str>) -> Result<String>;
}

#[async_trait]
impl PostSink for twitter_client::TwitterClient {
    async fn create_post(&self, text: &str, media_id: Option<&str>) -> Result<String> {
        let tweet = self.create_tweet(text, media_id).await?;
        Ok(tweet.id)
    }
}

// Test mocks for the posting pipeline.
//
// Four mocks matching the four trait boundaries:
// - MockTrends (TrendSource) — fixed tag list or forced error
// - MockFetcher (MediaFetch) — HashMap-based URL→bytes, error for unknown URLs
// - MockMediaStore (MediaStore) — records uploads, sequential media ids
// - MockPostSink (PostSink) — records created posts

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;

use crate::media::StagedMedia;
use crate::traits::{MediaFetch, MediaStore, PostSink, TrendSource};

// ---------------------------------------------------------------------------
// MockTrends
// ---------------------------------------------------------------------------

pub struct MockTrends {
    tags: Option<Vec<String>>,
}

impl MockTrends {
    pub fn with_tags(tags: &[&str]) -> Self {
        Self {
            tags: Some(tags.iter().map(|s| s.to_string()).collect()),
        }
    }

    /// Simulates a scrape failure; the pipeline falls back to hardcoded tags.
    pub fn failing() -> Self {
        Self { tags: None }
    }
}

#[async_trait]
impl TrendSource for MockTrends {
    async fn trending(&self, limit: usize) -> Result<Vec<String>> {
        match &self.tags {
            Some(tags) => Ok(tags.iter().take(limit).cloned().collect()),
            None => bail!("trends page unreachable"),
        }
    }
}

// ---------------------------------------------------------------------------
// MockFetcher
// ---------------------------------------------------------------------------

/// Returns `Err` for unregistered URLs.
#[derive(Default)]
pub struct MockFetcher {
    responses: HashMap<String, Vec<u8>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, url: &str, bytes: &[u8]) -> Self {
        self.responses.insert(url.to_string(), bytes.to_vec());
        self
    }
}

#[async_trait]
impl MediaFetch for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<StagedMedia> {
        match self.responses.get(url) {
            Some(bytes) => Ok(StagedMedia::from_bytes(bytes, "image/jpeg", ".jpg")?),
            None => bail!("no mock response for {url}"),
        }
    }
}

// ---------------------------------------------------------------------------
// MockMediaStore
// ---------------------------------------------------------------------------

pub struct MockMediaStore {
    pub uploads: Mutex<Vec<(usize, String)>>,
    fail: bool,
}

impl MockMediaStore {
    pub fn new() -> Self {
        Self {
            uploads: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            uploads: Mutex::new(Vec::new()),
            fail: true,
        }
    }
}

impl Default for MockMediaStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaStore for MockMediaStore {
    async fn upload(&self, data: Vec<u8>, mime: &str) -> Result<String> {
        if self.fail {
            bail!("media upload rejected");
        }
        let mut uploads = self.uploads.lock().unwrap();
        let id = format!("mid-{}", uploads.len());
        uploads.push((data.len(), mime.to_string()));
        Ok(id)
    }
}

// ---------------------------------------------------------------------------
// MockPostSink
// ---------------------------------------------------------------------------

pub struct MockPostSink {
    pub posts: Mutex<Vec<(String, Option<String>)>>,
    fail: bool,
}

impl MockPostSink {
    pub fn new() -> Self {
        Self {
            posts: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            posts: Mutex::new(Vec::new()),
            fail: true,
        }
    }
}

impl Default for MockPostSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostSink for MockPostSink {
    async fn create_post(&self, text: &str, media_id: Option<&str>) -> Result<String> {
        if self.fail {
            bail!("create post rejected");
        }
        let mut posts = self.posts.lock().unwrap();
        posts.push((text.to_string(), media_id.map(String::from)));
        Ok(format!("post-{}", posts.len()))
    }
}

//! Media staging: pick one link, download it to a temp file, hand the
//! bytes to the upload step. The temp file is removed when `StagedMedia`
//! drops, on every path.

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Result};
use rand::seq::IndexedRandom;
use rand::Rng;
use tempfile::NamedTempFile;

use autopost_common::PostRecord;

/// The media hosts behave like the trends page: browser UA or nothing.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Downloaded media staged on disk for upload.
pub struct StagedMedia {
    file: NamedTempFile,
    pub mime: &'static str,
}

impl StagedMedia {
    /// Stage raw bytes in a suffixed temp file.
    pub fn from_bytes(bytes: &[u8], mime: &'static str, suffix: &str) -> std::io::Result<Self> {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile()?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(Self { file, mime })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn read(&self) -> std::io::Result<Vec<u8>> {
        std::fs::read(self.file.path())
    }
}

/// Choose one media link uniformly at random, if the record has any.
pub fn pick_media_link<'a, R: Rng>(record: &'a PostRecord, rng: &mut R) -> Option<&'a str> {
    record.media_links.choose(rng).map(|s| s.trim())
}

pub struct MediaFetcher {
    client: reqwest::Client,
}

impl Default for MediaFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaFetcher {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");

        Self { client }
    }

    /// Download a media URL into a suffixed temp file. The suffix and mime
    /// come from the response `content-type`; jpeg is the default.
    pub async fn download(&self, url: &str) -> Result<StagedMedia> {
        let resp = self.client.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            bail!("media download failed with status {status} for {url}");
        }

        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        let (mime, suffix) = classify(&content_type);

        let bytes = resp.bytes().await?;
        let staged = StagedMedia::from_bytes(&bytes, mime, suffix)?;

        tracing::debug!(url, mime, size = bytes.len(), "Media staged");
        Ok(staged)
    }
}

fn classify(content_type: &str) -> (&'static str, &'static str) {
    if content_type.contains("png") {
        ("image/png", ".png")
    } else if content_type.contains("gif") {
        ("image/gif", ".gif")
    } else {
        ("image/jpeg", ".jpg")
    }
}

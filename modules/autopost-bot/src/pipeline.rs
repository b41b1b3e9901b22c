//! One posting run: pick a record, gather tags, compose, stage media,
//! then create the post (or simulate it in debug mode).

use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::{info, warn};

use autopost_common::{AutopostError, ComposedPost, PostRecord};

use crate::composer::{compose, MAX_POST_LENGTH};
use crate::media::pick_media_link;
use crate::traits::{MediaFetch, MediaStore, PostSink, TrendSource};

/// Tags scraped per run.
pub const TRENDING_TAG_LIMIT: usize = 5;

/// Used when the trends scrape fails outright.
pub const FALLBACK_TAGS: [&str; 2] = ["#Trending", "@Twitter"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Posted { id: String, post: ComposedPost },
    /// Debug mode: everything ran except the final create call.
    Simulated { post: ComposedPost },
}

pub struct Pipeline<'a> {
    trends: &'a dyn TrendSource,
    fetcher: &'a dyn MediaFetch,
    store: &'a dyn MediaStore,
    sink: &'a dyn PostSink,
    debug_mode: bool,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        trends: &'a dyn TrendSource,
        fetcher: &'a dyn MediaFetch,
        store: &'a dyn MediaStore,
        sink: &'a dyn PostSink,
        debug_mode: bool,
    ) -> Self {
        Self {
            trends,
            fetcher,
            store,
            sink,
            debug_mode,
        }
    }

    /// Run one post. Trends and media failures degrade; a missing target
    /// URL or a failed create call is an error for the caller's exit code.
    pub async fn run<R: Rng>(
        &self,
        records: &[PostRecord],
        rng: &mut R,
    ) -> Result<RunOutcome, AutopostError> {
        let record = records
            .choose(rng)
            .ok_or_else(|| AutopostError::PostsFile("no records to choose from".to_string()))?;

        let target_url = record
            .url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or(AutopostError::MissingTargetUrl)?;

        let tags = match self.trends.trending(TRENDING_TAG_LIMIT).await {
            Ok(tags) => tags,
            Err(e) => {
                warn!(error = %e, "Trends scrape failed, using fallback tags");
                FALLBACK_TAGS.iter().map(|s| s.to_string()).collect()
            }
        };

        let text = compose(&record.text, &tags, target_url, MAX_POST_LENGTH);
        let media_id = self.stage_media(record, rng).await;
        let post = ComposedPost { text, media_id };

        if self.debug_mode {
            info!(
                text = post.text.as_str(),
                media = post.media_id.as_deref().unwrap_or("none"),
                target_url,
                "Debug mode, simulating post"
            );
            return Ok(RunOutcome::Simulated { post });
        }

        match self
            .sink
            .create_post(&post.text, post.media_id.as_deref())
            .await
        {
            Ok(id) => {
                info!(id = id.as_str(), "Post created");
                Ok(RunOutcome::Posted { id, post })
            }
            Err(e) => Err(AutopostError::PostFailed(e.to_string())),
        }
    }

    /// Download and upload one randomly chosen media link. Every failure
    /// degrades to a text-only post; the staged temp file is dropped (and
    /// deleted) before returning on all paths.
    async fn stage_media<R: Rng>(&self, record: &PostRecord, rng: &mut R) -> Option<String> {
        let link = pick_media_link(record, rng)?;

        let staged = match self.fetcher.fetch(link).await {
            Ok(staged) => staged,
            Err(e) => {
                warn!(url = link, error = %e, "Media download failed, posting without media");
                return None;
            }
        };

        let data = match staged.read() {
            Ok(data) => data,
            Err(e) => {
                warn!(error = %e, "Could not read staged media, posting without media");
                return None;
            }
        };

        match self.store.upload(data, staged.mime).await {
            Ok(id) => Some(id),
            Err(e) => {
                warn!(url = link, error = %e, "Media upload failed, posting without media");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::testing::{MockFetcher, MockMediaStore, MockPostSink, MockTrends};

    fn record(url: Option<&str>, media: &[&str]) -> PostRecord {
        PostRecord {
            text: "Hello".to_string(),
            media_links: media.iter().map(|s| s.to_string()).collect(),
            url: url.map(String::from),
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[tokio::test]
    async fn posts_with_media_and_trending_tags() {
        let trends = MockTrends::with_tags(&["#A", "#B"]);
        let fetcher = MockFetcher::new().on("https://img.example/a.jpg", b"imagebytes");
        let store = MockMediaStore::new();
        let sink = MockPostSink::new();
        let pipeline = Pipeline::new(&trends, &fetcher, &store, &sink, false);

        let records = vec![record(Some("http://x.co/a"), &["https://img.example/a.jpg"])];
        let outcome = pipeline.run(&records, &mut rng()).await.unwrap();

        match outcome {
            RunOutcome::Posted { id, post } => {
                assert_eq!(id, "post-1");
                assert_eq!(post.text, "Hello #A #B http://x.co/a");
                assert_eq!(post.media_id.as_deref(), Some("mid-0"));
            }
            other => panic!("expected Posted, got {other:?}"),
        }

        let uploads = store.uploads.lock().unwrap();
        assert_eq!(*uploads, vec![(10, "image/jpeg".to_string())]);
    }

    #[tokio::test]
    async fn trends_failure_degrades_to_fallback_tags() {
        let trends = MockTrends::failing();
        let fetcher = MockFetcher::new();
        let store = MockMediaStore::new();
        let sink = MockPostSink::new();
        let pipeline = Pipeline::new(&trends, &fetcher, &store, &sink, false);

        let records = vec![record(Some("http://x.co/a"), &[])];
        let outcome = pipeline.run(&records, &mut rng()).await.unwrap();

        match outcome {
            RunOutcome::Posted { post, .. } => {
                assert_eq!(post.text, "Hello #Trending @Twitter http://x.co/a");
            }
            other => panic!("expected Posted, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_target_url_is_an_error() {
        let trends = MockTrends::with_tags(&[]);
        let fetcher = MockFetcher::new();
        let store = MockMediaStore::new();
        let sink = MockPostSink::new();
        let pipeline = Pipeline::new(&trends, &fetcher, &store, &sink, false);

        for rec in [record(None, &[]), record(Some("   "), &[])] {
            let err = pipeline.run(&[rec], &mut rng()).await.unwrap_err();
            assert!(matches!(err, AutopostError::MissingTargetUrl));
        }
        assert!(sink.posts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unreachable_media_degrades_to_text_only() {
        let trends = MockTrends::with_tags(&[]);
        let fetcher = MockFetcher::new(); // no registered URLs
        let store = MockMediaStore::new();
        let sink = MockPostSink::new();
        let pipeline = Pipeline::new(&trends, &fetcher, &store, &sink, false);

        let records = vec![record(Some("http://x.co/a"), &["https://img.example/missing.jpg"])];
        let outcome = pipeline.run(&records, &mut rng()).await.unwrap();

        match outcome {
            RunOutcome::Posted { post, .. } => assert!(post.media_id.is_none()),
            other => panic!("expected Posted, got {other:?}"),
        }
        assert!(store.uploads.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn upload_failure_degrades_to_text_only() {
        let trends = MockTrends::with_tags(&[]);
        let fetcher = MockFetcher::new().on("https://img.example/a.jpg", b"imagebytes");
        let store = MockMediaStore::failing();
        let sink = MockPostSink::new();
        let pipeline = Pipeline::new(&trends, &fetcher, &store, &sink, false);

        let records = vec![record(Some("http://x.co/a"), &["https://img.example/a.jpg"])];
        let outcome = pipeline.run(&records, &mut rng()).await.unwrap();

        match outcome {
            RunOutcome::Posted { post, .. } => assert!(post.media_id.is_none()),
            other => panic!("expected Posted, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_failure_surfaces_as_post_failed() {
        let trends = MockTrends::with_tags(&[]);
        let fetcher = MockFetcher::new();
        let store = MockMediaStore::new();
        let sink = MockPostSink::failing();
        let pipeline = Pipeline::new(&trends, &fetcher, &store, &sink, false);

        let records = vec![record(Some("http://x.co/a"), &[])];
        let err = pipeline.run(&records, &mut rng()).await.unwrap_err();
        assert!(matches!(err, AutopostError::PostFailed(_)));
    }

    #[tokio::test]
    async fn debug_mode_skips_only_the_create_call() {
        let trends = MockTrends::with_tags(&["#A"]);
        let fetcher = MockFetcher::new().on("https://img.example/a.jpg", b"imagebytes");
        let store = MockMediaStore::new();
        let sink = MockPostSink::new();
        let pipeline = Pipeline::new(&trends, &fetcher, &store, &sink, true);

        let records = vec![record(Some("http://x.co/a"), &["https://img.example/a.jpg"])];
        let outcome = pipeline.run(&records, &mut rng()).await.unwrap();

        match outcome {
            RunOutcome::Simulated { post } => {
                // Media was still uploaded; only the create call is skipped.
                assert_eq!(post.media_id.as_deref(), Some("mid-0"));
            }
            other => panic!("expected Simulated, got {other:?}"),
        }
        assert_eq!(store.uploads.lock().unwrap().len(), 1);
        assert!(sink.posts.lock().unwrap().is_empty());
    }
}

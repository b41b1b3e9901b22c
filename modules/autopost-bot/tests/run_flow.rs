//! End-to-end run against a real posts file, with mocked network edges.

use std::io::Write;
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;

use autopost_bot::pipeline::{Pipeline, RunOutcome};
use autopost_bot::records::load_records;
use autopost_bot::testing::{MockFetcher, MockMediaStore, MockPostSink, MockTrends};

const POSTS: &str = "\
text: Check out today's deal
media: https://img.example/deal.jpg
url: https://shop.example/deal
---
";

#[tokio::test]
async fn file_to_post_flow() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(POSTS.as_bytes()).unwrap();
    file.flush().unwrap();

    let records = load_records(file.path()).unwrap();
    assert_eq!(records.len(), 1);

    let trends = MockTrends::with_tags(&["#promo", "@deals"]);
    let fetcher = MockFetcher::new().on("https://img.example/deal.jpg", b"jpegbytes");
    let store = MockMediaStore::new();
    let sink = MockPostSink::new();
    let pipeline = Pipeline::new(&trends, &fetcher, &store, &sink, false);

    let mut rng = StdRng::seed_from_u64(1);
    let outcome = pipeline.run(&records, &mut rng).await.unwrap();

    match outcome {
        RunOutcome::Posted { id, post } => {
            assert_eq!(id, "post-1");
            assert_eq!(
                post.text,
                "Check out today's deal #promo @deals https://shop.example/deal"
            );
            assert_eq!(post.media_id.as_deref(), Some("mid-0"));
        }
        other => panic!("expected Posted, got {other:?}"),
    }

    let posts = sink.posts.lock().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].1.as_deref(), Some("mid-0"));
}

#[tokio::test]
async fn empty_file_is_a_startup_error() {
    let file = tempfile::NamedTempFile::new().unwrap();
    assert!(load_records(file.path()).is_err());
    assert!(load_records(Path::new("/does/not/exist.txt")).is_err());
}

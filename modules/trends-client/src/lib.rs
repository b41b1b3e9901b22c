pub mod error;

pub use error::{Result, TrendsError};

use std::time::Duration;

use scraper::{Html, Selector};

/// Browser-like identity; the trends page serves a stub to unknown agents.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Tags returned when the page loads but yields no usable entries.
const DEFAULT_TAGS: [&str; 2] = ["#Indonesia", "@TwitterID"];

pub struct TrendsClient {
    client: reqwest::Client,
    page_url: String,
}

impl TrendsClient {
    pub fn new(page_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            page_url: page_url.to_string(),
        }
    }

    /// Scrape the trending page and return up to `limit` hashtag/mention strings.
    ///
    /// Entries come back in page order. A page with no `#`/`@` entries yields
    /// the built-in default list rather than an empty one.
    pub async fn trending(&self, limit: usize) -> Result<Vec<String>> {
        let resp = self.client.get(&self.page_url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(TrendsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.text().await?;
        let tags = extract_tags(&body, limit);
        tracing::debug!(count = tags.len(), "Scraped trending tags");

        if tags.is_empty() {
            return Ok(DEFAULT_TAGS.iter().map(|s| s.to_string()).collect());
        }
        Ok(tags)
    }
}

/// Pull hashtag/mention anchors out of the trend-card lists.
fn extract_tags(html: &str, limit: usize) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(".trend-card__list a").expect("static selector");

    document
        .select(&selector)
        .map(|a| a.text().collect::<String>().trim().to_string())
        .filter(|t| t.starts_with('#') || t.starts_with('@'))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <div class="trend-card">
            <ol class="trend-card__list">
              <li><a href="/t/1">#JakartaBanjir</a></li>
              <li><a href="/t/2">@kemenkes</a></li>
              <li><a href="/t/3">Plain Topic</a></li>
              <li><a href="/t/4">#HariSenin</a></li>
            </ol>
          </div>
        </body></html>
    "#;

    #[test]
    fn extracts_hashtags_and_mentions_in_page_order() {
        let tags = extract_tags(PAGE, 5);
        assert_eq!(tags, vec!["#JakartaBanjir", "@kemenkes", "#HariSenin"]);
    }

    #[test]
    fn respects_limit() {
        let tags = extract_tags(PAGE, 2);
        assert_eq!(tags, vec!["#JakartaBanjir", "@kemenkes"]);
    }

    #[test]
    fn unprefixed_entries_are_dropped() {
        let tags = extract_tags("<ol class=\"trend-card__list\"><li><a>Topic</a></li></ol>", 5);
        assert!(tags.is_empty());
    }
}

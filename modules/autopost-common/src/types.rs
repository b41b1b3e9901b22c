/// One parsed unit from the posts file: a single candidate post.
///
/// Every field is optional in the file; a record lacking `url` is
/// rejected before posting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostRecord {
    /// Base post text. Never truncated by composition.
    pub text: String,
    /// Candidate media URLs; one is chosen at random when present.
    pub media_links: Vec<String>,
    /// Destination link appended to the post text.
    pub url: Option<String>,
}

impl PostRecord {
    /// True when no recognized field was populated.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.media_links.is_empty() && self.url.is_none()
    }
}

/// Final composed post, ready for the create-tweet call. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedPost {
    pub text: String,
    pub media_id: Option<String>,
}

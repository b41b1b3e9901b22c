use serde::Deserialize;

/// Account behind the supplied credentials (v1.1 verify_credentials).
#[derive(Debug, Deserialize)]
pub struct VerifiedUser {
    pub id_str: String,
    pub screen_name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MediaUploadResponse {
    pub media_id_string: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TweetResponseWrapper {
    pub data: CreatedTweet,
}

/// Tweet as returned by the v2 create endpoint.
#[derive(Debug, Deserialize)]
pub struct CreatedTweet {
    pub id: String,
    pub text: String,
}

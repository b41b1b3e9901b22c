use thiserror::Error;

pub type Result<T> = std::result::Result<T, TrendsError>;

#[derive(Debug, Error)]
pub enum TrendsError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Trends page error (status {status}): {message}")]
    Api { status: u16, message: String },
}

impl From<reqwest::Error> for TrendsError {
    fn from(err: reqwest::Error) -> Self {
        TrendsError::Network(err.to_string())
    }
}

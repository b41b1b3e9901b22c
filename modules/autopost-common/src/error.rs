use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutopostError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Posts file error: {0}")]
    PostsFile(String),

    #[error("Selected record has no target URL")]
    MissingTargetUrl,

    #[error("Post creation failed: {0}")]
    PostFailed(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfluenceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parsing error: {0}")]
    FeedParse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Every configured source errored or came back empty. The only fatal
    /// outcome of an aggregation pass; individual source failures are
    /// logged and skipped.
    #[error("all {sources} configured sources failed or returned no items")]
    AllSourcesFailed { sources: usize },

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ConfluenceError>;

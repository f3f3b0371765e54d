use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} answered with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to parse video info: {0}")]
    Parse(String),

    #[error("file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("bad config file {path:?}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("could not figure out where downloads go, pass --output-dir")]
    NoDownloadDir,

    #[error("invalid post url {0:?}")]
    InvalidUrl(String),
}

pub type Result<T> = std::result::Result<T, Error>;

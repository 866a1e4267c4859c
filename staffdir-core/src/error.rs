use std::path::PathBuf;

use staffdir_model::ModelError;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum DirectoryError {
    /// The request completed but delivered no body.
    #[error("no data received from {url}")]
    NoData { url: Url },

    #[error(transparent)]
    Decoding(#[from] ModelError),

    #[error("data from {url} is not a supported image")]
    NoImage {
        url: Url,
        #[source]
        source: image::ImageError,
    },

    #[error("image cache I/O failed at {}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image cache root could not be resolved: {0}")]
    CacheRootUnavailable(String),

    #[error("request to {url} failed: {source}")]
    Transport {
        url: Url,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    ClientInit(#[source] reqwest::Error),

    #[error("request to {url} returned HTTP {status}")]
    HttpStatus { url: Url, status: u16 },

    #[error("request for {url} was cancelled")]
    Cancelled { url: Url },
}

impl DirectoryError {
    /// Cache-side failure; the network path may still be usable.
    pub fn is_filesystem(&self) -> bool {
        matches!(
            self,
            DirectoryError::Filesystem { .. }
                | DirectoryError::CacheRootUnavailable(_)
        )
    }

    /// Failure on the network side of a request.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            DirectoryError::NoData { .. }
                | DirectoryError::Transport { .. }
                | DirectoryError::HttpStatus { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, DirectoryError>;

//! Remote fetcher: a single unauthenticated HTTP GET per call.
//!
//! No retries, no redirect customisation. The request timeout is the
//! transport default unless [`HttpConfig::timeout`] sets one.

use std::{fmt::Debug, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::error::{DirectoryError, Result};

/// Source of raw response bodies.
///
/// Services hold an `Arc<dyn RemoteFetcher>` so tests can swap in a stub.
#[async_trait]
pub trait RemoteFetcher: Send + Sync + Debug {
    /// GET `url` and return the body bytes.
    ///
    /// An empty body is [`DirectoryError::NoData`]; a non-2xx status is
    /// [`DirectoryError::HttpStatus`] and its body is discarded.
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>>;
}

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: concat!("staffdir/", env!("CARGO_PKG_VERSION"))
                .to_string(),
        }
    }
}

/// [`RemoteFetcher`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(DirectoryError::ClientInit)?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RemoteFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>> {
        tracing::debug!(%url, "GET");

        let transport = |source| DirectoryError::Transport {
            url: url.clone(),
            source,
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                %url,
                status = status.as_u16(),
                "non-success response"
            );
            return Err(DirectoryError::HttpStatus {
                url: url.clone(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(transport)?;
        if bytes.is_empty() {
            return Err(DirectoryError::NoData { url: url.clone() });
        }

        tracing::debug!(%url, bytes = bytes.len(), "response received");
        Ok(bytes.to_vec())
    }
}

//! Image resolution: disk cache first, network second.

use std::{fmt, sync::Arc};

use image::{DynamicImage, ImageFormat};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::{
    error::{DirectoryError, Result},
    infra::{cache::DiskImageCache, http::RemoteFetcher},
};

/// What to do when a freshly fetched image decodes but cannot be cached.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum StoreFailurePolicy {
    /// Surface the filesystem error even though the image is usable.
    #[default]
    Fail,
    /// Log the filesystem error and return the image.
    LogAndReturn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageOrigin {
    Cache,
    Network,
}

impl fmt::Display for ImageOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageOrigin::Cache => f.write_str("cache"),
            ImageOrigin::Network => f.write_str("network"),
        }
    }
}

/// A decoded image together with the exact bytes it was decoded from.
#[derive(Debug, Clone)]
pub struct ResolvedImage {
    pub bytes: Vec<u8>,
    pub image: DynamicImage,
    pub format: Option<ImageFormat>,
    pub origin: ImageOrigin,
}

impl ResolvedImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

#[derive(Debug, Clone)]
pub struct ImageResolver {
    cache: Arc<DiskImageCache>,
    fetcher: Arc<dyn RemoteFetcher>,
    store_failure: StoreFailurePolicy,
}

impl ImageResolver {
    pub fn new(
        cache: Arc<DiskImageCache>,
        fetcher: Arc<dyn RemoteFetcher>,
    ) -> Self {
        Self {
            cache,
            fetcher,
            store_failure: StoreFailurePolicy::default(),
        }
    }

    pub fn with_store_failure(mut self, policy: StoreFailurePolicy) -> Self {
        self.store_failure = policy;
        self
    }

    pub fn cache(&self) -> &DiskImageCache {
        &self.cache
    }

    /// Return the cached image for `url`, or fetch, decode and cache it.
    ///
    /// A cache entry that no longer decodes is treated as a miss and gets
    /// overwritten by the refetched bytes. Concurrent calls for the same
    /// uncached `url` each fetch; the last write wins.
    pub async fn resolve_image(&self, url: &Url) -> Result<ResolvedImage> {
        let locator = url.as_str();

        if let Some(bytes) = self.cache.lookup(locator).await {
            match image::load_from_memory(&bytes) {
                Ok(image) => {
                    return Ok(ResolvedImage {
                        format: image::guess_format(&bytes).ok(),
                        bytes,
                        image,
                        origin: ImageOrigin::Cache,
                    });
                }
                Err(err) => {
                    tracing::warn!(
                        %url,
                        error = %err,
                        "cached image is unreadable; refetching"
                    );
                }
            }
        }

        let bytes = self.fetcher.fetch(url).await?;
        let image = image::load_from_memory(&bytes).map_err(|source| {
            DirectoryError::NoImage {
                url: url.clone(),
                source,
            }
        })?;

        if let Err(err) = self.cache.store(locator, &bytes).await {
            match self.store_failure {
                StoreFailurePolicy::Fail => return Err(err),
                StoreFailurePolicy::LogAndReturn => {
                    tracing::warn!(
                        %url,
                        error = %err,
                        "image not cached; returning it anyway"
                    );
                }
            }
        }

        Ok(ResolvedImage {
            format: image::guess_format(&bytes).ok(),
            bytes,
            image,
            origin: ImageOrigin::Network,
        })
    }

    /// [`resolve_image`](Self::resolve_image), abandoned as soon as `token`
    /// is cancelled.
    ///
    /// A cache write already handed off when the token fires still runs to
    /// completion; the entry ends up complete or absent, never truncated.
    pub async fn resolve_image_cancellable(
        &self,
        url: &Url,
        token: &CancellationToken,
    ) -> Result<ResolvedImage> {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                Err(DirectoryError::Cancelled { url: url.clone() })
            }
            resolved = self.resolve_image(url) => resolved,
        }
    }
}

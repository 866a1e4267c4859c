//! The two entry points the presentation layer calls.

pub mod employees;
pub mod images;

use std::sync::Arc;

pub use employees::EmployeeListService;
pub use images::{ImageOrigin, ImageResolver, ResolvedImage, StoreFailurePolicy};

use crate::{
    config::StaffdirConfig,
    error::Result,
    infra::{
        cache::DiskImageCache,
        http::{HttpFetcher, RemoteFetcher},
    },
};

/// Services wired from one configuration, sharing a single HTTP client.
#[derive(Debug, Clone)]
pub struct DirectoryServices {
    pub employees: EmployeeListService,
    pub images: ImageResolver,
}

impl DirectoryServices {
    pub fn from_config(config: &StaffdirConfig) -> Result<Self> {
        let fetcher: Arc<dyn RemoteFetcher> =
            Arc::new(HttpFetcher::new(&config.http)?);
        let cache = Arc::new(DiskImageCache::new(config.cache.resolve_root()?));
        Ok(Self::with_parts(config, fetcher, cache))
    }

    pub fn with_parts(
        config: &StaffdirConfig,
        fetcher: Arc<dyn RemoteFetcher>,
        cache: Arc<DiskImageCache>,
    ) -> Self {
        let employees = EmployeeListService::new(
            Arc::clone(&fetcher),
            Arc::new(config.endpoint_source()),
        );
        let images = ImageResolver::new(cache, fetcher)
            .with_store_failure(config.images.store_failure);
        Self { employees, images }
    }
}

use std::path::PathBuf;

use super::endpoints::{EndpointSelection, Endpoints, SelectedEndpoint};
use crate::{
    error::Result,
    infra::{cache::ImageCacheRoot, http::HttpConfig},
    services::images::StoreFailurePolicy,
};

/// Fully resolved configuration.
#[derive(Debug, Clone)]
pub struct StaffdirConfig {
    pub endpoints: Endpoints,
    pub selection: EndpointSelection,
    pub cache: CacheConfig,
    pub http: HttpConfig,
    pub images: ImagesConfig,
    pub metadata: ConfigMetadata,
}

impl StaffdirConfig {
    pub fn endpoint_source(&self) -> SelectedEndpoint {
        SelectedEndpoint::new(self.endpoints.clone(), self.selection)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CacheConfig {
    /// `None` resolves to the platform cache directory.
    pub root: Option<PathBuf>,
}

impl CacheConfig {
    pub fn resolve_root(&self) -> Result<ImageCacheRoot> {
        match &self.root {
            Some(path) => Ok(ImageCacheRoot::new(path.clone())),
            None => ImageCacheRoot::platform_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ImagesConfig {
    pub store_failure: StoreFailurePolicy,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}

//! Configuration: endpoint selection, cache root, HTTP and image policy.

pub mod endpoints;
pub mod loader;
pub mod models;
pub mod sources;

pub use endpoints::{
    EndpointSelection, EndpointSource, Endpoints, SelectedEndpoint,
    UnknownEndpointSelection,
};
pub use loader::{ConfigLoadError, ConfigLoader, ConfigLoaderOptions};
pub use models::{CacheConfig, ConfigMetadata, ImagesConfig, StaffdirConfig};

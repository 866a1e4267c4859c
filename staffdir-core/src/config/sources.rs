use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::services::images::StoreFailurePolicy;

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub endpoints: FileEndpointsConfig,
    #[serde(default)]
    pub cache: FileCacheConfig,
    #[serde(default)]
    pub http: FileHttpConfig,
    #[serde(default)]
    pub images: FileImagesConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileEndpointsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub malformed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileCacheConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileHttpConfig {
    /// Humantime duration, e.g. `"30s"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileImagesConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_failure: Option<StoreFailurePolicy>,
}

/// Overrides gathered from the process environment.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub endpoint: Option<String>,
    pub employees_url: Option<String>,
    pub cache_root: Option<PathBuf>,
    pub http_timeout: Option<String>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self {
            config_path: non_empty_var("STAFFDIR_CONFIG").map(PathBuf::from),
            endpoint: non_empty_var("STAFFDIR_ENDPOINT"),
            employees_url: non_empty_var("STAFFDIR_EMPLOYEES_URL"),
            cache_root: non_empty_var("STAFFDIR_CACHE_DIR").map(PathBuf::from),
            http_timeout: non_empty_var("STAFFDIR_HTTP_TIMEOUT"),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}

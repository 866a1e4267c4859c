use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use thiserror::Error;
use url::Url;

use super::{
    endpoints::{
        EndpointSelection, Endpoints, PUBLISHED_EMPLOYEES_URL,
        PUBLISHED_EMPTY_URL, PUBLISHED_MALFORMED_URL, UnknownEndpointSelection,
    },
    models::{CacheConfig, ConfigMetadata, ImagesConfig, StaffdirConfig},
    sources::{EnvConfig, FileConfig},
};
use crate::infra::http::HttpConfig;

const DEFAULT_CONFIG_LOCATIONS: [&str; 2] =
    ["staffdir.toml", "config/staffdir.toml"];

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

/// Layers defaults, an optional TOML file and environment overrides.
///
/// Precedence, highest first: environment, file, built-in defaults. The
/// loader is the only place that reads the process environment.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    pub fn load(&self) -> Result<StaffdirConfig, ConfigLoadError> {
        let env_file_loaded = match &self.options.env_file {
            Some(path) if !path.exists() => {
                return Err(ConfigLoadError::MissingEnvFile {
                    path: path.clone(),
                });
            }
            Some(path) => {
                dotenvy::from_path(path)?;
                true
            }
            None => {
                dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                })?
            }
        };

        let env = EnvConfig::gather();
        let (file, config_path) = self.load_file_config(&env)?;

        compose(
            file.unwrap_or_default(),
            env,
            ConfigMetadata {
                config_path,
                env_file_loaded,
            },
        )
    }

    fn load_file_config(
        &self,
        env: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let explicit = self
            .options
            .config_path
            .clone()
            .or_else(|| env.config_path.clone());

        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            Some(path) => path,
            None => match DEFAULT_CONFIG_LOCATIONS
                .iter()
                .map(PathBuf::from)
                .find(|candidate| candidate.exists())
            {
                Some(path) => path,
                None => return Ok((None, None)),
            },
        };

        let file_config = read_file_config(&path)?;
        Ok((Some(file_config), Some(path)))
    }
}

pub fn read_file_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let contents =
        fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    toml::from_str(&contents).map_err(|source| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Merge file and environment layers over the built-in defaults.
pub fn compose(
    file: FileConfig,
    env: EnvConfig,
    metadata: ConfigMetadata,
) -> Result<StaffdirConfig, ConfigLoadError> {
    let selection = match env.endpoint.or(file.endpoints.selection) {
        Some(raw) => raw.parse::<EndpointSelection>()?,
        None => EndpointSelection::default(),
    };

    let endpoints = Endpoints::new(
        parse_endpoint(
            "normal",
            env.employees_url
                .as_deref()
                .or(file.endpoints.normal.as_deref())
                .unwrap_or(PUBLISHED_EMPLOYEES_URL),
        )?,
        parse_endpoint(
            "malformed",
            file.endpoints
                .malformed
                .as_deref()
                .unwrap_or(PUBLISHED_MALFORMED_URL),
        )?,
        parse_endpoint(
            "empty",
            file.endpoints.empty.as_deref().unwrap_or(PUBLISHED_EMPTY_URL),
        )?,
    );

    let timeout = env
        .http_timeout
        .or(file.http.timeout)
        .map(|raw| parse_duration(&raw))
        .transpose()?;

    let mut http = HttpConfig {
        timeout,
        ..HttpConfig::default()
    };
    if let Some(user_agent) = file.http.user_agent {
        http.user_agent = user_agent;
    }

    Ok(StaffdirConfig {
        endpoints,
        selection,
        cache: CacheConfig {
            root: env.cache_root.or(file.cache.root),
        },
        http,
        images: ImagesConfig {
            store_failure: file.images.store_failure.unwrap_or_default(),
        },
        metadata,
    })
}

fn parse_endpoint(
    name: &'static str,
    raw: &str,
) -> Result<Url, ConfigLoadError> {
    let url = Url::parse(raw).map_err(|source| {
        ConfigLoadError::InvalidEndpoint {
            name,
            value: raw.to_string(),
            source,
        }
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigLoadError::UnsupportedScheme {
            name,
            value: raw.to_string(),
        });
    }
    Ok(url)
}

fn parse_duration(raw: &str) -> Result<Duration, ConfigLoadError> {
    humantime::parse_duration(raw).map_err(|source| {
        ConfigLoadError::InvalidDuration {
            value: raw.to_string(),
            source,
        }
    })
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration file missing: {path}")]
    MissingConfig { path: PathBuf },
    #[error("env file missing: {path}")]
    MissingEnvFile { path: PathBuf },
    #[error("failed to read configuration {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid {name} endpoint URL '{value}'")]
    InvalidEndpoint {
        name: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("{name} endpoint '{value}' must use http or https")]
    UnsupportedScheme { name: &'static str, value: String },
    #[error(transparent)]
    InvalidSelection(#[from] UnknownEndpointSelection),
    #[error("invalid duration '{value}'")]
    InvalidDuration {
        value: String,
        #[source]
        source: humantime::DurationError,
    },
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}

use std::{
    fmt::{self, Debug, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use url::Url;

pub const PUBLISHED_EMPLOYEES_URL: &str =
    "https://s3.amazonaws.com/sq-mobile-interview/employees.json";
pub const PUBLISHED_MALFORMED_URL: &str =
    "https://s3.amazonaws.com/sq-mobile-interview/employees_malformed.json";
pub const PUBLISHED_EMPTY_URL: &str =
    "https://s3.amazonaws.com/sq-mobile-interview/employees_empty.json";

/// Which employee list endpoint to hit.
///
/// The two fixture endpoints serve canned payloads for exercising the
/// malformed-payload and empty-directory paths against a real server.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
pub enum EndpointSelection {
    #[default]
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "malformed")]
    MalformedFixture,
    #[serde(rename = "empty")]
    EmptyFixture,
}

impl EndpointSelection {
    pub const ALL: [Self; 3] =
        [Self::Normal, Self::MalformedFixture, Self::EmptyFixture];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::MalformedFixture => "malformed",
            Self::EmptyFixture => "empty",
        }
    }
}

impl Display for EndpointSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown endpoint selection '{0}' (expected normal, malformed or empty)")]
pub struct UnknownEndpointSelection(pub String);

impl FromStr for EndpointSelection {
    type Err = UnknownEndpointSelection;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "malformed" => Ok(Self::MalformedFixture),
            "empty" => Ok(Self::EmptyFixture),
            _ => Err(UnknownEndpointSelection(raw.to_string())),
        }
    }
}

/// The three employee list endpoints, one per [`EndpointSelection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub normal: Url,
    pub malformed: Url,
    pub empty: Url,
}

impl Endpoints {
    pub fn new(normal: Url, malformed: Url, empty: Url) -> Self {
        Self {
            normal,
            malformed,
            empty,
        }
    }

    pub fn resolve(&self, selection: EndpointSelection) -> &Url {
        match selection {
            EndpointSelection::Normal => &self.normal,
            EndpointSelection::MalformedFixture => &self.malformed,
            EndpointSelection::EmptyFixture => &self.empty,
        }
    }
}

/// Decides which URL the employee list service requests.
pub trait EndpointSource: Send + Sync + Debug {
    fn employees_url(&self) -> &Url;
}

/// A fixed URL, mostly useful in tests.
impl EndpointSource for Url {
    fn employees_url(&self) -> &Url {
        self
    }
}

/// Production [`EndpointSource`]: the configured endpoints plus an explicit
/// selection chosen at construction.
#[derive(Debug, Clone)]
pub struct SelectedEndpoint {
    endpoints: Endpoints,
    selection: EndpointSelection,
}

impl SelectedEndpoint {
    pub fn new(endpoints: Endpoints, selection: EndpointSelection) -> Self {
        Self {
            endpoints,
            selection,
        }
    }

    pub fn selection(&self) -> EndpointSelection {
        self.selection
    }
}

impl EndpointSource for SelectedEndpoint {
    fn employees_url(&self) -> &Url {
        self.endpoints.resolve(self.selection)
    }
}

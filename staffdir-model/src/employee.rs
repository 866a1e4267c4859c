use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

/// Employment category as published by the directory service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmployeeType {
    FullTime,
    PartTime,
    Contractor,
}

impl Display for EmployeeType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            EmployeeType::FullTime => write!(f, "Full time"),
            EmployeeType::PartTime => write!(f, "Part time"),
            EmployeeType::Contractor => write!(f, "Contractor"),
        }
    }
}

/// Which of the two published photo renditions to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PhotoSize {
    #[default]
    Small,
    Large,
}

/// One directory entry.
///
/// Records are only ever produced by decoding a wire payload and are never
/// mutated afterwards. Field names are the wire keys, except for the two
/// photo locators (`photo_url_small`, `photo_url_large`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub full_name: String,
    pub uuid: Uuid,
    pub phone_number: Option<String>,
    pub email_address: String,
    pub biography: Option<String>,
    #[serde(rename = "photo_url_small")]
    pub small_photo: Option<Url>,
    #[serde(rename = "photo_url_large")]
    pub large_photo: Option<Url>,
    pub team: String,
    pub employee_type: EmployeeType,
}

impl EmployeeRecord {
    /// Photo locator for the requested rendition, if the server published one.
    pub fn photo(&self, size: PhotoSize) -> Option<&Url> {
        match size {
            PhotoSize::Small => self.small_photo.as_ref(),
            PhotoSize::Large => self.large_photo.as_ref(),
        }
    }

    /// Name of the first required string field that is empty, if any.
    pub(crate) fn first_empty_required_field(&self) -> Option<&'static str> {
        if self.email_address.trim().is_empty() {
            return Some("email_address");
        }
        if self.uuid.is_nil() {
            return Some("uuid");
        }
        None
    }
}

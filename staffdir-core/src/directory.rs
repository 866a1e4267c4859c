//! Session-level directory state consumed by the presentation layer.

use staffdir_model::{EmployeeList, EmployeeRecord, PhotoSize};
use tokio::sync::Mutex;
use url::Url;

use crate::{error::Result, services::EmployeeListService};

pub const EMPTY_DIRECTORY_MESSAGE: &str =
    "The machines have come for our jobs, no employees";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryState {
    Loading,
    Failed { message: String },
    Empty,
    Loaded(EmployeeList),
}

impl DirectoryState {
    pub fn from_result(result: Result<EmployeeList>) -> Self {
        match result {
            Ok(list) if list.is_empty() => DirectoryState::Empty,
            Ok(list) => DirectoryState::Loaded(list),
            Err(err) => DirectoryState::Failed {
                message: err.to_string(),
            },
        }
    }

    /// Text to show in place of the list, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            DirectoryState::Failed { message } => Some(message),
            DirectoryState::Empty => Some(EMPTY_DIRECTORY_MESSAGE),
            DirectoryState::Loading | DirectoryState::Loaded(_) => None,
        }
    }

    pub fn employees(&self) -> Option<&EmployeeList> {
        match self {
            DirectoryState::Loaded(list) => Some(list),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, DirectoryState::Loading)
    }
}

/// Loads the directory once per session.
///
/// The first [`load_once`](Self::load_once) fetches; later calls return the
/// stored state. [`reload`](Self::reload) fetches again and replaces the
/// state wholesale.
#[derive(Debug)]
pub struct DirectorySession {
    service: EmployeeListService,
    state: Mutex<DirectoryState>,
}

impl DirectorySession {
    pub fn new(service: EmployeeListService) -> Self {
        Self {
            service,
            state: Mutex::new(DirectoryState::Loading),
        }
    }

    pub async fn current(&self) -> DirectoryState {
        self.state.lock().await.clone()
    }

    pub async fn load_once(&self) -> DirectoryState {
        let mut state = self.state.lock().await;
        if state.is_loading() {
            *state = DirectoryState::from_result(
                self.service.get_employees().await,
            );
        }
        state.clone()
    }

    pub async fn reload(&self) -> DirectoryState {
        let mut state = self.state.lock().await;
        *state =
            DirectoryState::from_result(self.service.get_employees().await);
        state.clone()
    }
}

/// Photo shown for a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoSlot {
    /// No photo published; show the placeholder and do not fetch anything.
    Placeholder,
    Remote(Url),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryRow {
    pub name: String,
    pub team: String,
    pub photo: PhotoSlot,
}

impl DirectoryRow {
    pub fn from_record(record: &EmployeeRecord, size: PhotoSize) -> Self {
        Self {
            name: record.full_name.clone(),
            team: record.team.clone(),
            photo: match record.photo(size) {
                Some(url) => PhotoSlot::Remote(url.clone()),
                None => PhotoSlot::Placeholder,
            },
        }
    }
}

pub fn rows(list: &EmployeeList, size: PhotoSize) -> Vec<DirectoryRow> {
    list.iter()
        .map(|record| DirectoryRow::from_record(record, size))
        .collect()
}

//! # staffdir core
//!
//! Fetches the employee directory, resolves employee photos and keeps a
//! disk cache of every photo it has downloaded.
//!
//! ## Overview
//!
//! - **Employee list**: [`services::EmployeeListService`] GETs the configured
//!   endpoint and decodes the JSON payload into an
//!   [`EmployeeList`](staffdir_model::EmployeeList).
//! - **Photos**: [`services::ImageResolver`] serves a photo from the
//!   [`infra::cache::DiskImageCache`] when present and otherwise downloads,
//!   decodes and stores it.
//! - **Cache keys**: [`infra::cache::derive_key`] maps a locator to the
//!   hex SHA-256 digest used as its file name.
//! - **Session state**: [`directory::DirectorySession`] loads the directory
//!   once per session and exposes the state a UI renders.
//!
//! All collaborators are injected. The cache root, the endpoint selection
//! and the fetcher are constructor arguments, so tests can run against a
//! temp directory and a stub fetcher.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

pub mod config;
pub mod directory;
pub mod error;
pub mod infra;
pub mod services;

pub use error::{DirectoryError, Result};
pub use staffdir_model as model;

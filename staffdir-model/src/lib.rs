//! Core data model definitions shared across staffdir crates.
#![allow(missing_docs)]

pub mod employee;
pub mod error;
pub mod wire;

// Intentionally curated re-exports for downstream consumers.
pub use employee::{EmployeeRecord, EmployeeType, PhotoSize};
pub use error::{ModelError, Result as ModelResult};
pub use wire::{EmployeeList, decode_employee_list, encode_employee_list};

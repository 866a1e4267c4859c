//! JSON wire contract for the employee list endpoint.
//!
//! The endpoint returns the complete directory in one response:
//!
//! ```json
//! { "employees": [ { "full_name": "...", "uuid": "...", ... } ] }
//! ```
//!
//! Decoding is all-or-nothing. A single bad record fails the whole payload.

use serde::{Deserialize, Serialize};

use crate::{
    employee::EmployeeRecord,
    error::{ModelError, Result},
};

/// Ordered employee records, in the order the server returned them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeList(Vec<EmployeeRecord>);

impl EmployeeList {
    pub fn new(records: Vec<EmployeeRecord>) -> Self {
        Self(records)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EmployeeRecord> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[EmployeeRecord] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<EmployeeRecord> {
        self.0
    }
}

impl From<Vec<EmployeeRecord>> for EmployeeList {
    fn from(records: Vec<EmployeeRecord>) -> Self {
        Self(records)
    }
}

impl IntoIterator for EmployeeList {
    type Item = EmployeeRecord;
    type IntoIter = std::vec::IntoIter<EmployeeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a EmployeeList {
    type Item = &'a EmployeeRecord;
    type IntoIter = std::slice::Iter<'a, EmployeeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[derive(Deserialize)]
struct EmployeesEnvelope {
    employees: Vec<EmployeeRecord>,
}

#[derive(Serialize)]
struct EmployeesEnvelopeRef<'a> {
    employees: &'a [EmployeeRecord],
}

/// Decode a directory payload.
pub fn decode_employee_list(bytes: &[u8]) -> Result<EmployeeList> {
    let envelope: EmployeesEnvelope =
        serde_json::from_slice(bytes).map_err(ModelError::Decoding)?;

    for (index, record) in envelope.employees.iter().enumerate() {
        if let Some(field) = record.first_empty_required_field() {
            return Err(ModelError::InvalidRecord { index, field });
        }
    }

    Ok(EmployeeList(envelope.employees))
}

/// Encode a directory payload in the same shape the server publishes.
pub fn encode_employee_list(list: &EmployeeList) -> Result<Vec<u8>> {
    serde_json::to_vec(&EmployeesEnvelopeRef {
        employees: list.as_slice(),
    })
    .map_err(ModelError::Encoding)
}

use std::sync::Arc;

use staffdir_model::{EmployeeList, decode_employee_list};

use crate::{
    config::EndpointSource,
    error::Result,
    infra::http::RemoteFetcher,
};

/// Fetches and decodes the employee directory.
///
/// The whole list decodes or the call fails; there are no partial results.
#[derive(Debug, Clone)]
pub struct EmployeeListService {
    fetcher: Arc<dyn RemoteFetcher>,
    endpoint: Arc<dyn EndpointSource>,
}

impl EmployeeListService {
    pub fn new(
        fetcher: Arc<dyn RemoteFetcher>,
        endpoint: Arc<dyn EndpointSource>,
    ) -> Self {
        Self { fetcher, endpoint }
    }

    pub async fn get_employees(&self) -> Result<EmployeeList> {
        let url = self.endpoint.employees_url();
        let bytes = self.fetcher.fetch(url).await?;

        match decode_employee_list(&bytes) {
            Ok(list) => {
                tracing::info!(
                    %url,
                    count = list.len(),
                    "employee directory loaded"
                );
                Ok(list)
            }
            Err(err) => {
                tracing::warn!(
                    %url,
                    error = %err,
                    "employee directory payload rejected"
                );
                Err(err.into())
            }
        }
    }
}

//! `GET {type}/{id}`

use reqwest::StatusCode;

use crate::client::{member_path, SeekClient};
use crate::error::{Result, SeekError};
use crate::models::Resource;
use crate::registry::Operation;

impl SeekClient {
    /// Fetch a single resource by id.
    ///
    /// The raw body of a failed response is logged at WARN before the
    /// [`SeekError::ApiError`] is returned.
    #[tracing::instrument(skip(self))]
    pub async fn fetch(&self, object_type: &str, object_id: &str) -> Result<Resource> {
        self.registry().check(Operation::Fetch, object_type)?;
        self.ensure_logged_in()?;

        let response = self.get(&member_path(object_type, object_id)).await?;
        if response.status() == StatusCode::OK {
            return Self::decode_data(response).await;
        }

        let (status, body) = Self::error_body(response).await;
        tracing::warn!(%status, %body, "fetch of {object_type} {object_id} failed");
        Err(SeekError::from_error_body(status, &body))
    }
}

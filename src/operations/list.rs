//! `GET {type}`

use reqwest::StatusCode;

use crate::client::{collection_path, SeekClient};
use crate::error::Result;
use crate::models::Resource;
use crate::registry::Operation;

impl SeekClient {
    /// List all resources of a type.
    ///
    /// # Errors
    ///
    /// [`SeekError::UnsupportedType`](crate::SeekError::UnsupportedType) if the
    /// type cannot be listed, [`SeekError::NotLoggedIn`](crate::SeekError::NotLoggedIn)
    /// without a session, and [`SeekError::ApiError`](crate::SeekError::ApiError)
    /// unless the server answers 200.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, object_type: &str) -> Result<Vec<Resource>> {
        self.registry().check(Operation::List, object_type)?;
        self.ensure_logged_in()?;

        let response = self.get(&collection_path(object_type)).await?;
        let response = Self::expect_status(response, &[StatusCode::OK]).await?;
        Self::decode_data(response).await
    }
}

//! `DELETE {type}/{id}`

use reqwest::StatusCode;

use crate::client::{member_path, SeekClient};
use crate::error::Result;
use crate::registry::Operation;

impl SeekClient {
    /// Delete a resource.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, object_type: &str, object_id: &str) -> Result<()> {
        self.registry().check(Operation::Delete, object_type)?;
        self.ensure_logged_in()?;

        let response = self
            .delete_request(&member_path(object_type, object_id))
            .await?;
        Self::expect_status(response, &[StatusCode::OK]).await?;

        tracing::info!("{object_type} {object_id} deleted successfully.");
        Ok(())
    }
}

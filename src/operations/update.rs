//! `PATCH {type}/{id}`

use reqwest::StatusCode;

use crate::client::{member_path, SeekClient};
use crate::error::Result;
use crate::models::{Document, Members, Resource, ResourceObject};
use crate::registry::Operation;

impl SeekClient {
    /// Update a resource and return the updated version.
    #[tracing::instrument(skip(self, attributes, relationships))]
    pub async fn update(
        &self,
        object_type: &str,
        object_id: &str,
        attributes: Members,
        relationships: Members,
    ) -> Result<Resource> {
        self.registry().check(Operation::Update, object_type)?;
        self.ensure_logged_in()?;

        let body = Document::new(ResourceObject::for_update(
            object_type,
            object_id,
            attributes,
            relationships,
        ));

        let response = self
            .patch(&member_path(object_type, object_id), &body)
            .await?;
        let response = Self::expect_status(response, &[StatusCode::OK]).await?;
        Self::decode_data(response).await
    }
}

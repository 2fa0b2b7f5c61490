//! `POST {type}`

use reqwest::StatusCode;

use crate::client::{collection_path, SeekClient};
use crate::error::Result;
use crate::models::{Document, Members, Resource, ResourceObject};
use crate::registry::Operation;

impl SeekClient {
    /// Create a resource and return it as stored by the server.
    ///
    /// Both 200 and 201 count as success.
    #[tracing::instrument(skip(self, attributes, relationships))]
    pub async fn create(
        &self,
        object_type: &str,
        attributes: Members,
        relationships: Members,
    ) -> Result<Resource> {
        self.registry().check(Operation::Create, object_type)?;
        self.ensure_logged_in()?;

        let body = Document::new(ResourceObject::for_create(
            object_type,
            attributes,
            relationships,
        ));

        let response = self.post(&collection_path(object_type), &body).await?;
        let response =
            Self::expect_status(response, &[StatusCode::OK, StatusCode::CREATED]).await?;
        Self::decode_data(response).await
    }
}

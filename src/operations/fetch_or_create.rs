//! Fetch a resource, creating it when the fetch fails.

use serde::Serialize;

use crate::client::SeekClient;
use crate::config::CreateFallback;
use crate::error::{Result, SeekError};
use crate::models::{Members, Resource};

/// Outcome of [`SeekClient::fetch_or_create`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "data", rename_all = "snake_case")]
pub enum FetchOrCreate {
    /// The resource already existed.
    Fetched(Resource),
    /// The fetch failed and a new resource was created.
    Created(Resource),
}

impl FetchOrCreate {
    pub fn resource(&self) -> &Resource {
        match self {
            FetchOrCreate::Fetched(r) | FetchOrCreate::Created(r) => r,
        }
    }

    pub fn into_resource(self) -> Resource {
        match self {
            FetchOrCreate::Fetched(r) | FetchOrCreate::Created(r) => r,
        }
    }

    pub fn was_created(&self) -> bool {
        matches!(self, FetchOrCreate::Created(_))
    }
}

impl SeekClient {
    /// Fetch `object_type/object_id`, or create a resource from
    /// `attributes` and `relationships` if the fetch fails.
    ///
    /// The type must be both fetchable and creatable. Which fetch failures
    /// trigger creation is decided by the client's [`CreateFallback`]:
    /// with the default [`CreateFallback::AnyApiError`] every API error does,
    /// with [`CreateFallback::NotFoundOnly`] only a 404 does. Transport and
    /// decoding errors never do. Errors from the create itself propagate.
    ///
    /// Note that the created resource gets whatever id the server assigns,
    /// not necessarily `object_id`.
    #[tracing::instrument(skip(self, attributes, relationships))]
    pub async fn fetch_or_create(
        &self,
        object_type: &str,
        object_id: &str,
        attributes: Members,
        relationships: Members,
    ) -> Result<FetchOrCreate> {
        self.registry().check_fetch_or_create(object_type)?;
        self.ensure_logged_in()?;

        match self.fetch(object_type, object_id).await {
            Ok(resource) => Ok(FetchOrCreate::Fetched(resource)),
            Err(err) if self.falls_back_on(&err) => {
                tracing::warn!(error = %err, "{object_type} {object_id} not fetched, creating it");
                self.create(object_type, attributes, relationships)
                    .await
                    .map(FetchOrCreate::Created)
            }
            Err(err) => Err(err),
        }
    }

    fn falls_back_on(&self, err: &SeekError) -> bool {
        match self.config().fallback {
            CreateFallback::AnyApiError => matches!(err, SeekError::ApiError { .. }),
            CreateFallback::NotFoundOnly => err.is_not_found(),
        }
    }
}

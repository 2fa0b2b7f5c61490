//! JSON:API document envelopes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JSON object used for `attributes` and `relationships` members.
pub type Members = Map<String, Value>;

/// Top-level `{"data": ...}` document.
///
/// Used both for request bodies (wrapping a [`ResourceObject`]) and for
/// success responses (wrapping a [`Resource`](super::Resource) or a list of
/// them).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document<T> {
    pub data: T,
}

impl<T> Document<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }

    pub fn into_data(self) -> T {
        self.data
    }
}

/// Resource object sent in create and update requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceObject {
    /// The resource type, e.g. `"studies"`.
    #[serde(rename = "type")]
    pub resource_type: String,

    /// Only present on updates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub attributes: Members,

    #[serde(default)]
    pub relationships: Members,
}

impl ResourceObject {
    /// A resource object for a create request (no `id`).
    pub fn for_create(resource_type: &str, attributes: Members, relationships: Members) -> Self {
        Self {
            resource_type: resource_type.to_string(),
            id: None,
            attributes,
            relationships,
        }
    }

    /// A resource object for an update request.
    pub fn for_update(
        resource_type: &str,
        id: &str,
        attributes: Members,
        relationships: Members,
    ) -> Self {
        Self {
            resource_type: resource_type.to_string(),
            id: Some(id.to_string()),
            attributes,
            relationships,
        }
    }
}

/// Error document returned with non-success responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorDocument {
    #[serde(default)]
    pub errors: Vec<ErrorObject>,
}

/// A single entry of an error document's `errors` array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorObject {
    pub fn new(title: &str, detail: &str) -> Self {
        Self {
            status: None,
            title: Some(title.to_string()),
            detail: Some(detail.to_string()),
        }
    }

    /// Non-empty `title` and `detail`, joined with `", "`.
    pub fn summary(&self) -> String {
        [self.title.as_deref(), self.detail.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

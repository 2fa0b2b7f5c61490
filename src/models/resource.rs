//! Resource model returned by the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Members;

/// A FAIRDOM-SEEK resource, as found in the `data` member of a response.
///
/// Only `type` and `id` are decoded into fields. Every other member
/// (`attributes`, `relationships`, `links`, `meta`, ...) stays in
/// [`Resource::members`] exactly as received, `null` values included, so a
/// resource serializes back to the payload it was decoded from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// The resource type (e.g. "studies", "people").
    #[serde(rename = "type")]
    pub resource_type: String,

    /// The resource ID, unique within its type.
    pub id: String,

    /// Remaining top-level members.
    #[serde(flatten)]
    pub members: Members,
}

impl Resource {
    /// The `attributes` object, if present and not `null`.
    pub fn attributes(&self) -> Option<&Members> {
        self.members.get("attributes").and_then(Value::as_object)
    }

    /// The `relationships` object, if present and not `null`.
    pub fn relationships(&self) -> Option<&Members> {
        self.members.get("relationships").and_then(Value::as_object)
    }

    /// Look up a single attribute.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes().and_then(|a| a.get(name))
    }

    /// The `title` attribute. People, projects, studies and most other
    /// SEEK types carry one.
    pub fn title(&self) -> Option<&str> {
        self.attribute("title").and_then(Value::as_str)
    }

    /// Look up a single relationship.
    pub fn relationship(&self, name: &str) -> Option<&Value> {
        self.relationships().and_then(|r| r.get(name))
    }

    /// The `links.self` URL, if present.
    pub fn self_link(&self) -> Option<&str> {
        self.members
            .get("links")
            .and_then(|l| l.get("self"))
            .and_then(Value::as_str)
    }

    /// When the resource was created (`meta.created`).
    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.meta_timestamp("created")
    }

    /// When the resource was last modified (`meta.modified`).
    pub fn modified(&self) -> Option<DateTime<Utc>> {
        self.meta_timestamp("modified")
    }

    fn meta_timestamp(&self, key: &str) -> Option<DateTime<Utc>> {
        self.members
            .get("meta")
            .and_then(|m| m.get(key))
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<DateTime<Utc>>().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "type": "studies",
            "id": "42",
            "attributes": {"title": "Growth curves", "description": null},
            "relationships": {
                "investigation": {"data": {"type": "investigations", "id": "7"}}
            },
            "links": {"self": "/studies/42"},
            "meta": {
                "created": "2024-03-01T09:30:00.000Z",
                "modified": "2024-03-02T10:00:00.000Z",
                "api_version": "0.3",
                "uuid": "5c1e6a1e-1b5e-4b0f-9a8c-3f6b1d2f0a11"
            }
        })
    }

    #[test]
    fn test_resource_preserves_payload_verbatim() {
        let resource: Resource = serde_json::from_value(sample()).unwrap();
        assert_eq!(serde_json::to_value(&resource).unwrap(), sample());
    }

    #[test]
    fn test_resource_without_optional_members() {
        let value = json!({"type": "people", "id": "1"});
        let resource: Resource = serde_json::from_value(value.clone()).unwrap();

        assert!(resource.attributes().is_none());
        assert!(resource.title().is_none());
        assert_eq!(serde_json::to_value(&resource).unwrap(), value);
    }

    #[test]
    fn test_resource_accessors() {
        let resource: Resource = serde_json::from_value(sample()).unwrap();

        assert_eq!(resource.title(), Some("Growth curves"));
        assert_eq!(resource.self_link(), Some("/studies/42"));
        assert!(resource.relationship("investigation").is_some());
        assert_eq!(
            resource.created().map(|c| c.to_rfc3339()),
            Some("2024-03-01T09:30:00+00:00".to_string())
        );
        assert!(resource.modified().unwrap() > resource.created().unwrap());
    }

    #[test]
    fn test_null_members_survive_reencoding() {
        let value = json!({
            "type": "studies",
            "id": "1",
            "attributes": {"title": "A"},
            "relationships": null
        });
        let resource: Resource = serde_json::from_value(value.clone()).unwrap();

        assert!(resource.relationships().is_none());
        assert!(resource.relationship("investigation").is_none());
        assert_eq!(resource.title(), Some("A"));
        assert_eq!(serde_json::to_value(&resource).unwrap(), value);
    }
}

//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use serde_json::{json, Value};

use crate::{Members, Resource};

/// Token accepted by servers built from the default scenario.
pub const DEFAULT_TOKEN: &str = "test-token";

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    /// Create a resource with a title and the usual `links`/`meta` members.
    pub fn resource(resource_type: &str, id: &str, title: &str) -> Resource {
        Self::resource_with(resource_type, id, object(json!({ "title": title })), Members::new())
    }

    /// Create a resource from explicit attributes and relationships.
    pub fn resource_with(
        resource_type: &str,
        id: &str,
        attributes: Members,
        relationships: Members,
    ) -> Resource {
        let now = chrono::Utc::now().to_rfc3339();
        let members = object(json!({
            "attributes": attributes,
            "relationships": relationships,
            "links": { "self": format!("/{resource_type}/{id}") },
            "meta": { "created": now, "modified": now, "api_version": "0.3" }
        }));

        Resource {
            resource_type: resource_type.to_string(),
            id: id.to_string(),
            members,
        }
    }

    /// Create a person.
    pub fn person(id: &str, first_name: &str, last_name: &str) -> Resource {
        Self::resource_with(
            "people",
            id,
            object(json!({
                "title": format!("{first_name} {last_name}"),
                "first_name": first_name,
                "last_name": last_name
            })),
            Members::new(),
        )
    }

    /// Create a study belonging to an investigation.
    pub fn study(id: &str, title: &str, investigation_id: &str) -> Resource {
        Self::resource_with(
            "studies",
            id,
            object(json!({ "title": title, "description": null })),
            object(json!({
                "investigation": { "data": { "type": "investigations", "id": investigation_id } }
            })),
        )
    }

    /// Create an assay belonging to a study.
    pub fn assay(id: &str, title: &str, study_id: &str) -> Resource {
        Self::resource_with(
            "assays",
            id,
            object(json!({ "title": title, "assay_class": { "key": "EXP" } })),
            object(json!({
                "study": { "data": { "type": "studies", "id": study_id } }
            })),
        )
    }

    // =========================================================================
    // Scenario Builders
    // =========================================================================

    /// Create a default set of test data for common scenarios.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario::new()
    }
}

/// A complete test scenario with related entities.
pub struct DefaultScenario {
    pub current_user: Resource,
    pub resources: Vec<Resource>,
    pub token: String,
}

impl DefaultScenario {
    fn new() -> Self {
        let current_user = Fixtures::person("1", "Test", "User");

        let resources = vec![
            current_user.clone(),
            Fixtures::resource("projects", "1", "Test Project"),
            Fixtures::resource("investigations", "1", "Test Investigation"),
            Fixtures::study("1", "Test Study", "1"),
            Fixtures::assay("1", "Growth Assay", "1"),
            Fixtures::assay("2", "Metabolomics Assay", "1"),
        ];

        Self {
            current_user,
            resources,
            token: DEFAULT_TOKEN.to_string(),
        }
    }
}

fn object(value: Value) -> Members {
    match value {
        Value::Object(map) => map,
        _ => Members::new(),
    }
}

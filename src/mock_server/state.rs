//! Mock server state management.
//!
//! Provides the in-memory data store for the mock FAIRDOM-SEEK server.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

use super::fixtures::Fixtures;
use crate::{Members, Resource};

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Resources by type, then by id.
    pub resources: HashMap<String, BTreeMap<String, Resource>>,

    /// Identity returned by `GET /people/current`. Without one that
    /// endpoint answers 404.
    pub current_user: Option<Resource>,

    /// If set, requests must carry this value in the `Authentication` header.
    pub required_token: Option<String>,

    /// If set, requests may instead carry this exact `Authorization` header.
    pub required_basic_auth: Option<String>,

    /// Every request seen, as `"METHOD /path"`, in arrival order.
    pub requests: Vec<String>,

    next_id: u64,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self {
            next_id: 1000,
            ..Self::default()
        }
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a resource to the state.
    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.insert(resource);
        self
    }

    /// Set the identity returned at login.
    pub fn with_current_user(mut self, user: Resource) -> Self {
        self.current_user = Some(user);
        self
    }

    /// Set the required authentication token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    /// Accept basic auth with this exact `Authorization` header value.
    pub fn with_required_basic_auth(mut self, header_value: &str) -> Self {
        self.required_basic_auth = Some(header_value.to_string());
        self
    }

    /// Whether a request with these credentials may proceed.
    pub fn is_authorized(&self, token: Option<&str>, authorization: Option<&str>) -> bool {
        if self.required_token.is_none() && self.required_basic_auth.is_none() {
            return true;
        }
        let token_ok = self.required_token.is_some() && self.required_token.as_deref() == token;
        let basic_ok = self.required_basic_auth.is_some()
            && self.required_basic_auth.as_deref() == authorization;
        token_ok || basic_ok
    }

    pub fn insert(&mut self, resource: Resource) {
        self.resources
            .entry(resource.resource_type.clone())
            .or_default()
            .insert(resource.id.clone(), resource);
    }

    /// Get a resource by type and id.
    pub fn get(&self, resource_type: &str, id: &str) -> Option<&Resource> {
        self.resources.get(resource_type).and_then(|r| r.get(id))
    }

    /// List all resources of a type, ordered by id.
    pub fn list(&self, resource_type: &str) -> Vec<&Resource> {
        self.resources
            .get(resource_type)
            .map(|r| r.values().collect())
            .unwrap_or_default()
    }

    /// Store a new resource under a fresh id and return it.
    pub fn create(
        &mut self,
        resource_type: &str,
        attributes: Members,
        relationships: Members,
    ) -> Resource {
        let id = self.next_id.to_string();
        self.next_id += 1;

        let resource = Fixtures::resource_with(resource_type, &id, attributes, relationships);
        self.insert(resource.clone());
        resource
    }

    /// Merge attributes and relationships into an existing resource.
    pub fn update(
        &mut self,
        resource_type: &str,
        id: &str,
        attributes: Members,
        relationships: Members,
    ) -> Option<&Resource> {
        let resource = self.resources.get_mut(resource_type)?.get_mut(id)?;

        merge_member(&mut resource.members, "attributes", attributes);
        merge_member(&mut resource.members, "relationships", relationships);

        if let Some(meta) = resource.members.get_mut("meta").and_then(|m| m.as_object_mut()) {
            meta.insert(
                "modified".to_string(),
                chrono::Utc::now().to_rfc3339().into(),
            );
        }

        Some(&*resource)
    }

    /// Remove a resource, returning it if it existed.
    pub fn delete(&mut self, resource_type: &str, id: &str) -> Option<Resource> {
        self.resources.get_mut(resource_type)?.remove(id)
    }
}

/// Extend the object stored under `key`, replacing it if it is missing or not an object.
fn merge_member(members: &mut Members, key: &str, updates: Members) {
    let entry = members
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Members::new()));
    match entry.as_object_mut() {
        Some(existing) => existing.extend(updates),
        None => *entry = Value::Object(updates),
    }
}

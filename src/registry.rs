//! Resource types accepted by each operation.
//!
//! Membership is checked before any request is sent. The default registry
//! is built from [`SEEK_RESOURCE_TYPES`]; a different one can be loaded from
//! JSON and installed through [`ClientConfig`](crate::ClientConfig).

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SeekError};

/// The operation a resource type is validated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    Create,
    Fetch,
    List,
    Update,
    Delete,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Create,
        Operation::Fetch,
        Operation::List,
        Operation::Update,
        Operation::Delete,
    ];
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Create => "create",
            Operation::Fetch => "fetch",
            Operation::List => "list",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

const FULL_CRUD: &[Operation] = &Operation::ALL;
const READ_CREATE: &[Operation] = &[Operation::Create, Operation::Fetch, Operation::List];
const READ_ONLY: &[Operation] = &[Operation::Fetch, Operation::List];

/// FAIRDOM-SEEK resource types and the operations the API offers for them.
pub const SEEK_RESOURCE_TYPES: &[(&str, &[Operation])] = &[
    ("people", FULL_CRUD),
    ("projects", FULL_CRUD),
    ("institutions", FULL_CRUD),
    ("programmes", FULL_CRUD),
    ("investigations", FULL_CRUD),
    ("studies", FULL_CRUD),
    ("assays", FULL_CRUD),
    ("data_files", FULL_CRUD),
    ("models", FULL_CRUD),
    ("sops", FULL_CRUD),
    ("documents", FULL_CRUD),
    ("presentations", FULL_CRUD),
    ("publications", FULL_CRUD),
    ("events", FULL_CRUD),
    ("samples", FULL_CRUD),
    ("sample_types", FULL_CRUD),
    ("collections", FULL_CRUD),
    ("workflows", FULL_CRUD),
    ("organisms", READ_CREATE),
    ("strains", READ_ONLY),
    ("human_diseases", READ_ONLY),
    ("placeholders", READ_ONLY),
    ("file_templates", READ_ONLY),
    ("sample_attribute_types", READ_ONLY),
];

/// Allowed resource types, one set per operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRegistry {
    #[serde(default)]
    pub create: BTreeSet<String>,
    #[serde(default)]
    pub fetch: BTreeSet<String>,
    #[serde(default)]
    pub list: BTreeSet<String>,
    #[serde(default)]
    pub update: BTreeSet<String>,
    #[serde(default)]
    pub delete: BTreeSet<String>,
}

impl ResourceRegistry {
    /// Registry of the standard FAIRDOM-SEEK resource types.
    pub fn seek() -> Self {
        Self::from_table(SEEK_RESOURCE_TYPES)
    }

    /// Build a registry from `(type, operations)` rows.
    pub fn from_table(table: &[(&str, &[Operation])]) -> Self {
        let mut registry = Self::default();
        for (resource_type, operations) in table {
            for op in operations.iter() {
                registry.set_mut(*op).insert((*resource_type).to_string());
            }
        }
        registry
    }

    /// Parse a registry from a JSON object with one array per operation.
    ///
    /// ```
    /// use seekapi::{Operation, ResourceRegistry};
    ///
    /// let registry = ResourceRegistry::from_json(
    ///     r#"{"fetch": ["studies"], "create": ["studies"], "list": ["studies"]}"#,
    /// ).unwrap();
    /// assert!(registry.allows(Operation::List, "studies"));
    /// assert!(!registry.allows(Operation::Delete, "studies"));
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The set of types allowed for `op`.
    pub fn types_for(&self, op: Operation) -> &BTreeSet<String> {
        match op {
            Operation::Create => &self.create,
            Operation::Fetch => &self.fetch,
            Operation::List => &self.list,
            Operation::Update => &self.update,
            Operation::Delete => &self.delete,
        }
    }

    fn set_mut(&mut self, op: Operation) -> &mut BTreeSet<String> {
        match op {
            Operation::Create => &mut self.create,
            Operation::Fetch => &mut self.fetch,
            Operation::List => &mut self.list,
            Operation::Update => &mut self.update,
            Operation::Delete => &mut self.delete,
        }
    }

    /// Whether `resource_type` is allowed for `op`.
    pub fn allows(&self, op: Operation, resource_type: &str) -> bool {
        self.types_for(op).contains(resource_type)
    }

    /// Types that can be both fetched and created.
    pub fn fetch_or_create_types(&self) -> BTreeSet<String> {
        self.fetch.intersection(&self.create).cloned().collect()
    }

    /// Add a resource type for the given operations.
    pub fn with_type(mut self, resource_type: &str, operations: &[Operation]) -> Self {
        for op in operations {
            self.set_mut(*op).insert(resource_type.to_string());
        }
        self
    }

    /// Check `resource_type` against the set for `op`.
    pub fn check(&self, op: Operation, resource_type: &str) -> Result<()> {
        Self::check_in(self.types_for(op), resource_type)
    }

    /// Check `resource_type` against the fetch ∩ create intersection.
    pub fn check_fetch_or_create(&self, resource_type: &str) -> Result<()> {
        Self::check_in(&self.fetch_or_create_types(), resource_type)
    }

    fn check_in(allowed: &BTreeSet<String>, resource_type: &str) -> Result<()> {
        if allowed.contains(resource_type) {
            return Ok(());
        }
        Err(SeekError::UnsupportedType {
            object_type: resource_type.to_string(),
            valid: allowed.iter().cloned().collect(),
        })
    }

    /// Operations supported for a resource type, in [`Operation::ALL`] order.
    pub fn operations_for(&self, resource_type: &str) -> Vec<Operation> {
        Operation::ALL
            .into_iter()
            .filter(|op| self.allows(*op, resource_type))
            .collect()
    }

    /// Every resource type known to at least one operation.
    pub fn all_types(&self) -> BTreeSet<&str> {
        Operation::ALL
            .into_iter()
            .flat_map(|op| self.types_for(op).iter().map(String::as_str))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seek_registry_core_types() {
        let registry = ResourceRegistry::seek();

        for op in Operation::ALL {
            assert!(registry.allows(op, "studies"), "studies should allow {op}");
            assert!(registry.allows(op, "assays"), "assays should allow {op}");
        }
        assert!(registry.allows(Operation::List, "strains"));
        assert!(!registry.allows(Operation::Create, "strains"));
        assert!(!registry.allows(Operation::Delete, "organisms"));
    }

    #[test]
    fn test_fetch_or_create_is_intersection() {
        let registry = ResourceRegistry::default()
            .with_type("studies", &[Operation::Fetch, Operation::Create])
            .with_type("strains", &[Operation::Fetch])
            .with_type("tags", &[Operation::Create]);

        let both = registry.fetch_or_create_types();
        assert_eq!(both.into_iter().collect::<Vec<_>>(), vec!["studies"]);
        assert!(registry.check_fetch_or_create("strains").is_err());
        assert!(registry.check_fetch_or_create("tags").is_err());
        assert!(registry.check_fetch_or_create("studies").is_ok());
    }

    #[test]
    fn test_check_reports_sorted_valid_types() {
        let registry = ResourceRegistry::default()
            .with_type("studies", &[Operation::Delete])
            .with_type("assays", &[Operation::Delete]);

        match registry.check(Operation::Delete, "people") {
            Err(SeekError::UnsupportedType { object_type, valid }) => {
                assert_eq!(object_type, "people");
                assert_eq!(valid, vec!["assays", "studies"]);
            }
            other => panic!("Expected UnsupportedType, got {other:?}"),
        }
    }

    #[test]
    fn test_registry_from_json() {
        let registry =
            ResourceRegistry::from_json(r#"{"list": ["studies", "assays"], "delete": ["assays"]}"#)
                .unwrap();

        assert!(registry.allows(Operation::List, "studies"));
        assert!(registry.create.is_empty());
        assert_eq!(
            registry.operations_for("assays"),
            vec![Operation::List, Operation::Delete]
        );
        assert_eq!(registry.all_types().len(), 2);
    }

    #[test]
    fn test_registry_from_invalid_json() {
        assert!(matches!(
            ResourceRegistry::from_json("[1, 2]"),
            Err(SeekError::ParseError(_))
        ));
    }
}

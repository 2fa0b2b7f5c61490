//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use serde_json::Value;

use crate::{FetchOrCreate, Resource};

/// Trait for human-readable key-value output.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for Resource {
    fn pretty_print(&self) -> String {
        let header = format!("{} {}", self.resource_type, self.id);
        let divider = "─".repeat(header.chars().count().max(30));

        let mut lines = vec![header, divider];

        if let Some(title) = self.title() {
            lines.push(format!("Title:          {}", title));
        }

        if let Some(ref created) = self.created() {
            lines.push(format!("Created:        {}", created.format("%Y-%m-%d %H:%M:%S UTC")));
        }

        if let Some(ref modified) = self.modified() {
            lines.push(format!("Modified:       {}", modified.format("%Y-%m-%d %H:%M:%S UTC")));
        }

        if let Some(attributes) = self.attributes() {
            let mut names: Vec<&String> = attributes
                .iter()
                .filter(|(name, value)| name.as_str() != "title" && !value.is_null())
                .map(|(name, _)| name)
                .collect();
            names.sort();

            for name in names {
                lines.push(format!("{:<15} {}", format!("{name}:"), display_value(&attributes[name])));
            }
        }

        if let Some(relationships) = self.relationships() {
            for (name, rel) in relationships {
                let targets = relationship_targets(rel);
                if !targets.is_empty() {
                    lines.push(format!("{:<15} {}", format!("→ {name}:"), targets.join(", ")));
                }
            }
        }

        lines.join("\n")
    }
}

impl PrettyPrint for FetchOrCreate {
    fn pretty_print(&self) -> String {
        let outcome = if self.was_created() { "Created" } else { "Fetched" };
        format!("{outcome}\n{}", self.resource().pretty_print())
    }
}

/// Strings without quotes, everything else as compact JSON.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `type/id` of every linkage in a relationship's `data` member.
fn relationship_targets(rel: &Value) -> Vec<String> {
    let linkage = |v: &Value| {
        Some(format!(
            "{}/{}",
            v.get("type")?.as_str()?,
            v.get("id")?.as_str()?
        ))
    };

    match rel.get("data") {
        Some(Value::Array(items)) => items.iter().filter_map(linkage).collect(),
        Some(item @ Value::Object(_)) => linkage(item).into_iter().collect(),
        _ => Vec::new(),
    }
}

//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the `seek` binary.

use clap::{Args, Parser, Subcommand};

use crate::error::{Result, SeekError};
use crate::models::Members;

/// FAIRDOM-SEEK command-line interface.
#[derive(Parser, Debug)]
#[command(name = "seek", about = "FAIRDOM-SEEK API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a human-readable view.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Base URL of the SEEK instance.
    #[arg(long, global = true, env = "SEEK_API_URL")]
    pub url: Option<String>,

    /// API token. Without one, username and password are prompted for.
    #[arg(long, global = true, env = "SEEK_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, global = true, default_value = "60")]
    pub timeout: u64,

    /// Connect over IPv4 only.
    #[arg(long, global = true, default_value = "false")]
    pub no_ipv6: bool,

    /// Log requests at debug level.
    #[arg(short, long, global = true, default_value = "false")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the logged-in user.
    Whoami,

    /// Show the resource types and the operations each supports.
    Types,

    /// List all resources of a type.
    List {
        /// The resource type, e.g. "studies".
        object_type: String,
    },

    /// Fetch a single resource.
    Get {
        /// The resource type.
        object_type: String,

        /// The resource id.
        id: String,
    },

    /// Create a resource.
    Create {
        /// The resource type.
        object_type: String,

        #[command(flatten)]
        body: BodyArgs,
    },

    /// Update a resource.
    Update {
        /// The resource type.
        object_type: String,

        /// The resource id.
        id: String,

        #[command(flatten)]
        body: BodyArgs,
    },

    /// Delete a resource.
    Delete {
        /// The resource type.
        object_type: String,

        /// The resource id.
        id: String,
    },

    /// Fetch a resource, creating it if it cannot be fetched.
    FetchOrCreate {
        /// The resource type.
        object_type: String,

        /// The resource id to try first.
        id: String,

        #[command(flatten)]
        body: BodyArgs,

        /// Only create when the fetch reports 404.
        #[arg(long, default_value = "false")]
        only_if_missing: bool,
    },
}

/// JSON:API `attributes` and `relationships` given on the command line.
#[derive(Args, Debug, Clone)]
pub struct BodyArgs {
    /// Attributes as a JSON object.
    #[arg(long, short = 'a', default_value = "{}")]
    pub attributes: String,

    /// Relationships as a JSON object.
    #[arg(long, short = 'r', default_value = "{}")]
    pub relationships: String,
}

impl BodyArgs {
    /// Parse both arguments into JSON objects.
    pub fn parse(&self) -> Result<(Members, Members)> {
        Ok((
            parse_members("attributes", &self.attributes)?,
            parse_members("relationships", &self.relationships)?,
        ))
    }
}

fn parse_members(name: &str, raw: &str) -> Result<Members> {
    match serde_json::from_str::<serde_json::Value>(raw)? {
        serde_json::Value::Object(map) => Ok(map),
        _ => Err(SeekError::InvalidArgument(format!(
            "--{name} must be a JSON object"
        ))),
    }
}

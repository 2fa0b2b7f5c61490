//! FAIRDOM-SEEK API client library.
//!
//! A thin client for the JSON:API of a FAIRDOM-SEEK instance: log in, then
//! create, list, fetch, update and delete resources of the types the
//! server exposes (studies, assays, data files, ...).
//!
//! # Quick Start
//!
//! ```no_run
//! use seekapi::{Members, SeekClient};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> seekapi::Result<()> {
//!     // Create client from environment variables
//!     let mut client = SeekClient::from_env()?;
//!     client.login(Some("my-api-token")).await?;
//!
//!     // List all studies
//!     let studies = client.list("studies").await?;
//!     println!("Found {} studies", studies.len());
//!
//!     // Fetch a study, or create it if it cannot be fetched
//!     let mut attributes = Members::new();
//!     attributes.insert("title".to_string(), json!("Growth curves"));
//!     let study = client
//!         .fetch_or_create("studies", "42", attributes, Members::new())
//!         .await?;
//!     println!("Study {} (created: {})", study.resource().id, study.was_created());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`SeekClient`] owns the connection pool and the session created by
//!   [`SeekClient::login`].
//! - [`ResourceRegistry`] holds the resource types accepted by each
//!   [`Operation`]; types are checked before any request is sent.
//! - Responses are decoded into [`Resource`], which keeps the whole JSON:API
//!   payload; failures become [`SeekError`].
//!
//! # Configuration
//!
//! [`ClientConfig::from_env`] reads:
//!
//! - `SEEK_API_URL` (required) - Base URL of the SEEK instance
//! - `SEEK_TIMEOUT_SECS` (optional) - Request timeout, defaults to 60
//! - `SEEK_IPV6` (optional) - Set to `false` to connect over IPv4 only

pub mod cli;
mod client;
mod config;
mod credentials;
mod error;
mod models;
mod operations;
mod output;
mod registry;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::SeekClient;
pub use config::{ClientConfig, CreateFallback, DEFAULT_TIMEOUT};
pub use credentials::{CredentialProvider, Credentials, PromptCredentials, StaticCredentials};
pub use error::{Result, SeekError};
pub use operations::FetchOrCreate;
pub use registry::{Operation, ResourceRegistry, SEEK_RESOURCE_TYPES};

// Re-export models
pub use models::{Document, ErrorDocument, ErrorObject, Members, Resource, ResourceObject};

// Re-export output formatting
pub use output::PrettyPrint;

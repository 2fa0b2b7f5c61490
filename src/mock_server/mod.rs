//! Mock FAIRDOM-SEEK server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the
//! FAIRDOM-SEEK JSON:API for integration and end-to-end testing. Unlike
//! wiremock which mocks at the HTTP level per-test, this server maintains
//! state across requests, enabling realistic workflow testing.
//!
//! # Example
//!
//! ```ignore
//! use seekapi::mock_server::{MockServer, DEFAULT_TOKEN};
//! use seekapi::SeekClient;
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let mut client = SeekClient::new(server.url(), true).unwrap();
//!     client.login(Some(DEFAULT_TOKEN)).await.unwrap();
//!
//!     // Server comes with default fixtures
//!     let study = client.fetch("studies", "1").await.unwrap();
//!     assert_eq!(study.title(), Some("Test Study"));
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures, DEFAULT_TOKEN};
pub use server::MockServer;
pub use state::MockState;

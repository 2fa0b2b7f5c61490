//! HTTP request handlers for the mock server.

pub mod resources;

pub use resources::*;

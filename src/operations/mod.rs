//! CRUD operations on FAIRDOM-SEEK resources.
//!
//! Every operation checks the resource type against the client's
//! [`ResourceRegistry`](crate::ResourceRegistry) first, then requires a
//! session, then sends exactly one request (two for `fetch_or_create`
//! when it falls back).

mod create;
mod delete;
mod fetch;
mod fetch_or_create;
mod list;
mod update;

pub use fetch_or_create::FetchOrCreate;

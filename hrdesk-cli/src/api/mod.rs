//! Document store client
//!
//! All access to the remote store goes through the [`DocumentStore`] trait,
//! so screens and bulk operations never talk to HTTP directly. `HttpStore`
//! is the real client; tests run against the in-memory implementation.

pub mod http;
#[cfg(test)]
pub mod memory;
pub mod store;

pub use http::HttpStore;
pub use store::{DocumentStore, Record};

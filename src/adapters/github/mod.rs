//! GitHub Issues adapter.
//!
//! Implements the issue tracker port against GitHub: duplicate title search
//! over GraphQL, issue and comment creation over REST.

pub mod client;
pub mod models;

pub use client::GitHubClient;

//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the async trait interface the GitHub adapter
//! implements:
//! - IssueTracker: search, create-issue and create-comment operations
//!
//! Keeping the tracker behind a trait lets the router run against a
//! fabricated tracker in tests.

pub mod issue_tracker;

pub use issue_tracker::IssueTracker;

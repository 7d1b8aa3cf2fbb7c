//! Feedback services: rendering, client detection, dedupe and routing.

pub mod client_metadata;
pub mod duplicate_resolver;
pub mod issue_composer;
pub mod submission_router;
pub mod table_renderer;

pub use client_metadata::{extract_client_metadata, ClientMetadata};
pub use duplicate_resolver::find_matching_issue;
pub use issue_composer::compose_issue;
pub use submission_router::SubmissionRouter;
pub use table_renderer::{render_key_value_table, render_table};

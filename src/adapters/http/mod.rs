//! Inbound HTTP adapter.

pub mod feedback_http;

pub use feedback_http::{FeedbackHttpConfig, FeedbackHttpServer};

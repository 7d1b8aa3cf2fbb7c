//! Domain layer for the feedback intake service
//!
//! This module contains the feedback models, the tracker port and the
//! error taxonomy. Nothing here performs I/O.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{FeedbackError, FeedbackResult};

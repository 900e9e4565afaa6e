//! Utility functions module
//!
//! Contains helpers for human-readable formatting.

pub mod format;

pub use format::{describe_poster, format_bytes, image_kind};

//! Core data types for the notes pipeline.
//!
//! Everything here is plain data with no I/O and no async. The `serve`
//! crate produces these values from stored markdown, and the `edge`
//! crate turns them into HTTP responses.

pub mod meta;
pub mod note;
pub mod setting;

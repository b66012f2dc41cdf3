//! Storage-to-HTML pipeline for markdown notes.
//!
//! The stages are small, composable functions: resolve the request
//! host to a content domain, expand a slug into candidate storage
//! keys, probe the store tiers for the first hit, then parse, rewrite
//! and render the document into a [`domain::note::Note`].
//!
//! Every stage except the store probes is pure. Misses travel as
//! `Option`; only the storage layer has an error type.

pub mod assemble;
pub mod fetch;
pub mod fm;
pub mod meta;
pub mod render;
pub mod resolver;
pub mod store;
pub mod wikilink;

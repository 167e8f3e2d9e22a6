//! Vernacular Engine — rule-based Telugu content generation.
//!
//! Parses a loosely formatted knowledge document into typed records,
//! looks them up by normalized key, and renders warm, vernacular-flavored
//! responses through a template-and-format pipeline. No learning, no
//! session state beyond a single request.

pub mod core;
pub mod schema;

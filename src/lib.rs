//! Snippet Press — randomized story snippets for a frontier newspaper.
//!
//! Draws one character, one setting, one event, and one sentence template
//! from JSON data pools and fills the template's `{placeholders}` with the
//! chosen fields. Missing fields fall back to fixed defaults, and every
//! failure is reported as readable text instead of a crash.

pub mod config;
pub mod core;
pub mod schema;

//! Infer named record types from JSON sample payloads and emit them as Rust
//! source.
//!
//! Pipeline: repair raw sample text, parse, recursively synthesize named
//! composites into an append-only registry, then render the registry as
//! serde-annotated structs. Document scraping and output file placement stay
//! outside this crate; it consumes in-memory samples and produces source text.

pub mod cli;
pub mod emit;
pub mod error;
pub mod ir;
pub mod naming;
pub mod registry;
pub mod repair;
pub mod synth;

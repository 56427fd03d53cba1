//! Infrastructure adapters for handlebars-rev.
//!
//! This crate implements the ports defined in `hbrev-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod engine;
pub mod filesystem;

// Re-export commonly used adapters
pub use engine::{HandlebarsEngine, HandlebarsOptions};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};

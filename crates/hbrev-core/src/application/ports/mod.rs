//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `hbrev-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: enumerate, read, write
//!   - `TemplateEngine`: register partials, compile, render
//!   - `RenderObserver`: progress notices (optional)

pub mod output;

pub use output::{Filesystem, RenderObserver, TemplateEngine};

#[cfg(test)]
pub use output::{MockFilesystem, MockRenderObserver, MockTemplateEngine};

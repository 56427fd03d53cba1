//! Core domain layer for handlebars-rev.
//!
//! Pure types with no I/O. Reading files and running templates is done
//! through the ports in [`crate::application::ports`].
//!
//! - **No async**: domain logic is synchronous
//! - **No I/O**: no filesystem or engine calls
//! - **Immutable values**: everything is `Clone + PartialEq`

pub mod error;
pub mod job;
pub mod partial;
pub mod render;

pub use error::DomainError;
pub use job::{DEFAULT_PARTIALS_DIR, RenderJob, RenderJobBuilder};
pub use partial::{Partial, PartialName, PartialRegistry};
pub use render::{CompiledTemplate, RenderData, RenderReport};

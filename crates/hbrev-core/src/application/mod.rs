//! Application layer for handlebars-rev.
//!
//! This layer contains:
//! - **Services**: the render pipeline (`RenderService`)
//! - **Ports**: traits for the filesystem and the template engine
//! - **Errors**: I/O, parse, and template failures
//!
//! The application layer coordinates the domain layer; naming and registry
//! rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::RenderService;

pub use ports::{Filesystem, RenderObserver, TemplateEngine};

pub use error::ApplicationError;

//! Application services - orchestrate use cases.

pub mod render_service;

pub use render_service::RenderService;

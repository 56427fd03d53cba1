//! Command handlers.

pub mod render;

//! handlebars-rev Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the
//! `handlebars-rev` document renderer, following hexagonal (ports and
//! adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │        hbrev-cli (handlebars-rev)       │
//! │     (Builds a RenderJob from flags)     │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │            (RenderService)              │
//! │   load ∥ load ∥ load → register →       │
//! │   compile → render → write              │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │     (Filesystem, TemplateEngine)        │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     hbrev-adapters (Infrastructure)     │
//! │ (LocalFilesystem, HandlebarsEngine, ..) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hbrev_core::{application::RenderService, domain::RenderJob};
//!
//! # async fn demo(filesystem: Box<dyn hbrev_core::application::ports::Filesystem>,
//! #               engine: Box<dyn hbrev_core::application::ports::TemplateEngine>)
//! #               -> hbrev_core::error::HbrevResult<()> {
//! let job = RenderJob::builder()
//!     .main("src/index.hbs")
//!     .partials_dir("src/partials")
//!     .data("src/data.json")
//!     .output("sheet.html")
//!     .build()?;
//!
//! let mut service = RenderService::new(filesystem, engine);
//! let report = service.render(&job).await?;
//! println!("wrote {} bytes", report.bytes_written);
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

//! # issuesync-renderer
//!
//! minijinja-based rendering of issue title and body templates.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use issuesync_core::{EventInfo, RepoRef};
//! use issuesync_renderer::{RenderContext, TemplateEngine};
//!
//! let ctx = RenderContext::new(
//!     RepoRef::new("octo", "demo"),
//!     EventInfo::default(),
//!     std::env::vars(),
//!     Utc::now(),
//! );
//! let engine = TemplateEngine::new();
//! if let Ok(issue) = engine.render_issue("Weekly {{ date | date('YYYY-MM-DD') }}", "Hi", &ctx) {
//!     println!("{}", issue.title);
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod filters;

pub use context::RenderContext;
pub use engine::TemplateEngine;
pub use error::{RenderError, TemplatePart};

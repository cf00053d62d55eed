//! Error types for issuesync-renderer.

use std::fmt;

use thiserror::Error;

/// Which half of an issue a template belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplatePart {
    Title,
    Body,
}

impl fmt::Display for TemplatePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplatePart::Title => write!(f, "title"),
            TemplatePart::Body => write!(f, "body"),
        }
    }
}

/// All errors that can arise from template rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Syntax error, unknown filter, or failing filter in a free-standing template.
    #[error("template error: {0}")]
    Engine(#[from] minijinja::Error),

    /// Same as [`RenderError::Engine`], tagged with the issue part that failed.
    #[error("cannot render issue {part}: {source}")]
    Template {
        part: TemplatePart,
        #[source]
        source: minijinja::Error,
    },
}

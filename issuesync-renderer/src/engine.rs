//! minijinja rendering engine for issue templates.
//!
//! Configuration:
//! - auto-escaping off, since bodies are Markdown
//! - undefined values (and attributes of them) render as `""`
//! - trailing newlines are kept
//! - the [`date`](crate::filters::date) filter is registered

use minijinja::{AutoEscape, Environment, UndefinedBehavior};

use issuesync_core::RenderedIssue;

use crate::context::RenderContext;
use crate::error::{RenderError, TemplatePart};
use crate::filters;

/// Reusable template environment. Create once per run.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_undefined_behavior(UndefinedBehavior::Chainable);
        env.set_keep_trailing_newline(true);
        env.add_filter("date", filters::date);
        TemplateEngine { env }
    }

    /// Render one template string against `ctx`.
    pub fn render_str(&self, template: &str, ctx: &RenderContext) -> Result<String, RenderError> {
        Ok(self.env.render_str(template, ctx)?)
    }

    /// Render an issue's title and body templates.
    pub fn render_issue(
        &self,
        title: &str,
        body: &str,
        ctx: &RenderContext,
    ) -> Result<RenderedIssue, RenderError> {
        let render = |part: TemplatePart, source: &str| {
            self.env
                .render_str(source, ctx)
                .map_err(|source| RenderError::Template { part, source })
        };
        Ok(RenderedIssue {
            title: render(TemplatePart::Title, title)?,
            body: render(TemplatePart::Body, body)?,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}
